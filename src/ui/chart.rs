use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};

use crate::model::series::NormalizedTable;

/// Line colors assigned to coins in selection order, wrapping around.
pub const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

pub fn series_color(index: usize) -> Color {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Multi-line chart of per-coin normalized prices on a shared 0-1 scale.
pub struct TrendChart<'a> {
    table: &'a NormalizedTable,
}

impl<'a> TrendChart<'a> {
    pub fn new(table: &'a NormalizedTable) -> Self {
        Self { table }
    }
}

impl Widget for TrendChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Normalized Price Trend ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 8 {
            return;
        }

        if self.table.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y + inner.height / 2,
                "No data available. Press [C] to select coins.",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        // Row 0 holds the legend; the rest is plot area.
        let mut legend_x = inner.x + 5;
        for (i, column) in self.table.columns.iter().enumerate() {
            let label = format!("■ {}  ", column.coin_id);
            // Budget in displayed cells, not bytes (the marker is multi-byte).
            let label_width = label.chars().count() as u16;
            if legend_x + label_width >= inner.x + inner.width {
                break;
            }
            buf.set_string(
                legend_x,
                inner.y,
                &label,
                Style::default().fg(series_color(i)),
            );
            legend_x += label_width;
        }

        let plot_top = inner.y + 1;
        let plot_height = (inner.height - 1) as usize;
        let plot_width = inner.width as usize;
        let slots = self.table.timestamps.len();

        for (i, column) in self.table.columns.iter().enumerate() {
            let style = Style::default().fg(series_color(i));
            for x_offset in 0..plot_width {
                // Sample the timeline across the available width.
                let slot = x_offset * slots / plot_width;
                let Some(value) = column.values[slot] else {
                    continue;
                };
                let y_pos = ((1.0 - value) * (plot_height - 1) as f64).round() as usize;
                let y = plot_top + y_pos.min(plot_height - 1) as u16;
                buf.set_string(inner.x + x_offset as u16, y, "●", style);
            }
        }

        // 0-1 scale labels overlay the left edge of the plot.
        buf.set_string(
            inner.x,
            plot_top,
            "1.0",
            Style::default().fg(Color::DarkGray),
        );
        buf.set_string(
            inner.x,
            inner.y + inner.height - 1,
            "0.0",
            Style::default().fg(Color::DarkGray),
        );
        let from = self.table.timestamps[0].format("%m-%d %H:%M").to_string();
        let to = self.table.timestamps[slots - 1]
            .format("%m-%d %H:%M")
            .to_string();
        buf.set_string(
            inner.x + 4,
            inner.y + inner.height - 1,
            &from,
            Style::default().fg(Color::DarkGray),
        );
        if to.len() as u16 + 1 < inner.width {
            buf.set_string(
                inner.x + inner.width - to.len() as u16,
                inner.y + inner.height - 1,
                &to,
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}
