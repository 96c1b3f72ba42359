use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::event::LoadState;
use crate::market::selector::SortOrder;
use crate::model::comparison::{format_price, ChangeDirection, DailyComparison};
use crate::model::snapshot::CoinInfo;

use super::CoinSelector;

pub struct StatusBar<'a> {
    pub load_state: &'a LoadState,
    pub snapshot_count: usize,
    pub reference_date: NaiveDate,
    pub sort_order: SortOrder,
    pub filter_label: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let source_status = match self.load_state {
            LoadState::Loading => Span::styled("LOADING", Style::default().fg(Color::Yellow)),
            LoadState::Loaded => Span::styled("LOADED", Style::default().fg(Color::Green)),
            LoadState::Failed(_) => Span::styled("ERROR", Style::default().fg(Color::Red)),
        };

        let line = Line::from(vec![
            Span::styled(
                " coinwatch ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            source_status,
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} snapshots", self.snapshot_count),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.reference_date.format("%Y-%m-%d").to_string(),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" | sort: ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.sort_order.label(), Style::default().fg(Color::White)),
            Span::styled(" | sidebar: ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.filter_label, Style::default().fg(Color::White)),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// Ranked today-vs-yesterday list, colored by change direction.
pub struct SidebarPanel<'a> {
    rows: &'a [DailyComparison],
    scroll: usize,
    error: Option<&'a str>,
}

impl<'a> SidebarPanel<'a> {
    pub fn new(rows: &'a [DailyComparison], scroll: usize) -> Self {
        Self {
            rows,
            scroll,
            error: None,
        }
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

impl Widget for SidebarPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Daily Change ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(error) = self.error {
            let text = format!("Load failed: {}", error);
            Paragraph::new(text)
                .style(Style::default().fg(Color::Red))
                .render(inner, buf);
            return;
        }

        if self.rows.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                "No overlapping today/yesterday data.",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let visible = inner.height as usize;
        for (i, row) in self.rows.iter().skip(self.scroll).take(visible).enumerate() {
            let color = match row.direction() {
                ChangeDirection::Up => Color::Green,
                ChangeDirection::Down => Color::Red,
            };
            buf.set_string(
                inner.x,
                inner.y + i as u16,
                row.display_string(),
                Style::default().fg(color),
            );
        }
    }
}

/// One bordered card per selected coin, three per row.
pub struct CardsPanel<'a> {
    cards: &'a [CoinInfo],
}

impl<'a> CardsPanel<'a> {
    pub fn new(cards: &'a [CoinInfo]) -> Self {
        Self { cards }
    }

    /// Terminal rows needed for `count` cards at three per row.
    pub fn required_height(count: usize) -> u16 {
        let rows = count.div_ceil(3).max(1);
        rows as u16 * 6
    }
}

impl Widget for CardsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() {
            let block = Block::default()
                .title(" Compared Coins ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            let inner = block.inner(area);
            block.render(area, buf);
            buf.set_string(
                inner.x,
                inner.y,
                "No coins selected.",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let row_count = self.cards.len().div_ceil(3);
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(6); row_count])
            .split(area);

        for (row_idx, chunk) in self.cards.chunks(3).enumerate() {
            if row_idx >= row_areas.len() {
                break;
            }
            let card_areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                ])
                .split(row_areas[row_idx]);

            for (col_idx, card) in chunk.iter().enumerate() {
                render_card(card, card_areas[col_idx], buf);
            }
        }
    }
}

fn render_card(card: &CoinInfo, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(format!(" {} ", card.coin_name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let lines = vec![
        Line::from(vec![
            Span::styled("Price:      ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("${}", format_price(card.price)),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Market Cap: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("${}", format_price(card.market_cap)),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Ticker:     ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                card.ticker.to_ascii_uppercase(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];

    Paragraph::new(lines).block(block).render(area, buf);
}

/// Centered popup for picking the coins to compare.
pub struct CoinSelectorPopup<'a> {
    selector: &'a CoinSelector,
}

impl<'a> CoinSelectorPopup<'a> {
    pub fn new(selector: &'a CoinSelector) -> Self {
        Self { selector }
    }
}

impl Widget for CoinSelectorPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(40, 60, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Select Coins [space] toggle [enter] apply [esc] close ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let visible = inner.height as usize;
        // Keep the cursor in view.
        let offset = self.selector.cursor.saturating_sub(visible.saturating_sub(1));
        for (i, coin_id) in self
            .selector
            .options
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
        {
            let marker = if self.selector.chosen.contains(coin_id) {
                "[x]"
            } else {
                "[ ]"
            };
            let style = if i == self.selector.cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            buf.set_string(
                inner.x,
                inner.y + (i - offset) as u16,
                format!("{} {}", marker, coin_id),
                style,
            );
        }
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub struct KeybindBar;

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(" [Q]", Style::default().fg(Color::Yellow)),
            Span::styled("uit  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[R]", Style::default().fg(Color::Yellow)),
            Span::styled("efresh  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[S]", Style::default().fg(Color::Yellow)),
            Span::styled("ort order  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[A]", Style::default().fg(Color::Yellow)),
            Span::styled("ll/selected sidebar  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[C]", Style::default().fg(Color::Yellow)),
            Span::styled("oins  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[↑/↓]", Style::default().fg(Color::Yellow)),
            Span::styled(" scroll", Style::default().fg(Color::DarkGray)),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
