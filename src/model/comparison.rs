/// Today-vs-yesterday change for one symbol.
///
/// Produced only for symbols observed on both days; `percentage_change` is
/// always finite (symbols with a zero yesterday average are dropped upstream).
#[derive(Debug, Clone, PartialEq)]
pub struct DailyComparison {
    pub symbol: String,
    pub current_price: f64,
    pub avg_price_yesterday: f64,
    pub percentage_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Up,
    Down,
}

impl ChangeDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            ChangeDirection::Up => "▲",
            ChangeDirection::Down => "▼",
        }
    }
}

impl DailyComparison {
    /// Strictly positive change counts as up; zero and negative as down.
    pub fn direction(&self) -> ChangeDirection {
        if self.percentage_change > 0.0 {
            ChangeDirection::Up
        } else {
            ChangeDirection::Down
        }
    }

    /// Ranked-list display text, e.g. `BTC: $64,230.12 (▲ 2.41%)`.
    /// Coloring by direction is the renderer's job.
    pub fn display_string(&self) -> String {
        format!(
            "{}: ${} ({} {:.2}%)",
            self.symbol,
            format_price(self.current_price),
            self.direction().arrow(),
            self.percentage_change.abs()
        )
    }
}

/// Format a price with thousands separators for dollar amounts, keeping
/// extra precision for sub-dollar coins where two decimals would round to 0.
pub fn format_price(price: f64) -> String {
    if price >= 1.0 {
        // Round once at cent precision so e.g. 999.999 carries into the
        // whole part instead of clamping at .99.
        let total_cents = (price * 100.0).round() as i64;
        let whole = total_cents / 100;
        let cents = total_cents % 100;
        let mut digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        while digits.len() > 3 {
            let rest = digits.split_off(digits.len() - 3);
            grouped = if grouped.is_empty() {
                rest
            } else {
                format!("{},{}", rest, grouped)
            };
        }
        grouped = if grouped.is_empty() {
            digits
        } else {
            format!("{},{}", digits, grouped)
        };
        format!("{}.{:02}", grouped, cents)
    } else {
        format!("{:.6}", price)
    }
}
