use chrono::{DateTime, NaiveDate, Utc};

/// One timestamped price/market-cap observation for one coin.
///
/// Rows come straight from the snapshot table and are never mutated; every
/// derived view is recomputed from a slice of these.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub coin_id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub last_updated: DateTime<Utc>,
}

impl PriceSnapshot {
    /// UTC calendar date of the observation, used for today/yesterday bucketing.
    pub fn observed_date(&self) -> NaiveDate {
        self.last_updated.date_naive()
    }
}

/// Most recent per-coin record projected for the comparison cards.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinInfo {
    pub coin_name: String,
    pub price: f64,
    pub market_cap: f64,
    pub ticker: String,
}
