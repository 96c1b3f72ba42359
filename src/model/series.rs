use chrono::{DateTime, Utc};

/// Hourly, per-coin normalized prices pivoted for charting: one row per
/// timestamp, one column per coin, cells in [0, 1].
///
/// `None` cells are slots before a coin's first observation (never
/// back-filled). An empty table is the "no data" signal for the chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    pub timestamps: Vec<DateTime<Utc>>,
    pub columns: Vec<CoinColumn>,
}

/// One coin's column: `values` is parallel to the table's `timestamps`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinColumn {
    pub coin_id: String,
    pub values: Vec<Option<f64>>,
}

impl NormalizedTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty() || self.columns.is_empty()
    }

    pub fn column(&self, coin_id: &str) -> Option<&CoinColumn> {
        self.columns.iter().find(|c| c.coin_id == coin_id)
    }
}
