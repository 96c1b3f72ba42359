use std::collections::HashMap;

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::model::series::{CoinColumn, NormalizedTable};
use crate::model::snapshot::PriceSnapshot;

/// Value emitted for a coin whose observed price range has zero width
/// (constant or single-point series), where min-max scaling is undefined.
pub const FLAT_SERIES_VALUE: f64 = 0.5;

/// Resample the selected coins' histories onto a shared hourly timeline and
/// min-max normalize each coin into [0, 1].
///
/// The timeline spans floor-to-hour(min) through max of `last_updated` over
/// the selected rows, inclusive. Per coin, each hour slot takes the first
/// input row mapping to it; empty slots carry the most recent prior price
/// forward, and slots before the first observation stay `None` (no
/// back-fill). An empty selection, or one matching no rows, yields
/// `NormalizedTable::empty()`.
pub fn compute_normalized_series(
    snapshots: &[PriceSnapshot],
    coin_ids: &[String],
) -> NormalizedTable {
    let selected: Vec<&PriceSnapshot> = snapshots
        .iter()
        .filter(|s| coin_ids.iter().any(|id| id == &s.coin_id))
        .collect();
    if selected.is_empty() {
        return NormalizedTable::empty();
    }

    let min_ts = selected.iter().map(|s| s.last_updated).min().expect("non-empty");
    let max_ts = selected.iter().map(|s| s.last_updated).max().expect("non-empty");
    let timestamps = hourly_timeline(min_ts, max_ts);
    let slots = timestamps.len();

    // First input row mapping to an (hour, coin) slot wins.
    let mut raw_by_coin: HashMap<&str, Vec<Option<f64>>> = HashMap::new();
    for snap in &selected {
        let slot = (floor_to_hour(snap.last_updated) - timestamps[0]).num_hours() as usize;
        let column = raw_by_coin
            .entry(snap.coin_id.as_str())
            .or_insert_with(|| vec![None; slots]);
        if column[slot].is_none() {
            column[slot] = Some(snap.current_price);
        }
    }

    // Keep the caller's selection order for the chart legend.
    let columns = coin_ids
        .iter()
        .filter_map(|coin_id| {
            let mut values = raw_by_coin.remove(coin_id.as_str())?;
            forward_fill(&mut values);
            normalize_in_place(&mut values);
            Some(CoinColumn {
                coin_id: coin_id.clone(),
                values,
            })
        })
        .collect();

    NormalizedTable {
        timestamps,
        columns,
    }
}

fn floor_to_hour(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

fn hourly_timeline(min_ts: DateTime<Utc>, max_ts: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let mut timeline = Vec::new();
    let mut cursor = floor_to_hour(min_ts);
    while cursor <= max_ts {
        timeline.push(cursor);
        cursor += Duration::hours(1);
    }
    timeline
}

fn forward_fill(values: &mut [Option<f64>]) {
    let mut last_seen = None;
    for value in values.iter_mut() {
        match value {
            Some(v) => last_seen = Some(*v),
            None => *value = last_seen,
        }
    }
}

fn normalize_in_place(values: &mut [Option<f64>]) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.iter().flatten() {
        min = min.min(*v);
        max = max.max(*v);
    }
    let range = max - min;
    for value in values.iter_mut() {
        if let Some(v) = value {
            *value = if range == 0.0 {
                Some(FLAT_SERIES_VALUE)
            } else {
                Some((*v - min) / range)
            };
        }
    }
}
