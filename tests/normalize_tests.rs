use chrono::{TimeZone, Utc};

use coinwatch::market::normalize::{compute_normalized_series, FLAT_SERIES_VALUE};
use coinwatch::model::snapshot::PriceSnapshot;

fn snap(coin_id: &str, price: f64, day: u32, hour: u32, minute: u32) -> PriceSnapshot {
    PriceSnapshot {
        coin_id: coin_id.to_string(),
        symbol: coin_id.to_ascii_uppercase(),
        name: coin_id.to_string(),
        current_price: price,
        market_cap: 0.0,
        last_updated: Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0).unwrap(),
    }
}

fn coins(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn shared_timeline_covers_all_selected_coins() {
    let rows = vec![
        snap("bitcoin", 10.0, 15, 0, 0),
        snap("bitcoin", 20.0, 15, 6, 0),
        snap("ethereum", 5.0, 15, 3, 0),
        snap("ethereum", 8.0, 15, 9, 0),
    ];
    let table = compute_normalized_series(&rows, &coins(&["bitcoin", "ethereum"]));
    // Global range 00:00..=09:00 -> 10 hourly slots for both columns.
    assert_eq!(table.timestamps.len(), 10);
    for column in &table.columns {
        assert_eq!(column.values.len(), 10);
    }
}

#[test]
fn forward_fill_carries_without_interpolating() {
    // Observations at 00:00 (10) and 03:00 (15): the gap hours resolve to 10.
    let rows = vec![snap("bitcoin", 10.0, 15, 0, 0), snap("bitcoin", 15.0, 15, 3, 0)];
    let table = compute_normalized_series(&rows, &coins(&["bitcoin"]));
    let values = &table.column("bitcoin").unwrap().values;
    assert_eq!(values[1], values[0], "01:00 must carry 00:00's price");
    assert_eq!(values[2], values[0], "02:00 must carry 00:00's price");
    assert_eq!(values[0], Some(0.0));
    assert_eq!(values[3], Some(1.0));
}

#[test]
fn bounds_are_exact_for_non_degenerate_series() {
    let rows = vec![
        snap("bitcoin", 14.0, 15, 0, 0),
        snap("bitcoin", 10.0, 15, 1, 0),
        snap("bitcoin", 22.0, 15, 2, 0),
        snap("bitcoin", 18.0, 15, 3, 0),
    ];
    let table = compute_normalized_series(&rows, &coins(&["bitcoin"]));
    let values: Vec<f64> = table
        .column("bitcoin")
        .unwrap()
        .values
        .iter()
        .flatten()
        .copied()
        .collect();
    assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    assert_eq!(values.iter().filter(|&&v| v == 0.0).count(), 1);
    assert_eq!(values.iter().filter(|&&v| v == 1.0).count(), 1);
}

#[test]
fn degenerate_range_uses_sentinel_not_nan() {
    let rows = vec![
        snap("tether", 1.0, 15, 0, 0),
        snap("tether", 1.0, 15, 5, 0),
    ];
    let table = compute_normalized_series(&rows, &coins(&["tether"]));
    for value in table.column("tether").unwrap().values.iter().flatten() {
        assert!(!value.is_nan());
        assert_eq!(*value, FLAT_SERIES_VALUE);
    }
}

#[test]
fn empty_selection_signals_no_data() {
    let rows = vec![snap("bitcoin", 10.0, 15, 0, 0)];
    assert!(compute_normalized_series(&rows, &[]).is_empty());
    assert!(compute_normalized_series(&rows, &coins(&["unlisted"])).is_empty());
    assert!(compute_normalized_series(&[], &coins(&["bitcoin"])).is_empty());
}

#[test]
fn late_starting_coin_has_leading_gaps_only() {
    let rows = vec![
        snap("bitcoin", 10.0, 15, 0, 0),
        snap("bitcoin", 20.0, 15, 5, 0),
        snap("newcoin", 1.0, 15, 3, 0),
        snap("newcoin", 2.0, 15, 5, 0),
    ];
    let table = compute_normalized_series(&rows, &coins(&["bitcoin", "newcoin"]));
    let newcoin = table.column("newcoin").unwrap();
    assert_eq!(newcoin.values[..3], [None, None, None]);
    assert!(newcoin.values[3..].iter().all(Option::is_some));
}

#[test]
fn multi_day_range_builds_one_slot_per_hour() {
    let rows = vec![
        snap("bitcoin", 10.0, 14, 23, 0),
        snap("bitcoin", 20.0, 15, 2, 30),
    ];
    let table = compute_normalized_series(&rows, &coins(&["bitcoin"]));
    // 23:00 on the 14th through 02:30 on the 15th -> 23:00..=02:00.
    assert_eq!(table.timestamps.len(), 4);
    assert_eq!(
        table.timestamps[0],
        Utc.with_ymd_and_hms(2024, 3, 14, 23, 0, 0).unwrap()
    );
}
