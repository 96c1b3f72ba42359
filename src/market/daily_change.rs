use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::model::comparison::DailyComparison;
use crate::model::snapshot::PriceSnapshot;

/// Compute today-vs-yesterday change per symbol.
///
/// "Today" is the latest snapshot per symbol on `reference_date`; "yesterday"
/// is the arithmetic mean of `current_price` over the previous day's
/// snapshots. Symbols missing from either day are excluded (inner join), as
/// are symbols whose yesterday average is exactly zero - their percentage
/// change is undefined rather than clamped. Output is sorted by
/// `percentage_change` descending.
pub fn compute_daily_comparison(
    snapshots: &[PriceSnapshot],
    reference_date: NaiveDate,
) -> Vec<DailyComparison> {
    let yesterday = reference_date - Duration::days(1);

    // Latest today-snapshot per symbol. `>=` means a later input row wins a
    // timestamp tie, matching keep-last dedup over a stable sort.
    let mut latest_today: HashMap<&str, &PriceSnapshot> = HashMap::new();
    // Running (sum, count) of yesterday's prices per symbol.
    let mut yesterday_prices: HashMap<&str, (f64, u32)> = HashMap::new();

    for snap in snapshots {
        let date = snap.observed_date();
        if date == reference_date {
            match latest_today.get(snap.symbol.as_str()) {
                Some(existing) if snap.last_updated < existing.last_updated => {}
                _ => {
                    latest_today.insert(&snap.symbol, snap);
                }
            }
        } else if date == yesterday {
            let entry = yesterday_prices.entry(&snap.symbol).or_insert((0.0, 0));
            entry.0 += snap.current_price;
            entry.1 += 1;
        }
    }

    let mut comparisons: Vec<DailyComparison> = latest_today
        .values()
        .filter_map(|today| {
            let (sum, count) = yesterday_prices.get(today.symbol.as_str())?;
            let avg = sum / f64::from(*count);
            if avg == 0.0 {
                return None;
            }
            Some(DailyComparison {
                symbol: today.symbol.clone(),
                current_price: today.current_price,
                avg_price_yesterday: avg,
                percentage_change: (today.current_price - avg) / avg * 100.0,
            })
        })
        .collect();

    // Secondary key keeps the order deterministic when changes tie, since
    // the join map iterates in arbitrary order.
    comparisons.sort_by(|a, b| {
        b.percentage_change
            .total_cmp(&a.percentage_change)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    comparisons
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn snap(symbol: &str, price: f64, day_offset: i64, hour: u32) -> PriceSnapshot {
        let date = day() + Duration::days(day_offset);
        PriceSnapshot {
            coin_id: symbol.to_ascii_lowercase(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            current_price: price,
            market_cap: 0.0,
            last_updated: Utc
                .with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn inner_join_drops_one_sided_symbols() {
        let rows = vec![
            snap("BTC", 100.0, 0, 9),
            snap("BTC", 80.0, -1, 9),
            snap("ETH", 50.0, 0, 9), // today only
            snap("SOL", 20.0, -1, 9), // yesterday only
        ];
        let out = compute_daily_comparison(&rows, day());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "BTC");
    }

    #[test]
    fn latest_today_snapshot_wins() {
        let rows = vec![
            snap("BTC", 100.0, 0, 9),
            snap("BTC", 110.0, 0, 15),
            snap("BTC", 105.0, 0, 12),
            snap("BTC", 80.0, -1, 9),
        ];
        let out = compute_daily_comparison(&rows, day());
        assert_eq!(out[0].current_price, 110.0);
    }

    #[test]
    fn timestamp_tie_keeps_last_input_row() {
        let rows = vec![
            snap("BTC", 100.0, 0, 9),
            snap("BTC", 120.0, 0, 9),
            snap("BTC", 80.0, -1, 9),
        ];
        let out = compute_daily_comparison(&rows, day());
        assert_eq!(out[0].current_price, 120.0);
    }

    #[test]
    fn yesterday_average_is_arithmetic_mean() {
        let rows = vec![
            snap("BTC", 100.0, 0, 9),
            snap("BTC", 70.0, -1, 8),
            snap("BTC", 90.0, -1, 16),
        ];
        let out = compute_daily_comparison(&rows, day());
        assert!((out[0].avg_price_yesterday - 80.0).abs() < f64::EPSILON);
        assert!((out[0].percentage_change - 25.0).abs() < 1e-9);
    }

    #[test]
    fn change_sign_follows_price_direction() {
        let rows = vec![
            snap("UP", 110.0, 0, 9),
            snap("UP", 100.0, -1, 9),
            snap("DN", 90.0, 0, 9),
            snap("DN", 100.0, -1, 9),
        ];
        let out = compute_daily_comparison(&rows, day());
        let up = out.iter().find(|c| c.symbol == "UP").unwrap();
        let dn = out.iter().find(|c| c.symbol == "DN").unwrap();
        assert!(up.percentage_change > 0.0);
        assert!(dn.percentage_change < 0.0);
    }

    #[test]
    fn zero_yesterday_average_is_excluded() {
        let rows = vec![
            snap("ZRO", 5.0, 0, 9),
            snap("ZRO", 0.0, -1, 9),
            snap("BTC", 100.0, 0, 9),
            snap("BTC", 80.0, -1, 9),
        ];
        let out = compute_daily_comparison(&rows, day());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "BTC");
    }

    #[test]
    fn sorted_descending_by_change() {
        let rows = vec![
            snap("A", 105.0, 0, 9),
            snap("A", 100.0, -1, 9),
            snap("B", 120.0, 0, 9),
            snap("B", 100.0, -1, 9),
            snap("C", 90.0, 0, 9),
            snap("C", 100.0, -1, 9),
        ];
        let out = compute_daily_comparison(&rows, day());
        let symbols: Vec<&str> = out.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "A", "C"]);
    }

    #[test]
    fn days_outside_window_are_ignored() {
        let rows = vec![
            snap("BTC", 100.0, 0, 9),
            snap("BTC", 80.0, -1, 9),
            snap("BTC", 10.0, -2, 9),
            snap("BTC", 999.0, 1, 9),
        ];
        let out = compute_daily_comparison(&rows, day());
        assert_eq!(out[0].current_price, 100.0);
        assert!((out[0].avg_price_yesterday - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deterministic_for_fixed_input() {
        let rows = vec![
            snap("BTC", 100.0, 0, 9),
            snap("BTC", 80.0, -1, 9),
            snap("ETH", 60.0, 0, 9),
            snap("ETH", 50.0, -1, 9),
        ];
        assert_eq!(
            compute_daily_comparison(&rows, day()),
            compute_daily_comparison(&rows, day())
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(compute_daily_comparison(&[], day()).is_empty());
    }
}
