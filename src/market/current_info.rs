use crate::model::snapshot::{CoinInfo, PriceSnapshot};

/// Most recent snapshot per selected coin, projected for the comparison
/// cards. Output preserves the selection order; coins with no snapshots are
/// skipped. A timestamp tie goes to the later input row.
pub fn latest_coin_info(snapshots: &[PriceSnapshot], coin_ids: &[String]) -> Vec<CoinInfo> {
    coin_ids
        .iter()
        .filter_map(|coin_id| {
            let mut latest: Option<&PriceSnapshot> = None;
            for snap in snapshots.iter().filter(|s| &s.coin_id == coin_id) {
                match latest {
                    Some(best) if snap.last_updated < best.last_updated => {}
                    _ => latest = Some(snap),
                }
            }
            latest.map(|snap| CoinInfo {
                coin_name: snap.name.clone(),
                price: snap.current_price,
                market_cap: snap.market_cap,
                ticker: snap.symbol.clone(),
            })
        })
        .collect()
}
