use std::sync::{Arc, Mutex};

use postgres::{Client, NoTls};
use tokio::sync::mpsc;

use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::event::AppEvent;
use crate::model::snapshot::PriceSnapshot;

/// Reads the append-only snapshot table. One fixed query, no writes.
pub struct SnapshotStore {
    config: DatabaseConfig,
}

impl SnapshotStore {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Fetch every snapshot row. Blocking; run via `spawn_blocking` from the
    /// UI loop. Row-decode failures (NULLs, unexpected column types) come
    /// back as errors, not panics.
    pub fn fetch_all(&self) -> Result<Vec<PriceSnapshot>, AppError> {
        let mut client = Client::connect(&self.config.connection_string(), NoTls)?;
        let query = format!(
            "SELECT coin_id, symbol, name, current_price, market_cap, last_updated FROM {}",
            self.config.snapshot_table
        );
        let rows = client.query(query.as_str(), &[])?;
        let mut snapshots = Vec::with_capacity(rows.len());
        for row in &rows {
            snapshots.push(PriceSnapshot {
                coin_id: row.try_get("coin_id")?,
                symbol: row.try_get("symbol")?,
                name: row.try_get("name")?,
                current_price: row.try_get("current_price")?,
                market_cap: row.try_get("market_cap")?,
                last_updated: row.try_get("last_updated")?,
            });
        }
        Ok(snapshots)
    }
}

/// Process-wide read-through cache over the snapshot table.
///
/// There is a single global snapshot set, so the cache is keyed by nothing:
/// first `load` fetches, later calls return the shared copy. Invalidation is
/// explicit (the refresh key), never time-based.
pub struct SnapshotCache {
    store: SnapshotStore,
    cached: Mutex<Option<Arc<Vec<PriceSnapshot>>>>,
}

impl SnapshotCache {
    pub fn new(store: SnapshotStore) -> Self {
        Self {
            store,
            cached: Mutex::new(None),
        }
    }

    pub fn load(&self) -> Result<Arc<Vec<PriceSnapshot>>, AppError> {
        if let Some(snapshots) = self.cached.lock().expect("cache lock poisoned").as_ref() {
            return Ok(Arc::clone(snapshots));
        }
        let fetched = Arc::new(self.store.fetch_all()?);
        tracing::info!(rows = fetched.len(), "Loaded snapshot table");
        *self.cached.lock().expect("cache lock poisoned") = Some(Arc::clone(&fetched));
        Ok(fetched)
    }

    /// Drop the cached copy so the next `load` re-fetches.
    pub fn invalidate(&self) {
        self.cached.lock().expect("cache lock poisoned").take();
    }
}

/// Kick off a (re)load of the snapshot table without blocking the UI loop.
/// Every outcome reaches the UI as an event: success, load error, or a
/// panicked load task.
pub fn spawn_load(cache: Arc<SnapshotCache>, app_tx: mpsc::Sender<AppEvent>) {
    spawn_supervised(move || cache.load(), app_tx);
}

fn spawn_supervised<F>(load: F, app_tx: mpsc::Sender<AppEvent>)
where
    F: FnOnce() -> Result<Arc<Vec<PriceSnapshot>>, AppError> + Send + 'static,
{
    tokio::spawn(async move {
        let event = match tokio::task::spawn_blocking(load).await {
            Ok(Ok(snapshots)) => AppEvent::SnapshotsLoaded(snapshots),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Snapshot load failed");
                AppEvent::LoadFailed(e.to_string())
            }
            Err(join_err) => {
                tracing::error!(error = %join_err, "Snapshot load task aborted");
                AppEvent::LoadFailed(format!("load task aborted: {}", join_err))
            }
        };
        let _ = app_tx.send(event).await;
    });
}
