use std::sync::Arc;

use crate::model::snapshot::PriceSnapshot;

/// Data-source state shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    SnapshotsLoaded(Arc<Vec<PriceSnapshot>>),
    LoadFailed(String),
}
