use farewatch_core::SnapshotRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub snapshots: Arc<dyn SnapshotRepository>,
}

impl AppState {
    pub fn new(snapshots: Arc<dyn SnapshotRepository>) -> Self {
        Self { snapshots }
    }
}
