use crate::CoreResult;
use async_trait::async_trait;
use farewatch_shared::RouteResult;

/// Append-only storage for route snapshots
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    async fn append(&self, result: &RouteResult) -> CoreResult<()>;

    /// Every stored record, in append order
    async fn load_all(&self) -> CoreResult<Vec<RouteResult>>;
}
