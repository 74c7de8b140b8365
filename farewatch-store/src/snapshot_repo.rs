use async_trait::async_trait;
use farewatch_core::{CoreError, CoreResult, SnapshotRepository};
use farewatch_shared::RouteResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Snapshot store backed by one JSON array on disk.
///
/// Appends rewrite the whole file through a temp file and a rename, so
/// readers never observe a half-written array. Appends are serialized by
/// `write_lock`; the file has a single writer.
pub struct JsonFileSnapshotRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> CoreResult<Vec<RouteResult>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.storage_error("reading", e)),
        };

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| self.storage_error("parsing", e))
    }

    fn storage_error(&self, action: &str, e: impl std::fmt::Display) -> CoreError {
        CoreError::StorageFailure(format!("{} {}: {}", action, self.path.display(), e))
    }
}

#[async_trait]
impl SnapshotRepository for JsonFileSnapshotRepository {
    async fn append(&self, result: &RouteResult) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;

        // an unreadable history is left untouched rather than overwritten
        let mut records = self.read_records().await?;
        records.push(result.clone());

        let json = serde_json::to_vec_pretty(&records).map_err(|e| self.storage_error("encoding", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error("creating directory for", e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| self.storage_error("writing", e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.storage_error("replacing", e))?;

        debug!(route = %result.route_name, total = records.len(), "Snapshot appended");
        Ok(())
    }

    async fn load_all(&self) -> CoreResult<Vec<RouteResult>> {
        self.read_records().await
    }
}
