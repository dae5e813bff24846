//! File feed — reads whole files from disk.
//!
//! The name a file is loaded under is its base name, which is what duplicate
//! detection keys on: `a/app.log` and `b/app.log` collide.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lognav_core::RawFile;
use tokio::task::{Id, JoinError, JoinSet};

use crate::FeedError;

/// Base name of `path`, lossily decoded.
pub fn display_name(path: &Path) -> Result<String, FeedError> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| FeedError::NoFileName(path.to_path_buf()))
}

/// Read every path concurrently. Results come back in input order; the first
/// read error aborts the whole call.
pub async fn read_files(paths: &[PathBuf]) -> Result<Vec<RawFile>, FeedError> {
    let mut set = JoinSet::new();
    let mut spawned = HashMap::new();
    for (slot, path) in paths.iter().cloned().enumerate() {
        let read = read_one(path.clone());
        let handle = set.spawn(async move { (slot, read.await) });
        spawned.insert(handle.id(), path);
    }

    let mut slots: Vec<Option<RawFile>> = vec![None; paths.len()];
    while let Some(joined) = set.join_next_with_id().await {
        let (_, (slot, result)) = joined.map_err(|e| task_failed(&spawned, e))?;
        slots[slot] = Some(result?);
    }
    Ok(slots.into_iter().flatten().collect())
}

/// A read task that panicked or was cancelled, attributed to its path.
fn task_failed(spawned: &HashMap<Id, PathBuf>, err: JoinError) -> FeedError {
    let path = spawned.get(&err.id()).cloned().unwrap_or_default();
    FeedError::Task { path, source: err }
}

async fn read_one(path: PathBuf) -> Result<RawFile, FeedError> {
    let name = display_name(&path)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| FeedError::Read { path: path.clone(), source })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "file feed: read");
    Ok(RawFile::new(name, String::from_utf8_lossy(&bytes).into_owned()))
}
