use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::FetchError;
use crate::graph::ProfileGraph;

use super::{FetchRequest, ProfileSource, SourceKind};

/// Serves previously captured `web_profile_info` responses from disk.
///
/// Layout: `<dir>/<username>.json`, one raw response body per file. A
/// username with no file is reported as [`FetchError::ProfileNotFound`],
/// distinct from a captured response whose `data.user` is null.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the snapshot for `username`, or `None` when the username
    /// could escape the snapshot directory.
    fn snapshot_path(&self, username: &str) -> Option<PathBuf> {
        is_plain_username(username).then(|| self.dir.join(format!("{username}.json")))
    }
}

impl ProfileSource for SnapshotSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Snapshot
    }

    async fn fetch_graph(&self, request: &FetchRequest<'_>) -> Result<ProfileGraph, FetchError> {
        let not_found = || FetchError::ProfileNotFound {
            username: request.username.to_owned(),
        };
        let path = self.snapshot_path(request.username).ok_or_else(not_found)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(ProfileGraph::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(FetchError::Snapshot(e)),
        }
    }
}

/// Platform usernames are ASCII letters, digits, `.` and `_`.
fn is_plain_username(username: &str) -> bool {
    !username.is_empty()
        && !username.contains("..")
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
}
