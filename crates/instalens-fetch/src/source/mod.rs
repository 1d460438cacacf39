//! Pluggable producers of [`ProfileGraph`] documents.
//!
//! The pipeline only needs "give me the profile graph for this username";
//! where it comes from is a [`ProfileSource`]. Each source reports the
//! failures it can actually tell apart: the web endpoint cannot separate a
//! nonexistent account from a restricted one, a snapshot directory can tell
//! when it has never seen a username.

mod snapshot;
mod web;

use std::future::Future;
use std::sync::Arc;

use instalens_core::{AppConfig, SessionProvider};

pub use snapshot::SnapshotSource;
pub use web::WebProfileSource;

use crate::error::FetchError;
use crate::graph::ProfileGraph;

/// Per-call inputs to a source.
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    pub username: &'a str,
    /// Session id supplied by the caller for diagnostics, in place of the
    /// configured one.
    pub credential_override: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Web,
    Snapshot,
}

impl SourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Snapshot => "snapshot",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait ProfileSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Produces the raw profile graph for `request.username`.
    fn fetch_graph(
        &self,
        request: &FetchRequest<'_>,
    ) -> impl Future<Output = Result<ProfileGraph, FetchError>> + Send;
}

/// Runtime-selected source.
pub enum AnySource {
    Web(WebProfileSource),
    Snapshot(SnapshotSource),
}

impl AnySource {
    /// Picks the snapshot source when `snapshot_dir` is configured, the web
    /// source otherwise.
    ///
    /// # Errors
    ///
    /// Propagates [`WebProfileSource::new`] failures.
    pub fn from_config(
        config: &AppConfig,
        sessions: Arc<dyn SessionProvider>,
    ) -> Result<Self, FetchError> {
        match &config.snapshot_dir {
            Some(dir) => Ok(Self::Snapshot(SnapshotSource::new(dir.clone()))),
            None => Ok(Self::Web(WebProfileSource::new(
                &config.upstream_base_url,
                config.request_timeout_secs,
                sessions,
            )?)),
        }
    }
}

impl ProfileSource for AnySource {
    fn kind(&self) -> SourceKind {
        match self {
            Self::Web(source) => source.kind(),
            Self::Snapshot(source) => source.kind(),
        }
    }

    async fn fetch_graph(&self, request: &FetchRequest<'_>) -> Result<ProfileGraph, FetchError> {
        match self {
            Self::Web(source) => source.fetch_graph(request).await,
            Self::Snapshot(source) => source.fetch_graph(request).await,
        }
    }
}

impl From<WebProfileSource> for AnySource {
    fn from(source: WebProfileSource) -> Self {
        Self::Web(source)
    }
}

impl From<SnapshotSource> for AnySource {
    fn from(source: SnapshotSource) -> Self {
        Self::Snapshot(source)
    }
}
