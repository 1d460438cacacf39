//! Fetch-and-normalize pipeline.
//!
//! [`Analyzer::analyze`] is the single entry point used by the HTTP surface
//! and the CLI. It never fails: every [`FetchError`] is rendered into
//! [`AnalysisResult::Failure`].

use instalens_core::{AnalysisResult, NormalizedPost, NormalizedProfile, MAX_POST_LIMIT};

use crate::error::FetchError;
use crate::normalize::normalize_graph;
use crate::source::{FetchRequest, ProfileSource};

/// Clamps a requested post limit to `1..=60`; `None` means the maximum.
#[must_use]
pub fn clamp_limit(limit: Option<i64>) -> usize {
    let clamped = limit.unwrap_or(MAX_POST_LIMIT).clamp(1, MAX_POST_LIMIT);
    usize::try_from(clamped).unwrap_or(1)
}

pub struct Analyzer<S> {
    source: S,
}

impl<S: ProfileSource> Analyzer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches `username` from the source and normalizes profile and posts.
    ///
    /// At most one upstream call is made; none when the credential is missing.
    pub async fn analyze(
        &self,
        username: &str,
        limit: Option<i64>,
        credential_override: Option<&str>,
    ) -> AnalysisResult {
        let limit = clamp_limit(limit);
        let request = FetchRequest {
            username,
            credential_override,
        };

        match self.fetch_and_normalize(&request, limit).await {
            Ok((profile, posts)) => {
                tracing::info!(
                    username,
                    limit,
                    source = %self.source.kind(),
                    posts = posts.len(),
                    "profile analyzed"
                );
                AnalysisResult::Success { profile, posts }
            }
            Err(e) => {
                tracing::warn!(
                    username,
                    limit,
                    source = %self.source.kind(),
                    error_kind = e.kind(),
                    error = %e,
                    "profile analysis failed"
                );
                AnalysisResult::failure(e.to_string())
            }
        }
    }

    async fn fetch_and_normalize(
        &self,
        request: &FetchRequest<'_>,
        limit: usize,
    ) -> Result<(NormalizedProfile, Vec<NormalizedPost>), FetchError> {
        let graph = self.source.fetch_graph(request).await?;
        normalize_graph(&graph, limit)
    }
}
