//! Command handlers for the CLI.
//!
//! Every handler prints pretty JSON to stdout. A failed analysis still
//! prints its `{"error": ...}` document and exits with status 1.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use instalens_core::{AnalysisResult, AppConfig, EnvSessionProvider, SessionProvider};
use instalens_fetch::{
    clamp_limit, credential_status, normalize_graph, Analyzer, AnySource, ProfileGraph,
    ProfileSource,
};

/// Fetch `username` through the configured source and print the result.
///
/// `snapshot_dir` takes precedence over the configured source.
///
/// # Errors
///
/// Returns an error if the web source cannot be built from `config`.
/// Fetch failures are reported in the printed result, not propagated.
pub(crate) async fn run_analyze(
    mut config: AppConfig,
    username: &str,
    limit: Option<i64>,
    sid: Option<&str>,
    snapshot_dir: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    if snapshot_dir.is_some() {
        config.snapshot_dir = snapshot_dir;
    }

    let sessions: Arc<dyn SessionProvider> = Arc::new(EnvSessionProvider);
    let source = AnySource::from_config(&config, sessions)
        .context("failed to build profile source")?;
    tracing::debug!(source = %source.kind(), username, "running analyze");

    let result = Analyzer::new(source).analyze(username, limit, sid).await;
    print_result(&result)
}

/// Normalize a saved profile graph from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read. Invalid JSON and a missing
/// `data.user` object are reported in the printed result.
pub(crate) async fn run_normalize(file: &Path, limit: Option<i64>) -> anyhow::Result<ExitCode> {
    let body = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let result = normalize_bytes(&body, limit);
    print_result(&result)
}

/// Print the credential status for the current environment.
///
/// # Errors
///
/// Returns an error if the status cannot be serialized.
pub(crate) fn run_health() -> anyhow::Result<ExitCode> {
    let status = credential_status(&EnvSessionProvider.current());
    let body = serde_json::json!({
        "status": "ok",
        "has_session": status.has_session,
        "ua_set": status.ua_set,
    });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn normalize_bytes(body: &[u8], limit: Option<i64>) -> AnalysisResult {
    let graph = match ProfileGraph::from_slice(body) {
        Ok(graph) => graph,
        Err(e) => return AnalysisResult::failure(format!("invalid JSON in profile graph: {e}")),
    };

    match normalize_graph(&graph, clamp_limit(limit)) {
        Ok((profile, posts)) => AnalysisResult::Success { profile, posts },
        Err(e) => AnalysisResult::failure(e.to_string()),
    }
}

fn print_result(result: &AnalysisResult) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
