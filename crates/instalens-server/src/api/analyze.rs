use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use instalens_core::AnalysisResult;
use serde::Deserialize;
use tracing::Instrument;

use crate::middleware::RequestId;

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeQuery {
    pub username: String,
    pub limit: Option<i64>,
    /// Per-request session id, for diagnosing credential problems.
    pub sid: Option<String>,
}

/// `GET /analyze`. Always answers 200; failures travel in the `error` key.
pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<AnalyzeQuery>, QueryRejection>,
) -> Json<AnalysisResult> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::warn!(request_id = %req_id.0, error = %rejection, "rejected analyze query");
            return Json(AnalysisResult::failure(format!(
                "invalid query: {}",
                rejection.body_text()
            )));
        }
    };

    let span = tracing::info_span!("analyze", request_id = %req_id.0);
    let result = state
        .analyzer
        .analyze(&query.username, query.limit, query.sid.as_deref())
        .instrument(span)
        .await;

    Json(result)
}
