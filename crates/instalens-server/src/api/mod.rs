mod analyze;

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use instalens_core::SessionProvider;
use instalens_fetch::{credential_status, Analyzer, AnySource};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<Analyzer<AnySource>>,
    sessions: Arc<dyn SessionProvider>,
}

impl AppState {
    pub fn new(analyzer: Analyzer<AnySource>, sessions: Arc<dyn SessionProvider>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            sessions,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    has_session: bool,
    ua_set: bool,
}

/// The front-end is served from a different origin, so every origin,
/// method and header is allowed.
fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/analyze", get(analyze::analyze))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

/// Reports whether credentials are configured, never their values.
async fn health(State(state): State<AppState>) -> Json<HealthData> {
    let status = credential_status(&state.sessions.current());
    Json(HealthData {
        status: "ok",
        has_session: status.has_session,
        ua_set: status.ua_set,
    })
}
