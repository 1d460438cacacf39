mod api;
mod middleware;

use std::sync::Arc;

use instalens_core::{EnvSessionProvider, SessionProvider};
use instalens_fetch::{Analyzer, AnySource, ProfileSource};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = instalens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let sessions: Arc<dyn SessionProvider> = Arc::new(EnvSessionProvider);
    let source = AnySource::from_config(&config, Arc::clone(&sessions))?;
    tracing::info!(
        env = %config.env,
        source = %source.kind(),
        bind_addr = %config.bind_addr,
        "starting instalens-server"
    );

    let app = build_app(AppState::new(Analyzer::new(source), sessions));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
