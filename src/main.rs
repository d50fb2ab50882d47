use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sportz_api::app::build_router;
use sportz_api::config::AppConfig;
use sportz_api::database::connection::{connect, run_migrations};
use sportz_api::database::repository::PgRepository;
use sportz_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let pool = connect(&config).await?;
    run_migrations(&pool).await?;

    let app_state = AppState::new(Arc::new(PgRepository::new(pool.clone())));
    let app = build_router(app_state);

    let served = start_server(app, config.port).await;

    // The pool lives as long as the server; release it on the way out either way.
    pool.close().await;
    tracing::info!("🔌 Database pool closed");

    served
}

async fn start_server(app: axum::Router, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("🚀 Server listening at http://localhost:{}/", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("🛑 Shutdown signal received");
}
