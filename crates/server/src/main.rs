mod api;
mod jobs;
mod router;
mod state;

use std::sync::Arc;

use tracing::{error, info};

use cronhost_core::Config;
use state::AppState;

async fn serve(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config));

    jobs::register_builtin_jobs(&state);
    state.registry.start();

    let app = router::build_router(state.clone());
    let server = &state.config.server;
    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.registry.stop();
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    cronhost_core::config::load_dotenv();
    let config = Config::from_env();
    config.log_summary();

    serve(config).await
}
