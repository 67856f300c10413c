use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use translation_gateway::config::Config;
use translation_gateway::routes;
use translation_gateway::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    let level = if config.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("translation_gateway={},tower_http={}", level, level))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Model endpoint: {}", config.model_endpoint);
    info!("Debug mode: {}", config.debug);

    let app_state = AppState::new(config.clone());

    // Initial probe so the first status poll has something to report
    if app_state.translator.check_health(true).await {
        info!("Translation backend is healthy");
    } else {
        warn!("Translation backend is not healthy yet");
    }

    let app = routes::create_app(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}
