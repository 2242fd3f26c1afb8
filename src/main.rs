use std::sync::Arc;

use ice_dispatch::engine::clock::SystemClock;
use ice_dispatch::engine::refresh::run_refresh_engine;
use ice_dispatch::error::AppError;
use ice_dispatch::state::AppState;
use ice_dispatch::{api, config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let clock = Arc::new(SystemClock::new(config.utc_offset));
    let (app_state, refresh_rx) = AppState::new(
        clock,
        config.transition_policy,
        config.refresh_queue_size,
        config.event_buffer_size,
    );
    let shared_state = Arc::new(app_state);

    let app = api::rest::router(shared_state.clone());

    tokio::spawn(run_refresh_engine(
        shared_state.clone(),
        refresh_rx,
        config.refresh_interval,
    ));

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        utc_offset = %config.utc_offset,
        transitions = ?config.transition_policy,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
