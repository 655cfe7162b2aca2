//! Media Sleep Timer - an HTTP server that pauses media playback on a timer
//!
//! This is the main entry point for the media-sleep-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use media_sleep_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{check_playerctl_available, PlayerctlPlayer},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("media_sleep_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting media-sleep-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, player={}, tick={}ms, display={}ms, warning={}s, clock={:?}",
          config.host, config.port, config.player.as_deref().unwrap_or("any"),
          config.tick_ms, config.display_ms, config.warning_secs, config.clock);

    // playerctl is required to pause playback when the timer expires
    if let Err(e) = check_playerctl_available().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    // Create application state
    let player = Arc::new(PlayerctlPlayer::new(config.player.clone()));
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.timer_settings(),
        config.clock.build(),
        player,
    ));

    if let Some(minutes) = config.start {
        info!("Starting initial sleep timer for {} minutes", minutes);
        state.start_timer(minutes);
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer                - Start sleep timer ({{\"minutes\": 1-999}})");
    info!("  POST /timer/preset/:index  - Start a preset sleep timer");
    info!("  POST /timer/cancel         - Cancel the sleep timer");
    info!("  GET  /timer/presets        - List preset durations");
    info!("  POST /loop                 - Toggle loop playback");
    info!("  GET  /status               - Check timer, display and notifications");
    info!("  GET  /display/stream       - Badge and banner updates (server-sent events)");
    info!("  GET  /health               - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
