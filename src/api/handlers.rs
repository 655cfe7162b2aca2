//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{debug, info, warn};

use crate::{
    config::{MAX_MINUTES, MIN_MINUTES, PRESETS},
    state::AppState,
};
use super::responses::{
    ApiResponse, HealthResponse, LoopResponse, PresetsResponse, StartTimerRequest, StatusResponse,
};

type ErrorReply<T> = (StatusCode, Json<T>);

/// Handle POST /timer - Start the sleep timer for a custom duration
pub async fn start_timer_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StartTimerRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ErrorReply<ApiResponse>> {
    // Malformed bodies get the same rejection as out-of-range durations
    let result = match payload {
        Ok(Json(request)) => match request.minutes() {
            Some(minutes) => state.start_custom_timer(minutes),
            None => Err(state.reject_duration(&request.minutes.to_string())),
        },
        Err(rejection) => Err(state.reject_duration(&rejection.body_text())),
    };

    match result {
        Ok(timer) => {
            info!("Timer endpoint called - sleep timer started");
            Ok(Json(ApiResponse::active(
                format!("Sleep timer set for {} minutes", timer.total_minutes.unwrap_or_default()),
                timer,
            )))
        }
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(e, state.get_timer_state())),
        )),
    }
}

/// Handle POST /timer/preset/:index - Start one of the quick options
pub async fn preset_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse>, ErrorReply<ApiResponse>> {
    match state.start_preset(index) {
        Ok((preset, timer)) => {
            info!("Preset endpoint called - sleep timer started ({})", preset.label);
            Ok(Json(ApiResponse::active(
                format!("Sleep timer set for {}", preset.label),
                timer,
            )))
        }
        Err(e) => {
            warn!("{}", e);
            Err((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(e, state.get_timer_state())),
            ))
        }
    }
}

/// Handle POST /timer/cancel - Cancel the sleep timer
pub async fn cancel_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let message = if state.cancel_timer() {
        info!("Cancel endpoint called - sleep timer cancelled");
        "Sleep timer cancelled"
    } else {
        "No sleep timer is running"
    };
    Json(ApiResponse::inactive(message.to_string(), state.get_timer_state()))
}

/// Handle GET /timer/presets - List the quick options
pub async fn presets_handler() -> Json<PresetsResponse> {
    Json(PresetsResponse {
        presets: PRESETS.to_vec(),
        min_minutes: MIN_MINUTES,
        max_minutes: MAX_MINUTES,
    })
}

/// Handle POST /loop - Toggle loop playback
pub async fn loop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LoopResponse>, ErrorReply<LoopResponse>> {
    match state.toggle_loop().await {
        Ok(enabled) => {
            info!("Loop endpoint called - loop {}", if enabled { "enabled" } else { "disabled" });
            Ok(Json(LoopResponse::toggled(enabled)))
        }
        Err(e) => Err((StatusCode::BAD_GATEWAY, Json(LoopResponse::error(e)))),
    }
}

/// Handle GET /status - Return current timer, display and notifications
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.get_timer_state(),
        display: state.get_display_state(),
        notifications: state.get_notifications(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /display/stream - Server-sent events with the badge and banner.
///
/// The current contents are sent first, then one event per change.
pub async fn display_stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    debug!("Display stream subscriber connected");
    let display_rx = state.display.subscribe();

    let events = stream::unfold((display_rx, true), |(mut display_rx, first)| async move {
        if !first && display_rx.changed().await.is_err() {
            return None;
        }
        let display = display_rx.borrow_and_update().clone();
        let event = Event::default().event("display").json_data(&display);
        Some((event, (display_rx, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
