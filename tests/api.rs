//! HTTP API tests driven through the router

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use futures::{future::BoxFuture, StreamExt};
use serde_json::{json, Value};
use tower::ServiceExt;

use media_sleep_timer::{
    config::TimerSettings,
    create_router,
    surfaces::{LoopControl, VideoAction},
    timer::MonotonicClock,
    AppState,
};

#[derive(Default)]
struct FakePlayer {
    pauses: AtomicUsize,
    looping: AtomicBool,
}

impl VideoAction for FakePlayer {
    fn pause(&self) -> BoxFuture<'_, Result<(), String>> {
        Box::pin(async move {
            self.pauses.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}

impl LoopControl for FakePlayer {
    fn loop_enabled(&self) -> BoxFuture<'_, Result<bool, String>> {
        Box::pin(async move { Ok(self.looping.load(Ordering::SeqCst)) })
    }

    fn set_loop(&self, enabled: bool) -> BoxFuture<'_, Result<(), String>> {
        Box::pin(async move {
            self.looping.store(enabled, Ordering::SeqCst);
            Ok(())
        })
    }
}

fn app() -> (Router, Arc<FakePlayer>) {
    let player = Arc::new(FakePlayer::default());
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        TimerSettings::default(),
        Arc::new(MonotonicClock::new()),
        player.clone(),
    ));
    (create_router(state), player)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    read_json(app, request.body(body).unwrap()).await
}

async fn send_raw(app: &Router, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    read_json(app, request).await
}

async fn read_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test(start_paused = true)]
async fn start_then_status_reports_running_timer() {
    let (app, _) = app();

    let (status, body) = send(&app, "POST", "/timer", Some(json!({ "minutes": 30 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["timer"]["remaining"], "30:00");
    assert_eq!(body["timer"]["remaining_compact"], "30m");

    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["active"], true);
    assert_eq!(body["display"]["badge"], "⏰30m");
    assert_eq!(body["display"]["banner"]["text"], "⏰ Sleep Timer: 30:00");
    assert_eq!(body["display"]["banner"]["urgent"], false);
    assert_eq!(body["last_action"], "timer-30m");

    let messages: Vec<&str> = body["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["message"].as_str())
        .collect();
    assert!(messages.contains(&"Sleep timer set for 30 minutes"));
}

#[tokio::test(start_paused = true)]
async fn invalid_durations_are_rejected() {
    let (app, _) = app();

    for minutes in [json!(0), json!(1000), json!(-1), json!(2.5), json!("soon")] {
        let (status, body) = send(&app, "POST", "/timer", Some(json!({ "minutes": minutes }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Please enter a valid time (1-999 minutes)");
        assert_eq!(body["timer"]["active"], false);
    }

    // Missing field, broken JSON and the wrong content type are all bad durations
    let (status, body) = send(&app, "POST", "/timer", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Please enter a valid time (1-999 minutes)");

    let (status, body) = send_raw(&app, "/timer", "application/json", "{\"minutes\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter a valid time (1-999 minutes)");

    let (status, body) =
        send_raw(&app, "/timer", "application/x-www-form-urlencoded", "minutes=30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["timer"]["active"], false);

    let (_, body) = send(&app, "GET", "/status", None).await;
    let errors = body["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["level"] == "error")
        .filter(|n| n["message"] == "Please enter a valid time (1-999 minutes)")
        .count();
    assert_eq!(errors, 8);

    let (status, body) = send(&app, "POST", "/timer", Some(json!({ "minutes": "45" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["total_minutes"], 45);
}

#[tokio::test]
async fn display_stream_pushes_badge_changes() {
    let (app, _) = app();

    let request = Request::builder()
        .uri("/display/stream")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let mut frames = response.into_body().into_data_stream();
    let next_frame = |frame: Option<Result<axum::body::Bytes, axum::Error>>| {
        String::from_utf8(frame.unwrap().unwrap().to_vec()).unwrap()
    };

    let first = next_frame(frames.next().await);
    assert!(first.contains("event: display"));
    assert!(first.contains("😴"));

    let (status, _) = send(&app, "POST", "/timer", Some(json!({ "minutes": 30 }))).await;
    assert_eq!(status, StatusCode::OK);

    let update = tokio::time::timeout(Duration::from_secs(5), frames.next())
        .await
        .unwrap();
    let update = next_frame(update);
    assert!(update.contains("event: display"));
    assert!(update.contains("⏰30m"));
}

#[tokio::test(start_paused = true)]
async fn presets_list_and_start() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", "/timer/presets", None).await;
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = body["presets"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["label"].as_str())
        .collect();
    assert_eq!(labels, vec!["15 min", "30 min", "45 min", "1 hour", "2 hours"]);
    assert_eq!(body["max_minutes"], 999);

    let (status, body) = send(&app, "POST", "/timer/preset/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["remaining"], "2:00:00");

    let (status, _) = send(&app, "POST", "/timer/preset/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn cancel_returns_display_to_idle() {
    let (app, _) = app();

    let (_, body) = send(&app, "POST", "/timer/cancel", None).await;
    assert_eq!(body["message"], "No sleep timer is running");

    send(&app, "POST", "/timer", Some(json!({ "minutes": 10 }))).await;
    let (status, body) = send(&app, "POST", "/timer/cancel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "inactive");
    assert_eq!(body["message"], "Sleep timer cancelled");

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["timer"]["active"], false);
    assert_eq!(body["display"]["badge"], "😴");
    assert!(body["display"]["banner"].is_null());
}

#[tokio::test(start_paused = true)]
async fn timer_expiry_pauses_the_player() {
    let (app, player) = app();

    send(&app, "POST", "/timer", Some(json!({ "minutes": 1 }))).await;
    tokio::time::sleep(Duration::from_millis(60_200)).await;

    assert_eq!(player.pauses.load(Ordering::SeqCst), 1);
    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["timer"]["active"], false);
    assert_eq!(body["display"]["badge"], "😴");

    let levels: Vec<&str> = body["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["level"].as_str())
        .collect();
    assert_eq!(levels.iter().filter(|l| **l == "warning").count(), 1);
}

#[tokio::test]
async fn loop_toggles() {
    let (app, player) = app();

    let (status, body) = send(&app, "POST", "/loop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loop_enabled"], true);
    assert!(player.looping.load(Ordering::SeqCst));

    let (_, body) = send(&app, "POST", "/loop", None).await;
    assert_eq!(body["loop_enabled"], false);
    assert_eq!(body["message"], "Loop disabled");
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
