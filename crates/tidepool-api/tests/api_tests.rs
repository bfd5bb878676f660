//! Integration tests for the command API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use tidepool_api::router::build_router;
use tidepool_api::state::AppState;
use tidepool_core::config::SimulationBoundsConfig;
use tidepool_core::operator::OperatorState;
use tidepool_core::{Aquarium, EventGenerator};
use tidepool_creatures::TankRules;
use tidepool_types::{Notification, Species, TankState};
use tokio::sync::Mutex;
use tower::ServiceExt;

fn make_aquarium(coins: u64) -> Arc<Mutex<Aquarium>> {
    let state = TankState {
        coins,
        ..TankState::default()
    };
    Arc::new(Mutex::new(Aquarium::new(
        state,
        TankRules::default(),
        EventGenerator::default(),
        StdRng::seed_from_u64(42),
    )))
}

fn make_test_state(coins: u64) -> Arc<AppState> {
    Arc::new(AppState::new(make_aquarium(coins)))
}

fn make_operator_state() -> Arc<AppState> {
    let operator = Arc::new(OperatorState::new(&SimulationBoundsConfig {
        tick_interval_ms: 1000,
        max_ticks: 0,
    }));
    Arc::new(AppState::with_operator(make_aquarium(500), operator))
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(path: &str) -> Request<Body> {
    Request::post(path).body(Body::empty()).unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =========================================================================
// Reads
// =========================================================================

#[tokio::test]
async fn test_get_tank() {
    let router = build_router(make_test_state(500));

    let response = router
        .oneshot(Request::get("/api/tank").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["tank"]["coins"], 500);
    assert_eq!(json["tank"]["tank_level"], 1);
    assert_eq!(json["capacity"], 7);
    assert_eq!(json["living"], 0);
    assert_eq!(json["audio_muted"], false);
}

#[tokio::test]
async fn test_get_quests() {
    let router = build_router(make_test_state(500));

    let response = router
        .oneshot(Request::get("/api/quests").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["quests"][0]["id"], "q1");
    assert_eq!(json["quests"][0]["completed"], false);
}

#[tokio::test]
async fn test_get_event_when_none_active() {
    let router = build_router(make_test_state(500));

    let response = router
        .oneshot(Request::get("/api/event").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json["event"].is_null());
}

// =========================================================================
// Commands
// =========================================================================

#[tokio::test]
async fn test_acquire_then_feed() {
    let state = make_test_state(500);

    let response = build_router(Arc::clone(&state))
        .oneshot(post_json(
            "/api/commands/acquire",
            &serde_json::json!({ "species": "Goldfish" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["coins"], 400);
    assert_eq!(json["notification"]["type"], "purchase_applied");
    assert_eq!(json["notification"]["item"], "Goldfish");

    let response = build_router(Arc::clone(&state))
        .oneshot(post_empty("/api/commands/feed"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["coins"], 395);
    assert_eq!(json["notification"]["fed"], 1);

    assert_eq!(state.aquarium.lock().await.state().living_count(), 1);
}

#[tokio::test]
async fn test_acquire_unknown_species_is_bad_request() {
    let router = build_router(make_test_state(500));

    let response = router
        .oneshot(post_json(
            "/api/commands/acquire",
            &serde_json::json!({ "species": "Kraken" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_insufficient_funds_is_payment_required() {
    let state = make_test_state(10);

    let response = build_router(Arc::clone(&state))
        .oneshot(post_empty("/api/commands/clean-water"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(state.aquarium.lock().await.state().coins, 10);
}

#[tokio::test]
async fn test_second_aggressive_fish_conflicts() {
    let state = make_test_state(5000);
    let body = serde_json::json!({ "species": "Betta" });

    let first = build_router(Arc::clone(&state))
        .oneshot(post_json("/api/commands/acquire", &body))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = build_router(Arc::clone(&state))
        .oneshot(post_json("/api/commands/acquire", &body))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let aquarium = state.aquarium.lock().await;
    assert_eq!(aquarium.state().coins, 4500);
    assert_eq!(aquarium.state().creatures.len(), 1);
}

#[tokio::test]
async fn test_duplicate_decoration_conflicts() {
    let state = make_test_state(5000);
    let body = serde_json::json!({ "id": "coral" });

    let first = build_router(Arc::clone(&state))
        .oneshot(post_json("/api/commands/decorations", &body))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = build_router(Arc::clone(&state))
        .oneshot(post_json("/api/commands/decorations", &body))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(state.aquarium.lock().await.state().coins, 4500);
}

#[tokio::test]
async fn test_decoration_with_explicit_price() {
    let state = make_test_state(500);

    let response = build_router(Arc::clone(&state))
        .oneshot(post_json(
            "/api/commands/decorations",
            &serde_json::json!({ "id": "castle", "price": 300 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["coins"], 200);
}

#[tokio::test]
async fn test_dispose_living_creature_conflicts() {
    let state = make_test_state(500);
    let creature_id = {
        let mut aquarium = state.aquarium.lock().await;
        aquarium
            .acquire_creature(Species::Guppy, Utc::now())
            .unwrap();
        aquarium.state().creatures.first().unwrap().id
    };

    let unconfirmed = build_router(Arc::clone(&state))
        .oneshot(post_json(
            "/api/commands/dispose",
            &serde_json::json!({ "creature_id": creature_id }),
        ))
        .await
        .unwrap();
    assert_eq!(unconfirmed.status(), StatusCode::BAD_REQUEST);

    let alive = build_router(Arc::clone(&state))
        .oneshot(post_json(
            "/api/commands/dispose",
            &serde_json::json!({ "creature_id": creature_id, "confirmed": true }),
        ))
        .await
        .unwrap();
    assert_eq!(alive.status(), StatusCode::CONFLICT);
    assert_eq!(state.aquarium.lock().await.state().creatures.len(), 1);
}

#[tokio::test]
async fn test_resolve_without_event_conflicts() {
    let router = build_router(make_test_state(500));

    let response = router
        .oneshot(post_json(
            "/api/commands/resolve-event",
            &serde_json::json!({ "option_index": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_commands_are_broadcast() {
    let state = make_test_state(500);
    let mut rx = state.subscribe();

    let response = build_router(Arc::clone(&state))
        .oneshot(post_empty("/api/commands/toggle-audio"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let notification = rx.recv().await.unwrap();
    assert_eq!(notification, Notification::AudioToggled { muted: true });
    assert!(state.aquarium.lock().await.audio_muted());
}

// =========================================================================
// Operator
// =========================================================================

#[tokio::test]
async fn test_operator_status_without_operator() {
    let router = build_router(make_test_state(500));

    let response = router
        .oneshot(
            Request::get("/api/operator/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_operator_pause_and_status() {
    let state = make_operator_state();

    let response = build_router(Arc::clone(&state))
        .oneshot(post_empty("/api/operator/pause"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = build_router(Arc::clone(&state))
        .oneshot(
            Request::get("/api/operator/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["paused"], true);
    assert_eq!(json["tick_interval_ms"], 1000);
    assert_eq!(json["ticks_run"], 0);
}

#[tokio::test]
async fn test_operator_speed_validation() {
    let state = make_operator_state();

    let too_fast = build_router(Arc::clone(&state))
        .oneshot(post_json(
            "/api/operator/speed",
            &serde_json::json!({ "tick_interval_ms": 10 }),
        ))
        .await
        .unwrap();
    assert_eq!(too_fast.status(), StatusCode::BAD_REQUEST);

    let ok = build_router(Arc::clone(&state))
        .oneshot(post_json(
            "/api/operator/speed",
            &serde_json::json!({ "tick_interval_ms": 250 }),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let json = body_to_json(ok.into_body()).await;
    assert_eq!(json["previous_interval_ms"], 1000);
    assert_eq!(json["new_interval_ms"], 250);
}

#[tokio::test]
async fn test_operator_stop() {
    let state = make_operator_state();

    let response = build_router(Arc::clone(&state))
        .oneshot(post_empty("/api/operator/stop"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        state
            .operator_state
            .as_ref()
            .unwrap()
            .is_stop_requested()
    );
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let router = build_router(make_test_state(500));

    let response = router
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
