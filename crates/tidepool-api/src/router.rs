//! Axum router construction for the command API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin client access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::operator;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the command API.
///
/// The router includes:
/// - `GET /ws/notifications` -- `WebSocket` notification stream
/// - `GET /api/tank`, `/api/quests`, `/api/event` -- reads
/// - `POST /api/commands/*` -- player commands
/// - `/api/operator/*` -- scheduler controls
///
/// CORS is configured to allow any origin so a browser client served from
/// elsewhere can connect.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket
        .route("/ws/notifications", get(ws::ws_notifications))
        // Reads
        .route("/api/tank", get(handlers::get_tank))
        .route("/api/quests", get(handlers::get_quests))
        .route("/api/event", get(handlers::get_event))
        // Commands
        .route("/api/commands/feed", post(handlers::feed))
        .route("/api/commands/clean-water", post(handlers::clean_water))
        .route("/api/commands/acquire", post(handlers::acquire))
        .route("/api/commands/decorations", post(handlers::install_decoration))
        .route("/api/commands/dispose", post(handlers::dispose))
        .route("/api/commands/resolve-event", post(handlers::resolve_event))
        .route("/api/commands/toggle-audio", post(handlers::toggle_audio))
        // Operator
        .route("/api/operator/pause", post(operator::pause))
        .route("/api/operator/resume", post(operator::resume))
        .route("/api/operator/speed", post(operator::set_speed))
        .route("/api/operator/status", get(operator::status))
        .route("/api/operator/stop", post(operator::stop))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
