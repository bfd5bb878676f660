//! REST endpoint handlers for reading the tank and issuing commands.
//!
//! Reads take the aquarium lock just long enough to clone what they
//! return. Commands take it for "validate + apply" and publish the
//! resulting notification after releasing it.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/tank` | Current tank state and capacity |
//! | `GET` | `/api/quests` | Quest progress |
//! | `GET` | `/api/event` | The active random event, if any |
//! | `POST` | `/api/commands/feed` | Feed every living creature |
//! | `POST` | `/api/commands/clean-water` | Restore water to full quality |
//! | `POST` | `/api/commands/acquire` | Buy a creature |
//! | `POST` | `/api/commands/decorations` | Buy and install a decoration |
//! | `POST` | `/api/commands/dispose` | Remove a dead creature |
//! | `POST` | `/api/commands/resolve-event` | Pick an option of the active event |
//! | `POST` | `/api/commands/toggle-audio` | Flip the audio mute flag |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;
use tidepool_types::{CreatureId, Notification};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/commands/acquire`.
#[derive(Debug, serde::Deserialize)]
pub struct AcquireRequest {
    /// Species identifier, e.g. `"Goldfish"`.
    pub species: String,
}

/// Request body for `POST /api/commands/decorations`.
#[derive(Debug, serde::Deserialize)]
pub struct DecorationRequest {
    /// Decoration identifier, e.g. `"coral"`.
    pub id: String,
    /// Price to charge. Defaults to the list price.
    pub price: Option<u64>,
}

/// Request body for `POST /api/commands/dispose`.
#[derive(Debug, serde::Deserialize)]
pub struct DisposeRequest {
    /// The dead creature to remove.
    pub creature_id: CreatureId,
    /// Must be `true`; the client confirms with the player first.
    #[serde(default)]
    pub confirmed: bool,
}

/// Request body for `POST /api/commands/resolve-event`.
#[derive(Debug, serde::Deserialize)]
pub struct ResolveEventRequest {
    /// Zero-based index into the active event's options.
    pub option_index: usize,
}

/// Response for a successful command.
#[derive(Debug, serde::Serialize)]
struct CommandResponse {
    /// Always `true`; rejections are returned as errors.
    ok: bool,
    /// What changed, when the command raises a notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    notification: Option<Notification>,
    /// Coin balance after the command.
    coins: u64,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Return the tank state together with its derived capacity.
pub async fn get_tank(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let aquarium = state.aquarium.lock().await;
    let tank = aquarium.state();
    let capacity = aquarium.rules().capacity(tank.tank_level);
    let living = tank.living_count();

    Ok(Json(serde_json::json!({
        "tank": serde_json::to_value(tank)?,
        "capacity": capacity,
        "living": living,
        "audio_muted": aquarium.audio_muted(),
    })))
}

/// Return every quest with its progress.
pub async fn get_quests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let quests = state.aquarium.lock().await.quests().to_vec();

    Ok(Json(serde_json::json!({
        "count": quests.len(),
        "quests": quests,
    })))
}

/// Return the active random event, or `null` when none is pending.
pub async fn get_event(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state.aquarium.lock().await.active_event().cloned();

    Ok(Json(serde_json::json!({ "event": event })))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Feed every living creature.
pub async fn feed(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let (notification, coins) = {
        let mut aquarium = state.aquarium.lock().await;
        let notification = aquarium.feed()?;
        (notification, aquarium.state().coins)
    };
    Ok(respond(&state, Some(notification), coins))
}

/// Restore the water to full quality.
pub async fn clean_water(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let (notification, coins) = {
        let mut aquarium = state.aquarium.lock().await;
        let notification = aquarium.clean_water()?;
        (notification, aquarium.state().coins)
    };
    Ok(respond(&state, Some(notification), coins))
}

/// Buy a creature.
pub async fn acquire(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AcquireRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (notification, coins) = {
        let mut aquarium = state.aquarium.lock().await;
        let notification = aquarium.acquire_by_id(&body.species, Utc::now())?;
        (notification, aquarium.state().coins)
    };
    Ok(respond(&state, Some(notification), coins))
}

/// Buy and install a decoration.
pub async fn install_decoration(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DecorationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (notification, coins) = {
        let mut aquarium = state.aquarium.lock().await;
        let notification = aquarium.install_by_id(&body.id, body.price)?;
        (notification, aquarium.state().coins)
    };
    Ok(respond(&state, Some(notification), coins))
}

/// Remove a dead creature. Raises no notification.
pub async fn dispose(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DisposeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let coins = {
        let mut aquarium = state.aquarium.lock().await;
        aquarium.dispose_creature(body.creature_id, body.confirmed)?;
        aquarium.state().coins
    };
    info!(creature_id = %body.creature_id, "Creature disposed");
    Ok(respond(&state, None, coins))
}

/// Pick an option of the active event.
pub async fn resolve_event(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ResolveEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (notification, coins) = {
        let mut aquarium = state.aquarium.lock().await;
        let notification = aquarium.resolve_event(body.option_index)?;
        (notification, aquarium.state().coins)
    };
    Ok(respond(&state, Some(notification), coins))
}

/// Flip the audio mute flag.
pub async fn toggle_audio(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let (notification, coins) = {
        let mut aquarium = state.aquarium.lock().await;
        let notification = aquarium.toggle_audio();
        (notification, aquarium.state().coins)
    };
    Ok(respond(&state, Some(notification), coins))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Publish the notification (if any) and build the success body.
fn respond(
    state: &AppState,
    notification: Option<Notification>,
    coins: u64,
) -> Json<CommandResponse> {
    if let Some(ref n) = notification {
        state.broadcast(n);
    }
    Json(CommandResponse {
        ok: true,
        notification,
        coins,
    })
}
