//! Save codec: [`TankState`] to and from the JSON stored in the slot.
//!
//! Loading is forgiving. Stored top-level fields are merged over a default
//! tank, so a save written before a field existed still loads. Values are
//! clamped back into range and `last_tick` is re-stamped to the load time.
//! Anything that cannot be read as a tank is reported as
//! [`StoreError::CorruptedSaveData`], and [`load_or_default`] falls back to a
//! fresh tank in that case.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tidepool_creatures::catalog;
use tidepool_types::{DEFAULT_TANK_LEVEL, TankState, VITAL_MAX, WATER_QUALITY_MAX};
use tracing::{info, warn};

use crate::backend::SaveStore;
use crate::error::StoreError;

/// Default save slot key.
pub const DEFAULT_SAVE_KEY: &str = "TIDEPOOL_TANK_SAVE_V1";

/// Encode a tank for storage.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] if the state cannot be serialized.
pub fn encode(state: &TankState) -> Result<String, StoreError> {
    Ok(serde_json::to_string(state)?)
}

/// Decode a stored tank, merging it over defaults.
///
/// # Errors
///
/// Returns [`StoreError::CorruptedSaveData`] if `raw` is not a JSON object
/// or its fields have the wrong shape.
pub fn decode(key: &str, raw: &str, now: DateTime<Utc>) -> Result<TankState, StoreError> {
    let corrupted = |reason: String| StoreError::CorruptedSaveData {
        key: key.to_owned(),
        reason,
    };

    let stored: Value = serde_json::from_str(raw).map_err(|e| corrupted(e.to_string()))?;
    let Value::Object(stored) = stored else {
        return Err(corrupted(String::from("save data is not a JSON object")));
    };

    let mut merged = serde_json::to_value(TankState::default())?;
    if let Value::Object(ref mut defaults) = merged {
        for (field, value) in stored {
            defaults.insert(field, value);
        }
    }

    let mut state: TankState =
        serde_json::from_value(merged).map_err(|e| corrupted(e.to_string()))?;
    sanitize(&mut state);
    state.last_tick = now;
    Ok(state)
}

/// Clamp every bounded value of a loaded tank back into range.
pub fn sanitize(state: &mut TankState) {
    state.water_quality = state.water_quality.clamp(0.0, WATER_QUALITY_MAX);
    state.tank_level = state.tank_level.max(DEFAULT_TANK_LEVEL);
    for creature in &mut state.creatures {
        let max_health = catalog::definition(creature.species).max_health;
        creature.hunger = creature.hunger.clamp(0.0, VITAL_MAX);
        creature.mood = creature.mood.clamp(0.0, VITAL_MAX);
        creature.health = creature.health.clamp(0.0, max_health);
        creature.level = creature.level.max(1);
        if !creature.alive {
            creature.health = 0.0;
        }
    }
}

/// Load the tank at `key`, falling back to a fresh tank when the slot is
/// empty, unreadable or corrupted.
pub async fn load_or_default<S: SaveStore>(store: &S, key: &str, now: DateTime<Utc>) -> TankState {
    let raw = match store.load(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!(key, "No save found, starting a fresh tank");
            return fresh(now);
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read save, starting a fresh tank");
            return fresh(now);
        }
    };

    match decode(key, &raw, now) {
        Ok(state) => {
            info!(
                key,
                creatures = state.creatures.len(),
                coins = state.coins,
                "Save loaded"
            );
            state
        }
        Err(e) => {
            warn!(key, error = %e, "Save data unusable, starting a fresh tank");
            fresh(now)
        }
    }
}

fn fresh(now: DateTime<Utc>) -> TankState {
    TankState {
        last_tick: now,
        ..TankState::default()
    }
}
