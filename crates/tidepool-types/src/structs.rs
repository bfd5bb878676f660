//! Core entity structs for the Tidepool simulation.
//!
//! Covers the [`Creature`] entity, the persisted [`TankState`] aggregate,
//! quests, and the transient [`GameEvent`] interrupt.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Decoration, Facing, QuestKind, Species};
use crate::ids::{CreatureId, EventId};

/// Upper bound of the hunger and mood scales.
pub const VITAL_MAX: f64 = 100.0;

/// Upper bound of the water quality scale.
pub const WATER_QUALITY_MAX: f64 = 100.0;

/// Coins in a freshly started tank.
pub const DEFAULT_STARTING_COINS: u64 = 500;

/// Tank level of a freshly started tank.
pub const DEFAULT_TANK_LEVEL: u32 = 1;

// ---------------------------------------------------------------------------
// Creature
// ---------------------------------------------------------------------------

/// A point in tank coordinates (percent of the tank width and height).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// The fixed spawn point in the middle of the tank.
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };
}

/// An individual simulated creature.
///
/// Once `alive` becomes `false` the creature is frozen: the tick resolver
/// passes it through unchanged until a dispose command removes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Creature {
    /// Unique identifier, never reused.
    pub id: CreatureId,
    /// Species, keying the catalog definition.
    pub species: Species,
    /// Display name drawn from the name pool (not unique).
    pub name: String,
    /// When the creature was acquired.
    pub born_at: DateTime<Utc>,
    /// Satiation, 0 (starving) to 100 (full).
    pub hunger: f64,
    /// Mood, 0 to 100.
    pub mood: f64,
    /// Health, 0 to the species maximum.
    pub health: f64,
    /// Whether the creature is alive. Only ever transitions true to false.
    pub alive: bool,
    /// Level, starting at 1.
    pub level: u32,
    /// Experience towards the next level. Resets on level-up.
    pub experience: u32,
    /// Current position.
    pub position: Position,
    /// Current facing.
    pub facing: Facing,
}

// ---------------------------------------------------------------------------
// Tank state
// ---------------------------------------------------------------------------

/// The authoritative, persisted state of one tank.
///
/// This is the value stored in the save slot. Quests, the active event and
/// the audio flag live outside it in their own trackers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TankState {
    /// Every tracked creature record, living or dead, in acquisition order.
    pub creatures: Vec<Creature>,
    /// Coin balance.
    pub coins: u64,
    /// Tank level. Capacity is derived from it.
    pub tank_level: u32,
    /// Tank experience, accumulated while the water is clean.
    pub tank_experience: u64,
    /// Water quality, 0 to 100.
    pub water_quality: f64,
    /// Installed decorations.
    pub decorations: BTreeSet<Decoration>,
    /// Timestamp stamped by the most recent tick.
    pub last_tick: DateTime<Utc>,
    /// Number of ticks resolved for this tank.
    pub ticks_elapsed: u64,
}

impl Default for TankState {
    fn default() -> Self {
        Self {
            creatures: Vec::new(),
            coins: DEFAULT_STARTING_COINS,
            tank_level: DEFAULT_TANK_LEVEL,
            tank_experience: 0,
            water_quality: WATER_QUALITY_MAX,
            decorations: BTreeSet::new(),
            last_tick: Utc::now(),
            ticks_elapsed: 0,
        }
    }
}

impl TankState {
    /// Number of living creatures.
    pub fn living_count(&self) -> usize {
        self.creatures.iter().filter(|c| c.alive).count()
    }

    /// Whether at least one creature is alive.
    pub fn any_alive(&self) -> bool {
        self.creatures.iter().any(|c| c.alive)
    }

    /// Whether a living creature of `species` is present.
    pub fn has_living(&self, species: Species) -> bool {
        self.creatures
            .iter()
            .any(|c| c.alive && c.species == species)
    }

    /// Look up a creature by ID.
    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    /// Whether `decoration` is installed.
    pub fn has_decoration(&self, decoration: Decoration) -> bool {
        self.decorations.contains(&decoration)
    }
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

/// A progress goal that pays a one-time coin reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Quest {
    /// Stable quest identifier.
    pub id: String,
    /// Player-facing description.
    pub description: String,
    /// Progress required for completion.
    pub target: u32,
    /// Current progress.
    pub current: u32,
    /// Whether the quest has been completed. Never reverts.
    pub completed: bool,
    /// Coins credited once on completion.
    pub reward: u64,
    /// Which observable drives progress.
    pub kind: QuestKind,
}

// ---------------------------------------------------------------------------
// Random events
// ---------------------------------------------------------------------------

/// The atomic effect applied when an event option is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventEffect {
    /// Credit coins to the tank balance.
    CreditCoins {
        /// Coins credited.
        amount: u64,
    },
}

/// One labelled choice offered by a [`GameEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventOption {
    /// Button label.
    pub label: String,
    /// Effect applied when chosen.
    pub effect: EventEffect,
}

/// A transient interrupt offering the player a choice.
///
/// At most one event is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameEvent {
    /// Instance identifier.
    pub id: EventId,
    /// Pool key of the definition this event was built from.
    pub kind: String,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Mutually exclusive options (at least one).
    pub options: Vec<EventOption>,
    /// Advisory expiry time.
    pub expires_at: DateTime<Utc>,
}
