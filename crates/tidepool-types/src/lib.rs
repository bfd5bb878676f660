//! Shared type definitions for the Tidepool aquarium simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the Tidepool workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the presentation layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for creatures and events
//! - [`enums`] -- Species, decorations, facing, quest kinds
//! - [`structs`] -- Creatures, the persisted tank state, quests, events
//! - [`notification`] -- Side-effect signals for the presentation layer

pub mod enums;
pub mod ids;
pub mod notification;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Decoration, Facing, QuestKind, Species};
pub use ids::{CreatureId, EventId};
pub use notification::Notification;
pub use structs::{
    Creature, DEFAULT_STARTING_COINS, DEFAULT_TANK_LEVEL, EventEffect, EventOption, GameEvent,
    Position, Quest, TankState, VITAL_MAX, WATER_QUALITY_MAX,
};
