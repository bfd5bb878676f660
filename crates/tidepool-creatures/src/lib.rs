//! Species catalog, decorations, and creature lifecycle for the Tidepool
//! simulation.
//!
//! This crate contains the logic layer for individual creatures -- everything
//! that operates on a creature without touching I/O or the rest of the tank.
//! It sits between `tidepool-types` (which defines the data structures) and
//! `tidepool-core` (which resolves whole-tank ticks and commands).
//!
//! # Modules
//!
//! - [`catalog`] -- Static per-species stat templates ([`SpeciesDefinition`])
//! - [`config`] -- Tunable tick and economy rules ([`TankRules`])
//! - [`death`] -- Death conditions and consequences ([`DeathCause`])
//! - [`decor`] -- Decoration prices and effects ([`DecorationDefinition`])
//! - [`error`] -- Error types for catalog lookups ([`CreatureError`])
//! - [`naming`] -- Random display names
//! - [`spawn`] -- Construction of newly acquired creatures
//! - [`vitals`] -- Per-tick vital mechanics (decay, damage, leveling)

pub mod catalog;
pub mod config;
pub mod death;
pub mod decor;
pub mod error;
pub mod naming;
pub mod spawn;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use catalog::SpeciesDefinition;
pub use config::TankRules;
pub use death::{DeathCause, PreTickVitals};
pub use decor::{DecorationDefinition, MoodBonus};
pub use error::CreatureError;
pub use spawn::spawn_creature;
pub use vitals::{TankConditions, VitalTickResult, apply_feed, apply_vital_tick, clamp_vital};
