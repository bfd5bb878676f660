//! Tick resolver, quests, events, commands, and scheduling for the Tidepool
//! simulation.
//!
//! This crate owns the per-tick state transition and everything that reads
//! or writes the authoritative tank between ticks.
//!
//! # Modules
//!
//! - [`aquarium`] -- The authoritative tank container ([`Aquarium`]).
//! - [`command`] -- Player commands and their rejection reasons.
//! - [`config`] -- Configuration loading from `tidepool-config.yaml` into
//!   strongly-typed structs.
//! - [`event`] -- Random event generation and resolution.
//! - [`operator`] -- Pause, resume, speed and stop controls.
//! - [`quest`] -- Quest progress evaluation.
//! - [`runner`] -- The fixed-period scheduler loop.
//! - [`tick`] -- The pure tick resolver ([`advance`]).
//!
//! [`Aquarium`]: aquarium::Aquarium
//! [`advance`]: tick::advance

pub mod aquarium;
pub mod command;
pub mod config;
pub mod event;
pub mod operator;
pub mod quest;
pub mod runner;
pub mod tick;

pub use aquarium::{Aquarium, TickReport};
pub use command::CommandError;
pub use config::{ConfigError, SimulationConfig};
pub use event::{EventGenerator, EventTracker};
pub use operator::{OperatorState, SimulationEndReason, SimulationStatus};
pub use quest::{QuestBook, QuestProgress};
pub use runner::{NoOpCallback, SimulationResult, TickCallback, run_simulation};
pub use tick::{TickInput, TickOutcome, TickSummary, advance};
