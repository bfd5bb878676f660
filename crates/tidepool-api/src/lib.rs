//! Command API server for the Tidepool simulation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST reads** of the tank, quests and the active event
//! - **REST commands** (feed, clean, acquire, decorate, dispose, resolve
//!   event, toggle audio) applied to the authoritative tank
//! - **Operator endpoints** for scheduler control (pause, resume, speed,
//!   status, stop)
//! - **`WebSocket` endpoint** (`/ws/notifications`) streaming every
//!   notification via [`tokio::sync::broadcast`]
//!
//! # Architecture
//!
//! Handlers share the scheduler's `Arc<Mutex<Aquarium>>`. A command holds
//! the lock only for "validate + apply", so it runs strictly between two
//! ticks and a rejected command leaves the tank untouched.

pub mod error;
pub mod handlers;
pub mod operator;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_api};
pub use state::AppState;
