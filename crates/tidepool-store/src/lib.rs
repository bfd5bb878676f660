//! Save slot persistence for the Tidepool simulation.
//!
//! The whole tank is stored as one JSON document under a single key. The
//! slot itself is pluggable: process memory, a directory of files, or a
//! `Dragonfly` (Redis-compatible) instance.
//!
//! # Architecture
//!
//! ```text
//! startup --> save::load_or_default() <-- AnyStore (memory | file | dragonfly)
//!                                              ^
//! each tick --> SaveWriter::submit() ----------+
//! ```
//!
//! # Modules
//!
//! - [`backend`] -- The [`SaveStore`] trait and runtime-selected [`AnyStore`]
//! - [`memory`] -- In-process slot
//! - [`file`] -- One JSON file per key
//! - [`dragonfly`] -- `Dragonfly` (Redis-compatible) slot
//! - [`save`] -- Encode, decode and fall back to defaults
//! - [`writer`] -- Background writer that keeps storage off the tick path
//! - [`error`] -- Shared error types

pub mod backend;
pub mod dragonfly;
pub mod error;
pub mod file;
pub mod memory;
pub mod save;
pub mod writer;

// Re-export primary types for convenience.
pub use backend::{AnyStore, SaveStore};
pub use dragonfly::DragonflyStore;
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use save::{DEFAULT_SAVE_KEY, load_or_default};
pub use writer::SaveWriter;
