//! Error types for the tidepool-creatures crate.

/// Errors raised when resolving catalog identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreatureError {
    /// The species id is not registered in the catalog.
    #[error("unknown species: {0}")]
    UnknownSpecies(String),

    /// The decoration id is not registered in the decoration table.
    #[error("unknown decoration: {0}")]
    UnknownDecoration(String),
}
