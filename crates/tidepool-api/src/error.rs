//! Error types for the command API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Rejected
//! commands carry the [`CommandError`] so the client sees why.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tidepool_core::CommandError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A player command was rejected. The tank is unchanged.
    #[error("{0}")]
    Command(#[from] CommandError),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request body was well-formed but not acceptable.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Command(e) => command_status(e),
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Serialization(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

const fn command_status(error: &CommandError) -> StatusCode {
    match error {
        CommandError::InsufficientFunds { .. } => StatusCode::PAYMENT_REQUIRED,
        CommandError::SpeciesExclusivityViolation { .. }
        | CommandError::TankFull { .. }
        | CommandError::DuplicateDecoration(_)
        | CommandError::CreatureStillAlive(_)
        | CommandError::NoActiveEvent => StatusCode::CONFLICT,
        CommandError::CreatureNotFound(_) => StatusCode::NOT_FOUND,
        CommandError::DisposalNotConfirmed
        | CommandError::InvalidEventOption { .. }
        | CommandError::UnknownSpecies(_)
        | CommandError::UnknownDecoration(_) => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Serialization(e) => format!("JSON error: {e}"),
            other => other.to_string(),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
