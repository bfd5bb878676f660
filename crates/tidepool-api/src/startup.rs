//! API server startup helper for embedding in the engine.
//!
//! Provides [`spawn_api`] which launches the HTTP + `WebSocket` server on a
//! background Tokio task, so it runs concurrently with the scheduler.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the API server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the API server on a background Tokio task.
///
/// Must be called from within a Tokio runtime.
///
/// The server runs until the runtime shuts down or the returned handle is
/// aborted.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the address is obviously invalid.
/// Bind failures happen inside the task and are logged there.
pub fn spawn_api(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    let addr = config.bind_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state).await {
            tracing::error!(error = %e, "API server exited with error");
        }
    });

    tracing::info!(%addr, "API server spawned on background task");

    Ok(handle)
}
