//! Shared application state for the command API server.
//!
//! [`AppState`] holds the authoritative [`Aquarium`] (shared with the
//! scheduler), the broadcast channel for notifications and, when the
//! scheduler is running, its operator controls.

use std::sync::Arc;

use tidepool_core::Aquarium;
use tidepool_core::operator::OperatorState;
use tidepool_types::Notification;
use tokio::sync::{Mutex, broadcast};

/// Capacity of the broadcast channel for notifications.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. Handlers
/// hold the aquarium lock only for "validate + apply" of one command.
#[derive(Clone)]
pub struct AppState {
    /// The authoritative tank, shared with the scheduler.
    pub aquarium: Arc<Mutex<Aquarium>>,
    /// Broadcast sender for notifications.
    pub tx: broadcast::Sender<Notification>,
    /// Shared operator control state (present when the scheduler is running).
    pub operator_state: Option<Arc<OperatorState>>,
}

impl AppState {
    /// Create application state around a shared aquarium.
    pub fn new(aquarium: Arc<Mutex<Aquarium>>) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            aquarium,
            tx,
            operator_state: None,
        }
    }

    /// Create application state with operator control state attached.
    pub fn with_operator(aquarium: Arc<Mutex<Aquarium>>, operator: Arc<OperatorState>) -> Self {
        let mut state = Self::new(aquarium);
        state.operator_state = Some(operator);
        state
    }

    /// Subscribe to the notification channel.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Publish a notification to all connected clients.
    ///
    /// Returns the number of receivers that received the message.
    /// Returns 0 if no clients are connected (this is not an error).
    pub fn broadcast(&self, notification: &Notification) -> usize {
        // send returns Err only when there are zero receivers,
        // which is normal when no WebSocket clients are connected.
        self.tx.send(notification.clone()).unwrap_or(0)
    }

    /// Publish several notifications in order.
    pub fn broadcast_all(&self, notifications: &[Notification]) {
        for notification in notifications {
            self.broadcast(notification);
        }
    }
}
