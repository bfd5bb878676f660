//! Background save writer.
//!
//! The tick loop must never wait on storage. [`SaveWriter::submit`] encodes
//! the tank and hands it to a background task through a `watch` channel.
//! Only the newest pending save is kept: if several ticks land while a write
//! is in flight, the intermediate ones are skipped and the latest wins.
//!
//! ```text
//! tick --> submit() --watch--> writer task --> SaveStore::save()
//! ```

use tidepool_types::TankState;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::backend::SaveStore;
use crate::error::StoreError;
use crate::save;

/// Handle to the background writer task.
pub struct SaveWriter {
    tx: watch::Sender<Option<String>>,
    handle: JoinHandle<u64>,
}

impl SaveWriter {
    /// Spawn a writer that persists into `store` under `key`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S>(store: S, key: impl Into<String>) -> Self
    where
        S: SaveStore + 'static,
    {
        let key = key.into();
        let (tx, mut rx) = watch::channel::<Option<String>>(None);

        let handle = tokio::spawn(async move {
            let mut written: u64 = 0;
            // `changed` still reports the final value after the sender drops.
            while rx.changed().await.is_ok() {
                let pending = rx.borrow_and_update().clone();
                let Some(payload) = pending else {
                    continue;
                };
                match store.save(&key, &payload).await {
                    Ok(()) => {
                        written = written.saturating_add(1);
                        debug!(key = %key, bytes = payload.len(), "Tank saved");
                    }
                    Err(e) => {
                        warn!(key = %key, error = %e, "Failed to save tank");
                    }
                }
            }
            written
        });

        Self { tx, handle }
    }

    /// Queue the current tank for saving, replacing any unsaved earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the tank cannot be encoded.
    pub fn submit(&self, state: &TankState) -> Result<(), StoreError> {
        let payload = save::encode(state)?;
        self.tx.send_replace(Some(payload));
        Ok(())
    }

    /// Flush the last queued save and stop the writer.
    ///
    /// Returns the number of successful writes.
    pub async fn shutdown(self) -> u64 {
        let Self { tx, handle } = self;
        drop(tx);
        match handle.await {
            Ok(written) => written,
            Err(e) => {
                warn!(error = %e, "Save writer task failed");
                0
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::memory::MemoryStore;

    #[tokio::test]
    async fn last_submission_is_flushed_on_shutdown() {
        let store = MemoryStore::new();
        let writer = SaveWriter::spawn(store.clone(), "slot");

        for coins in [10_u64, 20, 30] {
            let state = TankState {
                coins,
                ..TankState::default()
            };
            writer.submit(&state).unwrap();
        }
        let written = writer.shutdown().await;
        assert!(written >= 1);

        let raw = store.load("slot").await.unwrap().unwrap();
        let restored = save::decode("slot", &raw, Utc::now()).unwrap();
        assert_eq!(restored.coins, 30);
    }

    #[tokio::test]
    async fn shutdown_without_submissions_writes_nothing() {
        let store = MemoryStore::new();
        let writer = SaveWriter::spawn(store.clone(), "slot");
        assert_eq!(writer.shutdown().await, 0);
        assert_eq!(store.load("slot").await.unwrap(), None);
    }
}
