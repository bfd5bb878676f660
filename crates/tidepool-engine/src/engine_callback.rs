//! Tick callback that publishes notifications and queues saves.
//!
//! After each tick, this callback broadcasts the tick's notifications to
//! every connected `WebSocket` client and hands the post-quest snapshot to
//! the [`SaveWriter`]. Neither step blocks the scheduler.

use std::sync::Arc;

use tidepool_api::state::AppState;
use tidepool_core::{TickCallback, TickReport};
use tidepool_store::SaveWriter;
use tracing::{debug, info, warn};

/// Callback that bridges the scheduler to the API and the save slot.
pub struct EngineCallback {
    state: Arc<AppState>,
    writer: SaveWriter,
}

impl EngineCallback {
    /// Create a callback publishing to `state` and saving through `writer`.
    pub const fn new(state: Arc<AppState>, writer: SaveWriter) -> Self {
        Self { state, writer }
    }

    /// Take back the save writer once the scheduler has finished.
    pub fn into_writer(self) -> SaveWriter {
        self.writer
    }
}

impl TickCallback for EngineCallback {
    fn on_tick(&mut self, report: &TickReport) {
        self.state.broadcast_all(&report.notifications);

        for quest_id in &report.quests_completed {
            info!(tick = report.summary.tick, quest_id = %quest_id, "Quest completed");
        }

        if let Err(e) = self.writer.submit(&report.snapshot) {
            warn!(tick = report.summary.tick, error = %e, "Failed to queue save");
        }

        debug!(
            tick = report.summary.tick,
            alive = report.summary.creatures_alive,
            water = report.summary.water_quality,
            coins = report.summary.coins,
            notifications = report.notifications.len(),
            "Tick published"
        );
    }
}
