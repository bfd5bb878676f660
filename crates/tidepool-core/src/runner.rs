//! Scheduler loop with operator controls.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that drives the tick loop with support for:
//!
//! - **Bounded runs**: stop after `max_ticks`
//! - **Pause/resume**: operator can halt and continue the tick loop
//! - **Variable tick speed**: tick interval adjustable at runtime
//! - **Operator stop**: clean stop via REST API
//!
//! Each iteration locks the shared [`Aquarium`] only for "tick + quest
//! evaluation", then releases it before handing the report to the
//! [`TickCallback`], so commands are never blocked by publishing or
//! persistence.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::aquarium::{Aquarium, TickReport};
use crate::operator::{OperatorState, SimulationEndReason};
use crate::tick::TickSummary;

/// Result of the scheduler run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the scheduler ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// Implementations publish notifications and hand the snapshot to the save
/// writer. The callback runs after the aquarium lock is released.
pub trait TickCallback: Send {
    /// Called after a tick completes.
    fn on_tick(&mut self, report: &TickReport);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _report: &TickReport) {}
}

/// Run the scheduler until a termination condition is met.
///
/// # Arguments
///
/// * `aquarium` - The shared authoritative tank
/// * `operator` - Shared operator control state
/// * `callback` - Called after each tick for publishing and persistence
pub async fn run_simulation(
    aquarium: &Arc<Mutex<Aquarium>>,
    operator: &Arc<OperatorState>,
    callback: &mut dyn TickCallback,
) -> SimulationResult {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = operator.max_ticks(),
        tick_interval_ms = operator.tick_interval_ms(),
        "Scheduler starting"
    );

    loop {
        // --- Check pause ---
        if operator.is_paused() {
            info!("Scheduler paused, waiting for resume...");
            operator.wait_if_paused().await;
            info!("Scheduler resumed");
        }

        // --- Check stop request (before tick) ---
        if operator.is_stop_requested() {
            info!("Operator stop requested");
            let reason = SimulationEndReason::OperatorStop;
            operator.set_end_reason(reason.clone()).await;
            return SimulationResult {
                end_reason: reason,
                final_summary: last_summary,
                total_ticks,
            };
        }

        // --- Execute tick ---
        let report = {
            let mut tank = aquarium.lock().await;
            tank.tick(Utc::now())
        };

        total_ticks = total_ticks.saturating_add(1);
        let ticks_run = operator.record_tick();

        // --- Notify callback ---
        callback.on_tick(&report);

        // --- Check tick limit (after tick) ---
        if operator.tick_limit_reached(ticks_run) {
            info!(
                tick = report.summary.tick,
                max_ticks = operator.max_ticks(),
                "Tick limit reached"
            );
            let reason = SimulationEndReason::MaxTicksReached;
            operator.set_end_reason(reason.clone()).await;
            return SimulationResult {
                end_reason: reason,
                final_summary: Some(report.summary),
                total_ticks,
            };
        }

        last_summary = Some(report.summary);

        // --- Sleep for tick interval ---
        let interval_ms = operator.tick_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

/// Log the scheduler end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Scheduler ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            creatures_alive = summary.creatures_alive,
            water_quality = summary.water_quality,
            coins = summary.coins,
            "Final tick summary"
        );
    } else {
        warn!("Scheduler ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tidepool_creatures::TankRules;
    use tidepool_types::{Notification, Species, TankState};

    use super::*;
    use crate::config::SimulationBoundsConfig;
    use crate::event::EventGenerator;

    fn shared_tank() -> Arc<Mutex<Aquarium>> {
        let rules = TankRules {
            event_chance: 0.0,
            ..TankRules::default()
        };
        Arc::new(Mutex::new(Aquarium::new(
            TankState::default(),
            rules,
            EventGenerator::default(),
            StdRng::seed_from_u64(42),
        )))
    }

    fn operator(max_ticks: u64) -> Arc<OperatorState> {
        Arc::new(OperatorState::new(&SimulationBoundsConfig {
            tick_interval_ms: 0,
            max_ticks,
        }))
    }

    struct Recorder {
        ticks: Vec<u64>,
        notifications: Vec<Notification>,
    }

    impl TickCallback for Recorder {
        fn on_tick(&mut self, report: &TickReport) {
            self.ticks.push(report.summary.tick);
            self.notifications.extend(report.notifications.iter().cloned());
        }
    }

    #[tokio::test]
    async fn bounded_by_max_ticks() {
        let tank = shared_tank();
        let op = operator(5);
        let mut cb = NoOpCallback;

        let result = run_simulation(&tank, &op, &mut cb).await;

        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(tank.lock().await.state().ticks_elapsed, 5);
        assert_eq!(
            op.end_reason().await,
            Some(SimulationEndReason::MaxTicksReached)
        );
    }

    #[tokio::test]
    async fn operator_stop_before_first_tick() {
        let tank = shared_tank();
        let op = operator(0);
        op.request_stop();
        let mut cb = NoOpCallback;

        let result = run_simulation(&tank, &op, &mut cb).await;

        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test]
    async fn callback_sees_every_tick_in_order() {
        let tank = shared_tank();
        tank.lock()
            .await
            .acquire_creature(Species::Goldfish, Utc::now())
            .unwrap();
        let op = operator(3);
        let mut cb = Recorder {
            ticks: Vec::new(),
            notifications: Vec::new(),
        };

        run_simulation(&tank, &op, &mut cb).await;

        assert_eq!(cb.ticks, vec![1, 2, 3]);
        assert!(
            cb.notifications
                .iter()
                .any(|n| matches!(n, Notification::QuestCompleted { .. }))
        );
    }

    #[tokio::test]
    async fn resumed_scheduler_continues() {
        let tank = shared_tank();
        let op = operator(2);
        op.pause();
        let handle = {
            let tank = Arc::clone(&tank);
            let op = Arc::clone(&op);
            tokio::spawn(async move {
                let mut cb = NoOpCallback;
                run_simulation(&tank, &op, &mut cb).await
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(op.ticks_run(), 0);
        op.resume();

        let result = handle.await.unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 2);
    }
}
