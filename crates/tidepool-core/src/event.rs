//! Random event generation and resolution.
//!
//! The [`EventGenerator`] rolls for a new event during a tick when none is
//! active. The [`EventTracker`] holds the single active event until the
//! player picks one of its options, which applies the option's effect to the
//! tank atomically.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use tidepool_types::{EventEffect, EventId, EventOption, GameEvent, Notification, TankState};
use tracing::{debug, info};

use crate::command::CommandError;
use crate::config::{EventSelection, EventsConfig};

/// Template from which [`GameEvent`] instances are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDefinition {
    /// Stable pool key.
    pub kind: String,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Options offered to the player (at least one).
    pub options: Vec<EventOption>,
}

/// The built-in event pool: a visitor leaves a coin gift.
pub fn default_pool() -> Vec<EventDefinition> {
    vec![EventDefinition {
        kind: String::from("gift"),
        title: String::from("A Generous Visitor"),
        message: String::from("Someone admired your tank and left a small gift."),
        options: vec![EventOption {
            label: String::from("Accept (+100 coins)"),
            effect: EventEffect::CreditCoins { amount: 100 },
        }],
    }]
}

/// Rolls for and instantiates random events.
#[derive(Debug, Clone)]
pub struct EventGenerator {
    pool: Vec<EventDefinition>,
    selection: EventSelection,
    lifetime: TimeDelta,
}

impl EventGenerator {
    /// Create a generator over `pool`.
    ///
    /// Definitions without options are dropped, since they could never be
    /// resolved.
    pub fn new(pool: Vec<EventDefinition>, selection: EventSelection, lifetime_ms: u64) -> Self {
        let pool = pool.into_iter().filter(|d| !d.options.is_empty()).collect();
        let lifetime = i64::try_from(lifetime_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or(TimeDelta::MAX);
        Self {
            pool,
            selection,
            lifetime,
        }
    }

    /// Create a generator over the built-in pool using `config`.
    pub fn from_config(config: &EventsConfig) -> Self {
        Self::new(default_pool(), config.selection, config.lifetime_ms)
    }

    /// Number of definitions in the pool.
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// With probability `chance`, build a new event expiring after the
    /// configured lifetime.
    pub fn roll<R: Rng + ?Sized>(
        &self,
        chance: f64,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Option<GameEvent> {
        if rng.random::<f64>() >= chance {
            return None;
        }
        let definition = self.select(rng)?;
        Some(self.instantiate(definition, now))
    }

    fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&EventDefinition> {
        match self.selection {
            EventSelection::First => self.pool.first(),
            EventSelection::Uniform => {
                if self.pool.is_empty() {
                    return None;
                }
                self.pool.get(rng.random_range(0..self.pool.len()))
            }
        }
    }

    fn instantiate(&self, definition: &EventDefinition, now: DateTime<Utc>) -> GameEvent {
        GameEvent {
            id: EventId::new(),
            kind: definition.kind.clone(),
            title: definition.title.clone(),
            message: definition.message.clone(),
            options: definition.options.clone(),
            expires_at: now
                .checked_add_signed(self.lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

impl Default for EventGenerator {
    fn default() -> Self {
        Self::from_config(&EventsConfig::default())
    }
}

/// Holds at most one active event.
#[derive(Debug, Clone, Default)]
pub struct EventTracker {
    active: Option<GameEvent>,
}

impl EventTracker {
    /// Create an empty tracker.
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// The active event, if any.
    pub const fn active(&self) -> Option<&GameEvent> {
        self.active.as_ref()
    }

    /// Whether an event is active.
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Make `event` the active event.
    ///
    /// Returns `false` and leaves the tracker unchanged if another event is
    /// already active.
    pub fn activate(&mut self, event: GameEvent) -> bool {
        if self.active.is_some() {
            return false;
        }
        info!(event_id = %event.id, kind = %event.kind, "Event triggered");
        self.active = Some(event);
        true
    }

    /// Apply the chosen option of the active event to `state` and clear it.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NoActiveEvent`] when nothing is active, or
    /// [`CommandError::InvalidEventOption`] when `option_index` is out of
    /// range. Neither case changes any state.
    pub fn resolve(
        &mut self,
        option_index: usize,
        state: &mut TankState,
    ) -> Result<Notification, CommandError> {
        let event = self.active.as_ref().ok_or(CommandError::NoActiveEvent)?;
        let option = event
            .options
            .get(option_index)
            .ok_or(CommandError::InvalidEventOption {
                index: option_index,
                available: event.options.len(),
            })?;

        apply_effect(option.effect, state);
        let notification = Notification::EventResolved {
            event_id: event.id,
            option: option.label.clone(),
        };
        info!(event_id = %event.id, option = %option.label, "Event resolved");
        self.active = None;
        Ok(notification)
    }

    /// Discard the active event if it has expired at `now`.
    ///
    /// Returns the discarded event.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>) -> Option<GameEvent> {
        if self.active.as_ref().is_some_and(|e| e.expires_at <= now) {
            let expired = self.active.take();
            if let Some(ref e) = expired {
                debug!(event_id = %e.id, "Event expired unresolved");
            }
            return expired;
        }
        None
    }
}

/// Apply an event effect to the tank.
pub const fn apply_effect(effect: EventEffect, state: &mut TankState) {
    match effect {
        EventEffect::CreditCoins { amount } => {
            state.coins = state.coins.saturating_add(amount);
        }
    }
}
