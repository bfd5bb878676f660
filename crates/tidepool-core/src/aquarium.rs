//! The authoritative tank container.
//!
//! [`Aquarium`] owns everything that changes while the simulation runs: the
//! persisted [`TankState`], the quest book, the active event, the random
//! source and the audio flag. The scheduler and the command surface share
//! one instance behind a mutex, so ticks and commands never interleave.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tidepool_creatures::{TankRules, catalog, decor};
use tidepool_types::{CreatureId, Decoration, GameEvent, Notification, Quest, Species, TankState};
use tracing::debug;

use crate::command::{self, CommandError};
use crate::config::SimulationConfig;
use crate::event::{EventGenerator, EventTracker};
use crate::quest::QuestBook;
use crate::tick::{self, TickInput, TickSummary};

/// Everything the scheduler needs after one tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Tick counters.
    pub summary: TickSummary,
    /// Tick and quest notifications, in order.
    pub notifications: Vec<Notification>,
    /// The post-tick, post-quest state to persist.
    pub snapshot: TankState,
    /// IDs of quests completed on this tick.
    pub quests_completed: Vec<String>,
}

/// A running tank.
#[derive(Debug)]
pub struct Aquarium {
    state: TankState,
    quests: QuestBook,
    events: EventTracker,
    generator: EventGenerator,
    rules: TankRules,
    rng: StdRng,
    audio_muted: bool,
    expire_events_on_tick: bool,
}

impl Aquarium {
    /// Create a tank from an initial state and explicit collaborators.
    pub fn new(state: TankState, rules: TankRules, generator: EventGenerator, rng: StdRng) -> Self {
        Self {
            state,
            quests: QuestBook::default(),
            events: EventTracker::new(),
            generator,
            rules,
            rng,
            audio_muted: false,
            expire_events_on_tick: false,
        }
    }

    /// Create a tank from an initial state using the loaded configuration.
    ///
    /// The random source is seeded from `tank.seed` when set, otherwise
    /// from the operating system.
    pub fn from_config(state: TankState, config: &SimulationConfig) -> Self {
        let rng = config
            .tank
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let mut aquarium = Self::new(
            state,
            config.rules.clone(),
            EventGenerator::from_config(&config.events),
            rng,
        );
        aquarium.expire_events_on_tick = config.events.expire_on_tick;
        aquarium
    }

    /// Replace the quest book.
    #[must_use]
    pub fn with_quests(mut self, quests: QuestBook) -> Self {
        self.quests = quests;
        self
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Resolve one tick at `now`, then evaluate quests against the result.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickReport {
        if self.expire_events_on_tick {
            self.events.sweep_expired(now);
        }

        let input = TickInput {
            event_active: self.events.is_active(),
            rules: &self.rules,
            events: &self.generator,
        };
        let outcome = tick::advance(&self.state, &input, &mut self.rng, now);
        self.state = outcome.state;
        let mut notifications = outcome.notifications;

        if let Some(event) = outcome.triggered_event {
            self.events.activate(event);
        }

        let progress = self.quests.evaluate(&mut self.state);
        notifications.extend(progress.notifications);

        let mut summary = outcome.summary;
        summary.coins = self.state.coins;

        debug!(
            tick = summary.tick,
            notifications = notifications.len(),
            "Aquarium tick complete"
        );

        TickReport {
            summary,
            notifications,
            snapshot: self.state.clone(),
            quests_completed: progress.completed,
        }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Feed every living creature.
    pub fn feed(&mut self) -> Result<Notification, CommandError> {
        command::feed(&mut self.state, &self.rules)
    }

    /// Restore the water to full quality.
    pub fn clean_water(&mut self) -> Result<Notification, CommandError> {
        command::clean_water(&mut self.state, &self.rules)
    }

    /// Buy a creature of `species`.
    pub fn acquire_creature(
        &mut self,
        species: Species,
        now: DateTime<Utc>,
    ) -> Result<Notification, CommandError> {
        command::acquire_creature(&mut self.state, species, &self.rules, &mut self.rng, now)
    }

    /// Buy a creature by its species id string.
    pub fn acquire_by_id(
        &mut self,
        species_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Notification, CommandError> {
        let def = catalog::lookup(species_id)?;
        self.acquire_creature(def.species, now)
    }

    /// Buy and install a decoration, at `price` or its list price.
    pub fn install_decoration(
        &mut self,
        decoration: Decoration,
        price: Option<u64>,
    ) -> Result<Notification, CommandError> {
        command::install_decoration(&mut self.state, decoration, price)
    }

    /// Buy and install a decoration by its id string.
    pub fn install_by_id(
        &mut self,
        decoration_id: &str,
        price: Option<u64>,
    ) -> Result<Notification, CommandError> {
        let def = decor::lookup(decoration_id)?;
        self.install_decoration(def.decoration, price)
    }

    /// Remove a dead creature.
    pub fn dispose_creature(
        &mut self,
        creature_id: CreatureId,
        confirmed: bool,
    ) -> Result<(), CommandError> {
        command::dispose_creature(&mut self.state, creature_id, confirmed)
    }

    /// Choose an option of the active event.
    pub fn resolve_event(&mut self, option_index: usize) -> Result<Notification, CommandError> {
        self.events.resolve(option_index, &mut self.state)
    }

    /// Flip the audio mute flag.
    pub const fn toggle_audio(&mut self) -> Notification {
        self.audio_muted = !self.audio_muted;
        Notification::AudioToggled {
            muted: self.audio_muted,
        }
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// The current tank state.
    pub const fn state(&self) -> &TankState {
        &self.state
    }

    /// The quests in order.
    pub fn quests(&self) -> &[Quest] {
        self.quests.quests()
    }

    /// The active event, if any.
    pub const fn active_event(&self) -> Option<&GameEvent> {
        self.events.active()
    }

    /// Whether audio is muted.
    pub const fn audio_muted(&self) -> bool {
        self.audio_muted
    }

    /// The rules in effect.
    pub const fn rules(&self) -> &TankRules {
        &self.rules
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::config::EventsConfig;

    fn aquarium(rules: TankRules) -> Aquarium {
        Aquarium::new(
            TankState::default(),
            rules,
            EventGenerator::default(),
            StdRng::seed_from_u64(5),
        )
    }

    fn quiet() -> TankRules {
        TankRules {
            move_chance: 0.0,
            event_chance: 0.0,
            ..TankRules::default()
        }
    }

    #[test]
    fn tick_evaluates_quests_after_resolution() {
        let mut tank = aquarium(quiet());
        tank.acquire_creature(Species::Goldfish, Utc::now()).unwrap();
        let report = tank.tick(Utc::now());
        assert_eq!(report.quests_completed, vec![String::from("q1")]);
        // 500 - 100 + 100 reward
        assert_eq!(report.snapshot.coins, 500);
        assert_eq!(report.summary.coins, 500);
        assert!(
            report
                .notifications
                .iter()
                .any(|n| matches!(n, Notification::QuestCompleted { .. }))
        );
    }

    #[test]
    fn perfect_water_quest_reads_post_tick_water() {
        let mut tank = aquarium(quiet());
        tank.acquire_creature(Species::Goldfish, Utc::now()).unwrap();
        tank.tick(Utc::now());
        let q2 = tank.quests().iter().find(|q| q.id == "q2").unwrap();
        assert_eq!(q2.current, 0);
    }

    #[test]
    fn triggered_event_becomes_active_and_blocks_new_rolls() {
        let mut tank = aquarium(TankRules {
            event_chance: 1.0,
            move_chance: 0.0,
            ..TankRules::default()
        });
        let first = tank.tick(Utc::now());
        let id = tank.active_event().unwrap().id;
        assert!(first.notifications.iter().any(|n| matches!(n, Notification::EventTriggered { .. })));

        let second = tank.tick(Utc::now());
        assert_eq!(tank.active_event().unwrap().id, id);
        assert!(!second.notifications.iter().any(|n| matches!(n, Notification::EventTriggered { .. })));

        tank.resolve_event(0).unwrap();
        assert!(tank.active_event().is_none());
        assert_eq!(tank.state().coins, 600);
    }

    #[test]
    fn events_do_not_expire_by_default() {
        let mut tank = aquarium(TankRules {
            event_chance: 1.0,
            ..quiet()
        });
        let now = Utc::now();
        tank.tick(now);
        tank.rules.event_chance = 0.0;
        tank.tick(now + TimeDelta::seconds(60));
        assert!(tank.active_event().is_some());
    }

    #[test]
    fn opt_in_expiry_clears_stale_events() {
        let mut config = SimulationConfig {
            events: EventsConfig {
                expire_on_tick: true,
                ..EventsConfig::default()
            },
            rules: TankRules {
                event_chance: 1.0,
                ..quiet()
            },
            ..SimulationConfig::default()
        };
        config.tank.seed = Some(1);
        let mut tank = Aquarium::from_config(TankState::default(), &config);
        let now = Utc::now();
        tank.tick(now);
        tank.rules.event_chance = 0.0;
        tank.tick(now + TimeDelta::seconds(60));
        assert!(tank.active_event().is_none());
    }

    #[test]
    fn toggle_audio_flips_flag() {
        let mut tank = aquarium(quiet());
        assert!(!tank.audio_muted());
        assert_eq!(tank.toggle_audio(), Notification::AudioToggled { muted: true });
        assert_eq!(tank.toggle_audio(), Notification::AudioToggled { muted: false });
    }

    #[test]
    fn unknown_species_id_is_rejected() {
        let mut tank = aquarium(quiet());
        assert_eq!(
            tank.acquire_by_id("Shark", Utc::now()).unwrap_err(),
            CommandError::UnknownSpecies(String::from("Shark"))
        );
        assert!(tank.state().creatures.is_empty());
    }

    #[test]
    fn install_by_id_uses_list_price() {
        let mut tank = aquarium(quiet());
        tank.install_by_id("coral", None).unwrap();
        assert_eq!(tank.state().coins, 0);
    }

    #[test]
    fn seeded_tanks_replay_identically() {
        let config = SimulationConfig {
            tank: crate::config::TankConfig {
                name: String::from("replay"),
                seed: Some(99),
            },
            ..SimulationConfig::default()
        };
        let funded = TankState {
            coins: 2000,
            ..TankState::default()
        };
        let mut a = Aquarium::from_config(funded.clone(), &config);
        let mut b = Aquarium::from_config(funded, &config);
        let now = Utc::now();
        for tank in [&mut a, &mut b] {
            tank.acquire_creature(Species::Guppy, now).unwrap();
            tank.acquire_creature(Species::Betta, now).unwrap();
        }
        for _ in 0..50 {
            a.tick(now);
            b.tick(now);
        }
        let strip = |s: &TankState| {
            s.creatures
                .iter()
                .map(|c| (c.name.clone(), c.hunger, c.health, c.position))
                .collect::<Vec<_>>()
        };
        assert_eq!(strip(a.state()), strip(b.state()));
        assert_eq!(a.state().coins, b.state().coins);
    }
}
