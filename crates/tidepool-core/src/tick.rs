//! Tick resolver: the pure per-interval transition function.
//!
//! Each call to [`advance`] is exactly one unit of game time. The phases
//! run in a fixed order:
//!
//! 1. **Pollution** -- living creatures foul the water, scaled by installed
//!    decorations.
//! 2. **Aggression** -- determine whether any aggressive species is crowded.
//! 3. **Creatures** -- decay, movement, damage, death, decoration bonus and
//!    leveling for every living creature, in acquisition order.
//! 4. **Tank progression** -- clean, populated water earns tank experience.
//! 5. **Event roll** -- when no event is active, maybe trigger one.
//!
//! The resolver never reads a clock or a global generator: the caller
//! supplies `now` and the random source, so a seeded generator makes the
//! whole tick reproducible. Persistence is the scheduler's job.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tidepool_creatures::{TankConditions, TankRules, apply_vital_tick, catalog, decor};
use tidepool_types::{GameEvent, Notification, Species, TankState, WATER_QUALITY_MAX};
use tracing::debug;

use crate::event::EventGenerator;

/// Inputs to a tick besides the tank state itself.
#[derive(Debug, Clone, Copy)]
pub struct TickInput<'a> {
    /// Whether an event is currently awaiting resolution.
    pub event_active: bool,
    /// Tick and economy rules.
    pub rules: &'a TankRules,
    /// Event pool for the roll phase.
    pub events: &'a EventGenerator,
}

/// Counters describing one resolved tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSummary {
    /// Tick number that was resolved (1-based).
    pub tick: u64,
    /// Living creatures at the end of the tick.
    pub creatures_alive: u32,
    /// Creatures that died this tick.
    pub deaths: u32,
    /// Level-ups this tick.
    pub level_ups: u32,
    /// Water quality at the end of the tick.
    pub water_quality: f64,
    /// Coin balance at the end of the tick.
    pub coins: u64,
}

/// Result of one call to [`advance`].
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// The next tank state.
    pub state: TankState,
    /// Notifications raised during the tick, in order.
    pub notifications: Vec<Notification>,
    /// A newly triggered event, if the roll succeeded.
    pub triggered_event: Option<GameEvent>,
    /// Counters for logging.
    pub summary: TickSummary,
}

/// Resolve one tick.
pub fn advance<R: Rng + ?Sized>(
    state: &TankState,
    input: &TickInput<'_>,
    rng: &mut R,
    now: DateTime<Utc>,
) -> TickOutcome {
    let rules = input.rules;
    let mut next = state.clone();
    let mut notifications = Vec::new();

    // --- Phase 1: Pollution ---
    next.water_quality = polluted_water(&next, rules);

    // --- Phase 2: Aggression ---
    let crowded_species = crowded_aggressive_species(&next);

    // --- Phase 3: Creatures ---
    let mut deaths: u32 = 0;
    let mut level_ups: u32 = 0;
    let mut bonus_coins: u64 = 0;
    for creature in &mut next.creatures {
        let conditions = TankConditions {
            water_quality: next.water_quality,
            crowded: crowded_species.contains(&creature.species),
            decorations: &next.decorations,
        };
        let result = apply_vital_tick(creature, &conditions, rules, rng);
        if result.death.is_some() {
            deaths = deaths.saturating_add(1);
        }
        if result.level_up.is_some() {
            level_ups = level_ups.saturating_add(1);
            bonus_coins = bonus_coins.saturating_add(rules.level_up_bonus);
        }
        notifications.extend(result.notifications);
    }
    next.coins = next.coins.saturating_add(bonus_coins);

    // --- Phase 4: Tank progression ---
    if next.water_quality > rules.tank_experience_threshold && next.any_alive() {
        next.tank_experience = next.tank_experience.saturating_add(1);
    }

    // --- Phase 5: Event roll ---
    let triggered_event = if input.event_active {
        None
    } else {
        input.events.roll(rules.event_chance, rng, now)
    };
    if let Some(ref event) = triggered_event {
        notifications.push(Notification::EventTriggered {
            event_id: event.id,
            title: event.title.clone(),
        });
    }

    next.last_tick = now;
    next.ticks_elapsed = next.ticks_elapsed.saturating_add(1);

    let summary = TickSummary {
        tick: next.ticks_elapsed,
        creatures_alive: u32::try_from(next.living_count()).unwrap_or(u32::MAX),
        deaths,
        level_ups,
        water_quality: next.water_quality,
        coins: next.coins,
    };
    debug!(
        tick = summary.tick,
        alive = summary.creatures_alive,
        deaths,
        level_ups,
        water = summary.water_quality,
        coins = summary.coins,
        "Tick resolved"
    );

    TickOutcome {
        state: next,
        notifications,
        triggered_event,
        summary,
    }
}

/// Water quality after this tick's pollution load.
fn polluted_water(state: &TankState, rules: &TankRules) -> f64 {
    let living = u32::try_from(state.living_count()).unwrap_or(u32::MAX);
    let load = f64::from(living)
        * rules.pollution_per_creature
        * decor::pollution_multiplier(&state.decorations);
    (state.water_quality - load * rules.pollution_scale).clamp(0.0, WATER_QUALITY_MAX)
}

/// Aggressive species with more than one living member.
fn crowded_aggressive_species(state: &TankState) -> Vec<Species> {
    Species::ALL
        .into_iter()
        .filter(|s| catalog::definition(*s).aggressive_with_own_species)
        .filter(|s| {
            state
                .creatures
                .iter()
                .filter(|c| c.alive && c.species == *s)
                .nth(1)
                .is_some()
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tidepool_creatures::spawn_creature;
    use tidepool_types::Decoration;

    use super::*;

    fn quiet_rules() -> TankRules {
        TankRules {
            move_chance: 0.0,
            event_chance: 0.0,
            ..TankRules::default()
        }
    }

    fn tank_with(species: &[Species], rng: &mut StdRng) -> TankState {
        let rules = TankRules::default();
        let mut state = TankState::default();
        for s in species {
            state.creatures.push(spawn_creature(*s, &rules, rng, Utc::now()));
        }
        state
    }

    fn run(state: &TankState, rules: &TankRules, event_active: bool, rng: &mut StdRng) -> TickOutcome {
        let events = EventGenerator::default();
        let input = TickInput {
            event_active,
            rules,
            events: &events,
        };
        advance(state, &input, rng, Utc::now())
    }

    #[test]
    fn empty_tank_keeps_water_and_earns_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = TankState::default();
        let out = run(&state, &quiet_rules(), false, &mut rng);
        assert!((out.state.water_quality - 100.0).abs() < f64::EPSILON);
        assert_eq!(out.state.tank_experience, 0);
        assert_eq!(out.state.ticks_elapsed, 1);
    }

    #[test]
    fn pollution_scales_with_population() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = tank_with(&[Species::Goldfish, Species::Goldfish], &mut rng);
        let out = run(&state, &quiet_rules(), false, &mut rng);
        // 2 * 0.5 * 0.1
        assert!((out.state.water_quality - 99.9).abs() < 1e-9);
        assert_eq!(out.state.tank_experience, 1);
    }

    #[test]
    fn volcano_boosts_pollution() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = tank_with(&[Species::Goldfish, Species::Goldfish], &mut rng);
        state.decorations.insert(Decoration::Volcano);
        let out = run(&state, &quiet_rules(), false, &mut rng);
        // 2 * 0.5 * 1.5 * 0.1
        assert!((out.state.water_quality - 99.85).abs() < 1e-9);
    }

    #[test]
    fn water_never_increases_and_stays_bounded() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = tank_with(&[Species::Goldfish; 6], &mut rng);
        let rules = quiet_rules();
        for _ in 0..2000 {
            let before = state.water_quality;
            state = run(&state, &rules, false, &mut rng).state;
            assert!(state.water_quality <= before);
            assert!(state.water_quality >= 0.0);
        }
    }

    #[test]
    fn vitals_stay_in_range_and_death_is_monotonic() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut state = tank_with(
            &[Species::Guppy, Species::NeonTetra, Species::Clownfish, Species::Betta],
            &mut rng,
        );
        let rules = TankRules {
            event_chance: 0.0,
            ..TankRules::default()
        };
        for _ in 0..500 {
            let before = state.clone();
            state = run(&state, &rules, false, &mut rng).state;
            for c in &state.creatures {
                let max = catalog::definition(c.species).max_health;
                assert!((0.0..=100.0).contains(&c.hunger));
                assert!((0.0..=100.0).contains(&c.mood));
                assert!((0.0..=max).contains(&c.health));
                let prev = before.creature(c.id).unwrap();
                if !prev.alive {
                    assert_eq!(c, prev);
                }
            }
        }
        assert!(!state.any_alive());
    }

    #[test]
    fn crowded_bettas_fight() {
        let mut rng = StdRng::seed_from_u64(2);
        let state = tank_with(&[Species::Betta, Species::Betta], &mut rng);
        let out = run(&state, &quiet_rules(), false, &mut rng);
        for c in &out.state.creatures {
            assert!((c.health - 110.0).abs() < f64::EPSILON);
            assert!((c.mood - 59.5).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn dead_betta_does_not_crowd() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = tank_with(&[Species::Betta, Species::Betta], &mut rng);
        state.creatures.first_mut().unwrap().alive = false;
        let out = run(&state, &quiet_rules(), false, &mut rng);
        let living = out.state.creatures.iter().find(|c| c.alive).unwrap();
        assert!((living.health - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn level_up_pays_bonus() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = tank_with(&[Species::Goldfish], &mut rng);
        state.creatures.first_mut().unwrap().experience = 100;
        let out = run(&state, &quiet_rules(), false, &mut rng);
        assert_eq!(out.state.coins, 510);
        assert_eq!(out.summary.level_ups, 1);
        assert!(
            out.notifications
                .iter()
                .any(|n| matches!(n, Notification::LevelUp { level: 2, .. }))
        );
    }

    #[test]
    fn death_emits_notification() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = tank_with(&[Species::Guppy], &mut rng);
        let fish = state.creatures.first_mut().unwrap();
        fish.hunger = 0.0;
        fish.health = 5.0;
        let out = run(&state, &quiet_rules(), false, &mut rng);
        assert_eq!(out.summary.deaths, 1);
        assert!(!out.state.any_alive());
        assert!(matches!(
            out.notifications.first(),
            Some(Notification::CreatureDied { .. })
        ));
        // No living creature, no tank experience.
        assert_eq!(out.state.tank_experience, 0);
    }

    #[test]
    fn event_roll_respects_active_event() {
        let mut rng = StdRng::seed_from_u64(3);
        let rules = TankRules {
            event_chance: 1.0,
            move_chance: 0.0,
            ..TankRules::default()
        };
        let state = TankState::default();
        assert!(run(&state, &rules, true, &mut rng).triggered_event.is_none());

        let out = run(&state, &rules, false, &mut rng);
        assert!(out.triggered_event.is_some());
        assert!(
            out.notifications
                .iter()
                .any(|n| matches!(n, Notification::EventTriggered { .. }))
        );
    }

    #[test]
    fn same_seed_same_outcome() {
        let mut setup = StdRng::seed_from_u64(10);
        let state = tank_with(&[Species::Goldfish, Species::Guppy, Species::Betta], &mut setup);
        let rules = TankRules::default();
        let events = EventGenerator::default();
        let input = TickInput {
            event_active: false,
            rules: &rules,
            events: &events,
        };
        let now = Utc::now();

        let mut a = StdRng::seed_from_u64(77);
        let mut b = StdRng::seed_from_u64(77);
        let mut sa = state.clone();
        let mut sb = state;
        for _ in 0..100 {
            sa = advance(&sa, &input, &mut a, now).state;
            sb = advance(&sb, &input, &mut b, now).state;
        }
        assert_eq!(sa, sb);
    }

    #[test]
    fn last_tick_is_stamped() {
        let mut rng = StdRng::seed_from_u64(1);
        let events = EventGenerator::default();
        let rules = quiet_rules();
        let now = Utc::now();
        let input = TickInput {
            event_active: false,
            rules: &rules,
            events: &events,
        };
        let out = advance(&TankState::default(), &input, &mut rng, now);
        assert_eq!(out.state.last_tick, now);
    }
}
