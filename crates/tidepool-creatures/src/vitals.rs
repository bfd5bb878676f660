//! Vital mechanics applied to creatures each tick.
//!
//! One call to [`apply_vital_tick`] advances a single living creature by
//! one unit of game time:
//!
//! - Hunger and mood decay by the species rates
//! - The creature may wander a small random step
//! - Starvation, poor water and same-species crowding deal damage
//! - A creature whose health is exhausted dies and skips the rest
//! - Installed decorations may lift its mood
//! - It gains experience and may level up
//!
//! Dead creatures are passed through untouched.

use std::collections::BTreeSet;

use rand::Rng;
use tidepool_types::{Creature, Decoration, Facing, Notification, VITAL_MAX};

use crate::catalog;
use crate::config::TankRules;
use crate::death::{DeathCause, PreTickVitals, check_death, process_death};
use crate::decor;

/// Tank-wide conditions shared by every creature during one tick.
#[derive(Debug, Clone, Copy)]
pub struct TankConditions<'a> {
    /// Water quality after this tick's pollution was applied.
    pub water_quality: f64,
    /// Whether more than one living member of an aggressive species exists.
    pub crowded: bool,
    /// Installed decorations.
    pub decorations: &'a BTreeSet<Decoration>,
}

/// Result of applying one tick of vital mechanics to a creature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VitalTickResult {
    /// If the creature died during this tick, the cause of death.
    pub death: Option<DeathCause>,
    /// If the creature leveled up during this tick, its new level.
    pub level_up: Option<u32>,
    /// Notifications produced for this creature.
    pub notifications: Vec<Notification>,
}

/// Damage contributions of a single tick, kept apart to name the cause of
/// death.
#[derive(Debug, Clone, Copy, Default)]
struct Damage {
    starvation: f64,
    water: f64,
    fighting: f64,
}

impl Damage {
    fn total(self) -> f64 {
        self.starvation + self.water + self.fighting
    }

    fn dominant_cause(self) -> DeathCause {
        if self.fighting > 0.0 {
            DeathCause::Fighting
        } else if self.starvation > 0.0 {
            DeathCause::Starvation
        } else {
            DeathCause::PoorWater
        }
    }
}

/// Clamp a hunger or mood value to its valid range.
pub fn clamp_vital(value: f64) -> f64 {
    value.clamp(0.0, VITAL_MAX)
}

/// Apply one tick of vital mechanics to `creature`.
///
/// # Order of operations
///
/// 1. Decay hunger and mood
/// 2. Random movement
/// 3. Sum starvation, water and crowding damage
/// 4. Death check (returns early on death)
/// 5. Decoration mood bonus
/// 6. Experience and leveling
pub fn apply_vital_tick<R: Rng + ?Sized>(
    creature: &mut Creature,
    conditions: &TankConditions<'_>,
    rules: &TankRules,
    rng: &mut R,
) -> VitalTickResult {
    let mut result = VitalTickResult::default();
    if !creature.alive {
        return result;
    }

    let def = catalog::definition(creature.species);
    let before = PreTickVitals::capture(creature);

    // 1. Decay
    creature.hunger = clamp_vital(creature.hunger - def.hunger_decay);
    creature.mood = clamp_vital(creature.mood - def.mood_decay);

    // 2. Movement
    wander(creature, rules, rng);

    // 3. Damage
    let mut damage = Damage::default();
    if creature.hunger <= 0.0 {
        damage.starvation = rules.starvation_damage;
    }
    if conditions.water_quality < rules.poor_water_threshold {
        damage.water = def.water_sensitivity * rules.water_damage_factor;
    }
    if conditions.crowded && def.aggressive_with_own_species {
        damage.fighting = rules.crowding_health_damage;
        creature.mood = clamp_vital(creature.mood - rules.crowding_mood_penalty);
    }
    creature.health = (creature.health - damage.total()).min(def.max_health);

    // 4. Death
    if check_death(creature) {
        let cause = damage.dominant_cause();
        tracing::debug!(
            creature_id = %creature.id,
            species = %creature.species,
            cause = %cause,
            "Creature died"
        );
        result.notifications.push(process_death(creature, before));
        result.death = Some(cause);
        return result;
    }

    // 5. Decoration mood bonus
    let bonus = decor::mood_bonus(creature.species, conditions.decorations);
    if bonus > 0.0 {
        creature.mood = clamp_vital(creature.mood + bonus);
    }

    // 6. Experience and leveling
    creature.experience = creature.experience.saturating_add(rules.experience_per_tick);
    if creature.experience > rules.level_threshold(creature.level) {
        creature.level = creature.level.saturating_add(1);
        creature.experience = 0;
        result.level_up = Some(creature.level);
        result.notifications.push(Notification::LevelUp {
            creature_id: creature.id,
            name: creature.name.clone(),
            level: creature.level,
            bonus_coins: rules.level_up_bonus,
        });
    }

    result
}

/// With probability `move_chance`, shift the creature by a random step and
/// clamp it to the swimmable area. Facing follows the sign of the
/// horizontal step.
fn wander<R: Rng + ?Sized>(creature: &mut Creature, rules: &TankRules, rng: &mut R) {
    if rng.random::<f64>() >= rules.move_chance {
        return;
    }
    let dx = (rng.random::<f64>() - 0.5) * 2.0 * rules.move_max_dx;
    let dy = (rng.random::<f64>() - 0.5) * 2.0 * rules.move_max_dy;

    creature.position.x = (creature.position.x + dx).max(rules.min_x).min(rules.max_x);
    creature.position.y = (creature.position.y + dy).max(rules.min_y).min(rules.max_y);

    if dx > 0.0 {
        creature.facing = Facing::Right;
    } else if dx < 0.0 {
        creature.facing = Facing::Left;
    }
}

/// Apply the effect of one feed command to a living creature.
///
/// Experience is granted without a level check; the next tick's leveling
/// step picks it up.
pub fn apply_feed(creature: &mut Creature, rules: &TankRules) {
    if !creature.alive {
        return;
    }
    creature.hunger = clamp_vital(creature.hunger + rules.feed_hunger);
    creature.mood = clamp_vital(creature.mood + rules.feed_mood);
    creature.experience = creature.experience.saturating_add(rules.feed_experience);
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tidepool_types::{CreatureId, Position, Species};

    use super::*;

    fn creature(species: Species) -> Creature {
        Creature {
            id: CreatureId::new(),
            species,
            name: String::from("Finn"),
            born_at: Utc::now(),
            hunger: 80.0,
            mood: 80.0,
            health: catalog::definition(species).max_health,
            alive: true,
            level: 1,
            experience: 0,
            position: Position::CENTER,
            facing: Facing::Left,
        }
    }

    fn calm_rules() -> TankRules {
        TankRules {
            move_chance: 0.0,
            ..TankRules::default()
        }
    }

    fn clean<'a>(decorations: &'a BTreeSet<Decoration>) -> TankConditions<'a> {
        TankConditions {
            water_quality: 100.0,
            crowded: false,
            decorations,
        }
    }

    #[test]
    fn decay_follows_species_rates() {
        let decorations = BTreeSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = creature(Species::Guppy);
        let result = apply_vital_tick(&mut c, &clean(&decorations), &calm_rules(), &mut rng);

        assert!(result.death.is_none());
        assert!((c.hunger - 76.0).abs() < f64::EPSILON);
        assert!((c.mood - 79.0).abs() < f64::EPSILON);
        assert!((c.health - 50.0).abs() < f64::EPSILON);
        assert_eq!(c.experience, 1);
    }

    #[test]
    fn starving_creature_takes_damage() {
        let decorations = BTreeSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = creature(Species::Goldfish);
        c.hunger = 0.5;
        apply_vital_tick(&mut c, &clean(&decorations), &calm_rules(), &mut rng);
        assert!(c.hunger.abs() < f64::EPSILON);
        assert!((c.health - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn poor_water_scales_with_sensitivity() {
        let decorations = BTreeSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = creature(Species::NeonTetra);
        let conditions = TankConditions {
            water_quality: 49.9,
            crowded: false,
            decorations: &decorations,
        };
        apply_vital_tick(&mut c, &conditions, &calm_rules(), &mut rng);
        assert!((c.health - 36.0).abs() < f64::EPSILON);
    }

    #[test]
    fn crowded_aggressive_creature_fights() {
        let decorations = BTreeSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = creature(Species::Betta);
        let conditions = TankConditions {
            water_quality: 100.0,
            crowded: true,
            decorations: &decorations,
        };
        apply_vital_tick(&mut c, &conditions, &calm_rules(), &mut rng);
        assert!((c.health - 110.0).abs() < f64::EPSILON);
        // 80 - 0.5 decay - 20 crowding
        assert!((c.mood - 59.5).abs() < f64::EPSILON);
    }

    #[test]
    fn crowding_ignores_peaceful_species() {
        let decorations = BTreeSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = creature(Species::Goldfish);
        let conditions = TankConditions {
            water_quality: 100.0,
            crowded: true,
            decorations: &decorations,
        };
        apply_vital_tick(&mut c, &conditions, &calm_rules(), &mut rng);
        assert!((c.health - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn death_freezes_creature_and_skips_progression() {
        let decorations: BTreeSet<_> = [Decoration::Coral].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = creature(Species::Clownfish);
        c.hunger = 1.0;
        c.mood = 40.0;
        c.health = 4.0;
        c.experience = 100;

        let result = apply_vital_tick(&mut c, &clean(&decorations), &calm_rules(), &mut rng);

        assert_eq!(result.death, Some(DeathCause::Starvation));
        assert!(!c.alive);
        assert!(c.health.abs() < f64::EPSILON);
        assert!((c.hunger - 1.0).abs() < f64::EPSILON);
        assert!((c.mood - 40.0).abs() < f64::EPSILON);
        assert_eq!(c.experience, 100);
        assert!(result.level_up.is_none());
        assert_eq!(result.notifications.len(), 1);
    }

    #[test]
    fn dead_creature_passes_through() {
        let decorations = BTreeSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = creature(Species::Guppy);
        c.alive = false;
        c.health = 0.0;
        let before = c.clone();
        let result = apply_vital_tick(&mut c, &clean(&decorations), &TankRules::default(), &mut rng);
        assert_eq!(c, before);
        assert_eq!(result, VitalTickResult::default());
    }

    #[test]
    fn coral_lifts_clownfish_mood() {
        let decorations: BTreeSet<_> = [Decoration::Coral].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = creature(Species::Clownfish);
        apply_vital_tick(&mut c, &clean(&decorations), &calm_rules(), &mut rng);
        // 80 - 2 decay + 2 coral
        assert!((c.mood - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn level_up_requires_strictly_more_than_threshold() {
        let decorations = BTreeSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = creature(Species::Goldfish);
        c.experience = 99;
        let first = apply_vital_tick(&mut c, &clean(&decorations), &calm_rules(), &mut rng);
        assert!(first.level_up.is_none());
        assert_eq!(c.experience, 100);

        let second = apply_vital_tick(&mut c, &clean(&decorations), &calm_rules(), &mut rng);
        assert_eq!(second.level_up, Some(2));
        assert_eq!(c.level, 2);
        assert_eq!(c.experience, 0);
    }

    #[test]
    fn movement_stays_in_bounds() {
        let decorations = BTreeSet::new();
        let mut rng = StdRng::seed_from_u64(99);
        let rules = TankRules {
            move_chance: 1.0,
            ..TankRules::default()
        };
        let mut c = creature(Species::Goldfish);
        c.position = Position { x: 89.0, y: 11.0 };
        for _ in 0..200 {
            c.hunger = 80.0;
            apply_vital_tick(&mut c, &clean(&decorations), &rules, &mut rng);
            assert!(c.position.x >= 5.0 && c.position.x <= 90.0);
            assert!(c.position.y >= 10.0 && c.position.y <= 80.0);
        }
    }

    #[test]
    fn feed_clamps_and_grants_experience() {
        let rules = TankRules::default();
        let mut c = creature(Species::Goldfish);
        c.hunger = 90.0;
        c.mood = 95.0;
        apply_feed(&mut c, &rules);
        assert!((c.hunger - 100.0).abs() < f64::EPSILON);
        assert!((c.mood - 100.0).abs() < f64::EPSILON);
        assert_eq!(c.experience, 5);
    }
}
