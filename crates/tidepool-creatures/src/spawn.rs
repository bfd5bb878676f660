//! Construction of newly acquired creatures.

use chrono::{DateTime, Utc};
use rand::Rng;
use tidepool_types::{Creature, CreatureId, Facing, Position, Species};

use crate::catalog;
use crate::config::TankRules;
use crate::naming;

/// Build a fresh creature of `species` at the spawn point.
///
/// Vitals start at the configured spawn values, health at the species
/// maximum, level 1 with no experience, facing left at the tank center.
pub fn spawn_creature<R: Rng + ?Sized>(
    species: Species,
    rules: &TankRules,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Creature {
    let def = catalog::definition(species);
    Creature {
        id: CreatureId::new(),
        species,
        name: naming::random_name(rng),
        born_at: now,
        hunger: rules.spawn_hunger,
        mood: rules.spawn_mood,
        health: def.max_health,
        alive: true,
        level: 1,
        experience: 0,
        position: Position::CENTER,
        facing: Facing::Left,
    }
}
