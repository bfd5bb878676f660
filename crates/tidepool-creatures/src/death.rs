//! Death conditions and consequences for creatures.
//!
//! A creature dies when its health reaches zero during the vital tick. The
//! record stays in the tank, frozen, until the player disposes of it.

use tidepool_types::{Creature, Notification};

/// The dominant cause of a creature's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// Health ran out while hunger was at zero.
    Starvation,
    /// Health ran out from poor water quality.
    PoorWater,
    /// Health ran out from fighting a member of its own species.
    Fighting,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Starvation => write!(f, "starvation"),
            Self::PoorWater => write!(f, "poor_water"),
            Self::Fighting => write!(f, "fighting"),
        }
    }
}

/// Hunger and mood captured before the tick touched them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreTickVitals {
    /// Hunger at the start of the tick.
    pub hunger: f64,
    /// Mood at the start of the tick.
    pub mood: f64,
}

impl PreTickVitals {
    /// Capture the current hunger and mood of `creature`.
    pub const fn capture(creature: &Creature) -> Self {
        Self {
            hunger: creature.hunger,
            mood: creature.mood,
        }
    }
}

/// Whether the creature's health has been exhausted.
pub fn check_death(creature: &Creature) -> bool {
    creature.health <= 0.0
}

/// Freeze a creature that died this tick and build its death notification.
///
/// Health is pinned to zero and hunger and mood revert to their pre-tick
/// values. Position and facing keep this tick's movement.
pub fn process_death(creature: &mut Creature, before: PreTickVitals) -> Notification {
    creature.health = 0.0;
    creature.alive = false;
    creature.hunger = before.hunger;
    creature.mood = before.mood;

    Notification::CreatureDied {
        creature_id: creature.id,
        name: creature.name.clone(),
        species: creature.species,
    }
}
