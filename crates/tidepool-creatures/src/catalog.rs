//! Static species catalog.
//!
//! Every [`Species`] variant has exactly one [`SpeciesDefinition`]. The
//! lookup is an exhaustive `match`, so adding a species without a catalog
//! entry fails to compile.

use serde::Serialize;
use tidepool_types::Species;

use crate::error::CreatureError;

/// Immutable stat template for one species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesDefinition {
    /// The species this template describes.
    pub species: Species,
    /// Shop display name.
    pub display_name: &'static str,
    /// Acquisition cost in coins.
    pub price: u64,
    /// Maximum (and starting) health.
    pub max_health: f64,
    /// Hunger lost per tick.
    pub hunger_decay: f64,
    /// Mood lost per tick.
    pub mood_decay: f64,
    /// Multiplier on poor-water damage.
    pub water_sensitivity: f64,
    /// Whether two living members of this species fight each other.
    pub aggressive_with_own_species: bool,
}

static GOLDFISH: SpeciesDefinition = SpeciesDefinition {
    species: Species::Goldfish,
    display_name: "Goldfish",
    price: 100,
    max_health: 100.0,
    hunger_decay: 1.0,
    mood_decay: 1.0,
    water_sensitivity: 0.5,
    aggressive_with_own_species: false,
};

static CLOWNFISH: SpeciesDefinition = SpeciesDefinition {
    species: Species::Clownfish,
    display_name: "Clownfish",
    price: 250,
    max_health: 80.0,
    hunger_decay: 2.0,
    mood_decay: 2.0,
    water_sensitivity: 0.8,
    aggressive_with_own_species: false,
};

static GUPPY: SpeciesDefinition = SpeciesDefinition {
    species: Species::Guppy,
    display_name: "Guppy",
    price: 50,
    max_health: 50.0,
    hunger_decay: 4.0,
    mood_decay: 1.0,
    water_sensitivity: 1.0,
    aggressive_with_own_species: false,
};

static NEON_TETRA: SpeciesDefinition = SpeciesDefinition {
    species: Species::NeonTetra,
    display_name: "Neon Tetra",
    price: 80,
    max_health: 40.0,
    hunger_decay: 2.0,
    mood_decay: 1.0,
    water_sensitivity: 2.0,
    aggressive_with_own_species: false,
};

static BETTA: SpeciesDefinition = SpeciesDefinition {
    species: Species::Betta,
    display_name: "Betta",
    price: 500,
    max_health: 120.0,
    hunger_decay: 1.5,
    mood_decay: 0.5,
    water_sensitivity: 0.8,
    aggressive_with_own_species: true,
};

/// Return the catalog entry for `species`.
pub const fn definition(species: Species) -> &'static SpeciesDefinition {
    match species {
        Species::Goldfish => &GOLDFISH,
        Species::Clownfish => &CLOWNFISH,
        Species::Guppy => &GUPPY,
        Species::NeonTetra => &NEON_TETRA,
        Species::Betta => &BETTA,
    }
}

/// Resolve a species id string (as used on the wire) to its catalog entry.
///
/// Matching is ASCII case-insensitive, so `"betta"` and `"Betta"` both
/// resolve.
pub fn lookup(id: &str) -> Result<&'static SpeciesDefinition, CreatureError> {
    Species::ALL
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(id))
        .map(definition)
        .ok_or_else(|| CreatureError::UnknownSpecies(id.to_owned()))
}

/// Every catalog entry in shop order.
pub fn all() -> impl Iterator<Item = &'static SpeciesDefinition> {
    Species::ALL.into_iter().map(definition)
}
