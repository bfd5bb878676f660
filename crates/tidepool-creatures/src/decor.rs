//! Decoration effect table.
//!
//! Decorations are data, not behavior: each entry carries a pollution
//! multiplier and an optional per-species mood bonus that the tick resolver
//! reads. A decoration with neutral values is purely cosmetic.

use std::collections::BTreeSet;

use serde::Serialize;
use tidepool_types::{Decoration, Species};

use crate::error::CreatureError;

/// Mood bonus granted every tick to living members of one species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodBonus {
    /// Species that benefits.
    pub species: Species,
    /// Mood added per tick.
    pub amount: f64,
}

/// Shop entry and simulation effects of one decoration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecorationDefinition {
    /// The decoration this entry describes.
    pub decoration: Decoration,
    /// Shop display name.
    pub display_name: &'static str,
    /// List price in coins.
    pub price: u64,
    /// Factor applied to the pollution load while installed (1.0 is neutral).
    pub pollution_multiplier: f64,
    /// Per-tick mood bonus, if any.
    pub mood_bonus: Option<MoodBonus>,
}

static CORAL: DecorationDefinition = DecorationDefinition {
    decoration: Decoration::Coral,
    display_name: "Artificial Coral",
    price: 500,
    pollution_multiplier: 1.0,
    mood_bonus: Some(MoodBonus {
        species: Species::Clownfish,
        amount: 2.0,
    }),
};

static VOLCANO: DecorationDefinition = DecorationDefinition {
    decoration: Decoration::Volcano,
    display_name: "Bubble Volcano",
    price: 1200,
    pollution_multiplier: 1.5,
    mood_bonus: None,
};

static CASTLE: DecorationDefinition = DecorationDefinition {
    decoration: Decoration::Castle,
    display_name: "Sunken Castle",
    price: 2500,
    pollution_multiplier: 1.0,
    mood_bonus: None,
};

/// Return the table entry for `decoration`.
pub const fn definition(decoration: Decoration) -> &'static DecorationDefinition {
    match decoration {
        Decoration::Coral => &CORAL,
        Decoration::Volcano => &VOLCANO,
        Decoration::Castle => &CASTLE,
    }
}

/// Resolve a decoration id string to its table entry.
pub fn lookup(id: &str) -> Result<&'static DecorationDefinition, CreatureError> {
    Decoration::ALL
        .into_iter()
        .find(|d| d.as_str().eq_ignore_ascii_case(id))
        .map(definition)
        .ok_or_else(|| CreatureError::UnknownDecoration(id.to_owned()))
}

/// Combined pollution multiplier of the installed set.
pub fn pollution_multiplier(installed: &BTreeSet<Decoration>) -> f64 {
    installed
        .iter()
        .map(|d| definition(*d).pollution_multiplier)
        .product()
}

/// Total per-tick mood bonus the installed set grants to `species`.
pub fn mood_bonus(species: Species, installed: &BTreeSet<Decoration>) -> f64 {
    installed
        .iter()
        .filter_map(|d| definition(*d).mood_bonus)
        .filter(|b| b.species == species)
        .map(|b| b.amount)
        .sum()
}
