//! Enumeration types for the Tidepool simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// A species that can be acquired for the tank.
///
/// Every variant has exactly one entry in the species catalog, which the
/// compiler enforces through an exhaustive `match` in
/// `tidepool_creatures::catalog`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Species {
    /// Hardy, slow-decaying starter fish.
    Goldfish,
    /// Moody fish that enjoys coral decorations.
    Clownfish,
    /// Cheap, fast-growing and quick to starve.
    Guppy,
    /// Fragile fish that sickens quickly in poor water.
    NeonTetra,
    /// Fights any other living member of its own species.
    Betta,
}

impl Species {
    /// All species in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Goldfish,
        Self::Clownfish,
        Self::Guppy,
        Self::NeonTetra,
        Self::Betta,
    ];

    /// Stable string identifier used on the wire and in save data.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Goldfish => "Goldfish",
            Self::Clownfish => "Clownfish",
            Self::Guppy => "Guppy",
            Self::NeonTetra => "NeonTetra",
            Self::Betta => "Betta",
        }
    }
}

impl core::fmt::Display for Species {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Facing
// ---------------------------------------------------------------------------

/// Horizontal facing of a creature, used by the presentation layer only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Facing {
    /// Facing left (the spawn orientation).
    #[default]
    Left,
    /// Facing right.
    Right,
}

// ---------------------------------------------------------------------------
// Decorations
// ---------------------------------------------------------------------------

/// A decoration that can be installed in the tank.
///
/// Effects are looked up in `tidepool_creatures::decor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Decoration {
    /// Artificial coral.
    Coral,
    /// Bubble volcano.
    Volcano,
    /// Sunken castle.
    Castle,
}

impl Decoration {
    /// All decorations in shop order.
    pub const ALL: [Self; 3] = [Self::Coral, Self::Volcano, Self::Castle];

    /// Stable string identifier used on the wire and in save data.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coral => "coral",
            Self::Volcano => "volcano",
            Self::Castle => "castle",
        }
    }
}

impl core::fmt::Display for Decoration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

/// Selects which state observable drives a quest's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum QuestKind {
    /// Progress is the number of creature records in the tank, dead ones
    /// included.
    Population,
    /// Progress counts ticks on which water quality is exactly 100.
    PerfectWater,
    /// Reserved. No progress rule exists; quests of this kind never advance.
    LevelUp,
    /// Reserved. No progress rule exists; quests of this kind never advance.
    ReleaseCreature,
}
