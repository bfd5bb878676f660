//! Player commands: validation and application.
//!
//! Every command checks all of its preconditions before it touches the
//! tank, so a rejected command leaves the state exactly as it was. Each
//! successful command returns the [`Notification`] describing what changed.

use chrono::{DateTime, Utc};
use rand::Rng;
use tidepool_creatures::{CreatureError, TankRules, apply_feed, catalog, decor, spawn_creature};
use tidepool_types::{CreatureId, Decoration, Notification, Species, TankState, WATER_QUALITY_MAX};
use tracing::info;

/// Reasons a player command is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The coin balance does not cover the cost.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        /// Coins the command costs.
        required: u64,
        /// Coins currently held.
        available: u64,
    },

    /// A living member of this aggressive species is already in the tank.
    #[error("a living {species} is already in the tank")]
    SpeciesExclusivityViolation {
        /// The species that may only be kept alone.
        species: Species,
    },

    /// The tank is at its living-creature capacity.
    #[error("tank is full (capacity {capacity})")]
    TankFull {
        /// Current capacity.
        capacity: u32,
    },

    /// The decoration is already installed.
    #[error("decoration already installed: {0}")]
    DuplicateDecoration(Decoration),

    /// No creature with this ID is in the tank.
    #[error("creature not found: {0}")]
    CreatureNotFound(CreatureId),

    /// Only dead creatures can be disposed of.
    #[error("creature is still alive: {0}")]
    CreatureStillAlive(CreatureId),

    /// Disposal requires explicit confirmation.
    #[error("disposal was not confirmed")]
    DisposalNotConfirmed,

    /// There is no active event to resolve.
    #[error("no active event")]
    NoActiveEvent,

    /// The chosen option does not exist on the active event.
    #[error("invalid event option {index} (event has {available})")]
    InvalidEventOption {
        /// Requested option index.
        index: usize,
        /// Number of options offered.
        available: usize,
    },

    /// The species id is not in the catalog.
    #[error("unknown species: {0}")]
    UnknownSpecies(String),

    /// The decoration id is not in the decoration table.
    #[error("unknown decoration: {0}")]
    UnknownDecoration(String),
}

impl From<CreatureError> for CommandError {
    fn from(err: CreatureError) -> Self {
        match err {
            CreatureError::UnknownSpecies(id) => Self::UnknownSpecies(id),
            CreatureError::UnknownDecoration(id) => Self::UnknownDecoration(id),
        }
    }
}

const fn ensure_funds(state: &TankState, required: u64) -> Result<(), CommandError> {
    if state.coins < required {
        return Err(CommandError::InsufficientFunds {
            required,
            available: state.coins,
        });
    }
    Ok(())
}

/// Buy food for every living creature.
pub fn feed(state: &mut TankState, rules: &TankRules) -> Result<Notification, CommandError> {
    ensure_funds(state, rules.feed_cost)?;
    state.coins = state.coins.saturating_sub(rules.feed_cost);

    let mut fed: u32 = 0;
    for creature in state.creatures.iter_mut().filter(|c| c.alive) {
        apply_feed(creature, rules);
        fed = fed.saturating_add(1);
    }

    info!(fed, coins = state.coins, "Creatures fed");
    Ok(Notification::FeedApplied {
        cost: rules.feed_cost,
        fed,
    })
}

/// Restore water quality to full.
pub fn clean_water(state: &mut TankState, rules: &TankRules) -> Result<Notification, CommandError> {
    ensure_funds(state, rules.clean_cost)?;
    state.coins = state.coins.saturating_sub(rules.clean_cost);
    state.water_quality = WATER_QUALITY_MAX;

    info!(coins = state.coins, "Water cleaned");
    Ok(Notification::WaterCleaned {
        cost: rules.clean_cost,
    })
}

/// Buy a creature of `species` and add it to the tank.
///
/// Checks run in a fixed order: funds, then aggressive-species
/// exclusivity, then capacity.
pub fn acquire_creature<R: Rng + ?Sized>(
    state: &mut TankState,
    species: Species,
    rules: &TankRules,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<Notification, CommandError> {
    let def = catalog::definition(species);
    ensure_funds(state, def.price)?;

    if def.aggressive_with_own_species && state.has_living(species) {
        return Err(CommandError::SpeciesExclusivityViolation { species });
    }

    let capacity = rules.capacity(state.tank_level);
    let living = u32::try_from(state.living_count()).unwrap_or(u32::MAX);
    if living >= capacity {
        return Err(CommandError::TankFull { capacity });
    }

    state.coins = state.coins.saturating_sub(def.price);
    let creature = spawn_creature(species, rules, rng, now);
    info!(
        creature_id = %creature.id,
        species = %species,
        name = %creature.name,
        coins = state.coins,
        "Creature acquired"
    );
    state.creatures.push(creature);

    Ok(Notification::PurchaseApplied {
        item: species.as_str().to_owned(),
        cost: def.price,
    })
}

/// Buy and install a decoration at `price`.
///
/// `price` defaults to the list price from the decoration table when the
/// caller does not supply one.
pub fn install_decoration(
    state: &mut TankState,
    decoration: Decoration,
    price: Option<u64>,
) -> Result<Notification, CommandError> {
    let price = price.unwrap_or_else(|| decor::definition(decoration).price);
    ensure_funds(state, price)?;
    if state.has_decoration(decoration) {
        return Err(CommandError::DuplicateDecoration(decoration));
    }

    state.coins = state.coins.saturating_sub(price);
    state.decorations.insert(decoration);

    info!(decoration = %decoration, price, coins = state.coins, "Decoration installed");
    Ok(Notification::PurchaseApplied {
        item: decoration.as_str().to_owned(),
        cost: price,
    })
}

/// Remove a dead creature's record from the tank.
pub fn dispose_creature(
    state: &mut TankState,
    creature_id: CreatureId,
    confirmed: bool,
) -> Result<(), CommandError> {
    if !confirmed {
        return Err(CommandError::DisposalNotConfirmed);
    }
    let creature = state
        .creature(creature_id)
        .ok_or(CommandError::CreatureNotFound(creature_id))?;
    if creature.alive {
        return Err(CommandError::CreatureStillAlive(creature_id));
    }

    state.creatures.retain(|c| c.id != creature_id);
    info!(creature_id = %creature_id, "Creature disposed");
    Ok(())
}
