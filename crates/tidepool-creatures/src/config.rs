//! Tunable rules for the tick resolver and the command layer.
//!
//! [`TankRules`] bundles every numeric constant the simulation uses so that
//! callers (scheduler, tests) can override defaults. It is deserialized from
//! the `rules` section of `tidepool-config.yaml`; any omitted field keeps
//! its default.

use serde::{Deserialize, Serialize};

/// Rules applied once per tick and by player commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankRules {
    /// Pollution load contributed by each living creature (default: 0.5).
    pub pollution_per_creature: f64,

    /// Fraction of the pollution load subtracted from water quality each
    /// tick (default: 0.1).
    pub pollution_scale: f64,

    /// Water quality below which sensitive creatures take damage
    /// (default: 50).
    pub poor_water_threshold: f64,

    /// Multiplier applied to species water sensitivity in poor water
    /// (default: 2).
    pub water_damage_factor: f64,

    /// Health lost per tick while hunger is at zero (default: 5).
    pub starvation_damage: f64,

    /// Health lost per tick by a crowded aggressive creature (default: 10).
    pub crowding_health_damage: f64,

    /// Mood lost per tick by a crowded aggressive creature (default: 20).
    pub crowding_mood_penalty: f64,

    /// Probability that a living creature moves on a given tick
    /// (default: 0.1).
    pub move_chance: f64,

    /// Maximum horizontal step in either direction (default: 5).
    pub move_max_dx: f64,

    /// Maximum vertical step in either direction (default: 2.5).
    pub move_max_dy: f64,

    /// Horizontal bounds of the swimmable area (default: 5 to 90).
    pub min_x: f64,
    /// Right edge of the swimmable area.
    pub max_x: f64,

    /// Vertical bounds of the swimmable area (default: 10 to 80).
    pub min_y: f64,
    /// Bottom edge of the swimmable area.
    pub max_y: f64,

    /// Experience gained per tick by each living creature (default: 1).
    pub experience_per_tick: u32,

    /// Experience needed per level; a creature levels when experience
    /// strictly exceeds `level * level_step` (default: 100).
    pub level_step: u32,

    /// Coins credited per creature level-up (default: 10).
    pub level_up_bonus: u64,

    /// Water quality above which a populated tank gains experience
    /// (default: 80).
    pub tank_experience_threshold: f64,

    /// Cost of one feed command (default: 5).
    pub feed_cost: u64,

    /// Hunger restored by feeding (default: 30).
    pub feed_hunger: f64,

    /// Mood restored by feeding (default: 10).
    pub feed_mood: f64,

    /// Experience granted by feeding (default: 5).
    pub feed_experience: u32,

    /// Cost of cleaning the water (default: 20).
    pub clean_cost: u64,

    /// Living creatures allowed before tank level is added (default: 6).
    pub base_capacity: u32,

    /// Per-tick probability of a random event when none is active
    /// (default: 0.01).
    pub event_chance: f64,

    /// Hunger of a newly acquired creature (default: 80).
    pub spawn_hunger: f64,

    /// Mood of a newly acquired creature (default: 80).
    pub spawn_mood: f64,
}

impl Default for TankRules {
    fn default() -> Self {
        Self {
            pollution_per_creature: 0.5,
            pollution_scale: 0.1,
            poor_water_threshold: 50.0,
            water_damage_factor: 2.0,
            starvation_damage: 5.0,
            crowding_health_damage: 10.0,
            crowding_mood_penalty: 20.0,
            move_chance: 0.1,
            move_max_dx: 5.0,
            move_max_dy: 2.5,
            min_x: 5.0,
            max_x: 90.0,
            min_y: 10.0,
            max_y: 80.0,
            experience_per_tick: 1,
            level_step: 100,
            level_up_bonus: 10,
            tank_experience_threshold: 80.0,
            feed_cost: 5,
            feed_hunger: 30.0,
            feed_mood: 10.0,
            feed_experience: 5,
            clean_cost: 20,
            base_capacity: 6,
            event_chance: 0.01,
            spawn_hunger: 80.0,
            spawn_mood: 80.0,
        }
    }
}

impl TankRules {
    /// Maximum number of living creatures at `tank_level`.
    pub const fn capacity(&self, tank_level: u32) -> u32 {
        self.base_capacity.saturating_add(tank_level)
    }

    /// Experience threshold a creature at `level` must exceed to level up.
    pub const fn level_threshold(&self, level: u32) -> u32 {
        level.saturating_mul(self.level_step)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn capacity_grows_with_tank_level() {
        let rules = TankRules::default();
        assert_eq!(rules.capacity(1), 7);
        assert_eq!(rules.capacity(3), 9);
    }

    #[test]
    fn level_threshold_scales() {
        let rules = TankRules::default();
        assert_eq!(rules.level_threshold(1), 100);
        assert_eq!(rules.level_threshold(4), 400);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let rules: TankRules = serde_json::from_str(r#"{"feed_cost": 7}"#).unwrap();
        assert_eq!(rules.feed_cost, 7);
        assert_eq!(rules.clean_cost, 20);
        assert!((rules.event_chance - 0.01).abs() < f64::EPSILON);
    }
}
