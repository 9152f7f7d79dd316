//! Data-driven game balance
//!
//! Every number a designer might want to tweak without touching the
//! simulation code. Loaded as part of [`crate::Settings`]; fields missing
//! from the JSON fall back to the stock values.

use serde::{Deserialize, Serialize};

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of a run
    pub player_lives: u8,
    /// Ship movement per tick (pixels)
    pub player_speed: f32,
    /// Minimum time between player shots (~3 shots/s)
    pub fire_cooldown_ms: u64,
    /// Minimum time between player shots under Admin Mode (~8 shots/s)
    pub rapid_fire_cooldown_ms: u64,
    /// How long Admin Mode lasts after pickup
    pub rapid_fire_duration_ms: u64,

    /// Minimum time between shots from a single enemy
    pub enemy_fire_interval_ms: u64,
    /// Chance per eligible check that an enemy fires
    pub enemy_fire_chance: f64,
    /// Minimum time between boss volleys
    pub boss_fire_interval_ms: u64,
    /// Chance per eligible check that the boss fires
    pub boss_fire_chance: f64,

    /// Chance that a shot-down enemy drops a power-up
    pub power_up_drop_chance: f64,

    /// Vertical step when the formation hits an edge
    pub formation_drop: f32,
    /// Distance from a canvas edge that triggers the formation turn
    pub edge_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_lives: 3,
            player_speed: 8.0,
            fire_cooldown_ms: 333,
            rapid_fire_cooldown_ms: 125,
            rapid_fire_duration_ms: 10_000,

            enemy_fire_interval_ms: 2_000,
            enemy_fire_chance: 0.01,
            boss_fire_interval_ms: 800,
            boss_fire_chance: 0.05,

            power_up_drop_chance: 0.05,

            formation_drop: 20.0,
            edge_margin: 10.0,
        }
    }
}

impl Tuning {
    /// Fire cooldown for the player's current weapon state
    pub fn player_cooldown_ms(&self, rapid_fire: bool) -> u64 {
        if rapid_fire {
            self.rapid_fire_cooldown_ms
        } else {
            self.fire_cooldown_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "player_lives": 5 }"#).unwrap();
        assert_eq!(tuning.player_lives, 5);
        assert_eq!(tuning.fire_cooldown_ms, 333);
        assert_eq!(tuning.rapid_fire_cooldown_ms, 125);
    }

    #[test]
    fn test_player_cooldown() {
        let tuning = Tuning::default();
        assert_eq!(tuning.player_cooldown_ms(false), 333);
        assert_eq!(tuning.player_cooldown_ms(true), 125);
    }
}
