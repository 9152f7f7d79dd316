//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical step per `update`, time passed in explicitly
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or file dependencies

pub mod collision;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{overlaps, resolve_collisions};
pub use powerup::apply_power_up;
pub use state::{
    Boss, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Player, PowerUp, PowerUpKind,
    Projectile,
};
pub use tick::TickInput;
pub use wave::{WaveSpawn, drive_speed, formation_cols, formation_rows, generate_wave, is_boss_wave};
