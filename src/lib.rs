//! BIM Defender - fixed-shooter arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, waves, collisions, game state)
//! - `highscores`: Ranked top-5 table consumed at game over
//! - `persistence`: JSON file storage with atomic replace
//! - `settings`: Host configuration (canvas, seed, file paths)
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScores, ScoreBoard};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation step (~60 Hz), in milliseconds
    pub const SIM_DT_MS: u64 = 16;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Gap between the ship's bottom edge and the canvas bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Boss ("Corrupt Central Model")
    pub const BOSS_WIDTH: f32 = 120.0;
    pub const BOSS_HEIGHT: f32 = 80.0;
    pub const BOSS_Y: f32 = 50.0;
    pub const BOSS_SPEED: f32 = 2.0;
    pub const BOSS_POINTS: u32 = 500;

    /// Projectiles (velocity in pixels per tick, negative = upward)
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = -10.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 5.0;

    /// Falling pickups
    pub const POWER_UP_SIZE: f32 = 25.0;
    pub const POWER_UP_FALL_SPEED: f32 = 3.0;

    /// Formation grid
    pub const FORMATION_COL_PITCH: f32 = 50.0;
    pub const FORMATION_ROW_PITCH: f32 = 45.0;
    pub const FORMATION_TOP: f32 = 60.0;
    pub const FORMATION_MAX_ROWS: u32 = 6;
    pub const FORMATION_MAX_COLS: u32 = 10;

    /// Every Nth wave is a boss wave
    pub const BOSS_WAVE_INTERVAL: u32 = 5;
}

/// Axis-aligned box in canvas space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Horizontal center
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}
