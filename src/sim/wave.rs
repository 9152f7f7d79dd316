//! Wave generation
//!
//! A pure function of the wave number and canvas width: every fifth wave
//! is a single boss, the rest are a centered grid of enemies that grows
//! (up to 6 rows by 10 columns) and speeds up with the wave number.

use super::state::{Boss, Enemy, EnemyKind};
use crate::consts::*;

/// What a wave consists of
#[derive(Debug, Clone, PartialEq)]
pub enum WaveSpawn {
    Boss(Boss),
    Formation {
        /// Row-major, top row first
        enemies: Vec<Enemy>,
        /// Base horizontal speed for this wave
        drive_speed: f32,
    },
}

pub fn is_boss_wave(wave: u32) -> bool {
    wave % BOSS_WAVE_INTERVAL == 0
}

pub fn formation_rows(wave: u32) -> u32 {
    (3 + wave / 3).min(FORMATION_MAX_ROWS)
}

pub fn formation_cols(wave: u32) -> u32 {
    (6 + wave / 2).min(FORMATION_MAX_COLS)
}

/// Base speed of the formation for a wave, scaled per enemy kind
pub fn drive_speed(wave: u32) -> f32 {
    1.5 + 0.2 * wave as f32
}

/// Enemy kind for a formation row
///
/// Top row: Errors (from wave 3). Upper half: Warnings. Lower half: Clashes.
pub fn row_kind(row: u32, rows: u32, wave: u32) -> EnemyKind {
    if row == 0 && wave > 2 {
        EnemyKind::Error
    } else if row < rows / 2 {
        EnemyKind::Warning
    } else {
        EnemyKind::Clash
    }
}

/// Build the adversaries for `wave`
pub fn generate_wave(wave: u32, canvas_width: f32) -> WaveSpawn {
    if is_boss_wave(wave) {
        return WaveSpawn::Boss(Boss::new(canvas_width, wave));
    }

    let rows = formation_rows(wave);
    let cols = formation_cols(wave);

    let start_x = (canvas_width - cols as f32 * FORMATION_COL_PITCH) / 2.0;
    let start_y = FORMATION_TOP;

    let mut enemies = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        let kind = row_kind(row, rows, wave);
        for col in 0..cols {
            let x = start_x + col as f32 * FORMATION_COL_PITCH;
            let y = start_y + row as f32 * FORMATION_ROW_PITCH;
            enemies.push(Enemy::new(kind, x, y));
        }
    }

    WaveSpawn::Formation {
        enemies,
        drive_speed: drive_speed(wave),
    }
}
