//! Power-up effects

use super::state::{GameEvent, GameState, PowerUpKind};

/// Apply a collected power-up to the game state
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind, events: &mut Vec<GameEvent>) {
    match kind {
        PowerUpKind::PurgeAll => {
            // Half points for bomb kills
            let mut bonus = 0;
            for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
                enemy.alive = false;
                bonus += enemy.points() / 2;
            }
            state.score += bonus;
            events.push(GameEvent::ScoreChanged);
            log::debug!("Purge All cleared the board (+{bonus})");
        }
        PowerUpKind::AdminMode => {
            state
                .player
                .apply_rapid_fire(state.clock_ms, state.tuning.rapid_fire_duration_ms);
            log::debug!("Admin Mode until {}ms", state.clock_ms + state.tuning.rapid_fire_duration_ms);
        }
        PowerUpKind::BackupSave => {
            state.player.shield = true;
            log::debug!("Backup Save armed");
        }
    }
}
