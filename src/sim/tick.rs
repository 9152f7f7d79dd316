//! Fixed timestep simulation tick
//!
//! One call to [`GameState::update`] is one logical frame. Phases run in a
//! fixed order and each may end the run, which skips everything after it:
//! player, enemies or boss, projectiles, power-ups, collisions, wave check.

use super::collision::resolve_collisions;
use super::state::{GameEvent, GamePhase, GameState, Projectile};

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

impl GameState {
    /// Advance the game by one step of `dt_ms` game time
    ///
    /// Returns the events raised during the step, in order. Does nothing
    /// (not even advance the clock) unless a wave is in progress.
    pub fn update(&mut self, input: &TickInput, dt_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.phase.is_active() {
            return events;
        }

        self.clock_ms += dt_ms;
        self.run_phases(input, &mut events);

        // Deferred removal of everything flagged during the scans
        self.enemies.retain(|e| e.alive);
        self.projectiles.retain(|p| p.active);
        self.power_ups.retain(|p| p.active);

        events
    }

    fn run_phases(&mut self, input: &TickInput, events: &mut Vec<GameEvent>) {
        self.update_player(input, events);

        if self.phase == GamePhase::BossWave {
            self.update_boss();
        } else {
            self.update_enemies(events);
            if self.phase == GamePhase::GameOver {
                return;
            }
        }

        self.update_projectiles();
        self.update_power_ups();

        resolve_collisions(self, events);
        if self.phase == GamePhase::GameOver {
            return;
        }

        self.check_wave_complete(events);
    }

    fn update_player(&mut self, input: &TickInput, events: &mut Vec<GameEvent>) {
        let now = self.clock_ms;
        self.player.expire_power_ups(now);

        if input.move_left {
            self.player.move_left(self.tuning.player_speed);
        }
        if input.move_right {
            self.player.move_right(self.tuning.player_speed, self.canvas_width);
        }

        if input.fire && self.player.can_shoot(now, &self.tuning) {
            self.player.last_shot_ms = Some(now);
            let ship = self.player.rect();
            self.projectiles
                .push(Projectile::new(ship.center_x(), ship.top(), true));
            events.push(GameEvent::PlayerShot);
        }
    }

    fn update_enemies(&mut self, events: &mut Vec<GameEvent>) {
        let margin = self.tuning.edge_margin;
        let hit_edge = self
            .enemies
            .iter()
            .filter(|e| e.alive)
            .any(|e| e.at_edge(self.canvas_width, margin));

        let player_line = self.player.pos.y;
        let now = self.clock_ms;

        for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
            // The whole formation turns and drops together
            if hit_edge {
                enemy.reverse();
                enemy.drop_down(self.tuning.formation_drop);
            } else {
                enemy.step(self.drive_speed);
            }

            if enemy.try_fire(now, &self.tuning, &mut self.rng) {
                let body = enemy.rect();
                self.projectiles
                    .push(Projectile::new(body.center_x(), body.bottom(), false));
            }

            if enemy.rect().bottom() >= player_line {
                self.phase = GamePhase::GameOver;
                events.push(GameEvent::GameOver);
                log::info!(
                    "Game over: {:?} reached the player (score {}, wave {})",
                    enemy.kind,
                    self.score,
                    self.wave
                );
                return;
            }
        }
    }

    fn update_boss(&mut self) {
        let Some(boss) = self.boss.as_mut().filter(|b| b.is_alive()) else {
            return;
        };

        boss.update(self.canvas_width);

        if boss.try_fire(self.clock_ms, &self.tuning, &mut self.rng) {
            let y = boss.rect().bottom();
            for x in boss.shot_positions() {
                self.projectiles.push(Projectile::new(x, y, false));
            }
        }
    }

    fn update_projectiles(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.update();
            if projectile.is_off_screen(self.canvas_height) {
                projectile.active = false;
            }
        }
        self.projectiles.retain(|p| p.active);
    }

    fn update_power_ups(&mut self) {
        for power_up in &mut self.power_ups {
            power_up.update();
            if power_up.is_off_screen(self.canvas_height) {
                power_up.active = false;
            }
        }
        self.power_ups.retain(|p| p.active);
    }

    fn check_wave_complete(&mut self, events: &mut Vec<GameEvent>) {
        let complete = match self.phase {
            GamePhase::BossWave => self.boss.as_ref().is_some_and(|b| !b.is_alive()),
            _ => self.enemies.iter().all(|e| !e.alive),
        };

        if complete {
            self.wave += 1;
            events.push(GameEvent::WaveChanged);
            self.spawn_wave();
        }
    }
}
