//! Collision detection and resolution
//!
//! Everything is an axis-aligned box. Resolution runs in a fixed order
//! over the containers' insertion order:
//! 1. player shots vs boss, then vs enemies (first match wins)
//! 2. hostile shots vs player
//! 3. power-ups vs player
//!
//! Hits only flag entities inactive; removal happens in the end-of-tick purge.

use rand::Rng;

use super::powerup::apply_power_up;
use super::state::{GameEvent, GamePhase, GameState, PowerUp, PowerUpKind, roll};
use crate::Rect;

/// Strict overlap on both axes; boxes that merely touch do not collide
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Run every collision pass for this tick
///
/// Stops early if the player dies; the caller must check `state.phase`.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    player_shots_vs_targets(state, events);
    hostile_shots_vs_player(state, events);
    if state.phase == GamePhase::GameOver {
        return;
    }
    power_ups_vs_player(state, events);
}

fn player_shots_vs_targets(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let GameState {
        projectiles,
        enemies,
        boss,
        power_ups,
        score,
        rng,
        tuning,
        ..
    } = state;

    for projectile in projectiles.iter_mut().filter(|p| p.from_player && p.active) {
        let shot = projectile.rect();

        if let Some(boss) = boss.as_mut().filter(|b| b.is_alive()) {
            if overlaps(&shot, &boss.rect()) {
                projectile.active = false;
                let defeated = boss.take_hit();
                events.push(GameEvent::BossHit);

                if defeated {
                    *score += boss.points();
                    events.push(GameEvent::ScoreChanged);
                    events.push(GameEvent::BossDefeated);
                    log::info!("Boss defeated (+{})", boss.points());
                }
                continue;
            }
        }

        let Some(enemy) = enemies
            .iter_mut()
            .filter(|e| e.alive)
            .find(|e| overlaps(&shot, &e.rect()))
        else {
            continue;
        };

        projectile.active = false;
        enemy.alive = false;
        *score += enemy.points();
        events.push(GameEvent::ScoreChanged);
        events.push(GameEvent::EnemyDestroyed);

        if roll(rng, tuning.power_up_drop_chance) {
            let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
            log::debug!("{kind:?} dropped");
            power_ups.push(PowerUp::new(kind, enemy.rect().center()));
        }
    }
}

fn hostile_shots_vs_player(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let target = state.player.rect();

    for projectile in state.projectiles.iter_mut().filter(|p| !p.from_player && p.active) {
        if !overlaps(&projectile.rect(), &target) {
            continue;
        }

        projectile.active = false;
        let absorbed = state.player.take_hit();
        events.push(GameEvent::PlayerHit);
        events.push(GameEvent::LivesChanged);
        if absorbed {
            log::debug!("Backup Save absorbed a hit");
        }

        if !state.player.is_alive() {
            state.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver);
            log::info!("Game over: out of lives (score {}, wave {})", state.score, state.wave);
            return;
        }
    }
}

fn power_ups_vs_player(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let target = state.player.rect();

    let mut collected = Vec::new();
    for power_up in state.power_ups.iter_mut().filter(|p| p.active) {
        if overlaps(&power_up.rect(), &target) {
            power_up.active = false;
            collected.push(power_up.kind);
        }
    }

    for kind in collected {
        apply_power_up(state, kind, events);
        events.push(GameEvent::PowerUpCollected(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::state::{Boss, Enemy, EnemyKind, Projectile};
    use glam::Vec2;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(&Settings::default(), seed);
        state.start();
        state.enemies.clear();
        state.tuning.power_up_drop_chance = 0.0;
        state
    }

    fn shot_at(x: f32, y: f32, from_player: bool) -> Projectile {
        Projectile {
            pos: Vec2::new(x, y),
            ..Projectile::new(0.0, 0.0, from_player)
        }
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &rect(0.0, 10.0, 10.0, 10.0)));
        assert!(overlaps(&a, &rect(9.5, 9.5, 10.0, 10.0)));
    }

    #[test]
    fn test_projectile_destroys_enemy() {
        let mut state = started(1);
        state.enemies.push(Enemy::new(EnemyKind::Clash, 98.0, 95.0));
        state.projectiles.push(shot_at(100.0, 100.0, true));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(!state.enemies[0].alive);
        assert!(!state.projectiles[0].active);
        assert_eq!(state.score, 10);
        assert_eq!(events, vec![GameEvent::ScoreChanged, GameEvent::EnemyDestroyed]);
    }

    #[test]
    fn test_one_shot_kills_one_enemy() {
        let mut state = started(1);
        state.enemies.push(Enemy::new(EnemyKind::Warning, 90.0, 90.0));
        state.enemies.push(Enemy::new(EnemyKind::Clash, 95.0, 95.0));
        state.projectiles.push(shot_at(100.0, 100.0, true));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(!state.enemies[0].alive);
        assert!(state.enemies[1].alive);
        assert_eq!(state.score, 25);
    }

    #[test]
    fn test_boss_consumes_shot_before_enemies() {
        let mut state = started(1);
        let mut boss = Boss::new(800.0, 5);
        boss.pos = Vec2::new(50.0, 50.0);
        state.boss = Some(boss);
        state.enemies.push(Enemy::new(EnemyKind::Clash, 98.0, 95.0));
        state.projectiles.push(shot_at(100.0, 100.0, true));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(state.enemies[0].alive);
        assert_eq!(state.boss.as_ref().map(|b| b.health), Some(14));
        assert_eq!(events, vec![GameEvent::BossHit]);
    }

    #[test]
    fn test_boss_defeat_awards_points() {
        let mut state = started(1);
        let mut boss = Boss::new(800.0, 5);
        boss.pos = Vec2::new(50.0, 50.0);
        boss.health = 1;
        state.boss = Some(boss);
        state.projectiles.push(shot_at(100.0, 100.0, true));
        state.projectiles.push(shot_at(102.0, 100.0, true));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.score, 500);
        assert_eq!(
            events,
            vec![
                GameEvent::BossHit,
                GameEvent::ScoreChanged,
                GameEvent::BossDefeated
            ]
        );
        // The dead boss no longer absorbs shots
        assert!(state.projectiles[1].active);
    }

    #[test]
    fn test_shield_then_life_loss() {
        let mut state = started(1);
        state.player.shield = true;
        let target = state.player.rect();

        state.projectiles.push(shot_at(target.center_x(), target.top() + 1.0, false));
        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.player.lives, 3);
        assert!(!state.player.shield);
        assert_eq!(events, vec![GameEvent::PlayerHit, GameEvent::LivesChanged]);

        state.projectiles.push(shot_at(target.center_x(), target.top() + 1.0, false));
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.player.lives, 2);
    }

    #[test]
    fn test_last_life_ends_game_and_stops_processing() {
        let mut state = started(1);
        state.player.lives = 1;
        let target = state.player.rect();
        state.projectiles.push(shot_at(target.center_x(), target.top() + 1.0, false));
        state.projectiles.push(shot_at(target.center_x(), target.top() + 2.0, false));
        state.power_ups.push(PowerUp::new(PowerUpKind::BackupSave, target.center()));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.lives, 0);
        assert!(state.projectiles[1].active);
        assert!(state.power_ups[0].active);
        assert_eq!(events.last(), Some(&GameEvent::GameOver));
    }

    #[test]
    fn test_power_up_pickup() {
        let mut state = started(1);
        let target = state.player.rect();
        state.power_ups.push(PowerUp::new(PowerUpKind::BackupSave, target.center()));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(state.player.shield);
        assert!(!state.power_ups[0].active);
        assert_eq!(
            events,
            vec![GameEvent::PowerUpCollected(PowerUpKind::BackupSave)]
        );
    }

    #[test]
    fn test_kill_can_drop_power_up() {
        let mut state = started(1);
        state.tuning.power_up_drop_chance = 1.0;
        state.enemies.push(Enemy::new(EnemyKind::Clash, 98.0, 95.0));
        state.projectiles.push(shot_at(100.0, 100.0, true));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert_eq!(state.power_ups.len(), 1);
        let dropped = state.power_ups[0].rect().center();
        assert_eq!(dropped, Vec2::new(115.5, 112.5));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            w in 1.0f32..50.0, h in 1.0f32..50.0,
        ) {
            let a = rect(ax, ay, w, h);
            let b = rect(bx, by, h, w);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_adjacent_boxes_never_collide(x in -100.0f32..100.0, w in 1.0f32..50.0) {
            let a = rect(x, 0.0, w, 10.0);
            let b = rect(a.right(), 0.0, w, 10.0);
            prop_assert!(!overlaps(&a, &b));
        }
    }
}
