//! Game state and core simulation types
//!
//! Everything the engine owns lives here. Entities are plain data with a
//! little per-entity behavior (movement, cooldown checks); the ordering of
//! who does what each tick is in `tick.rs`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::wave::{WaveSpawn, drive_speed, generate_wave};
use crate::Rect;
use crate::consts::*;
use crate::highscores::ScoreBoard;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine constructed, waiting for `start()`
    Ready,
    /// Formation wave in progress
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
    /// Boss fight in progress
    BossWave,
}

impl GamePhase {
    /// Phases in which `update` advances the world
    pub fn is_active(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::BossWave)
    }
}

/// Discrete notifications produced by the engine, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged,
    WaveChanged,
    LivesChanged,
    GameOver,
    PowerUpCollected(PowerUpKind),
    BossDefeated,
    EnemyDestroyed,
    PlayerHit,
    PlayerShot,
    BossHit,
}

/// Roll a probability, tolerating out-of-range tuning values
#[inline]
pub(crate) fn roll(rng: &mut impl Rng, chance: f64) -> bool {
    rng.random_bool(chance.clamp(0.0, 1.0))
}

/// True if `interval_ms` has passed since `last`, or there was no last time
#[inline]
fn elapsed_since(last: Option<u64>, now: u64, interval_ms: u64) -> bool {
    last.is_none_or(|t| now.saturating_sub(t) >= interval_ms)
}

/// The player's ship (section box)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub lives: u8,
    /// Backup Save: absorbs the next hit
    pub shield: bool,
    /// Admin Mode expiry (clock ms); `None` when inactive
    pub rapid_fire_until: Option<u64>,
    pub last_shot_ms: Option<u64>,
}

impl Player {
    pub fn new(canvas_width: f32, canvas_height: f32, lives: u8) -> Self {
        Self {
            pos: Vec2::new(
                (canvas_width - PLAYER_WIDTH) / 2.0,
                canvas_height - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
            ),
            lives,
            shield: false,
            rapid_fire_until: None,
            last_shot_ms: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    pub fn has_rapid_fire(&self) -> bool {
        self.rapid_fire_until.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Drop Admin Mode once its expiry has passed
    pub fn expire_power_ups(&mut self, now: u64) {
        if self.rapid_fire_until.is_some_and(|until| now > until) {
            self.rapid_fire_until = None;
        }
    }

    /// (Re)start Admin Mode; a second pickup refreshes rather than extends
    pub fn apply_rapid_fire(&mut self, now: u64, duration_ms: u64) {
        self.rapid_fire_until = Some(now + duration_ms);
    }

    pub fn can_shoot(&self, now: u64, tuning: &Tuning) -> bool {
        elapsed_since(
            self.last_shot_ms,
            now,
            tuning.player_cooldown_ms(self.has_rapid_fire()),
        )
    }

    pub fn move_left(&mut self, speed: f32) {
        self.pos.x = (self.pos.x - speed).max(0.0);
    }

    pub fn move_right(&mut self, speed: f32, canvas_width: f32) {
        self.pos.x = (self.pos.x + speed).min(canvas_width - PLAYER_WIDTH);
    }

    /// Returns true if the shield absorbed the hit
    pub fn take_hit(&mut self) -> bool {
        if self.shield {
            self.shield = false;
            return true;
        }
        self.lives = self.lives.saturating_sub(1);
        false
    }
}

/// Enemy types, named after model-checking findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Bottom rows
    Clash,
    /// Middle rows
    Warning,
    /// Top row from wave 3, the only kind that shoots back
    Error,
}

impl EnemyKind {
    /// Square side length
    pub fn size(self) -> f32 {
        match self {
            EnemyKind::Clash => 35.0,
            EnemyKind::Warning => 32.0,
            EnemyKind::Error => 30.0,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Clash => 10,
            EnemyKind::Warning => 25,
            EnemyKind::Error => 50,
        }
    }

    /// Multiplier on the wave's drive speed
    pub fn speed_factor(self) -> f32 {
        match self {
            EnemyKind::Clash => 1.0,
            EnemyKind::Warning => 1.3,
            EnemyKind::Error => 1.5,
        }
    }

    pub fn can_shoot(self) -> bool {
        self == EnemyKind::Error
    }
}

/// A formation enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub alive: bool,
    /// +1 = right, -1 = left
    pub direction: f32,
    pub last_shot_ms: Option<u64>,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
            alive: true,
            direction: 1.0,
            last_shot_ms: None,
        }
    }

    pub fn rect(&self) -> Rect {
        let side = self.kind.size();
        Rect::new(self.pos, Vec2::splat(side))
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    pub fn step(&mut self, drive_speed: f32) {
        self.pos.x += self.direction * drive_speed * self.kind.speed_factor();
    }

    pub fn drop_down(&mut self, amount: f32) {
        self.pos.y += amount;
    }

    pub fn reverse(&mut self) {
        self.direction = -self.direction;
    }

    /// Within `margin` of the edge it is heading toward
    pub fn at_edge(&self, canvas_width: f32, margin: f32) -> bool {
        let rect = self.rect();
        (self.direction > 0.0 && rect.right() >= canvas_width - margin)
            || (self.direction < 0.0 && rect.left() <= margin)
    }

    /// Rate-limited random shot; records the shot time on success
    pub fn try_fire(&mut self, now: u64, tuning: &Tuning, rng: &mut impl Rng) -> bool {
        if !self.kind.can_shoot() {
            return false;
        }
        if !elapsed_since(self.last_shot_ms, now, tuning.enemy_fire_interval_ms) {
            return false;
        }
        if roll(rng, tuning.enemy_fire_chance) {
            self.last_shot_ms = Some(now);
            return true;
        }
        false
    }
}

/// The boss ("Corrupt Central Model"), every fifth wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub direction: f32,
    pub health: u32,
    pub max_health: u32,
    pub last_shot_ms: Option<u64>,
}

impl Boss {
    /// Tougher with each appearance
    pub fn max_health_for_wave(wave: u32) -> u32 {
        10 + (wave / BOSS_WAVE_INTERVAL) * 5
    }

    pub fn new(canvas_width: f32, wave: u32) -> Self {
        let max_health = Self::max_health_for_wave(wave);
        Self {
            pos: Vec2::new((canvas_width - BOSS_WIDTH) / 2.0, BOSS_Y),
            direction: 1.0,
            health: max_health,
            max_health,
            last_shot_ms: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(BOSS_WIDTH, BOSS_HEIGHT))
    }

    pub fn points(&self) -> u32 {
        BOSS_POINTS
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// For health bars
    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    /// Sweep horizontally, bouncing off both canvas edges
    pub fn update(&mut self, canvas_width: f32) {
        self.pos.x += self.direction * BOSS_SPEED;

        let max_x = canvas_width - BOSS_WIDTH;
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.direction = 1.0;
        } else if self.pos.x >= max_x {
            self.pos.x = max_x;
            self.direction = -1.0;
        }
    }

    /// Returns true if this hit defeated the boss
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        !self.is_alive()
    }

    pub fn try_fire(&mut self, now: u64, tuning: &Tuning, rng: &mut impl Rng) -> bool {
        if !elapsed_since(self.last_shot_ms, now, tuning.boss_fire_interval_ms) {
            return false;
        }
        if roll(rng, tuning.boss_fire_chance) {
            self.last_shot_ms = Some(now);
            return true;
        }
        false
    }

    /// Muzzle x positions of the three-shot volley
    pub fn shot_positions(&self) -> [f32; 3] {
        let x = self.pos.x;
        [
            x + BOSS_WIDTH * 0.25,
            x + BOSS_WIDTH * 0.5,
            x + BOSS_WIDTH * 0.75,
        ]
    }
}

/// A bullet, fired by the player (upward) or an enemy/boss (downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Pixels per tick; negative = upward
    pub vel_y: f32,
    pub from_player: bool,
    pub active: bool,
}

impl Projectile {
    /// Spawn centered horizontally on `center_x`
    pub fn new(center_x: f32, y: f32, from_player: bool) -> Self {
        Self {
            pos: Vec2::new(center_x - PROJECTILE_WIDTH / 2.0, y),
            vel_y: if from_player {
                PLAYER_PROJECTILE_SPEED
            } else {
                ENEMY_PROJECTILE_SPEED
            },
            from_player,
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }

    pub fn update(&mut self) {
        self.pos.y += self.vel_y;
    }

    pub fn is_off_screen(&self, canvas_height: f32) -> bool {
        self.pos.y < -PROJECTILE_HEIGHT || self.pos.y > canvas_height
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Clears every enemy on screen for half points
    PurgeAll,
    /// Rapid fire for a while
    AdminMode,
    /// Absorbs one hit
    BackupSave,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::PurgeAll,
        PowerUpKind::AdminMode,
        PowerUpKind::BackupSave,
    ];

    /// One-letter HUD label
    pub fn label(self) -> char {
        match self {
            PowerUpKind::PurgeAll => 'P',
            PowerUpKind::AdminMode => 'A',
            PowerUpKind::BackupSave => 'B',
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub active: bool,
}

impl PowerUp {
    /// Spawn centered on a point
    pub fn new(kind: PowerUpKind, center: Vec2) -> Self {
        Self {
            kind,
            pos: center - Vec2::splat(POWER_UP_SIZE / 2.0),
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(POWER_UP_SIZE))
    }

    pub fn update(&mut self) {
        self.pos.y += POWER_UP_FALL_SPEED;
    }

    pub fn is_off_screen(&self, canvas_height: f32) -> bool {
        self.pos.y > canvas_height
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Current wave (1-based)
    pub wave: u32,
    /// Monotonic game clock, advanced by `update`
    pub clock_ms: u64,
    pub player: Player,
    /// Formation enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub boss: Option<Boss>,
    /// Formation speed for the current wave
    pub drive_speed: f32,
}

impl GameState {
    /// Create an engine in the Ready phase
    pub fn new(settings: &Settings, seed: u64) -> Self {
        debug_assert!(settings.canvas_width > 0.0 && settings.canvas_height > 0.0);
        let tuning = settings.tuning.clone();
        Self {
            canvas_width: settings.canvas_width,
            canvas_height: settings.canvas_height,
            player: Player::new(
                settings.canvas_width,
                settings.canvas_height,
                tuning.player_lives,
            ),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            score: 0,
            wave: 1,
            clock_ms: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            boss: None,
            drive_speed: drive_speed(1),
        }
    }

    /// Start or restart a run
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.score = 0;
        self.wave = 1;
        self.player = Player::new(self.canvas_width, self.canvas_height, self.tuning.player_lives);
        self.enemies.clear();
        self.projectiles.clear();
        self.power_ups.clear();
        self.boss = None;

        self.spawn_wave();
        log::info!("Run started (seed {})", self.seed);

        vec![
            GameEvent::ScoreChanged,
            GameEvent::WaveChanged,
            GameEvent::LivesChanged,
        ]
    }

    /// Pause or resume; returns the resulting phase
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Playing | GamePhase::BossWave => GamePhase::Paused,
            GamePhase::Paused if self.boss.is_some() => GamePhase::BossWave,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
        self.phase
    }

    /// Replace the current wave's adversaries with those of `self.wave`
    pub(crate) fn spawn_wave(&mut self) {
        self.enemies.clear();
        match generate_wave(self.wave, self.canvas_width) {
            WaveSpawn::Boss(boss) => {
                log::info!("Wave {}: boss with {} health", self.wave, boss.max_health);
                self.boss = Some(boss);
                self.phase = GamePhase::BossWave;
            }
            WaveSpawn::Formation {
                enemies,
                drive_speed,
            } => {
                log::info!("Wave {}: formation of {} enemies", self.wave, enemies.len());
                self.boss = None;
                self.enemies = enemies;
                self.drive_speed = drive_speed;
                self.phase = GamePhase::Playing;
            }
        }
    }

    /// Hand a finished run to the score board
    ///
    /// Only acts in GameOver; returns true if the run was recorded.
    pub fn submit_score(&self, board: &mut impl ScoreBoard, initials: &str) -> bool {
        if self.phase != GamePhase::GameOver || !board.is_qualifying(self.score) {
            return false;
        }
        board.record(initials, self.score, self.wave);
        true
    }
}
