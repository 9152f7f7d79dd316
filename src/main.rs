//! BIM Defender headless runner
//!
//! Drives the simulation with a simple autopilot at a fixed step, logs the
//! event stream and records the final score in the high-score table.
//! Handy for soak-testing balance changes in `settings.json`.

use std::path::PathBuf;

use clap::Parser;

use bim_defender::highscores::{format_age, now_ms};
use bim_defender::sim::{GameEvent, GamePhase, GameState, TickInput};
use bim_defender::{HighScores, ScoreBoard, Settings};

#[derive(Parser)]
#[command(name = "bim-defender")]
#[command(about = "Play a headless BIM Defender run with an autopilot")]
struct Args {
    /// Settings file (JSON); defaults are used if it does not exist
    #[arg(long, default_value = "settings.json")]
    config: PathBuf,
    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many steps even if the run is still going
    #[arg(long, default_value_t = 36_000)]
    ticks: u32,
    /// Initials recorded with a qualifying score
    #[arg(long, default_value = "CPU")]
    initials: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let settings = Settings::load(&args.config);
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
    log::info!("BIM Defender (headless) starting with seed {seed}");

    let mut board = HighScores::load(&settings.highscores_path);
    let mut state = GameState::new(&settings, seed);

    let mut events = state.start();
    let mut steps = 0;
    loop {
        for event in events.drain(..) {
            log_event(event, &state);
        }
        if state.phase == GamePhase::GameOver || steps >= args.ticks {
            break;
        }
        let input = autopilot(&state);
        events = state.update(&input, settings.tick_ms);
        steps += 1;
    }

    println!();
    println!("=== RUN SUMMARY ===");
    println!("  Seed:   {seed}");
    println!("  Steps:  {steps}");
    println!("  Score:  {}", state.score);
    println!("  Wave:   {}", state.wave);
    println!("  Lives:  {}", state.player.lives);

    if state.phase != GamePhase::GameOver {
        println!("Run still alive after {steps} steps, score not recorded");
        return;
    }

    let rank = board.potential_rank(state.score);
    if state.submit_score(&mut board, &args.initials) {
        if let Some(rank) = rank {
            println!("New high score! Rank #{rank}");
        }
    }

    println!();
    println!("=== HIGH SCORES (best {}) ===", board.top_score());
    let now = now_ms();
    for (i, entry) in board.entries.iter().enumerate() {
        println!(
            "  {}. {} {:>7}  wave {:>2}  {}",
            i + 1,
            entry.initials,
            entry.score,
            entry.wave,
            format_age(entry.timestamp, now)
        );
    }
}

/// Chase the boss, or the lowest enemy, and keep firing
fn autopilot(state: &GameState) -> TickInput {
    let target_x = state
        .boss
        .as_ref()
        .map(|b| b.rect().center_x())
        .or_else(|| {
            state
                .enemies
                .iter()
                .filter(|e| e.alive)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|e| e.rect().center_x())
        });

    let ship_x = state.player.rect().center_x();
    let (move_left, move_right) = match target_x {
        Some(x) if x < ship_x - 4.0 => (true, false),
        Some(x) if x > ship_x + 4.0 => (false, true),
        _ => (false, false),
    };

    TickInput {
        move_left,
        move_right,
        fire: true,
    }
}

fn log_event(event: GameEvent, state: &GameState) {
    match event {
        GameEvent::WaveChanged => log::info!("Wave {}", state.wave),
        GameEvent::GameOver => log::info!("GAME OVER at wave {} with {}", state.wave, state.score),
        GameEvent::PowerUpCollected(kind) => log::info!("Collected {kind:?} [{}]", kind.label()),
        other => log::debug!("{other:?} (score {}, lives {})", state.score, state.player.lives),
    }
}
