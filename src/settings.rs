//! Host settings
//!
//! Persisted as JSON next to the high-score table. Anything missing or
//! invalid falls back to the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT_MS;
use crate::persistence::{self, PersistError};
use crate::tuning::Tuning;

/// Engine construction parameters and host preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in pixels
    pub canvas_width: f32,
    /// Playfield height in pixels
    pub canvas_height: f32,
    /// RNG seed; `None` lets the host pick one per run
    pub seed: Option<u64>,
    /// Milliseconds of game time per simulation step
    pub tick_ms: u64,
    /// Where the top-5 table lives
    pub highscores_path: PathBuf,
    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            seed: None,
            tick_ms: SIM_DT_MS,
            highscores_path: PathBuf::from("highscores.json"),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings: {e}");
                Self::default()
            }
        }
    }

    /// Load settings, reporting I/O and parse errors
    pub fn try_load(path: &Path) -> Result<Self, PersistError> {
        let settings: Self = persistence::load_json(path)?;
        Ok(settings.validated())
    }

    /// Save settings as JSON
    pub fn save(&self, path: &Path) {
        if let Err(e) = persistence::save_json(path, self) {
            log::warn!("Settings not saved: {e}");
        } else {
            log::info!("Settings saved");
        }
    }

    /// Replace degenerate values with defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            log::warn!(
                "Invalid canvas {}x{}, using {}x{}",
                self.canvas_width,
                self.canvas_height,
                defaults.canvas_width,
                defaults.canvas_height
            );
            self.canvas_width = defaults.canvas_width;
            self.canvas_height = defaults.canvas_height;
        }
        if self.tick_ms == 0 {
            log::warn!("tick_ms must be positive, using {}", defaults.tick_ms);
            self.tick_ms = defaults.tick_ms;
        }
        self
    }
}
