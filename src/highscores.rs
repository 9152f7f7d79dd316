//! High score leaderboard
//!
//! Persisted as a JSON list, tracks the top 5 runs. The simulation only
//! touches this at game over, through the [`ScoreBoard`] trait.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Initials are always exactly this many characters
pub const INITIALS_LEN: usize = 3;

/// The score collaborator consulted when a run ends
pub trait ScoreBoard {
    /// Would this score earn a place on the board?
    fn is_qualifying(&self, score: u32) -> bool;
    /// Insert a run and persist the table
    fn record(&mut self, initials: &str, score: u32, wave: u32);
    /// Best score on the board, 0 when empty
    fn top_score(&self) -> u32;
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Three uppercase characters
    pub initials: String,
    /// Player's score
    pub score: u32,
    /// Wave reached
    pub wave: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    /// Backing file; `None` keeps the table in memory only
    path: Option<PathBuf>,
}

impl HighScores {
    /// Create an empty in-memory leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.iter().map(|e| e.score).min().is_none_or(|min| score > min)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(
        &mut self,
        initials: &str,
        score: u32,
        wave: u32,
        timestamp: u64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            initials: normalize_initials(initials),
            score,
            wave,
            timestamp,
        };

        // Ties rank below existing entries
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load high scores from a JSON file
    ///
    /// A missing or unreadable file yields an empty table bound to `path`,
    /// so the next `record` recreates it.
    pub fn load(path: &Path) -> Self {
        let mut entries = match persistence::load_json::<Vec<HighScoreEntry>>(path) {
            Ok(entries) => {
                log::info!("Loaded {} high scores", entries.len());
                entries
            }
            Err(e) if e.is_not_found() => {
                log::info!("No high scores found, starting fresh");
                Vec::new()
            }
            Err(e) => {
                log::warn!("Discarding high scores: {e}");
                Vec::new()
            }
        };

        // Hand-edited files may be unsorted or too long
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);

        Self {
            entries,
            path: Some(path.to_path_buf()),
        }
    }

    /// Write the table to its backing file; failures are logged, not raised
    pub fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match persistence::save_json(path, &self.entries) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("High scores not saved: {e}"),
        }
    }
}

impl ScoreBoard for HighScores {
    fn is_qualifying(&self, score: u32) -> bool {
        self.qualifies(score)
    }

    fn record(&mut self, initials: &str, score: u32, wave: u32) {
        if self.add_score(initials, score, wave, now_ms()).is_some() {
            self.save();
        }
    }

    fn top_score(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}

/// Uppercase, then pad with spaces or cut to exactly three characters
pub fn normalize_initials(initials: &str) -> String {
    let mut out: String = initials
        .trim()
        .chars()
        .flat_map(char::to_uppercase)
        .take(INITIALS_LEN)
        .collect();
    while out.chars().count() < INITIALS_LEN {
        out.push(' ');
    }
    out
}

/// Format a timestamp as a relative date string
pub fn format_age(timestamp: u64, now: u64) -> String {
    let diff_mins = now.saturating_sub(timestamp) / 60_000;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    match (diff_days, diff_hours, diff_mins) {
        (1, _, _) => "Yesterday".to_string(),
        (d, _, _) if d > 1 => format!("{d} days ago"),
        (_, 1, _) => "1 hour ago".to_string(),
        (_, h, _) if h > 1 => format!("{h} hours ago"),
        (_, _, 1) => "1 min ago".to_string(),
        (_, _, m) if m > 1 => format!("{m} mins ago"),
        _ => "Just now".to_string(),
    }
}

/// Current wall-clock time as unix milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_board() -> HighScores {
        let mut board = HighScores::new();
        for (i, score) in [500, 400, 300, 200, 100].into_iter().enumerate() {
            board.add_score("abc", score, 1, i as u64);
        }
        board
    }

    #[test]
    fn test_qualifies_when_not_full() {
        let board = HighScores::new();
        assert!(board.qualifies(0));
        assert_eq!(board.potential_rank(0), Some(1));
    }

    #[test]
    fn test_qualifies_against_minimum() {
        let board = full_board();
        assert!(!board.qualifies(100));
        assert!(board.qualifies(101));
        assert_eq!(board.potential_rank(450), Some(2));
        assert_eq!(board.potential_rank(50), None);
    }

    #[test]
    fn test_add_keeps_top_five_sorted() {
        let mut board = full_board();
        assert_eq!(board.add_score("zed", 350, 4, 99), Some(3));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![500, 400, 350, 300, 200]);
        assert_eq!(board.entries[2].initials, "ZED");
    }

    #[test]
    fn test_tie_ranks_below_existing() {
        let mut board = HighScores::new();
        board.add_score("AAA", 100, 1, 0);
        assert_eq!(board.add_score("BBB", 100, 1, 1), Some(2));
        assert_eq!(board.entries[0].initials, "AAA");
    }

    #[test]
    fn test_top_score() {
        assert_eq!(HighScores::new().top_score(), 0);
        assert_eq!(full_board().top_score(), 500);
    }

    #[test]
    fn test_normalize_initials() {
        assert_eq!(normalize_initials("ab"), "AB ");
        assert_eq!(normalize_initials("wxyz"), "WXY");
        assert_eq!(normalize_initials("jd"), "JD ");
        assert_eq!(normalize_initials(""), "   ");
    }

    #[test]
    fn test_record_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");

        let mut board = HighScores::load(&path);
        assert!(board.is_empty());
        board.record("kim", 1234, 6);

        let reloaded = HighScores::load(&path);
        assert_eq!(reloaded.entries.len(), 1);
        assert_eq!(reloaded.entries[0].initials, "KIM");
        assert_eq!(reloaded.entries[0].score, 1234);
        assert_eq!(reloaded.entries[0].wave, 6);
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");
        std::fs::write(&path, "[{").unwrap();

        let board = HighScores::load(&path);
        assert!(board.is_empty());
    }

    #[test]
    fn test_unwritable_path_degrades_silently() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();

        let mut board = HighScores::load(&path);
        board.record("AAA", 10, 1);
        assert_eq!(board.top_score(), 10);
        assert!(!dir.path().join("taken.tmp").exists());
    }

    #[test]
    fn test_format_age() {
        let now = 10 * 24 * 3_600_000;
        assert_eq!(format_age(now, now), "Just now");
        assert_eq!(format_age(now - 60_000, now), "1 min ago");
        assert_eq!(format_age(now - 5 * 60_000, now), "5 mins ago");
        assert_eq!(format_age(now - 3_600_000, now), "1 hour ago");
        assert_eq!(format_age(now - 24 * 3_600_000, now), "Yesterday");
        assert_eq!(format_age(now - 3 * 24 * 3_600_000, now), "3 days ago");
    }
}
