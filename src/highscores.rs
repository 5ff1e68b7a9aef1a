//! High score leaderboard system
//!
//! Tracks the top 10 runs per game mode. Stored inside the preferences blob.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::GameMode;

/// Maximum number of high scores kept per mode
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Targets hit during the run
    pub hits: u32,
    /// Hits per shot (0-1)
    pub accuracy: f32,
    /// Seconds of play
    pub duration: f64,
}

/// Per-mode leaderboards
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HighScores {
    #[serde(default)]
    boards: BTreeMap<GameMode, Vec<HighScoreEntry>>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for a mode, best first
    pub fn entries(&self, mode: GameMode) -> &[HighScoreEntry] {
        self.boards.get(&mode).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a score qualifies for the mode's leaderboard
    pub fn qualifies(&self, mode: GameMode, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        let entries = self.entries(mode);
        if entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a run to the mode's leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, mode: GameMode, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(mode, entry.score) {
            return None;
        }

        let entries = self.boards.entry(mode).or_default();
        // Sorted descending by score; ties keep the older run first
        let pos = entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                entries.insert(i, entry);
                i + 1
            }
            None => {
                entries.push(entry);
                entries.len()
            }
        };
        entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.boards.values().all(Vec::is_empty)
    }

    /// Best score for a mode (if any)
    pub fn top_score(&self, mode: GameMode) -> Option<u64> {
        self.entries(mode).first().map(|e| e.score)
    }
}
