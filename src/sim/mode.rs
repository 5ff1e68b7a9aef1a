//! Difficulty modes
//!
//! Static per-mode parameters selected at game start.

use serde::{Deserialize, Serialize};

use crate::consts::GOD_MODE_TIME_LIMIT;

/// Difficulty mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum GameMode {
    Easy,
    #[default]
    Normal,
    Hard,
    /// Unlimited lives and ammo, ends on a wall-clock limit
    God,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [GameMode::Easy, GameMode::Normal, GameMode::Hard, GameMode::God];

    /// Starting (and maximum) lives, `None` = unlimited
    pub fn max_lives(&self) -> Option<u32> {
        match self {
            GameMode::Easy => Some(10),
            GameMode::Normal => Some(3),
            GameMode::Hard => Some(1),
            GameMode::God => None,
        }
    }

    /// Magazine size, `None` = unlimited
    pub fn max_ammo(&self) -> Option<u32> {
        match self {
            GameMode::Easy => Some(15),
            GameMode::Normal => Some(8),
            GameMode::Hard => Some(5),
            GameMode::God => None,
        }
    }

    /// Session length in seconds, if the mode has one
    pub fn time_limit(&self) -> Option<f64> {
        match self {
            GameMode::God => Some(GOD_MODE_TIME_LIMIT),
            _ => None,
        }
    }

    pub fn is_god(&self) -> bool {
        *self == GameMode::God
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::Easy => "Easy Mode",
            GameMode::Normal => "Normal Mode",
            GameMode::Hard => "Hard Mode",
            GameMode::God => "God Mode",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::Easy => "10 lives, 15 ammo - Perfect for beginners",
            GameMode::Normal => "3 lives, 8 ammo - Balanced challenge",
            GameMode::Hard => "1 life, 5 ammo - Hardcore difficulty",
            GameMode::God => "Unlimited lives and ammo - 5 minute limit",
        }
    }

    /// Parse a mode name; unknown names fall back to Normal
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "easy" => GameMode::Easy,
            "normal" => GameMode::Normal,
            "hard" => GameMode::Hard,
            "god" => GameMode::God,
            other => {
                log::warn!("Unknown game mode '{}', using Normal", other);
                GameMode::Normal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_table() {
        assert_eq!(GameMode::Easy.max_lives(), Some(10));
        assert_eq!(GameMode::Easy.max_ammo(), Some(15));
        assert_eq!(GameMode::Normal.max_lives(), Some(3));
        assert_eq!(GameMode::Normal.max_ammo(), Some(8));
        assert_eq!(GameMode::Hard.max_lives(), Some(1));
        assert_eq!(GameMode::Hard.max_ammo(), Some(5));
        assert_eq!(GameMode::God.max_lives(), None);
        assert_eq!(GameMode::God.max_ammo(), None);
    }

    #[test]
    fn test_only_god_has_time_limit() {
        for mode in GameMode::ALL {
            assert_eq!(mode.time_limit().is_some(), mode.is_god());
        }
        assert_eq!(GameMode::God.time_limit(), Some(300.0));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(GameMode::from_name("HARD"), GameMode::Hard);
        assert_eq!(GameMode::from_name(" god "), GameMode::God);
        assert_eq!(GameMode::from_name("nightmare"), GameMode::Normal);
    }
}
