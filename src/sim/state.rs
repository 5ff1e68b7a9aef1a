//! Engine phases, frame events and shared simulation types

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::duck::DuckKind;
use super::ground_animal::AnimalKind;
use super::mode::GameMode;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a difficulty selection
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen; spawn timers keep their remaining time
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    OutOfLives,
    TimeUp,
}

/// Something that was shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Duck(DuckKind),
    Animal(AnimalKind),
}

/// Gameplay event raised during a frame, drained by the host after `update`
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    GameStarted { mode: GameMode },
    DuckSpawned { id: u32, kind: DuckKind },
    AnimalSpawned { id: u32, kind: AnimalKind },
    ShotFired { pos: Vec2 },
    TargetHit { id: u32, target: TargetKind, pos: Vec2, points: u64, multiplier: u32 },
    ShotMissed { pos: Vec2 },
    EmptyClick,
    ReloadStarted,
    ReloadCompleted,
    DuckEscaped { id: u32 },
    LifeLost { remaining: u32 },
    GameOver { reason: GameOverReason, score: u64, rank: Option<usize> },
}

/// RNG state wrapper (seed + PCG stream id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn with_stream(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Entity ID allocator, shared by ducks and ground animals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next_id: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Everything the HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub score: u64,
    /// `None` = unlimited
    pub lives: Option<u32>,
    /// `None` = unlimited
    pub ammo: Option<u32>,
    pub max_ammo: Option<u32>,
    pub reloading: bool,
    /// 0..1, 1 when not reloading
    pub reload_progress: f32,
    pub combo: u32,
    pub multiplier: u32,
    pub accuracy: f32,
    /// Seconds left for timed modes
    pub time_remaining: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_sequential() {
        let mut ids = EntityIds::default();
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
        assert_eq!(ids.next(), 3);
    }

    #[test]
    fn test_rng_streams_differ() {
        use rand::Rng;
        let mut a = RngState::with_stream(9, 1).to_rng();
        let mut b = RngState::with_stream(9, 2).to_rng();
        let xs: Vec<u32> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.random()).collect();
        assert_ne!(xs, ys);

        let mut c = RngState::new(9).to_rng();
        let mut d = RngState::new(9).to_rng();
        assert_eq!(c.random::<u64>(), d.random::<u64>());
    }
}
