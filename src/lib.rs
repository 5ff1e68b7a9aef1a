//! Duck Hunter - an arcade shooting gallery
//!
//! Core modules:
//! - `sim`: Deterministic simulation (targets, player, spawning, game engine)
//! - `audio`: Sound cue seam consumed by the platform audio layer
//! - `effects`: Particle burst seam consumed by the renderer
//! - `settings`: User preferences blob (the only persisted data)
//! - `highscores`: Per-mode leaderboard stored inside the preferences

pub mod audio;
pub mod effects;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, AudioSink, SoundEffect};
pub use effects::{BurstKind, EffectQueue, EffectSink, ParticleBurst};
pub use highscores::HighScores;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference resolution all world coordinates are expressed in
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;

    /// Largest frame delta the native runner feeds the engine
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Falling acceleration (pixels/s², world is y-up)
    pub const GRAVITY: f32 = 980.0;
    /// World-space ground line
    pub const GROUND_Y: f32 = 120.0;

    /// Crosshair hit-test radius
    pub const CROSSHAIR_HIT_RADIUS: f32 = 25.0;
    /// How long the crosshair flashes after a confirmed hit
    pub const CROSSHAIR_FLASH_DURATION: f32 = 0.1;

    /// Seconds after a hit during which the next hit extends the combo
    pub const COMBO_WINDOW: f64 = 2.0;
    /// Combo hits needed per multiplier step
    pub const COMBO_HITS_PER_STEP: u32 = 3;
    /// Highest multiplier bonus on top of the base 1x
    pub const MAX_COMBO_BONUS: u32 = 4;
    /// Time to refill the magazine
    pub const RELOAD_TIME: f32 = 1.5;

    /// God mode session length in seconds
    pub const GOD_MODE_TIME_LIMIT: f64 = 300.0;
}

/// Move `from` toward `to` by fraction `t` (clamped to [0, 1])
#[inline]
pub fn lerp_vec(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from.lerp(to, t.clamp(0.0, 1.0))
}
