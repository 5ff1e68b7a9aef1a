//! Sound cue seam
//!
//! The simulation never plays audio itself. It fires cues into an
//! [`AudioSink`]; the default [`AudioManager`] applies the player's volume
//! preferences and queues the cues for the platform layer to play.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Trigger pulled and a round fired
    ShotFired,
    /// A target was hit
    HitConfirmed,
    /// Shot hit nothing
    Miss,
    /// Trigger pulled on an empty magazine
    EmptyClick,
    /// Reload began
    ReloadStart,
    /// Magazine refilled
    ReloadComplete,
    /// Run ended
    GameOver,
}

/// Receiver of sound cues. Must not block.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// A cue ready for playback at a given gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedCue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Volume-aware cue queue
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    queue: Vec<QueuedCue>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            queue: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Take every cue queued since the last drain
    pub fn drain(&mut self) -> Vec<QueuedCue> {
        std::mem::take(&mut self.queue)
    }

    pub fn pending(&self) -> &[QueuedCue] {
        &self.queue
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        log::trace!("Cue {:?} at {:.2}", effect, volume);
        self.queue.push(QueuedCue { effect, volume });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_carry_effective_volume() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::ShotFired);
        let cues = audio.drain();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].effect, SoundEffect::ShotFired);
        assert!((cues[0].volume - 0.25).abs() < 1e-6);
        assert!(audio.pending().is_empty());
    }

    #[test]
    fn test_muted_drops_cues() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        audio.play(SoundEffect::Miss);
        assert!(audio.drain().is_empty());

        audio.set_muted(false);
        audio.set_master_volume(-3.0);
        audio.play(SoundEffect::Miss);
        assert!(audio.drain().is_empty());
    }
}
