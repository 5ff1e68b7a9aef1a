//! Particle burst seam
//!
//! Hits request particle bursts through an [`EffectSink`]. The renderer owns
//! the particles; the default [`EffectQueue`] just buffers requests per frame.

use glam::Vec2;

/// Kind of burst to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    /// Feathers from a shot duck
    Feathers,
    /// Sparks from a shot ground animal
    HitSparks,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleBurst {
    pub kind: BurstKind,
    pub pos: Vec2,
}

/// Receiver of particle requests. Must not block.
pub trait EffectSink {
    fn emit(&mut self, burst: ParticleBurst);
}

/// Maximum bursts buffered between drains
pub const MAX_PENDING_BURSTS: usize = 64;

/// Bounded per-frame burst buffer
#[derive(Debug, Clone)]
pub struct EffectQueue {
    enabled: bool,
    pending: Vec<ParticleBurst>,
}

impl Default for EffectQueue {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EffectQueue {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pending: Vec::new(),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending.clear();
        }
    }

    pub fn drain(&mut self) -> Vec<ParticleBurst> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[ParticleBurst] {
        &self.pending
    }
}

impl EffectSink for EffectQueue {
    fn emit(&mut self, burst: ParticleBurst) {
        if !self.enabled || self.pending.len() >= MAX_PENDING_BURSTS {
            return;
        }
        self.pending.push(burst);
    }
}
