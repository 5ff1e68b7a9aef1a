//! Aiming reticle
//!
//! Follows the pointer and defines the circular hit-test region. Positioning
//! is instant by default; an optional smoothing rate eases the reticle toward
//! the pointer on move events for presentation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CROSSHAIR_FLASH_DURATION, CROSSHAIR_HIT_RADIUS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::lerp_vec;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crosshair {
    pub pos: Vec2,
    /// Where the pointer actually is (differs from `pos` only while smoothing)
    target: Vec2,
    /// Catch-up rate per second; `None` snaps instantly
    smoothing: Option<f32>,
    flash_timer: f32,
}

impl Default for Crosshair {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Crosshair {
    pub fn new(smoothing: Option<f32>) -> Self {
        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        Self {
            pos: center,
            target: center,
            smoothing: smoothing.filter(|rate| *rate > 0.0),
            flash_timer: 0.0,
        }
    }

    /// Track the pointer (eased when smoothing is enabled)
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x, y);
        if self.smoothing.is_none() {
            self.pos = self.target;
        }
    }

    /// Jump straight to a point regardless of smoothing (used when firing)
    pub fn snap_to(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x, y);
        self.pos = self.target;
    }

    pub fn hit_radius(&self) -> f32 {
        CROSSHAIR_HIT_RADIUS
    }

    /// Whether a point lies within the hit radius
    pub fn covers(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= self.hit_radius()
    }

    /// Start the hit-confirm flash
    pub fn flash(&mut self) {
        self.flash_timer = CROSSHAIR_FLASH_DURATION;
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    pub fn update(&mut self, dt: f32) {
        if self.flash_timer > 0.0 {
            self.flash_timer = (self.flash_timer - dt).max(0.0);
        }
        if let Some(rate) = self.smoothing {
            self.pos = lerp_vec(self.pos, self.target, rate * dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_positioning() {
        let mut c = Crosshair::default();
        c.set_position(150.0, 300.0);
        assert_eq!(c.pos, Vec2::new(150.0, 300.0));
        assert!(c.covers(Vec2::new(170.0, 300.0)));
        assert!(c.covers(Vec2::new(175.0, 300.0)));
        assert!(!c.covers(Vec2::new(176.0, 300.0)));
    }

    #[test]
    fn test_smoothing_eases_toward_pointer() {
        let mut c = Crosshair::new(Some(10.0));
        c.snap_to(0.0, 0.0);
        c.set_position(100.0, 0.0);
        assert_eq!(c.pos, Vec2::ZERO);
        c.update(0.05);
        assert!((c.pos.x - 50.0).abs() < 1e-3);
        c.update(1.0);
        assert_eq!(c.pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_flash_decays_without_touching_hit_test() {
        let mut c = Crosshair::default();
        c.set_position(500.0, 500.0);
        let covered = c.covers(Vec2::new(510.0, 500.0));
        c.flash();
        assert!(c.is_flashing());
        assert_eq!(c.covers(Vec2::new(510.0, 500.0)), covered);
        c.update(0.05);
        assert!(c.is_flashing());
        c.update(0.06);
        assert!(!c.is_flashing());
    }
}
