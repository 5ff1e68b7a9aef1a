//! Ground targets
//!
//! Animals walk in from the right edge along the ground line. A hit stops
//! them in place, they play dead for a while, then disappear.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::duck::sample_range;

/// Animals walking past this x have left the screen
pub const ANIMAL_EXIT_X: f32 = -200.0;
/// Stunned time after a hit before the animal counts as dead
pub const ANIMAL_HIT_DURATION: f32 = 1.0;
/// Time spent dead before removal
pub const ANIMAL_DEAD_DURATION: f32 = 1.5;
/// Walking bob (pixels, radians/s)
const BOB_AMOUNT: f32 = 2.0;
const BOB_SPEED: f32 = 8.0;

/// Animal species, ordered from most to least common
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Rabbit,
    Deer,
    Wolf,
    Moose,
    Bear,
    Dinosaur,
}

impl AnimalKind {
    pub const ALL: [AnimalKind; 6] = [
        AnimalKind::Rabbit,
        AnimalKind::Deer,
        AnimalKind::Wolf,
        AnimalKind::Moose,
        AnimalKind::Bear,
        AnimalKind::Dinosaur,
    ];

    pub fn point_value(&self) -> u32 {
        match self {
            AnimalKind::Rabbit => 150,
            AnimalKind::Deer => 200,
            AnimalKind::Wolf => 600,
            AnimalKind::Moose => 800,
            AnimalKind::Bear => 1000,
            AnimalKind::Dinosaur => 1500,
        }
    }

    /// Walking speed range (pixels/s)
    pub fn speed_range(&self) -> (f32, f32) {
        match self {
            AnimalKind::Rabbit => (80.0, 120.0),
            AnimalKind::Deer => (100.0, 150.0),
            AnimalKind::Wolf => (120.0, 180.0),
            AnimalKind::Moose => (60.0, 100.0),
            AnimalKind::Bear => (40.0, 80.0),
            AnimalKind::Dinosaur => (30.0, 60.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnimalKind::Rabbit => "rabbit",
            AnimalKind::Deer => "deer",
            AnimalKind::Wolf => "wolf",
            AnimalKind::Moose => "moose",
            AnimalKind::Bear => "bear",
            AnimalKind::Dinosaur => "dinosaur",
        }
    }
}

/// Animal lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimalState {
    Walking,
    /// Stunned after a hit (velocity zeroed)
    Hit,
    Dead,
}

/// A ground animal entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundAnimal {
    pub id: u32,
    pub kind: AnimalKind,
    pub pos: Vec2,
    /// Walking speed (pixels/s, always moves left)
    pub speed: f32,
    pub state: AnimalState,
    /// Height the walking bob oscillates around
    base_y: f32,
    age: f32,
    state_timer: f32,
    expired: bool,
}

impl GroundAnimal {
    pub fn new(id: u32, kind: AnimalKind, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            speed,
            state: AnimalState::Walking,
            base_y: pos.y,
            age: 0.0,
            state_timer: 0.0,
            expired: false,
        }
    }

    /// Create an animal with a speed sampled from its kind's range
    pub fn spawn<R: Rng + ?Sized>(id: u32, kind: AnimalKind, pos: Vec2, rng: &mut R) -> Self {
        Self::new(id, kind, pos, sample_range(rng, kind.speed_range()))
    }

    pub fn point_value(&self) -> u32 {
        self.kind.point_value()
    }

    /// Only walking animals can be shot
    pub fn is_hittable(&self) -> bool {
        self.state == AnimalState::Walking
    }

    pub fn update(&mut self, dt: f32) {
        if self.expired {
            return;
        }
        self.age += dt;

        match self.state {
            AnimalState::Walking => {
                self.pos.x -= self.speed * dt;
                self.pos.y = self.base_y + BOB_AMOUNT * (self.age * BOB_SPEED).sin();
            }
            AnimalState::Hit => {
                self.state_timer += dt;
                if self.state_timer >= ANIMAL_HIT_DURATION {
                    self.state = AnimalState::Dead;
                    self.state_timer = 0.0;
                }
            }
            AnimalState::Dead => {
                self.state_timer += dt;
                if self.state_timer >= ANIMAL_DEAD_DURATION {
                    self.expired = true;
                }
            }
        }
    }

    /// Returns false (and does nothing) unless the animal is walking
    pub fn hit(&mut self) -> bool {
        if self.state != AnimalState::Walking {
            return false;
        }
        self.state = AnimalState::Hit;
        self.speed = 0.0;
        self.state_timer = 0.0;
        true
    }

    pub fn is_off_screen(&self) -> bool {
        self.expired || self.pos.x < ANIMAL_EXIT_X
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GROUND_Y;

    #[test]
    fn test_walks_left_with_bob() {
        let mut animal = GroundAnimal::new(1, AnimalKind::Deer, Vec2::new(1000.0, GROUND_Y), 100.0);
        for _ in 0..60 {
            animal.update(1.0 / 60.0);
            assert!((animal.pos.y - GROUND_Y).abs() <= BOB_AMOUNT + 1e-3);
        }
        assert!((animal.pos.x - 900.0).abs() < 0.01);
        assert_eq!(animal.state, AnimalState::Walking);
    }

    #[test]
    fn test_hit_stops_and_times_out() {
        let mut animal = GroundAnimal::new(1, AnimalKind::Bear, Vec2::new(800.0, GROUND_Y), 60.0);
        assert!(animal.hit());
        assert!(!animal.hit());
        assert_eq!(animal.state, AnimalState::Hit);

        let x = animal.pos.x;
        animal.update(0.5);
        assert_eq!(animal.pos.x, x);
        assert_eq!(animal.state, AnimalState::Hit);

        animal.update(0.5);
        assert_eq!(animal.state, AnimalState::Dead);
        assert!(!animal.is_off_screen());

        animal.update(1.0);
        assert!(!animal.is_off_screen());
        animal.update(0.5);
        assert!(animal.is_off_screen());
    }

    #[test]
    fn test_leaves_screen_on_left() {
        let mut animal = GroundAnimal::new(1, AnimalKind::Wolf, Vec2::new(-190.0, GROUND_Y), 150.0);
        assert!(!animal.is_off_screen());
        animal.update(0.1);
        assert!(animal.is_off_screen());
    }
}
