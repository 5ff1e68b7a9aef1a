//! Flying targets
//!
//! Ducks cross the screen left to right on a sine-wave flight path. A hit
//! sends them tumbling to the ground, where they lie for a moment before
//! being removed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, GROUND_Y, SCREEN_WIDTH};

/// Ducks still flying past this x have escaped
pub const DUCK_EXIT_X: f32 = SCREEN_WIDTH + 80.0;
/// How long a downed duck stays on the ground
pub const DUCK_DEAD_DURATION: f32 = 2.0;
/// Upward velocity given to a duck when it is shot
pub const DUCK_HIT_KICK: f32 = 200.0;
/// Largest wave amplitude any kind can draw
pub const DUCK_MAX_AMPLITUDE: f32 = 100.0;
/// Spin rate while falling (degrees/s, cosmetic)
const FALL_SPIN: f32 = 360.0;

/// Duck species, ordered from most to least common
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuckKind {
    Common,
    Rare,
    Golden,
    Boss,
}

impl DuckKind {
    pub const ALL: [DuckKind; 4] = [DuckKind::Common, DuckKind::Rare, DuckKind::Golden, DuckKind::Boss];

    pub fn point_value(&self) -> u32 {
        match self {
            DuckKind::Common => 100,
            DuckKind::Rare => 500,
            DuckKind::Golden => 1000,
            DuckKind::Boss => 2000,
        }
    }

    /// Horizontal speed range (pixels/s)
    pub fn speed_range(&self) -> (f32, f32) {
        match self {
            DuckKind::Common => (150.0, 250.0),
            DuckKind::Rare => (200.0, 350.0),
            DuckKind::Golden => (300.0, 450.0),
            DuckKind::Boss => (100.0, 200.0),
        }
    }

    /// Vertical wave amplitude range (pixels)
    pub fn amplitude_range(&self) -> (f32, f32) {
        match self {
            DuckKind::Common => (20.0, 60.0),
            DuckKind::Rare => (30.0, 80.0),
            DuckKind::Golden => (40.0, 100.0),
            DuckKind::Boss => (10.0, 30.0),
        }
    }

    /// Vertical wave frequency range (cycles/s)
    pub fn frequency_range(&self) -> (f32, f32) {
        match self {
            DuckKind::Common => (0.01, 0.02),
            DuckKind::Rare => (0.015, 0.025),
            DuckKind::Golden => (0.02, 0.03),
            DuckKind::Boss => (0.005, 0.01),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DuckKind::Common => "common",
            DuckKind::Rare => "rare",
            DuckKind::Golden => "golden",
            DuckKind::Boss => "boss",
        }
    }
}

/// Duck lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuckState {
    Flying,
    Falling,
    Dead,
}

/// Parameters of the sine-wave flight path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightPath {
    /// Horizontal speed (pixels/s)
    pub speed: f32,
    /// Vertical wave amplitude (pixels)
    pub amplitude: f32,
    /// Vertical wave frequency (cycles/s)
    pub frequency: f32,
}

impl FlightPath {
    /// Sample a flight path uniformly from the kind's stat ranges
    pub fn sample<R: Rng + ?Sized>(kind: DuckKind, rng: &mut R) -> Self {
        Self {
            speed: sample_range(rng, kind.speed_range()),
            amplitude: sample_range(rng, kind.amplitude_range()),
            frequency: sample_range(rng, kind.frequency_range()),
        }
    }

    /// Height of the path at `age` seconds for a duck launched at `initial_y`
    #[inline]
    pub fn height_at(&self, initial_y: f32, age: f32) -> f32 {
        initial_y + self.amplitude * (age * self.frequency * std::f32::consts::TAU).sin()
    }
}

pub(crate) fn sample_range<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

/// A duck entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Duck {
    pub id: u32,
    pub kind: DuckKind,
    pub pos: Vec2,
    /// Velocity while falling (flight uses `flight.speed`)
    pub vel: Vec2,
    pub flight: FlightPath,
    /// Height the flight path oscillates around
    pub initial_y: f32,
    /// Seconds since spawn
    pub age: f32,
    pub state: DuckState,
    /// Sprite rotation in degrees (presentation only)
    pub rotation: f32,
    dead_timer: f32,
    expired: bool,
}

impl Duck {
    pub fn new(id: u32, kind: DuckKind, pos: Vec2, flight: FlightPath) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::new(flight.speed, 0.0),
            flight,
            initial_y: pos.y,
            age: 0.0,
            state: DuckState::Flying,
            rotation: 0.0,
            dead_timer: 0.0,
            expired: false,
        }
    }

    pub fn point_value(&self) -> u32 {
        self.kind.point_value()
    }

    /// Only flying ducks can be shot
    pub fn is_hittable(&self) -> bool {
        self.state == DuckState::Flying
    }

    /// Advance motion and lifecycle by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.expired {
            return;
        }
        self.age += dt;

        match self.state {
            DuckState::Flying => {
                self.pos.x += self.flight.speed * dt;
                self.pos.y = self.flight.height_at(self.initial_y, self.age);

                let omega = self.flight.frequency * std::f32::consts::TAU;
                let vertical_vel = self.flight.amplitude * omega * (self.age * omega).cos();
                self.rotation = vertical_vel * 0.1;
            }
            DuckState::Falling => {
                // Explicit Euler: velocity first, then position
                self.vel.y -= GRAVITY * dt;
                self.pos += self.vel * dt;
                self.rotation += FALL_SPIN * dt;

                if self.pos.y <= GROUND_Y {
                    self.pos.y = GROUND_Y;
                    self.vel = Vec2::ZERO;
                    self.state = DuckState::Dead;
                    self.dead_timer = 0.0;
                }
            }
            DuckState::Dead => {
                self.dead_timer += dt;
                if self.dead_timer >= DUCK_DEAD_DURATION {
                    self.expired = true;
                }
            }
        }
    }

    /// Shoot the duck down. Returns false (and does nothing) unless it is flying.
    pub fn hit(&mut self) -> bool {
        if self.state != DuckState::Flying {
            return false;
        }
        self.state = DuckState::Falling;
        self.vel = Vec2::new(self.flight.speed * 0.5, DUCK_HIT_KICK);
        true
    }

    /// Still flying and already past the exit edge
    pub fn escaped(&self) -> bool {
        self.state == DuckState::Flying && self.pos.x > DUCK_EXIT_X
    }

    /// Ready to be removed from the simulation
    pub fn is_off_screen(&self) -> bool {
        self.expired || self.pos.x > DUCK_EXIT_X
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn straight_duck(pos: Vec2, speed: f32) -> Duck {
        let flight = FlightPath {
            speed,
            amplitude: 0.0,
            frequency: 0.0,
        };
        Duck::new(1, DuckKind::Common, pos, flight)
    }

    #[test]
    fn test_straight_flight() {
        let mut duck = straight_duck(Vec2::new(-50.0, 300.0), 200.0);
        duck.update(1.0);
        assert_eq!(duck.pos, Vec2::new(150.0, 300.0));
        assert_eq!(duck.state, DuckState::Flying);
    }

    #[test]
    fn test_sine_flight_path() {
        let flight = FlightPath {
            speed: 100.0,
            amplitude: 50.0,
            frequency: 0.25,
        };
        let mut duck = Duck::new(1, DuckKind::Rare, Vec2::new(0.0, 500.0), flight);
        // Quarter period at 0.25 Hz is one second: peak of the wave
        duck.update(1.0);
        assert!((duck.pos.y - 550.0).abs() < 1e-3);
        assert!((duck.pos.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_hit_is_idempotent() {
        let mut duck = straight_duck(Vec2::new(500.0, 600.0), 200.0);
        assert!(duck.hit());
        assert_eq!(duck.state, DuckState::Falling);
        let vel = duck.vel;
        assert!(!duck.hit());
        assert_eq!(duck.state, DuckState::Falling);
        assert_eq!(duck.vel, vel);
    }

    #[test]
    fn test_fall_then_dead_then_removed() {
        let mut duck = straight_duck(Vec2::new(500.0, 600.0), 200.0);
        duck.hit();

        let dt = 1.0 / 60.0;
        let mut steps = 0;
        while duck.state == DuckState::Falling {
            duck.update(dt);
            steps += 1;
            assert!(steps < 600, "duck never landed");
        }
        assert_eq!(duck.state, DuckState::Dead);
        assert_eq!(duck.pos.y, GROUND_Y);
        assert!(!duck.is_off_screen());

        // Lies on the ground for two seconds
        for _ in 0..110 {
            duck.update(dt);
        }
        assert!(!duck.is_off_screen());
        for _ in 0..20 {
            duck.update(dt);
        }
        assert!(duck.is_off_screen());
        assert!(!duck.hit());
    }

    #[test]
    fn test_escape_past_exit_edge() {
        let mut duck = straight_duck(Vec2::new(DUCK_EXIT_X - 10.0, 400.0), 200.0);
        assert!(!duck.escaped());
        duck.update(0.1);
        assert!(duck.escaped());
        assert!(duck.is_off_screen());
    }

    #[test]
    fn test_sampled_stats_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for kind in DuckKind::ALL {
            for _ in 0..50 {
                let f = FlightPath::sample(kind, &mut rng);
                let (lo, hi) = kind.speed_range();
                assert!(f.speed >= lo && f.speed <= hi);
                let (lo, hi) = kind.amplitude_range();
                assert!(f.amplitude >= lo && f.amplitude <= hi);
                let (lo, hi) = kind.frequency_range();
                assert!(f.frequency >= lo && f.frequency <= hi);
            }
        }
    }

    #[test]
    fn test_flight_reproducible_for_seed() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        let fa = FlightPath::sample(DuckKind::Golden, &mut a);
        let fb = FlightPath::sample(DuckKind::Golden, &mut b);
        assert_eq!(fa, fb);

        let mut da = Duck::new(1, DuckKind::Golden, Vec2::new(-50.0, 400.0), fa);
        let mut db = Duck::new(1, DuckKind::Golden, Vec2::new(-50.0, 400.0), fb);
        for _ in 0..120 {
            da.update(1.0 / 60.0);
            db.update(1.0 / 60.0);
        }
        assert_eq!(da.pos, db.pos);
    }
}
