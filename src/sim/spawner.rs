//! Target spawning
//!
//! Each spawner counts down a score-scaled interval and, when it fires,
//! draws a target kind from score-adjusted weights. Both spawners own a
//! seeded PCG stream so a run is reproducible from its seed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::duck::{DUCK_MAX_AMPLITUDE, Duck, DuckKind, FlightPath};
use super::ground_animal::{AnimalKind, GroundAnimal};
use super::state::{EntityIds, RngState};
use crate::consts::{GROUND_Y, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Score that shaves one second off a spawn interval
pub const SPAWN_SCALE_DIVISOR: f32 = 5000.0;

pub const DUCK_BASE_INTERVAL: f32 = 2.0;
pub const DUCK_MIN_INTERVAL: f32 = 0.5;
pub const DUCK_SPAWN_X: f32 = -50.0;
/// Vertical band ducks are launched in; the widest wave stays above ground
pub const DUCK_SPAWN_Y_MIN: f32 = GROUND_Y + DUCK_MAX_AMPLITUDE;
pub const DUCK_SPAWN_Y_MAX: f32 = SCREEN_HEIGHT - 200.0;
/// Extra horizontal speed per point of score, and its cap
const DUCK_SPEED_PER_SCORE: f32 = 0.01;
const DUCK_MAX_SPEED_BONUS: f32 = 150.0;
const DUCK_BASE_CAPACITY: usize = 10;
const DUCK_MAX_CAPACITY: usize = 15;

pub const ANIMAL_BASE_INTERVAL: f32 = 2.5;
pub const ANIMAL_MIN_INTERVAL: f32 = 0.8;
pub const ANIMAL_SPAWN_X: f32 = SCREEN_WIDTH + 100.0;
const ANIMAL_CAPACITY: usize = 6;

/// PCG stream ids so the two spawners never share a sequence
const DUCK_STREAM: u64 = 1;
const ANIMAL_STREAM: u64 = 2;

/// Countdown shared by both spawners
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    base_interval: f32,
    min_interval: f32,
    current_interval: f32,
    remaining: f32,
}

impl SpawnTimer {
    pub fn new(base_interval: f32, min_interval: f32) -> Self {
        let mut timer = Self {
            base_interval,
            min_interval,
            current_interval: base_interval,
            remaining: 0.0,
        };
        timer.reset();
        timer
    }

    /// First spawn arrives after half an interval
    pub fn reset(&mut self) {
        self.current_interval = self.base_interval;
        self.remaining = self.base_interval * 0.5;
    }

    /// Interval for a given score: shrinks with score down to the floor
    pub fn interval_for(&self, score: u64) -> f32 {
        (self.base_interval - score as f32 / SPAWN_SCALE_DIVISOR).max(self.min_interval)
    }

    pub fn current_interval(&self) -> f32 {
        self.current_interval
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count down; true when a spawn is due
    fn tick(&mut self, dt: f32, score: u64) -> bool {
        self.current_interval = self.interval_for(score);
        self.remaining -= dt;
        self.remaining <= 0.0
    }

    fn rearm(&mut self) {
        self.remaining = self.current_interval;
    }
}

/// Pick an item by normalized weights. Falls back to the first item if
/// rounding leaves the draw unresolved; `None` only for an empty slice.
pub fn weighted_choice<T: Copy, R: Rng + ?Sized>(
    rng: &mut R,
    items: &[T],
    weights: &[f64],
) -> Option<T> {
    let roll: f64 = rng.random();
    let mut cumulative = 0.0;
    for (item, weight) in items.iter().zip(weights) {
        cumulative += weight;
        if roll <= cumulative {
            return Some(*item);
        }
    }
    items.first().copied()
}

fn normalize<const N: usize>(mut weights: [f64; N]) -> [f64; N] {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in &mut weights {
            *w /= total;
        }
    }
    weights
}

/// Duck kind weights (Common, Rare, Golden, Boss) for a score, summing to 1
pub fn duck_spawn_weights(score: u64) -> [f64; 4] {
    let mut weights = match score {
        s if s > 5000 => [40.0, 30.0, 20.0, 10.0],
        s if s > 2000 => [50.0, 30.0, 15.0, 5.0],
        _ => [60.0, 25.0, 10.0, 5.0],
    };

    let bonus = (score as f64 / 1000.0).min(20.0);
    weights[1] = (weights[1] + bonus).min(35.0);
    weights[2] = (weights[2] + bonus * 0.5).min(20.0);
    weights[3] = (weights[3] + bonus * 0.3).min(10.0);

    normalize(weights)
}

/// Animal kind weights (Rabbit .. Dinosaur) for a score, summing to 1
pub fn animal_spawn_weights(score: u64) -> [f64; 6] {
    let mut weights = match score {
        s if s > 8000 => [30.0, 25.0, 20.0, 15.0, 7.0, 3.0],
        s if s > 4000 => [35.0, 25.0, 20.0, 12.0, 6.0, 2.0],
        s if s > 2000 => [40.0, 25.0, 18.0, 10.0, 5.0, 2.0],
        _ => [40.0, 30.0, 25.0, 20.0, 10.0, 15.0],
    };

    let bonus = (score as f64 / 3000.0).min(25.0);
    weights[3] = (weights[3] + bonus).min(35.0);
    weights[4] = (weights[4] + bonus * 0.8).min(20.0);
    weights[5] = (weights[5] + bonus * 0.6).min(25.0);

    normalize(weights)
}

/// Launches ducks off the left edge
#[derive(Debug, Clone)]
pub struct DuckSpawner {
    timer: SpawnTimer,
    rng: Pcg32,
}

impl DuckSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            timer: SpawnTimer::new(DUCK_BASE_INTERVAL, DUCK_MIN_INTERVAL),
            rng: RngState::with_stream(seed, DUCK_STREAM).to_rng(),
        }
    }

    /// Restart the countdown and re-seed the random stream
    pub fn reset(&mut self, seed: u64) {
        self.timer.reset();
        self.rng = RngState::with_stream(seed, DUCK_STREAM).to_rng();
    }

    pub fn timer(&self) -> &SpawnTimer {
        &self.timer
    }

    /// Most ducks allowed in the air at once for a score
    pub fn capacity(score: u64) -> usize {
        (DUCK_BASE_CAPACITY + (score / 2000) as usize).min(DUCK_MAX_CAPACITY)
    }

    /// Advance the countdown; spawns at most one duck into `ducks`.
    /// Returns the new duck's id.
    pub fn update(&mut self, dt: f32, score: u64, ducks: &mut Vec<Duck>, ids: &mut EntityIds) -> Option<u32> {
        if !self.timer.tick(dt, score) {
            return None;
        }
        let flying = ducks.iter().filter(|d| d.is_hittable()).count();
        if flying >= Self::capacity(score) {
            // Stay due until a slot frees up
            return None;
        }
        self.timer.rearm();

        let kind = self.choose_kind(score);
        let y = self.rng.random_range(DUCK_SPAWN_Y_MIN..=DUCK_SPAWN_Y_MAX);
        let mut flight = FlightPath::sample(kind, &mut self.rng);
        flight.speed += (score as f32 * DUCK_SPEED_PER_SCORE).min(DUCK_MAX_SPEED_BONUS);

        let id = ids.next();
        ducks.push(Duck::new(id, kind, Vec2::new(DUCK_SPAWN_X, y), flight));
        log::debug!(
            "Spawned {} duck #{} at y={:.0} speed={:.0}",
            kind.name(),
            id,
            y,
            flight.speed
        );
        Some(id)
    }

    /// Draw a duck kind for the given score
    pub fn choose_kind(&mut self, score: u64) -> DuckKind {
        weighted_choice(&mut self.rng, &DuckKind::ALL, &duck_spawn_weights(score))
            .unwrap_or(DuckKind::Common)
    }
}

/// Sends ground animals in from the right edge
#[derive(Debug, Clone)]
pub struct GroundAnimalSpawner {
    timer: SpawnTimer,
    rng: Pcg32,
}

impl GroundAnimalSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            timer: SpawnTimer::new(ANIMAL_BASE_INTERVAL, ANIMAL_MIN_INTERVAL),
            rng: RngState::with_stream(seed, ANIMAL_STREAM).to_rng(),
        }
    }

    pub fn reset(&mut self, seed: u64) {
        self.timer.reset();
        self.rng = RngState::with_stream(seed, ANIMAL_STREAM).to_rng();
    }

    pub fn timer(&self) -> &SpawnTimer {
        &self.timer
    }

    pub fn update(
        &mut self,
        dt: f32,
        score: u64,
        animals: &mut Vec<GroundAnimal>,
        ids: &mut EntityIds,
    ) -> Option<u32> {
        if !self.timer.tick(dt, score) {
            return None;
        }
        if animals.iter().filter(|a| a.is_hittable()).count() >= ANIMAL_CAPACITY {
            return None;
        }
        self.timer.rearm();

        let kind = self.choose_kind(score);
        let id = ids.next();
        let animal = GroundAnimal::spawn(id, kind, Vec2::new(ANIMAL_SPAWN_X, GROUND_Y), &mut self.rng);
        log::debug!("Spawned {} #{} speed={:.0}", kind.name(), id, animal.speed);
        animals.push(animal);
        Some(id)
    }

    pub fn choose_kind(&mut self, score: u64) -> AnimalKind {
        weighted_choice(&mut self.rng, &AnimalKind::ALL, &animal_spawn_weights(score))
            .unwrap_or(AnimalKind::Rabbit)
    }
}
