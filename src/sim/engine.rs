//! Game engine
//!
//! Owns the player, crosshair, target collections and spawners, and advances
//! them once per rendered frame. Input events are dispatched here, shots are
//! resolved against the crosshair, and cues go out to the injected audio and
//! effect collaborators.
//!
//! Frame order while playing:
//! 1. spawners (may append targets)
//! 2. ducks and ground animals
//! 3. crosshair
//! 4. player reload timer
//! 5. escaped ducks and off-screen removal
//! 6. end-of-run check

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::crosshair::Crosshair;
use super::duck::{Duck, DuckKind, FlightPath};
use super::ground_animal::{AnimalKind, GroundAnimal};
use super::mode::GameMode;
use super::player::{Player, ReloadPolicy, ShotOutcome};
use super::spawner::{DuckSpawner, GroundAnimalSpawner};
use super::state::{EntityIds, GameEvent, GameOverReason, GamePhase, HudSnapshot, TargetKind};
use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::effects::{BurstKind, EffectQueue, EffectSink, ParticleBurst};
use crate::highscores::{HighScoreEntry, HighScores};

/// Engine tuning chosen at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base seed; each run derives its own spawner seed from it
    pub seed: u64,
    pub reload_policy: ReloadPolicy,
    /// Whether a duck escaping unshot costs a life
    pub missed_duck_costs_life: bool,
    /// Crosshair catch-up rate per second, `None` snaps instantly
    pub crosshair_smoothing: Option<f32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_D0C5,
            reload_policy: ReloadPolicy::Manual,
            missed_duck_costs_life: false,
            crosshair_smoothing: None,
        }
    }
}

/// Pointer event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A platform pointer event in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: u32,
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    /// Host timestamp in seconds (informational)
    pub timestamp: f64,
}

/// Input commands understood by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    /// Menu selection: start a run in this mode
    SelectMode(GameMode),
    Reload,
    Pause,
    Resume,
    /// Back button
    TogglePause,
    /// Start over in the same mode after a game over
    Restart,
    QuitToMenu,
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Duck(usize),
    Animal(usize),
}

pub struct GameEngine<A = AudioManager, E = EffectQueue> {
    config: EngineConfig,
    phase: GamePhase,
    player: Player,
    crosshair: Crosshair,
    ducks: Vec<Duck>,
    animals: Vec<GroundAnimal>,
    duck_spawner: DuckSpawner,
    animal_spawner: GroundAnimalSpawner,
    ids: EntityIds,
    /// Seconds of play in the current run (excludes pauses)
    elapsed: f64,
    /// Runs started so far, mixed into each run's seed
    runs: u64,
    /// Pointer that aims and fires; other concurrent pointers are gestures
    primary_pointer: Option<u32>,
    /// Extra pointers held down as a reload gesture; never aim or fire
    gesture_pointers: Vec<u32>,
    events: Vec<GameEvent>,
    high_scores: HighScores,
    audio: A,
    effects: E,
}

impl GameEngine {
    /// Engine with the default cue queues as collaborators
    pub fn headless(config: EngineConfig) -> Self {
        Self::new(config, AudioManager::new(), EffectQueue::default())
    }
}

impl<A: AudioSink, E: EffectSink> GameEngine<A, E> {
    pub fn new(config: EngineConfig, audio: A, effects: E) -> Self {
        let seed = config.seed;
        Self {
            player: Player::new(GameMode::default(), config.reload_policy),
            crosshair: Crosshair::new(config.crosshair_smoothing),
            config,
            phase: GamePhase::Menu,
            ducks: Vec::new(),
            animals: Vec::new(),
            duck_spawner: DuckSpawner::new(seed),
            animal_spawner: GroundAnimalSpawner::new(seed),
            ids: EntityIds::default(),
            elapsed: 0.0,
            runs: 0,
            primary_pointer: None,
            gesture_pointers: Vec::new(),
            events: Vec::new(),
            high_scores: HighScores::new(),
            audio,
            effects,
        }
    }

    /// Seed the leaderboard runs are recorded into
    pub fn with_high_scores(mut self, high_scores: HighScores) -> Self {
        self.high_scores = high_scores;
        self
    }

    // === Accessors ===

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn crosshair(&self) -> &Crosshair {
        &self.crosshair
    }

    pub fn ducks(&self) -> &[Duck] {
        &self.ducks
    }

    pub fn ground_animals(&self) -> &[GroundAnimal] {
        &self.animals
    }

    pub fn duck_spawner(&self) -> &DuckSpawner {
        &self.duck_spawner
    }

    pub fn animal_spawner(&self) -> &GroundAnimalSpawner {
        &self.animal_spawner
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> HudSnapshot {
        let mode = self.player.mode();
        HudSnapshot {
            phase: self.phase,
            mode,
            score: self.player.score(),
            lives: self.player.lives(),
            ammo: self.player.ammo(),
            max_ammo: self.player.max_ammo(),
            reloading: self.player.is_reloading(),
            reload_progress: self.player.reload_progress(),
            combo: self.player.combo_count(),
            multiplier: self.player.combo_multiplier(),
            accuracy: self.player.accuracy(),
            time_remaining: mode.time_limit().map(|limit| (limit - self.elapsed).max(0.0)),
        }
    }

    // === Scripted targets ===

    /// Place a duck with an explicit flight path. Returns its id.
    pub fn add_duck(&mut self, kind: DuckKind, pos: Vec2, flight: FlightPath) -> u32 {
        let id = self.ids.next();
        self.ducks.push(Duck::new(id, kind, pos, flight));
        id
    }

    /// Place a ground animal with an explicit speed. Returns its id.
    pub fn add_ground_animal(&mut self, kind: AnimalKind, pos: Vec2, speed: f32) -> u32 {
        let id = self.ids.next();
        self.animals.push(GroundAnimal::new(id, kind, pos, speed));
        id
    }

    // === Phase transitions ===

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::info!("Phase {:?} -> {:?}", from, to);
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Begin a fresh run in `mode`
    pub fn start_game(&mut self, mode: GameMode) {
        let run_seed = self.config.seed.wrapping_add(self.runs.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.runs += 1;

        self.player = Player::new(mode, self.config.reload_policy);
        self.ducks.clear();
        self.animals.clear();
        self.duck_spawner.reset(run_seed);
        self.animal_spawner.reset(run_seed);
        self.elapsed = 0.0;
        self.release_pointers();

        log::info!("Starting {} (seed {:#x})", mode.display_name(), run_seed);
        self.events.push(GameEvent::GameStarted { mode });
        self.set_phase(GamePhase::Playing);
    }

    /// Playing -> Paused; ignored in any other phase
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.set_phase(GamePhase::Paused);
        }
    }

    /// Paused -> Playing; ignored in any other phase
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.set_phase(GamePhase::Playing);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Restart in the same mode after a game over
    pub fn restart(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.start_game(self.player.mode());
        }
    }

    pub fn quit_to_menu(&mut self) {
        self.release_pointers();
        self.set_phase(GamePhase::Menu);
    }

    // === Input ===

    pub fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::Pointer(event) => self.handle_pointer(event),
            InputEvent::SelectMode(mode) => {
                if matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
                    self.start_game(mode);
                }
            }
            InputEvent::Reload => self.request_reload(),
            InputEvent::Pause => self.pause(),
            InputEvent::Resume => self.resume(),
            InputEvent::TogglePause => self.toggle_pause(),
            InputEvent::Restart => self.restart(),
            InputEvent::QuitToMenu => self.quit_to_menu(),
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        let PointerEvent {
            pointer_id, x, y, ..
        } = event;

        if self.gesture_pointers.contains(&pointer_id) {
            if event.phase == PointerPhase::Up {
                self.gesture_pointers.retain(|&p| p != pointer_id);
            }
            return;
        }

        match event.phase {
            PointerPhase::Down => match self.primary_pointer {
                None => {
                    self.primary_pointer = Some(pointer_id);
                    self.crosshair.snap_to(x, y);
                }
                Some(primary) if primary != pointer_id => {
                    // Second finger while aiming: reload gesture
                    self.gesture_pointers.push(pointer_id);
                    self.request_reload();
                }
                Some(_) => self.crosshair.snap_to(x, y),
            },
            PointerPhase::Move => {
                if self.primary_pointer.is_none_or(|p| p == pointer_id) {
                    self.crosshair.set_position(x, y);
                }
            }
            PointerPhase::Up => match self.primary_pointer {
                Some(primary) if primary == pointer_id => {
                    self.primary_pointer = None;
                    self.crosshair.snap_to(x, y);
                    if self.phase == GamePhase::Playing {
                        self.fire();
                    }
                }
                Some(_) => {}
                // Lift without a matching press (e.g. pressed before a phase change)
                None => self.crosshair.snap_to(x, y),
            },
        }
    }

    fn release_pointers(&mut self) {
        self.primary_pointer = None;
        self.gesture_pointers.clear();
    }

    fn request_reload(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.player.reload() {
            log::debug!("Reloading");
            self.audio.play(SoundEffect::ReloadStart);
            self.events.push(GameEvent::ReloadStarted);
        }
    }

    /// Pull the trigger at the crosshair
    fn fire(&mut self) {
        match self.player.pull_trigger(self.elapsed) {
            ShotOutcome::Fired { reload_started } => {
                let pos = self.crosshair.pos;
                self.audio.play(SoundEffect::ShotFired);
                self.events.push(GameEvent::ShotFired { pos });

                self.resolve_shot(pos);

                if reload_started {
                    log::debug!("Magazine empty, auto-reloading");
                    self.audio.play(SoundEffect::ReloadStart);
                    self.events.push(GameEvent::ReloadStarted);
                }
            }
            ShotOutcome::Empty => {
                self.audio.play(SoundEffect::EmptyClick);
                self.events.push(GameEvent::EmptyClick);
            }
            ShotOutcome::Reloading | ShotOutcome::Dead => {}
        }
    }

    /// Closest hittable target within the crosshair radius, if any
    fn closest_target(&self, pos: Vec2) -> Option<Target> {
        let radius = self.crosshair.hit_radius();
        let ducks = self
            .ducks
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_hittable())
            .map(|(i, d)| (pos.distance(d.pos), Target::Duck(i)));
        let animals = self
            .animals
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_hittable())
            .map(|(i, a)| (pos.distance(a.pos), Target::Animal(i)));

        ducks
            .chain(animals)
            .filter(|(dist, _)| *dist <= radius)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, target)| target)
    }

    fn resolve_shot(&mut self, pos: Vec2) {
        let now = self.elapsed;

        let hit = match self.closest_target(pos) {
            Some(Target::Duck(i)) => {
                let duck = &mut self.ducks[i];
                duck.hit().then(|| {
                    (
                        duck.id,
                        TargetKind::Duck(duck.kind),
                        duck.pos,
                        duck.point_value(),
                        BurstKind::Feathers,
                    )
                })
            }
            Some(Target::Animal(i)) => {
                let animal = &mut self.animals[i];
                animal.hit().then(|| {
                    (
                        animal.id,
                        TargetKind::Animal(animal.kind),
                        animal.pos,
                        animal.point_value(),
                        BurstKind::HitSparks,
                    )
                })
            }
            None => None,
        };

        let Some((id, target, target_pos, base_points, burst)) = hit else {
            log::debug!("Miss at ({:.0}, {:.0})", pos.x, pos.y);
            self.audio.play(SoundEffect::Miss);
            self.events.push(GameEvent::ShotMissed { pos });
            return;
        };

        let multiplier = self.player.combo_multiplier();
        let points = self.player.add_score(base_points, now);
        log::debug!("Hit {:?} #{}: +{} (x{})", target, id, points, multiplier);

        self.crosshair.flash();
        self.effects.emit(ParticleBurst {
            kind: burst,
            pos: target_pos,
        });
        self.audio.play(SoundEffect::HitConfirmed);
        self.events.push(GameEvent::TargetHit {
            id,
            target,
            pos: target_pos,
            points,
            multiplier,
        });
    }

    // === Frame update ===

    /// Advance the simulation by one frame. Only does work while playing.
    pub fn update(&mut self, dt: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.elapsed += dt as f64;
        let score = self.player.score();

        if let Some(id) = self.duck_spawner.update(dt, score, &mut self.ducks, &mut self.ids) {
            if let Some(duck) = self.ducks.last() {
                self.events.push(GameEvent::DuckSpawned { id, kind: duck.kind });
            }
        }
        if let Some(id) = self
            .animal_spawner
            .update(dt, score, &mut self.animals, &mut self.ids)
        {
            if let Some(animal) = self.animals.last() {
                self.events.push(GameEvent::AnimalSpawned {
                    id,
                    kind: animal.kind,
                });
            }
        }

        for duck in &mut self.ducks {
            duck.update(dt);
        }
        for animal in &mut self.animals {
            animal.update(dt);
        }

        self.crosshair.update(dt);

        if self.player.update_reload(dt) {
            log::debug!("Reload complete");
            self.audio.play(SoundEffect::ReloadComplete);
            self.events.push(GameEvent::ReloadCompleted);
        }

        // Escapes are recorded before removal so each duck counts once
        let escaped: Vec<u32> = self.ducks.iter().filter(|d| d.escaped()).map(|d| d.id).collect();
        for id in escaped {
            self.events.push(GameEvent::DuckEscaped { id });
            if self.config.missed_duck_costs_life && self.player.lose_life() {
                let remaining = self.player.lives().unwrap_or(0);
                log::debug!("Duck #{} escaped, {} lives left", id, remaining);
                self.events.push(GameEvent::LifeLost { remaining });
            }
        }
        self.ducks.retain(|d| !d.is_off_screen());
        self.animals.retain(|a| !a.is_off_screen());

        self.check_game_over();
    }

    fn check_game_over(&mut self) {
        let mode = self.player.mode();
        let reason = if !self.player.is_alive() {
            GameOverReason::OutOfLives
        } else if mode.time_limit().is_some_and(|limit| self.elapsed >= limit) {
            GameOverReason::TimeUp
        } else {
            return;
        };

        let score = self.player.score();
        let rank = self.high_scores.add_score(
            mode,
            HighScoreEntry {
                score,
                hits: self.player.total_hits(),
                accuracy: self.player.accuracy(),
                duration: self.elapsed,
            },
        );
        log::info!(
            "Game over ({:?}): {} points, {} hits, rank {:?}",
            reason,
            score,
            self.player.total_hits(),
            rank
        );

        self.release_pointers();
        self.audio.play(SoundEffect::GameOver);
        self.events.push(GameEvent::GameOver { reason, score, rank });
        self.set_phase(GamePhase::GameOver);
    }
}
