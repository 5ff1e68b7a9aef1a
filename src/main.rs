//! Duck Hunter native entry point
//!
//! Headless runner: loads preferences, plays one run with an autopilot
//! aiming for the duck closest to escaping, then records the result.
//!
//! Usage: `duck-hunter [mode] [settings.json]`

use glam::Vec2;
use rand::Rng;

use duck_hunter::consts::{MAX_FRAME_DT, SCREEN_HEIGHT, SCREEN_WIDTH};
use duck_hunter::sim::{
    EngineConfig, GameEngine, GameEvent, GameMode, GamePhase, InputEvent, PointerEvent,
    PointerPhase, RngState,
};
use duck_hunter::{AudioManager, EffectQueue, Settings};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Runs without a time limit stop here
const MAX_RUN_SECONDS: f64 = 180.0;
/// Autopilot trigger cadence
const SHOT_COOLDOWN: f32 = 0.35;
/// Autopilot aim error (pixels)
const AIM_JITTER: f32 = 18.0;
const DEFAULT_SETTINGS_PATH: &str = "duck_hunter_settings.json";

/// Demo player driving the engine through ordinary pointer events
struct Autopilot {
    rng: rand_pcg::Pcg32,
    cooldown: f32,
    clock: f64,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: RngState::with_stream(seed, 7).to_rng(),
            cooldown: SHOT_COOLDOWN,
            clock: 0.0,
        }
    }

    fn pointer(&self, phase: PointerPhase, pointer_id: u32, at: Vec2) -> InputEvent {
        InputEvent::Pointer(PointerEvent {
            pointer_id,
            phase,
            x: at.x,
            y: at.y,
            timestamp: self.clock,
        })
    }

    /// Inputs for this frame
    fn think(&mut self, engine: &GameEngine, dt: f32) -> Vec<InputEvent> {
        self.clock += dt as f64;
        self.cooldown -= dt;

        let player = engine.player();
        if player.ammo() == Some(0) && !player.is_reloading() {
            return vec![InputEvent::Reload];
        }
        if self.cooldown > 0.0 || !player.can_shoot() {
            return Vec::new();
        }

        // Most urgent duck is the one nearest the exit edge
        let duck = engine
            .ducks()
            .iter()
            .filter(|d| d.is_hittable())
            .max_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|d| d.pos);
        let target = duck.or_else(|| {
            engine
                .ground_animals()
                .iter()
                .find(|a| a.is_hittable() && a.pos.x < SCREEN_WIDTH)
                .map(|a| a.pos)
        });
        let Some(target) = target else {
            return Vec::new();
        };

        self.cooldown = SHOT_COOLDOWN;
        let jitter = Vec2::new(
            self.rng.random_range(-AIM_JITTER..=AIM_JITTER),
            self.rng.random_range(-AIM_JITTER..=AIM_JITTER),
        );
        let aim = (target + jitter).clamp(Vec2::ZERO, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        vec![
            self.pointer(PointerPhase::Down, 0, aim),
            self.pointer(PointerPhase::Up, 0, aim),
        ]
    }
}

fn run(mode: GameMode, settings: &mut Settings, seed: u64) {
    let mut audio = AudioManager::new();
    settings.apply_audio(&mut audio);
    let mut effects = EffectQueue::default();
    settings.apply_effects(&mut effects);

    let config: EngineConfig = settings.engine_config(seed);
    let mut engine = GameEngine::new(config, audio, effects)
        .with_high_scores(std::mem::take(&mut settings.high_scores));
    let mut pilot = Autopilot::new(seed);

    engine.handle_input(InputEvent::SelectMode(mode));

    let mut shots_missed = 0u32;
    let mut escaped = 0u32;
    let mut rank = None;

    while engine.phase() == GamePhase::Playing && engine.elapsed() < MAX_RUN_SECONDS {
        for input in pilot.think(&engine, FRAME_DT) {
            engine.handle_input(input);
        }
        engine.update(FRAME_DT.min(MAX_FRAME_DT));

        for event in engine.drain_events() {
            match event {
                GameEvent::ShotMissed { .. } => shots_missed += 1,
                GameEvent::DuckEscaped { .. } => escaped += 1,
                GameEvent::GameOver { rank: r, .. } => rank = r,
                _ => {}
            }
        }
        // Cues and bursts would go to the platform layers here
        engine.audio_mut().drain();
        engine.effects_mut().drain();
    }

    let hud = engine.hud();
    println!("Mode:      {}", mode.display_name());
    println!("Time:      {:.1}s", engine.elapsed());
    println!("Score:     {}", hud.score);
    println!("Hits:      {}", engine.player().total_hits());
    println!("Misses:    {}", shots_missed);
    println!("Accuracy:  {:.0}%", hud.accuracy * 100.0);
    println!("Escaped:   {}", escaped);
    match rank {
        Some(r) => println!("New high score! Rank #{}", r),
        None => println!("Best:      {}", engine.high_scores().top_score(mode).unwrap_or(0)),
    }

    settings.high_scores = engine.high_scores().clone();
    settings.last_mode = mode;
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Duck Hunter (native) starting...");

    let mut args = std::env::args().skip(1);
    let mode_arg = args.next();
    let path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());

    let mut settings = Settings::load_or_default(&path);
    let mode = mode_arg
        .as_deref()
        .map(GameMode::from_name)
        .unwrap_or(settings.last_mode);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    run(mode, &mut settings, seed);

    if let Err(e) = settings.save(&path) {
        log::error!("Failed to save settings: {}", e);
    }
}
