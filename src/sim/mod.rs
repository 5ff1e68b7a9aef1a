//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, the same sequence of
//! frame deltas and the same input events, a run plays out identically:
//! - Time only advances through `update(dt)`
//! - Seeded RNG only, one PCG stream per spawner
//! - Targets are kept in spawn (entity ID) order
//! - No rendering or platform dependencies

pub mod crosshair;
pub mod duck;
pub mod engine;
pub mod ground_animal;
pub mod mode;
pub mod player;
pub mod spawner;
pub mod state;

pub use crosshair::Crosshair;
pub use duck::{Duck, DuckKind, DuckState, FlightPath};
pub use engine::{EngineConfig, GameEngine, InputEvent, PointerEvent, PointerPhase};
pub use ground_animal::{AnimalKind, AnimalState, GroundAnimal};
pub use mode::GameMode;
pub use player::{Player, ReloadPolicy, ShotOutcome, combo_multiplier};
pub use spawner::{DuckSpawner, GroundAnimalSpawner, SpawnTimer};
pub use state::{
    EntityIds, GameEvent, GameOverReason, GamePhase, HudSnapshot, RngState, TargetKind,
};
