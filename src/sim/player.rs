//! Player resources: score, lives, ammo, reload and combo
//!
//! All timestamps are simulation seconds supplied by the engine, so combo
//! behaviour is reproducible in tests.

use serde::{Deserialize, Serialize};

use super::mode::GameMode;
use crate::consts::{COMBO_HITS_PER_STEP, COMBO_WINDOW, MAX_COMBO_BONUS, RELOAD_TIME};

/// What happens when a shot empties the magazine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReloadPolicy {
    /// Reload only on an explicit reload action
    #[default]
    Manual,
    /// Start reloading as soon as the last round is fired
    Auto,
}

/// Result of pulling the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// A round was fired; `reload_started` is set when auto-reload kicked in
    Fired { reload_started: bool },
    /// Magazine is empty
    Empty,
    /// Reload in progress
    Reloading,
    /// No lives left
    Dead,
}

/// Multiplier for a given combo streak, always in [1, 5]
#[inline]
pub fn combo_multiplier(combo_count: u32) -> u32 {
    1 + (combo_count / COMBO_HITS_PER_STEP).min(MAX_COMBO_BONUS)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    mode: GameMode,
    reload_policy: ReloadPolicy,
    score: u64,
    /// `None` = unlimited
    lives: Option<u32>,
    /// `None` = unlimited
    ammo: Option<u32>,
    is_reloading: bool,
    reload_progress: f32,
    combo_count: u32,
    combo_multiplier: u32,
    last_hit_time: Option<f64>,
    total_shots: u32,
    total_hits: u32,
}

impl Player {
    pub fn new(mode: GameMode, reload_policy: ReloadPolicy) -> Self {
        Self {
            mode,
            reload_policy,
            score: 0,
            lives: mode.max_lives(),
            ammo: mode.max_ammo(),
            is_reloading: false,
            reload_progress: 0.0,
            combo_count: 0,
            combo_multiplier: 1,
            last_hit_time: None,
            total_shots: 0,
            total_hits: 0,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> Option<u32> {
        self.lives
    }

    pub fn ammo(&self) -> Option<u32> {
        self.ammo
    }

    pub fn max_ammo(&self) -> Option<u32> {
        self.mode.max_ammo()
    }

    pub fn is_reloading(&self) -> bool {
        self.is_reloading
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    pub fn total_shots(&self) -> u32 {
        self.total_shots
    }

    pub fn total_hits(&self) -> u32 {
        self.total_hits
    }

    /// Hits per shot fired, 0 before the first shot
    pub fn accuracy(&self) -> f32 {
        if self.total_shots > 0 {
            self.total_hits as f32 / self.total_shots as f32
        } else {
            0.0
        }
    }

    /// Reload completion in [0, 1]; 1 when not reloading
    pub fn reload_progress(&self) -> f32 {
        if self.is_reloading {
            (self.reload_progress / RELOAD_TIME).min(1.0)
        } else {
            1.0
        }
    }

    pub fn has_infinite_ammo(&self) -> bool {
        self.ammo.is_none()
    }

    pub fn has_infinite_lives(&self) -> bool {
        self.lives.is_none()
    }

    pub fn is_alive(&self) -> bool {
        self.lives.is_none_or(|l| l > 0)
    }

    pub fn can_shoot(&self) -> bool {
        self.ammo.is_none_or(|a| a > 0) && !self.is_reloading && self.is_alive()
    }

    /// Fire one round at simulation time `now`. Returns false with no side
    /// effects when the player cannot shoot.
    pub fn shoot(&mut self, now: f64) -> bool {
        matches!(self.pull_trigger(now), ShotOutcome::Fired { .. })
    }

    /// Like [`shoot`](Self::shoot) but reports why a shot did not fire
    pub fn pull_trigger(&mut self, now: f64) -> ShotOutcome {
        if !self.is_alive() {
            return ShotOutcome::Dead;
        }
        if self.is_reloading {
            return ShotOutcome::Reloading;
        }
        if self.ammo == Some(0) {
            return ShotOutcome::Empty;
        }

        if let Some(ammo) = self.ammo.as_mut() {
            *ammo -= 1;
        }
        self.total_shots += 1;

        if self.combo_expired(now) {
            self.reset_combo();
        }

        let reload_started =
            self.reload_policy == ReloadPolicy::Auto && self.ammo == Some(0) && self.reload();
        ShotOutcome::Fired { reload_started }
    }

    /// Award `points` for a confirmed hit at time `now`. Returns the points
    /// actually added (base points times the multiplier in effect).
    pub fn add_score(&mut self, points: u32, now: f64) -> u64 {
        let awarded = points as u64 * self.combo_multiplier as u64;
        self.score += awarded;
        self.total_hits += 1;

        if self.within_combo_window(now) {
            self.combo_count += 1;
            self.combo_multiplier = combo_multiplier(self.combo_count);
        } else {
            self.combo_count = 1;
            self.combo_multiplier = 1;
        }
        self.last_hit_time = Some(now);

        awarded
    }

    /// Lose a life (never in God mode). Returns true if a life was taken.
    pub fn lose_life(&mut self) -> bool {
        let Some(lives) = self.lives.as_mut() else {
            return false;
        };
        if *lives == 0 {
            return false;
        }
        *lives -= 1;
        self.reset_combo();
        true
    }

    /// Begin a timed reload. Returns false if already reloading or full.
    pub fn reload(&mut self) -> bool {
        let (Some(ammo), Some(max)) = (self.ammo, self.max_ammo()) else {
            return false;
        };
        if ammo >= max || self.is_reloading {
            return false;
        }
        self.is_reloading = true;
        self.reload_progress = 0.0;
        true
    }

    /// Advance the reload timer. Returns true on the frame the reload completes.
    pub fn update_reload(&mut self, dt: f32) -> bool {
        if !self.is_reloading {
            return false;
        }
        self.reload_progress += dt;
        if self.reload_progress >= RELOAD_TIME {
            self.ammo = self.max_ammo();
            self.is_reloading = false;
            self.reload_progress = 0.0;
            return true;
        }
        false
    }

    /// Restore the initial state for the configured mode
    pub fn reset(&mut self) {
        *self = Self::new(self.mode, self.reload_policy);
    }

    fn within_combo_window(&self, now: f64) -> bool {
        self.last_hit_time.is_some_and(|t| now - t <= COMBO_WINDOW)
    }

    fn combo_expired(&self, now: f64) -> bool {
        self.last_hit_time.is_none_or(|t| now - t > COMBO_WINDOW)
    }

    fn reset_combo(&mut self) {
        self.combo_count = 0;
        self.combo_multiplier = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn normal() -> Player {
        Player::new(GameMode::Normal, ReloadPolicy::Manual)
    }

    #[test]
    fn test_initial_state() {
        let p = normal();
        assert_eq!(p.score(), 0);
        assert_eq!(p.lives(), Some(3));
        assert_eq!(p.ammo(), Some(8));
        assert_eq!(p.combo_multiplier(), 1);
        assert!(p.can_shoot());
    }

    #[test]
    fn test_shoot_empty_magazine() {
        let mut p = normal();
        for i in 0..8 {
            assert!(p.shoot(i as f64));
        }
        assert_eq!(p.ammo(), Some(0));
        assert_eq!(p.total_shots(), 8);

        assert!(!p.shoot(9.0));
        assert_eq!(p.pull_trigger(9.0), ShotOutcome::Empty);
        assert_eq!(p.ammo(), Some(0));
        assert_eq!(p.total_shots(), 8);
        // Manual policy never reloads on its own
        assert!(!p.is_reloading());
    }

    #[test]
    fn test_auto_reload_on_last_round() {
        let mut p = Player::new(GameMode::Hard, ReloadPolicy::Auto);
        for _ in 0..4 {
            assert_eq!(p.pull_trigger(0.0), ShotOutcome::Fired { reload_started: false });
        }
        assert_eq!(p.pull_trigger(0.0), ShotOutcome::Fired { reload_started: true });
        assert!(p.is_reloading());
        assert_eq!(p.pull_trigger(0.0), ShotOutcome::Reloading);
    }

    #[test]
    fn test_reload_cycle() {
        let mut p = normal();
        assert!(!p.reload(), "full magazine does not reload");
        p.shoot(0.0);
        p.shoot(0.0);
        assert!(p.reload());
        assert!(!p.reload(), "already reloading");
        assert!(!p.can_shoot());

        assert!(!p.update_reload(1.0));
        assert!((p.reload_progress() - 1.0 / 1.5).abs() < 1e-5);
        assert!(p.update_reload(0.5));
        assert_eq!(p.ammo(), Some(8));
        assert!(!p.is_reloading());
        assert_eq!(p.reload_progress(), 1.0);
    }

    #[test]
    fn test_combo_progression() {
        let mut p = normal();
        assert_eq!(p.add_score(100, 10.0), 100);
        assert_eq!(p.combo_count(), 1);
        assert_eq!(p.combo_multiplier(), 1);

        assert_eq!(p.add_score(100, 10.5), 100);
        assert_eq!(p.combo_count(), 2);
        assert_eq!(p.combo_multiplier(), 1);

        assert_eq!(p.add_score(100, 11.0), 100);
        assert_eq!(p.combo_count(), 3);
        assert_eq!(p.combo_multiplier(), 2);

        // Fourth hit is paid at 2x
        assert_eq!(p.add_score(100, 11.5), 200);
        assert_eq!(p.score(), 500);
    }

    #[test]
    fn test_combo_resets_after_window() {
        let mut p = normal();
        for i in 0..6 {
            p.add_score(100, i as f64 * 0.5);
        }
        assert_eq!(p.combo_multiplier(), 3);

        // Next shot comes too late: streak is gone
        assert!(p.shoot(10.0));
        assert_eq!(p.combo_count(), 0);
        assert_eq!(p.combo_multiplier(), 1);

        // A late hit restarts the streak at one
        let mut p2 = normal();
        p2.add_score(100, 0.0);
        p2.add_score(100, 5.0);
        assert_eq!(p2.combo_count(), 1);
    }

    #[test]
    fn test_lose_life_resets_combo() {
        let mut p = normal();
        for i in 0..4 {
            p.add_score(100, i as f64 * 0.1);
        }
        assert!(p.lose_life());
        assert_eq!(p.lives(), Some(2));
        assert_eq!(p.combo_count(), 0);
        assert_eq!(p.combo_multiplier(), 1);

        p.lose_life();
        p.lose_life();
        assert_eq!(p.lives(), Some(0));
        assert!(!p.is_alive());
        assert!(!p.can_shoot());
        assert_eq!(p.pull_trigger(0.0), ShotOutcome::Dead);
        assert!(!p.lose_life());
        assert_eq!(p.lives(), Some(0));
    }

    #[test]
    fn test_god_mode_unlimited() {
        let mut p = Player::new(GameMode::God, ReloadPolicy::Auto);
        for _ in 0..1000 {
            assert!(p.shoot(0.0));
        }
        assert_eq!(p.ammo(), None);
        assert!(!p.reload());
        assert!(!p.lose_life());
        assert!(p.is_alive());
        assert_eq!(p.total_shots(), 1000);
    }

    #[test]
    fn test_reset_restores_mode_defaults() {
        let mut p = Player::new(GameMode::Easy, ReloadPolicy::Manual);
        p.shoot(0.0);
        p.add_score(500, 0.0);
        p.lose_life();
        p.reload();
        p.reset();
        assert_eq!(p.score(), 0);
        assert_eq!(p.lives(), Some(10));
        assert_eq!(p.ammo(), Some(15));
        assert!(!p.is_reloading());
        assert_eq!(p.total_shots(), 0);
        assert_eq!(p.mode(), GameMode::Easy);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Shoot,
        Hit(u32),
        LoseLife,
        Reload,
        Tick(f32),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Shoot),
            (1u32..2000).prop_map(Action::Hit),
            Just(Action::LoseLife),
            Just(Action::Reload),
            (0.0f32..3.0).prop_map(Action::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(actions in prop::collection::vec(action(), 0..200)) {
            let mut p = normal();
            let mut now = 0.0f64;
            for a in actions {
                let lives_before = p.lives();
                match a {
                    Action::Shoot => {
                        let can = p.can_shoot();
                        let shots = p.total_shots();
                        let ammo = p.ammo();
                        let fired = p.shoot(now);
                        prop_assert_eq!(fired, can);
                        if !fired {
                            prop_assert_eq!(p.total_shots(), shots);
                            prop_assert_eq!(p.ammo(), ammo);
                        }
                    }
                    Action::Hit(points) => {
                        let mult = p.combo_multiplier();
                        let before = p.score();
                        let awarded = p.add_score(points, now);
                        prop_assert_eq!(awarded, points as u64 * mult as u64);
                        prop_assert_eq!(p.score(), before + awarded);
                    }
                    Action::LoseLife => {
                        let taken = p.lose_life();
                        prop_assert_eq!(taken, lives_before.is_some_and(|l| l > 0));
                    }
                    Action::Reload => {
                        p.reload();
                    }
                    Action::Tick(dt) => {
                        now += dt as f64;
                        p.update_reload(dt);
                    }
                }
                prop_assert!((1..=5).contains(&p.combo_multiplier()));
                prop_assert_eq!(p.combo_multiplier(), combo_multiplier(p.combo_count()));
                prop_assert!(p.ammo().unwrap() <= 8);
                prop_assert!(p.lives() <= lives_before);
            }
        }
    }
}
