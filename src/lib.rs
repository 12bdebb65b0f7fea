//! Lane Dodge - deterministic core of a two-lane arcade dodge game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tick loop, spawning, collisions, near-misses)
//! - `challenges`: Seeded challenge pairs per group index
//! - `trophies`: Declarative trophy table and evaluator
//! - `stats`: Player profile, lifetime stats and run summaries

pub mod challenges;
pub mod sim;
pub mod stats;
pub mod trophies;

pub use challenges::{Challenge, ChallengeScope, ChallengeType, get_challenges_for_group};
pub use stats::{LifetimeStats, PlayerProfile, RunSummary};
pub use trophies::{ProgressSnapshot, TrophyTier, evaluate_trophies};

/// Game configuration constants
pub mod consts {
    /// Default logical screen size (portrait)
    pub const DEFAULT_SCREEN_WIDTH: f32 = 390.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 844.0;

    /// Lane centres as fractions of screen width (left, right)
    pub const LANE_X_FRACTIONS: [f32; 2] = [0.3, 0.7];

    /// Player sits at a fixed fraction of the screen height
    pub const PLAYER_Y_FRACTION: f32 = 0.78;
    pub const PLAYER_RADIUS: f32 = 22.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 72.0;
    pub const OBSTACLE_HEIGHT: f32 = 36.0;

    /// Coin defaults
    pub const COIN_SIZE: f32 = 28.0;

    /// Closest approach (while above the player) that still earns a near-miss
    pub const NEAR_MISS_THRESHOLD: f32 = 40.0;
    pub const NEAR_MISS_BONUS: u64 = 50;

    /// Survival scoring: one point per this many simulated milliseconds
    pub const SCORE_INTERVAL_MS: f64 = 100.0;

    /// Per-tick delta cap to bound frame hitches
    pub const MAX_DELTA_MS: f64 = 100.0;

    /// Entities are culled once their bottom edge is this far below the screen
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Band at the top of the screen checked by lane selection
    pub const TOP_ZONE: f32 = 220.0;

    /// Obstacle speed (pixels/s)
    pub const BASE_OBSTACLE_SPEED: f32 = 320.0;
    pub const MAX_OBSTACLE_SPEED: f32 = 760.0;
    /// Continuous speed gain per 1000 points
    pub const SPEED_STEP_PER_1000: f32 = 30.0;
    /// Stepwise speed gain per elapsed time step
    pub const SPEED_STEP_PER_15S: f32 = 20.0;
    pub const SPEED_TIME_STEP_MS: f64 = 15_000.0;

    /// Obstacle spawn interval (ms)
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 1100.0;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 420.0;
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 60.0;
    pub const SPAWN_INTERVAL_SCORE_STEP: u64 = 2000;

    /// Coin spawning (ms)
    pub const COIN_INITIAL_DELAY_MS: f64 = 3000.0;
    pub const COIN_SPAWN_INTERVAL_MS: f64 = 2400.0;

    /// Default windows granted by the host's reward flows (ms)
    pub const REVIVE_GRACE_MS: f64 = 2000.0;
    pub const COIN_MULTIPLIER_DURATION_MS: f64 = 10_000.0;
}
