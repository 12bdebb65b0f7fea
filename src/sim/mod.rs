//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from the host (`delta_ms`, `now_ms`)
//! - Seeded RNG only (owned by the run state)
//! - Stable iteration order (insertion order, ids are monotonic)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod geometry;
pub mod near_miss;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{collects_coin, collides};
pub use difficulty::{DifficultyCurve, obstacle_speed, spawn_interval_ms};
pub use geometry::{Rect, circle_rect_distance, circle_rect_overlap};
pub use near_miss::track_near_misses;
pub use spawner::should_spawn_obstacle;
pub use state::{Coin, GamePhase, Lane, Obstacle, Player, RunState, create_initial_player};
pub use tick::{
    TickResult, activate_coin_multiplier, remove_obstacle_by_id, set_revive_grace,
    swap_player_lane, tick,
};
