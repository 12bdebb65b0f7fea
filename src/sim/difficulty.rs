//! Difficulty curve: obstacle speed and spawn interval
//!
//! Both values are recomputed from (score, simulated time) every tick, never
//! incremented, so evaluating them twice gives the same answer.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Data-driven difficulty tuning. `Default` mirrors [`crate::consts`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    pub base_speed: f32,
    pub max_speed: f32,
    /// Continuous gain per 1000 points
    pub speed_step_per_1000: f32,
    /// Stepwise gain per `speed_time_step_ms`
    pub speed_step_per_time_step: f32,
    pub speed_time_step_ms: f64,
    pub base_interval_ms: f64,
    pub min_interval_ms: f64,
    pub interval_step_ms: f64,
    pub interval_score_step: u64,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            base_speed: BASE_OBSTACLE_SPEED,
            max_speed: MAX_OBSTACLE_SPEED,
            speed_step_per_1000: SPEED_STEP_PER_1000,
            speed_step_per_time_step: SPEED_STEP_PER_15S,
            speed_time_step_ms: SPEED_TIME_STEP_MS,
            base_interval_ms: BASE_SPAWN_INTERVAL_MS,
            min_interval_ms: MIN_SPAWN_INTERVAL_MS,
            interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            interval_score_step: SPAWN_INTERVAL_SCORE_STEP,
        }
    }
}

impl DifficultyCurve {
    /// Obstacle fall speed in pixels per second
    pub fn obstacle_speed(&self, score: u64, game_time_ms: f64) -> f32 {
        let score_gain = (score as f64 / 1000.0) as f32 * self.speed_step_per_1000;
        let time_steps = if self.speed_time_step_ms > 0.0 {
            (game_time_ms.max(0.0) / self.speed_time_step_ms).floor() as f32
        } else {
            0.0
        };
        let speed = self.base_speed + score_gain + time_steps * self.speed_step_per_time_step;
        speed.min(self.max_speed)
    }

    /// Minimum time between obstacle spawns in milliseconds
    pub fn spawn_interval_ms(&self, score: u64) -> f64 {
        let steps = score
            .checked_div(self.interval_score_step)
            .unwrap_or(0) as f64;
        (self.base_interval_ms - steps * self.interval_step_ms).max(self.min_interval_ms)
    }

    /// Parse a curve from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse a curve, falling back to the defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(curve) => curve,
            Err(err) => {
                log::warn!("Invalid difficulty curve ({err}), using defaults");
                Self::default()
            }
        }
    }
}

/// Obstacle speed on the default curve
pub fn obstacle_speed(score: u64, game_time_ms: f64) -> f32 {
    DifficultyCurve::default().obstacle_speed(score, game_time_ms)
}

/// Spawn interval on the default curve
pub fn spawn_interval_ms(score: u64) -> f64 {
    DifficultyCurve::default().spawn_interval_ms(score)
}
