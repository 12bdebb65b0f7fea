//! Per-frame simulation tick
//!
//! Core game loop that advances a run deterministically. The step order below
//! is load-bearing: later steps read what earlier ones mutated this tick.

use super::collision::{collects_coin, first_collision};
use super::near_miss::track_near_misses;
use super::spawner::{
    pick_coin_lane, pick_obstacle_lane, should_spawn_coin, should_spawn_obstacle_on, spawn_coin,
    spawn_obstacle,
};
use super::state::{GamePhase, Lane, RunState};
use crate::consts::*;

/// Everything the host needs to react to a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub phase: GamePhase,
    pub score: u64,
    pub coins_collected: u32,
    /// Obstacles newly awarded a near-miss, in collection order
    pub near_miss_ids: Vec<u32>,
    pub collided: bool,
    pub collided_obstacle_id: Option<u32>,
    /// Some obstacle passed below the player this tick without a near-miss
    pub obstacle_passed_without_near_miss: bool,
}

impl TickResult {
    fn idle(state: &RunState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            coins_collected: 0,
            near_miss_ids: Vec::new(),
            collided: false,
            collided_obstacle_id: None,
            obstacle_passed_without_near_miss: false,
        }
    }
}

/// Clamp a host delta into `[0, MAX_DELTA_MS]`; NaN counts as no time
#[inline]
fn clamp_delta(delta_ms: f64) -> f64 {
    if delta_ms.is_nan() {
        0.0
    } else {
        delta_ms.clamp(0.0, MAX_DELTA_MS)
    }
}

/// Advance the run by one host frame
pub fn tick(state: &mut RunState, delta_ms: f64, now_ms: f64) -> TickResult {
    // 1. Only a playing run moves
    if state.phase != GamePhase::Playing {
        return TickResult::idle(state);
    }

    // 2. Cap the step
    let delta_ms = clamp_delta(delta_ms);
    let delta_sec = (delta_ms / 1000.0) as f32;

    // 3. Integrate obstacles at the current difficulty
    state.obstacle_speed = state.curve.obstacle_speed(state.score, state.game_time_ms);
    let dy = state.obstacle_speed * delta_sec;
    for obstacle in &mut state.obstacles {
        obstacle.y += dy;
    }
    // Coins ride the same conveyor
    for coin in &mut state.coins {
        coin.y += dy;
    }

    // 4. Cull obstacles below the screen
    let cull_line = state.screen_height + OFFSCREEN_MARGIN;
    let before = state.obstacles.len();
    state.obstacles.retain(|o| o.bottom() <= cull_line);
    if state.obstacles.len() != before {
        log::debug!("Culled {} obstacles", before - state.obstacles.len());
    }

    // 5. Obstacle spawn (suppressed during revive grace)
    let in_grace = now_ms < state.revive_grace_until;
    if !in_grace
        && should_spawn_obstacle_on(&state.curve, state.last_spawn_time, now_ms, state.score)
    {
        let counts = [
            state.top_zone_obstacles(Lane::Left),
            state.top_zone_obstacles(Lane::Right),
        ];
        let random = Lane::random(state.rng_mut());
        let lane = pick_obstacle_lane(random, counts);
        spawn_obstacle(state, lane);
        state.last_spawn_time = now_ms;
    }

    // 6. Coin spawn
    if should_spawn_coin(
        state.run_started_at,
        state.last_coin_spawn_time,
        now_ms,
        state.coin_multiplier_active_until,
    ) {
        let counts = [
            state.top_zone_obstacles(Lane::Left),
            state.top_zone_obstacles(Lane::Right),
        ];
        let random = Lane::random(state.rng_mut());
        spawn_coin(state, pick_coin_lane(random, counts));
        state.last_coin_spawn_time = now_ms;
    }

    // 7. Cull and collect coins
    state.coins.retain(|c| c.bottom() <= cull_line);
    let player = state.player;
    let player_x = state.lane_center_x(player.lane);
    let coins_before = state.coins.len();
    state.coins.retain(|c| !collects_coin(&player, player_x, c));
    let coins_collected = (coins_before - state.coins.len()) as u32;
    state.run_coins += coins_collected;

    let mut result = TickResult {
        phase: state.phase,
        score: state.score,
        coins_collected,
        near_miss_ids: Vec::new(),
        collided: false,
        collided_obstacle_id: None,
        obstacle_passed_without_near_miss: false,
    };

    // 8. Collision ends the run on the first overlap
    if let Some(id) = first_collision(&player, player_x, &state.obstacles) {
        log::info!("Collision with obstacle {id} at score {}", state.score);
        state.phase = GamePhase::GameOver;
        result.collided = true;
        result.collided_obstacle_id = Some(id);
    } else {
        // 9. Near-misses only on a clean tick
        let report = track_near_misses(state.player_center(), &mut state.obstacles);
        state.near_miss_streak += report.awarded.len() as u32;
        if report.passed_without_near_miss {
            state.near_miss_streak = 0;
        }
        state.run_near_misses += report.awarded.len() as u32;
        result.near_miss_ids = report.awarded;
        result.obstacle_passed_without_near_miss = report.passed_without_near_miss;
    }

    // 10. Survival scoring, fixed point
    state.game_time_ms += delta_ms;
    state.accumulated_score_ms += delta_ms;
    while state.accumulated_score_ms >= SCORE_INTERVAL_MS {
        state.score += 1;
        state.accumulated_score_ms -= SCORE_INTERVAL_MS;
    }

    // 11. Near-miss bonus
    state.score += NEAR_MISS_BONUS * result.near_miss_ids.len() as u64;

    result.phase = state.phase;
    result.score = state.score;
    result
}

/// Move the player to the other lane
pub fn swap_player_lane(state: &mut RunState) {
    state.player.lane = state.player.lane.other();
}

/// Remove one obstacle (if present) and resume a finished run.
///
/// Used by the revive flow; an unknown id leaves the obstacles untouched.
pub fn remove_obstacle_by_id(state: &mut RunState, id: u32) {
    state.obstacles.retain(|o| o.id != id);
    if state.phase == GamePhase::GameOver {
        log::info!("Run revived after obstacle {id}");
        state.phase = GamePhase::Playing;
    }
}

/// Clear the field and suppress obstacle spawns until `until_ms`
pub fn set_revive_grace(state: &mut RunState, until_ms: f64) {
    state.obstacles.clear();
    state.revive_grace_until = until_ms;
}

/// Open the coin multiplier window until `until_ms`
pub fn activate_coin_multiplier(state: &mut RunState, until_ms: f64) {
    state.coin_multiplier_active_until = until_ms;
}
