//! Obstacle and coin spawning
//!
//! Timing gates and construction only. The tick engine draws the random lane
//! and hands it in, so everything here is a plain function of its arguments.

use super::difficulty::DifficultyCurve;
use super::state::{Coin, Lane, Obstacle, RunState};
use crate::consts::*;

/// Spawn test on the default curve
pub fn should_spawn_obstacle(last_spawn_time: f64, now: f64, score: u64) -> bool {
    should_spawn_obstacle_on(&DifficultyCurve::default(), last_spawn_time, now, score)
}

/// Spawn test on an explicit curve
pub fn should_spawn_obstacle_on(
    curve: &DifficultyCurve,
    last_spawn_time: f64,
    now: f64,
    score: u64,
) -> bool {
    now - last_spawn_time >= curve.spawn_interval_ms(score)
}

/// Pick the obstacle lane.
///
/// At most one lane may hold top-zone obstacles at a time, so a new obstacle
/// stacks onto the occupied lane when there is one. The random pick stands
/// only while both lanes are clear. If both are already occupied (a state
/// this rule never produces on its own) the emptier lane wins and ties keep
/// the random pick.
pub fn pick_obstacle_lane(random: Lane, top_zone_counts: [usize; 2]) -> Lane {
    let mine = top_zone_counts[random.index()];
    let theirs = top_zone_counts[random.other().index()];
    match (mine, theirs) {
        (_, 0) => random,
        (0, _) => random.other(),
        _ => emptier_lane(random, top_zone_counts),
    }
}

/// Coins go to the lane with fewer top-zone obstacles, ties keep the random pick
pub fn pick_coin_lane(random: Lane, top_zone_counts: [usize; 2]) -> Lane {
    emptier_lane(random, top_zone_counts)
}

fn emptier_lane(random: Lane, top_zone_counts: [usize; 2]) -> Lane {
    let mine = top_zone_counts[random.index()];
    let theirs = top_zone_counts[random.other().index()];
    if theirs < mine { random.other() } else { random }
}

/// Coin timing: initial delay since run start, then a fixed interval that is
/// halved while the coin multiplier window is open
pub fn should_spawn_coin(
    run_started_at: f64,
    last_coin_spawn_time: f64,
    now: f64,
    multiplier_active_until: f64,
) -> bool {
    if now - run_started_at < COIN_INITIAL_DELAY_MS {
        return false;
    }
    let interval = if now < multiplier_active_until {
        COIN_SPAWN_INTERVAL_MS / 2.0
    } else {
        COIN_SPAWN_INTERVAL_MS
    };
    now - last_coin_spawn_time >= interval
}

/// Create an obstacle in `lane` and append it to the run
pub fn spawn_obstacle(state: &mut RunState, lane: Lane) -> u32 {
    let id = state.next_entity_id();
    let obstacle = Obstacle::new(id, lane, state.lane_center_x(lane));
    state.obstacles.push(obstacle);
    log::debug!("Spawned obstacle {id} in {lane:?} lane");
    id
}

/// Create a coin in `lane` and append it to the run
pub fn spawn_coin(state: &mut RunState, lane: Lane) -> u32 {
    let id = state.next_entity_id();
    let coin = Coin::new(id, lane, state.lane_center_x(lane));
    state.coins.push(coin);
    log::debug!("Spawned coin {id} in {lane:?} lane");
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_gate_uses_interval() {
        assert!(!should_spawn_obstacle(0.0, BASE_SPAWN_INTERVAL_MS - 1.0, 0));
        assert!(should_spawn_obstacle(0.0, BASE_SPAWN_INTERVAL_MS, 0));
        // Higher score shortens the interval
        assert!(should_spawn_obstacle(0.0, MIN_SPAWN_INTERVAL_MS, 1_000_000));
    }

    #[test]
    fn test_lane_random_when_both_clear() {
        assert_eq!(pick_obstacle_lane(Lane::Left, [0, 0]), Lane::Left);
        assert_eq!(pick_obstacle_lane(Lane::Right, [0, 0]), Lane::Right);
    }

    #[test]
    fn test_lane_stacks_onto_occupied_lane() {
        assert_eq!(pick_obstacle_lane(Lane::Left, [0, 1]), Lane::Right);
        assert_eq!(pick_obstacle_lane(Lane::Right, [2, 0]), Lane::Left);
        assert_eq!(pick_obstacle_lane(Lane::Left, [3, 0]), Lane::Left);
    }

    #[test]
    fn test_lane_never_blocks_both() {
        for random in Lane::ALL {
            for busy in 0..4 {
                for counts in [[busy, 0], [0, busy]] {
                    let lane = pick_obstacle_lane(random, counts);
                    let mut after = counts;
                    after[lane.index()] += 1;
                    assert!(after.contains(&0), "{random:?} {counts:?} -> {lane:?}");
                }
            }
        }
    }

    #[test]
    fn test_lane_both_occupied_prefers_emptier() {
        assert_eq!(pick_obstacle_lane(Lane::Left, [2, 1]), Lane::Right);
        assert_eq!(pick_obstacle_lane(Lane::Right, [1, 1]), Lane::Right);
    }

    #[test]
    fn test_coin_lane_prefers_emptier() {
        assert_eq!(pick_coin_lane(Lane::Left, [1, 0]), Lane::Right);
        assert_eq!(pick_coin_lane(Lane::Left, [0, 0]), Lane::Left);
    }

    #[test]
    fn test_coin_gate() {
        // Initial delay
        assert!(!should_spawn_coin(0.0, 0.0, COIN_INITIAL_DELAY_MS - 1.0, f64::NEG_INFINITY));
        assert!(should_spawn_coin(0.0, 0.0, COIN_INITIAL_DELAY_MS, f64::NEG_INFINITY));

        // Regular interval
        let last = 10_000.0;
        let half = COIN_SPAWN_INTERVAL_MS / 2.0;
        assert!(!should_spawn_coin(0.0, last, last + half, f64::NEG_INFINITY));
        // Multiplier halves it
        assert!(should_spawn_coin(0.0, last, last + half, last + 5_000.0));
        // Window closed again
        assert!(!should_spawn_coin(0.0, last, last + half, last + 1.0));
    }

    #[test]
    fn test_spawned_obstacle_is_fresh() {
        let mut state = RunState::new(390.0, 844.0, 5, 0.0);
        let id = spawn_obstacle(&mut state, Lane::Right);
        let o = &state.obstacles[0];
        assert_eq!(o.id, id);
        assert_eq!(o.lane, Lane::Right);
        assert_eq!(o.y, -OBSTACLE_HEIGHT);
        assert!(o.min_distance_while_above.is_none());
        assert!(!o.near_miss_awarded);

        let coin_id = spawn_coin(&mut state, Lane::Left);
        assert_ne!(coin_id, id);
    }
}
