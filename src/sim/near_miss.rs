//! Near-miss tracking
//!
//! While an obstacle's bottom edge is still above the player's centre we keep
//! the closest approach seen. The tick its bottom edge first drops below, the
//! obstacle is judged once: qualifying approaches earn a bonus, anything else
//! is reported as a clean pass without one.

use glam::Vec2;

use super::geometry::circle_rect_distance;
use super::state::Obstacle;
use crate::consts::NEAR_MISS_THRESHOLD;

/// Outcome of one near-miss pass over the obstacle collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearMissReport {
    /// Obstacles newly awarded a near-miss this tick, in collection order
    pub awarded: Vec<u32>,
    /// An observed obstacle passed below the player this tick without qualifying
    pub passed_without_near_miss: bool,
}

/// Update per-obstacle approach tracking and collect new awards
pub fn track_near_misses(player_center: Vec2, obstacles: &mut [Obstacle]) -> NearMissReport {
    let mut report = NearMissReport::default();

    for obstacle in obstacles.iter_mut() {
        if obstacle.bottom() <= player_center.y {
            let distance = circle_rect_distance(player_center, &obstacle.rect());
            obstacle.min_distance_while_above = Some(match obstacle.min_distance_while_above {
                Some(min) => min.min(distance),
                None => distance,
            });
            continue;
        }

        if obstacle.passed_player {
            continue;
        }
        obstacle.passed_player = true;

        let Some(min) = obstacle.min_distance_while_above else {
            // Never seen above the player
            continue;
        };

        if !obstacle.near_miss_awarded && min < NEAR_MISS_THRESHOLD {
            obstacle.near_miss_awarded = true;
            report.awarded.push(obstacle.id);
        } else if !obstacle.near_miss_awarded {
            report.passed_without_near_miss = true;
        }
    }

    report
}
