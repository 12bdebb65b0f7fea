//! Player vs obstacle/coin overlap tests
//!
//! Strict overlap only: a player whose circle exactly touches a rectangle is
//! neither hit nor collecting.

use glam::Vec2;

use super::geometry::circle_rect_overlap;
use super::state::{Coin, Obstacle, Player};

/// Whether the player (centred at `player_center_x`) hits `obstacle`
#[inline]
pub fn collides(player: &Player, player_center_x: f32, obstacle: &Obstacle) -> bool {
    let center = Vec2::new(player_center_x, player.center_y);
    circle_rect_overlap(center, player.radius, &obstacle.rect())
}

/// Whether the player picks up `coin`
#[inline]
pub fn collects_coin(player: &Player, player_center_x: f32, coin: &Coin) -> bool {
    let center = Vec2::new(player_center_x, player.center_y);
    circle_rect_overlap(center, player.radius, &coin.rect())
}

/// First obstacle the player overlaps, in collection order
pub fn first_collision(
    player: &Player,
    player_center_x: f32,
    obstacles: &[Obstacle],
) -> Option<u32> {
    obstacles
        .iter()
        .find(|o| collides(player, player_center_x, o))
        .map(|o| o.id)
}
