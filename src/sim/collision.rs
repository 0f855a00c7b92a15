//! Lane collision test
//!
//! The player occupies a fixed z. An obstacle collides when it is inside the
//! z window around the player and sits in the player's lane. Lane offsets are
//! both derived from [`Lane::offset`], so equality is exact.

use super::state::Obstacle;
use crate::tuning::Tuning;

/// True if `z` is strictly inside the collision window
#[inline]
pub fn in_collision_window(z: f32, tuning: &Tuning) -> bool {
    (z - tuning.player_z).abs() < tuning.collision_half_width
}

/// True if an obstacle at `z` hits a player at `player_x`
#[allow(clippy::float_cmp)]
pub fn obstacle_hits(obstacle: &Obstacle, z: f32, player_x: f32, tuning: &Tuning) -> bool {
    in_collision_window(z, tuning) && obstacle.x == player_x
}
