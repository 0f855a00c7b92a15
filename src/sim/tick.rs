//! Per-frame simulation step
//!
//! Advances a run by a variable `dt` (seconds). Movement is scaled by `dt` so
//! the game plays the same across frame rates.

use rand::Rng;

use super::collision::obstacle_hits;
use super::state::{GamePhase, GameState, Lane, LaneShift};
use crate::theme::Theme;
use crate::tuning::Tuning;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Lane change requested this frame
    pub shift: Option<LaneShift>,
}

/// What happened during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Player hit an obstacle; the phase is now `GameOver`
    pub crashed: bool,
    /// ID of the obstacle spawned this frame
    pub spawned: Option<u64>,
    /// Obstacles that left play this frame
    pub culled: usize,
}

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    theme: &Theme,
    tuning: &Tuning,
    dt: f32,
) -> TickEvents {
    // Only a live run is stepped; a crash stops further signals
    if state.phase != GamePhase::Playing {
        return TickEvents::default();
    }

    if let Some(shift) = input.shift {
        state.shift_lane(shift);
    }

    // Accelerate slowly
    state.run.speed += dt * tuning.accel_rate;
    let speed = state.run.speed;
    let advance = speed * tuning.time_scale * dt;

    // Move, collide, cull
    let player_x = state.player_x(tuning);
    let before = state.run.obstacles.len();
    let mut crashed = false;
    state.run.obstacles.retain_mut(|obstacle| {
        obstacle.z += advance;
        if obstacle_hits(obstacle, obstacle.z, player_x, tuning) {
            crashed = true;
        }
        obstacle.z < tuning.cull_z
    });
    let culled = before - state.run.obstacles.len();

    let spawned = try_spawn(state, theme, tuning);

    state.run.score += speed as f64;

    if crashed {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Crashed at score {} (speed {:.3})",
            state.run.display_score(tuning),
            speed
        );
    }

    TickEvents {
        crashed,
        spawned,
        culled,
    }
}

/// Roll for a new obstacle at the spawn distance.
/// Skipped when the farthest obstacle is still too close to the spawn point.
fn try_spawn(state: &mut GameState, theme: &Theme, tuning: &Tuning) -> Option<u64> {
    let roll: f32 = state.rng.random();
    if roll >= tuning.spawn_chance(theme.speed_modifier) {
        return None;
    }

    if state.run.farthest_z() <= tuning.spawn_z + tuning.min_spawn_spacing {
        return None;
    }

    let lane = Lane::ALL[state.rng.random_range(0..Lane::ALL.len())];
    let id = state.spawn_obstacle(lane, tuning.spawn_z, tuning);
    log::trace!("Spawned obstacle {id} in {lane:?}");
    Some(id)
}
