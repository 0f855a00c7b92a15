//! Game loop simulation
//!
//! All gameplay logic lives here. The module stays free of rendering and
//! platform dependencies:
//! - Frame-rate independent (`dt` scaled)
//! - Seeded RNG only
//! - Obstacles iterated in spawn order

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{in_collision_window, obstacle_hits};
pub use state::{GamePhase, GameState, Lane, LaneShift, Obstacle, RunState};
pub use tick::{TickEvents, TickInput, tick};
