//! Neon Flow - A three-lane infinite runner with prompt-generated themes
//!
//! Core modules:
//! - `sim`: Per-frame simulation (lanes, obstacles, collisions, score)
//! - `theme`: Theme model, validation and generation fallback
//! - `app`: UI-facing controller driving phases, input and persistence
//! - `persistence`: Key-value storage (LocalStorage on web, memory on native)
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod sim;
pub mod theme;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::App;
pub use highscores::HighScore;
pub use theme::{Theme, ThemeOutcome};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Horizontal distance between lane centers
    pub const LANE_WIDTH: f32 = 2.5;
    /// Forward position where obstacles appear (negative = ahead of the player)
    pub const OBSTACLE_SPAWN_Z: f32 = -50.0;
    /// Player's fixed forward position
    pub const PLAYER_Z: f32 = 0.0;
    /// Obstacles at or past this z have left play (behind the camera)
    pub const CULL_Z: f32 = 10.0;

    /// Starting speed before the theme's speed modifier
    pub const BASE_SPEED: f32 = 0.4;
    /// Speed gained per second of play
    pub const ACCEL_RATE: f32 = 0.005;
    /// Converts speed into world units per second (tuned at 60 fps)
    pub const TIME_SCALE: f32 = 60.0;

    /// Half extent of the z window where lane equality is checked
    pub const COLLISION_HALF_WIDTH: f32 = 0.8;

    /// Per-frame spawn probability before the theme's speed modifier
    pub const SPAWN_BASE_RATE: f32 = 0.05;
    /// Farthest obstacle must be at least this far from the spawn point
    pub const MIN_SPAWN_SPACING: f32 = 10.0;

    /// Displayed score = floor(accumulator * SCORE_SCALE)
    pub const SCORE_SCALE: f64 = 10.0;

    /// Largest frame delta the driver forwards (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
