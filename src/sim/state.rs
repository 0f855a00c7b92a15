//! Game state and core simulation types
//!
//! Everything a run needs lives here; the phase machine sits next to it so a
//! reset and the transition into `Playing` happen in one call.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, prompt entry
    #[default]
    Menu,
    /// Waiting on the theme service (menu stays interactive)
    Generating,
    /// Active run
    Playing,
    /// Run ended by a collision
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Generating => "generating",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// One of the three discrete player positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

/// Direction of a single lane change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneShift {
    Left,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Signed index: -1, 0, 1
    pub fn index(self) -> i8 {
        match self {
            Lane::Left => -1,
            Lane::Center => 0,
            Lane::Right => 1,
        }
    }

    /// Lane for a signed index, clamping anything outside [-1, 1]
    pub fn from_index(index: i32) -> Self {
        match index.clamp(-1, 1) {
            -1 => Lane::Left,
            0 => Lane::Center,
            _ => Lane::Right,
        }
    }

    /// Move one step, staying put at the edges
    pub fn shifted(self, shift: LaneShift) -> Self {
        let step = match shift {
            LaneShift::Left => -1,
            LaneShift::Right => 1,
        };
        Self::from_index(self.index() as i32 + step)
    }

    /// Horizontal world offset of the lane center
    pub fn offset(self, lane_width: f32) -> f32 {
        self.index() as f32 * lane_width
    }
}

/// An obstacle moving toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u64,
    pub lane: Lane,
    /// Lane offset, fixed at spawn
    pub x: f32,
    /// Forward position; grows toward the player
    pub z: f32,
}

impl Obstacle {
    /// World position for renderers (obstacles sit half a unit above the floor)
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.x, 0.5, self.z)
    }
}

/// Per-run simulation state, reset at the start of every run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    pub lane: Lane,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Continuous score accumulator
    pub score: f64,
    pub speed: f32,
}

impl RunState {
    /// Fresh run for a theme
    pub fn new(theme: &Theme, tuning: &Tuning) -> Self {
        Self {
            lane: Lane::Center,
            obstacles: Vec::new(),
            score: 0.0,
            speed: tuning.starting_speed(theme.speed_modifier),
        }
    }

    /// Integer score shown to the player
    pub fn display_score(&self, tuning: &Tuning) -> u64 {
        (self.score * tuning.score_scale).floor() as u64
    }

    /// Farthest obstacle z (smallest), or 0 when the track is empty
    pub fn farthest_z(&self) -> f32 {
        self.obstacles
            .iter()
            .map(|o| o.z)
            .reduce(f32::min)
            .unwrap_or(0.0)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the spawn RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub run: RunState,
    /// Next obstacle ID (never reset, so IDs stay unique across runs)
    next_id: u64,
}

impl GameState {
    /// Create a new game state in the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            run: RunState::default(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset the run and enter `Playing`
    pub fn start_run(&mut self, theme: &Theme, tuning: &Tuning) {
        self.run = RunState::new(theme, tuning);
        self.phase = GamePhase::Playing;
    }

    /// Apply one lane change. Ignored outside `Playing`.
    pub fn shift_lane(&mut self, shift: LaneShift) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.run.lane = self.run.lane.shifted(shift);
        true
    }

    /// Player x for the current lane
    pub fn player_x(&self, tuning: &Tuning) -> f32 {
        self.run.lane.offset(tuning.lane_width)
    }

    /// Push an obstacle at `z` in `lane`
    pub fn spawn_obstacle(&mut self, lane: Lane, z: f32, tuning: &Tuning) -> u64 {
        let id = self.next_entity_id();
        self.run.obstacles.push(Obstacle {
            id,
            lane,
            x: lane.offset(tuning.lane_width),
            z,
        });
        id
    }
}
