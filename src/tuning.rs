//! Data-driven game balance
//!
//! Every constant the game loop reads lives here so a run can be re-tuned
//! without a rebuild. Persisted as JSON; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::KeyValueStore;

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Track layout ===
    pub lane_width: f32,
    pub spawn_z: f32,
    pub player_z: f32,
    pub cull_z: f32,

    // === Speed ===
    pub base_speed: f32,
    pub accel_rate: f32,
    pub time_scale: f32,

    // === Collision ===
    pub collision_half_width: f32,

    // === Spawning ===
    pub spawn_base_rate: f32,
    pub min_spawn_spacing: f32,

    // === Scoring ===
    pub score_scale: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            spawn_z: OBSTACLE_SPAWN_Z,
            player_z: PLAYER_Z,
            cull_z: CULL_Z,

            base_speed: BASE_SPEED,
            accel_rate: ACCEL_RATE,
            time_scale: TIME_SCALE,

            collision_half_width: COLLISION_HALF_WIDTH,

            spawn_base_rate: SPAWN_BASE_RATE,
            min_spawn_spacing: MIN_SPAWN_SPACING,

            score_scale: SCORE_SCALE,
        }
    }
}

impl Tuning {
    /// Storage key for overrides
    pub const STORAGE_KEY: &'static str = "neonflow_tuning";

    /// Parse tuning from JSON (partial documents are filled with defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning overrides, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Persist the current tuning
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.set(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
            Err(e) => log::warn!("Failed to serialize tuning: {e}"),
        }
    }

    /// Speed at the start of a run for a given theme modifier
    pub fn starting_speed(&self, speed_modifier: f32) -> f32 {
        self.base_speed * speed_modifier
    }

    /// Per-frame spawn probability for a given theme modifier
    pub fn spawn_chance(&self, speed_modifier: f32) -> f32 {
        self.spawn_base_rate * speed_modifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "lane_width": 3.0 }"#).unwrap();
        assert_eq!(tuning.lane_width, 3.0);
        assert_eq!(tuning.spawn_z, OBSTACLE_SPAWN_Z);
        assert_eq!(tuning.score_scale, SCORE_SCALE);
    }

    #[test]
    fn test_malformed_storage_falls_back() {
        let mut store = MemoryStore::new();
        store.set(Tuning::STORAGE_KEY, "{ not json");
        assert_eq!(Tuning::load(&store), Tuning::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let tuning = Tuning {
            accel_rate: 0.02,
            ..Default::default()
        };
        tuning.save(&mut store);
        assert_eq!(Tuning::load(&store).accel_rate, 0.02);
    }

    #[test]
    fn test_theme_modifier_scaling() {
        let tuning = Tuning::default();
        assert!((tuning.starting_speed(1.5) - 0.6).abs() < 1e-6);
        assert!((tuning.spawn_chance(0.8) - 0.04).abs() < 1e-6);
    }
}
