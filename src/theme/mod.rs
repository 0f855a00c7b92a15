//! Theme model
//!
//! A theme bundles the cosmetic and tuning parameters for a run. Themes are
//! immutable once produced and replaced wholesale; a response that fails any
//! structural check is rejected in favor of [`Theme::default`].

pub mod color;
pub mod generator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use color::{Color, ColorParseError};
pub use generator::{ThemeOutcome, ThemeSource, compose_prompt, generate_theme};

/// Obstacle geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Box,
    Sphere,
    Cylinder,
    Dodecahedron,
}

impl ShapeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Box => "box",
            ShapeType::Sphere => "sphere",
            ShapeType::Cylinder => "cylinder",
            ShapeType::Dodecahedron => "dodecahedron",
        }
    }
}

/// Palette for every themed surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Sky/background
    pub background: Color,
    /// Floor plane
    pub ground: Color,
    pub player: Color,
    pub obstacle: Color,
    /// Distance fog (usually matches background)
    pub fog: Color,
    /// Primary light
    pub sun: Color,
}

/// Visual/gameplay parameters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
    pub shape_type: ShapeType,
    /// Expected 0.01 - 0.15
    pub fog_density: f32,
    /// Expected 0.5 - 3.0
    pub lighting_intensity: f32,
    /// Expected 0.8 - 1.5; scales starting speed and spawn density
    pub speed_modifier: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Neon Default".to_string(),
            description: "A classic retro-wave aesthetic.".to_string(),
            colors: ThemeColors {
                background: Color::rgb(0x10, 0x10, 0x10),
                ground: Color::rgb(0x1a, 0x1a, 0x1a),
                player: Color::rgb(0x00, 0xff, 0xff),
                obstacle: Color::rgb(0xff, 0x00, 0x55),
                fog: Color::rgb(0x10, 0x10, 0x10),
                sun: Color::rgb(0xff, 0x00, 0xff),
            },
            shape_type: ShapeType::Box,
            fog_density: 0.05,
            lighting_intensity: 1.5,
            speed_modifier: 1.0,
        }
    }
}

/// Why a theme could not be produced
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("no API key configured")]
    MissingCredentials,
    #[error("theme request failed: {0}")]
    Transport(String),
    #[error("empty response from theme service")]
    EmptyResponse,
    #[error("malformed theme: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("theme field {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

impl ThemeError {
    /// Short message suitable for the UI
    pub fn notice(&self) -> &'static str {
        match self {
            ThemeError::EmptyPrompt => "Describe a theme first.",
            ThemeError::MissingCredentials => "Failed to generate theme. Check API Key.",
            ThemeError::Transport(_) => "Theme service unreachable. Using default theme.",
            ThemeError::EmptyResponse
            | ThemeError::Malformed(_)
            | ThemeError::OutOfRange { .. } => "Theme service returned an unusable theme. Using default theme.",
        }
    }
}

impl Theme {
    /// Parse and validate a theme document. Partial or invalid documents are
    /// rejected as a whole.
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        if json.trim().is_empty() {
            return Err(ThemeError::EmptyResponse);
        }
        let theme: Theme = serde_json::from_str(json)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Check numeric fields beyond what the schema enforces
    pub fn validate(&self) -> Result<(), ThemeError> {
        let positive = [
            ("fogDensity", self.fog_density),
            ("speedModifier", self.speed_modifier),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ThemeError::OutOfRange { field, value });
            }
        }
        if !self.lighting_intensity.is_finite() || self.lighting_intensity < 0.0 {
            return Err(ThemeError::OutOfRange {
                field: "lightingIntensity",
                value: self.lighting_intensity,
            });
        }
        Ok(())
    }
}
