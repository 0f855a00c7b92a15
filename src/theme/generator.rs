//! Theme generation with fallback
//!
//! The generative service is an opaque async boundary ([`ThemeSource`]) that
//! turns a prompt into JSON text. [`generate_theme`] validates the response and
//! never fails: any error yields the default theme plus a notice for the UI.

use super::{Theme, ThemeError};

/// Instructions sent alongside the player's concept
const ART_DIRECTION: &str = "You are a creative art director for video games. \
You excel at creating cohesive color palettes and atmospheres.";

/// Something that can turn a prompt into a theme document
#[allow(async_fn_in_trait)]
pub trait ThemeSource {
    /// Request a theme; returns the raw JSON body
    async fn request(&self, prompt: &str) -> Result<String, ThemeError>;
}

/// Result of a generation attempt. Always carries a usable theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeOutcome {
    pub theme: Theme,
    /// User-facing message when the default was substituted
    pub notice: Option<String>,
}

impl ThemeOutcome {
    pub fn generated(theme: Theme) -> Self {
        Self {
            theme,
            notice: None,
        }
    }

    pub fn fallback(error: &ThemeError) -> Self {
        Self {
            theme: Theme::default(),
            notice: Some(error.notice().to_string()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.notice.is_some()
    }
}

/// Full brief for the service, built from the player's concept
pub fn compose_prompt(concept: &str) -> String {
    format!(
        "{ART_DIRECTION}\n\
         Generate a visual theme for a 3D endless runner game based on the concept: \"{}\".\n\
         Make sure the colors have good contrast so the player is visible against the ground and obstacles.\n\
         The 'fog' color should generally match the 'background' color to create a seamless horizon.\n\
         Respond with JSON only: name, description, colors (background, ground, player, obstacle, fog, sun as hex), \
         shapeType (box|sphere|cylinder|dodecahedron), fogDensity (0.01-0.15), \
         lightingIntensity (0.5-3.0), speedModifier (0.8-1.5).",
        concept.trim()
    )
}

async fn try_generate(source: &impl ThemeSource, prompt: &str) -> Result<Theme, ThemeError> {
    if prompt.trim().is_empty() {
        return Err(ThemeError::EmptyPrompt);
    }
    let body = source.request(&compose_prompt(prompt)).await?;
    Theme::from_json(&body)
}

/// Generate a theme for `prompt`, substituting the default on any failure
pub async fn generate_theme(source: &impl ThemeSource, prompt: &str) -> ThemeOutcome {
    match try_generate(source, prompt).await {
        Ok(theme) => {
            log::info!("Generated theme {:?}", theme.name);
            ThemeOutcome::generated(theme)
        }
        Err(e @ (ThemeError::EmptyPrompt | ThemeError::MissingCredentials)) => {
            log::warn!("{e}, returning default theme");
            ThemeOutcome::fallback(&e)
        }
        Err(e) => {
            log::error!("Failed to generate theme: {e}");
            ThemeOutcome::fallback(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ShapeType;
    use std::cell::RefCell;

    /// Replays a canned response and remembers the prompt it saw
    struct Canned {
        response: Result<&'static str, fn() -> ThemeError>,
        seen: RefCell<Option<String>>,
    }

    impl Canned {
        fn ok(body: &'static str) -> Self {
            Self {
                response: Ok(body),
                seen: RefCell::new(None),
            }
        }

        fn err(make: fn() -> ThemeError) -> Self {
            Self {
                response: Err(make),
                seen: RefCell::new(None),
            }
        }
    }

    impl ThemeSource for Canned {
        async fn request(&self, prompt: &str) -> Result<String, ThemeError> {
            *self.seen.borrow_mut() = Some(prompt.to_string());
            match self.response {
                Ok(body) => Ok(body.to_string()),
                Err(make) => Err(make()),
            }
        }
    }

    const SPHERES: &str = r##"{
        "name": "Bubblegum",
        "description": "Soft pastel spheres.",
        "colors": {
            "background": "#ffd1dc", "ground": "#ffe4e1", "player": "#4b0082",
            "obstacle": "#ff69b4", "fog": "#ffd1dc", "sun": "#ffffff"
        },
        "shapeType": "sphere",
        "fogDensity": 0.02,
        "lightingIntensity": 1.0,
        "speedModifier": 0.9
    }"##;

    #[test]
    fn test_success_passes_theme_through() {
        let source = Canned::ok(SPHERES);
        let outcome = pollster::block_on(generate_theme(&source, "candy land"));
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.theme.name, "Bubblegum");
        assert_eq!(outcome.theme.shape_type, ShapeType::Sphere);

        let seen = source.seen.borrow().clone().unwrap();
        assert!(seen.contains("\"candy land\""));
    }

    #[test]
    fn test_network_error_yields_default() {
        let source = Canned::err(|| ThemeError::Transport("connection reset".into()));
        let outcome = pollster::block_on(generate_theme(&source, "volcano"));
        assert_eq!(outcome.theme, Theme::default());
        assert!(!outcome.notice.unwrap().is_empty());
    }

    #[test]
    fn test_missing_key_yields_default() {
        let source = Canned::err(|| ThemeError::MissingCredentials);
        let outcome = pollster::block_on(generate_theme(&source, "volcano"));
        assert_eq!(outcome.theme, Theme::default());
        assert_eq!(
            outcome.notice.as_deref(),
            Some("Failed to generate theme. Check API Key.")
        );
    }

    #[test]
    fn test_partial_response_never_merges() {
        let source = Canned::ok(r##"{ "name": "Half", "colors": { "background": "#000" } }"##);
        let outcome = pollster::block_on(generate_theme(&source, "half done"));
        assert_eq!(outcome.theme, Theme::default());
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_empty_body_yields_default() {
        let source = Canned::ok("");
        let outcome = pollster::block_on(generate_theme(&source, "nothing"));
        assert_eq!(outcome.theme, Theme::default());
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_blank_prompt_not_sent() {
        let source = Canned::ok(SPHERES);
        let outcome = pollster::block_on(generate_theme(&source, "   "));
        assert!(outcome.is_fallback());
        assert!(source.seen.borrow().is_none());
    }
}
