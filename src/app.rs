//! UI-facing controller
//!
//! Owns the game state, the active theme and the persisted high score. The UI
//! shell only requests transitions (start, generate) and reads display values;
//! the frame driver calls [`App::frame`] once per refresh.

use crate::consts::MAX_FRAME_DT;
use crate::highscores::HighScore;
use crate::input::lane_shift_for_key;
use crate::persistence::KeyValueStore;
use crate::sim::{GamePhase, GameState, TickEvents, TickInput, tick};
use crate::theme::{Theme, ThemeOutcome};
use crate::tuning::Tuning;

pub struct App<S: KeyValueStore> {
    state: GameState,
    theme: Theme,
    tuning: Tuning,
    high_score: HighScore,
    store: S,
    /// A theme request is outstanding
    generating: bool,
    /// Last theme-generation message for the player
    notice: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    /// Load persisted data and open on the menu
    pub fn new(store: S, seed: u64) -> Self {
        let tuning = Tuning::load(&store);
        let high_score = HighScore::load(&store);
        Self {
            state: GameState::new(seed),
            theme: Theme::default(),
            tuning,
            high_score,
            store,
            generating: false,
            notice: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current run's displayed score
    pub fn score(&self) -> u64 {
        self.state.run.display_score(&self.tuning)
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Player x for renderers
    pub fn player_x(&self) -> f32 {
        self.state.player_x(&self.tuning)
    }

    /// Begin a fresh run with the current theme
    pub fn start_run(&mut self) {
        self.state.start_run(&self.theme, &self.tuning);
        log::info!(
            "Run started with theme {:?} (speed {:.2})",
            self.theme.name,
            self.state.run.speed
        );
    }

    /// Route a key press. Returns true if it moved the player.
    pub fn handle_key(&mut self, key: &str) -> bool {
        lane_shift_for_key(key).is_some_and(|shift| self.state.shift_lane(shift))
    }

    /// Step one display frame
    pub fn frame(&mut self, dt: f32) -> TickEvents {
        let dt = dt.max(0.0).min(MAX_FRAME_DT);
        let events = tick(
            &mut self.state,
            &TickInput::default(),
            &self.theme,
            &self.tuning,
            dt,
        );

        let score = self.score();
        self.high_score.record(score, &mut self.store);
        if events.crashed {
            log::info!("Game over at {score} (best {})", self.high_score.best());
        }
        events
    }

    /// Claim the theme slot for a new request.
    /// Returns the trimmed prompt, or None if it is blank or a request is
    /// already outstanding.
    pub fn begin_generation(&mut self, prompt: &str) -> Option<String> {
        if self.generating {
            log::debug!("Theme request already in flight, ignoring");
            return None;
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }

        self.generating = true;
        self.notice = None;
        if matches!(self.state.phase, GamePhase::Menu | GamePhase::GameOver) {
            self.state.phase = GamePhase::Generating;
        }
        Some(prompt.to_string())
    }

    /// Apply a finished request. The theme is swapped in one assignment; a
    /// run already in progress keeps its starting speed.
    pub fn finish_generation(&mut self, outcome: ThemeOutcome) {
        self.generating = false;
        self.theme = outcome.theme;
        self.notice = outcome.notice;
        if self.state.phase == GamePhase::Generating {
            self.state.phase = GamePhase::Menu;
        }
        log::info!("Theme applied: {:?}", self.theme.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::Lane;
    use crate::theme::ThemeError;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_app() -> App<MemoryStore> {
        let mut store = MemoryStore::new();
        Tuning {
            spawn_base_rate: 0.0,
            ..Default::default()
        }
        .save(&mut store);
        App::new(store, 7)
    }

    #[test]
    fn test_keys_ignored_until_playing() {
        let mut app = quiet_app();
        assert!(!app.handle_key("ArrowLeft"));
        app.start_run();
        assert!(app.handle_key("ArrowLeft"));
        assert!(!app.handle_key("q"));
        assert_eq!(app.state().run.lane, Lane::Left);
    }

    #[test]
    fn test_high_score_tracks_run() {
        let mut app = quiet_app();
        app.start_run();
        for _ in 0..30 {
            app.frame(DT);
        }
        assert!(app.score() > 0);
        assert_eq!(app.high_score(), app.score());
        assert_eq!(
            app.store().get(HighScore::STORAGE_KEY),
            Some(app.score().to_string())
        );
    }

    #[test]
    fn test_lower_run_keeps_high_score() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "500");
        Tuning {
            spawn_base_rate: 0.0,
            ..Default::default()
        }
        .save(&mut store);
        let mut app = App::new(store, 7);
        assert_eq!(app.high_score(), 500);

        app.start_run();
        for _ in 0..10 {
            app.frame(DT);
        }
        assert!(app.score() < 500);
        assert_eq!(app.high_score(), 500);
        assert_eq!(app.store().get(HighScore::STORAGE_KEY).as_deref(), Some("500"));
    }

    #[test]
    fn test_crash_ends_run() {
        let mut app = quiet_app();
        app.start_run();
        let tuning = app.tuning().clone();
        app.state.spawn_obstacle(Lane::Center, -0.3, &tuning);

        assert!(app.frame(DT).crashed);
        assert_eq!(app.phase(), GamePhase::GameOver);
        let final_score = app.score();
        assert!(!app.frame(DT).crashed);
        assert_eq!(app.score(), final_score);
    }

    #[test]
    fn test_huge_frame_is_clamped() {
        let mut app = quiet_app();
        app.start_run();
        app.frame(5.0);
        let expected = app.tuning().base_speed + MAX_FRAME_DT * app.tuning().accel_rate;
        assert!((app.state().run.speed - expected).abs() < 1e-6);
    }

    #[test]
    fn test_generation_suppresses_duplicates() {
        let mut app = quiet_app();
        assert_eq!(app.begin_generation("  lava  ").as_deref(), Some("lava"));
        assert_eq!(app.phase(), GamePhase::Generating);
        assert!(app.begin_generation("ice").is_none());

        app.finish_generation(ThemeOutcome::fallback(&ThemeError::EmptyResponse));
        assert!(!app.is_generating());
        assert_eq!(app.phase(), GamePhase::Menu);
        assert!(app.notice().is_some());
        assert_eq!(app.theme(), &Theme::default());
        assert!(app.begin_generation("ice").is_some());
    }

    #[test]
    fn test_blank_prompt_not_started() {
        let mut app = quiet_app();
        assert!(app.begin_generation("   ").is_none());
        assert!(!app.is_generating());
        assert_eq!(app.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_late_theme_applies_during_run() {
        let mut app = quiet_app();
        app.begin_generation("storm");
        app.start_run();
        let speed = app.state().run.speed;

        let theme = Theme {
            name: "Storm".into(),
            speed_modifier: 1.4,
            ..Default::default()
        };
        app.finish_generation(ThemeOutcome::generated(theme));
        assert_eq!(app.phase(), GamePhase::Playing);
        assert_eq!(app.theme().name, "Storm");
        assert_eq!(app.state().run.speed, speed);
        assert_eq!(app.notice(), None);
    }
}
