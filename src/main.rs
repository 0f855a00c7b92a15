//! Neon Flow entry point
//!
//! The web build is driven from JS through `neon_flow::web`. Natively this
//! runs a headless autopilot run, handy for checking balance changes:
//!
//! ```text
//! neon-flow [seed] [theme.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_flow::persistence::MemoryStore;
    use neon_flow::sim::GamePhase;
    use neon_flow::theme::{Theme, ThemeOutcome};
    use neon_flow::App;

    env_logger::init();
    log::info!("Neon Flow (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345_u64);

    let mut app = App::new(MemoryStore::new(), seed);

    if let Some(path) = args.next() {
        let outcome = match std::fs::read_to_string(&path)
            .map_err(|e| log::warn!("Cannot read {path}: {e}"))
            .and_then(|json| Theme::from_json(&json).map_err(|e| log::warn!("{path}: {e}")))
        {
            Ok(theme) => ThemeOutcome::generated(theme),
            Err(()) => ThemeOutcome {
                theme: Theme::default(),
                notice: Some("Theme file unusable, using default theme.".to_string()),
            },
        };
        app.finish_generation(outcome);
    }

    const DT: f32 = 1.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    app.start_run();
    let mut frames = 0;
    while app.phase() == GamePhase::Playing && frames < MAX_FRAMES {
        autopilot(&mut app);
        app.frame(DT);
        frames += 1;
    }

    println!(
        "theme: {}\nseed: {seed}\nframes: {frames}\nscore: {}\ncrashed: {}",
        app.theme().name,
        app.score(),
        app.phase() == GamePhase::GameOver
    );
}

/// Dodge into the lane whose nearest incoming obstacle is farthest away
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(app: &mut neon_flow::App<neon_flow::persistence::MemoryStore>) {
    use neon_flow::sim::Lane;

    let tuning = app.tuning();
    let run = &app.state().run;
    let threat = |lane: Lane| {
        run.obstacles
            .iter()
            .filter(|o| o.lane == lane && o.z < tuning.player_z + tuning.collision_half_width)
            .map(|o| tuning.player_z - o.z)
            .fold(f32::INFINITY, f32::min)
    };

    let current = run.lane;
    if threat(current) > 8.0 {
        return;
    }
    let key = match current {
        Lane::Left => "ArrowRight",
        Lane::Right => "ArrowLeft",
        Lane::Center if threat(Lane::Left) >= threat(Lane::Right) => "ArrowLeft",
        Lane::Center => "ArrowRight",
    };
    app.handle_key(key);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is neon_flow::web::init, this is just to satisfy the compiler
}
