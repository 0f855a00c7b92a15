//! Browser bindings
//!
//! Exposes the controller to a JS presentation layer. The page owns the
//! renderer and the `requestAnimationFrame` loop; it calls `frame(dt)` once per
//! refresh and reads back positions, score and theme. The theme request itself
//! is delegated to a host function `neonflow.requestTheme(prompt)`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::App;
use crate::persistence::LocalStore;
use crate::theme::{ThemeError, ThemeSource, generate_theme};

#[wasm_bindgen]
extern "C" {
    /// Resolves to the JSON body, or null/undefined when no API key is set
    #[wasm_bindgen(js_namespace = neonflow, js_name = requestTheme, catch)]
    async fn request_theme(prompt: &str) -> Result<JsValue, JsValue>;
}

/// Theme source backed by the host page
struct HostThemeSource;

impl ThemeSource for HostThemeSource {
    async fn request(&self, prompt: &str) -> Result<String, ThemeError> {
        let value = request_theme(prompt)
            .await
            .map_err(|e| ThemeError::Transport(describe(&e)))?;
        if value.is_null() || value.is_undefined() {
            return Err(ThemeError::MissingCredentials);
        }
        value.as_string().ok_or(ThemeError::EmptyResponse)
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Neon Flow starting...");
}

/// Handle held by the page
#[wasm_bindgen]
pub struct NeonFlow {
    app: Rc<RefCell<App<LocalStore>>>,
}

impl Default for NeonFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl NeonFlow {
    #[wasm_bindgen(constructor)]
    pub fn new() -> NeonFlow {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        NeonFlow {
            app: Rc::new(RefCell::new(App::new(LocalStore, seed))),
        }
    }

    /// Listen for lane keys on the window
    #[wasm_bindgen(js_name = bindKeyboard)]
    pub fn bind_keyboard(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let app = self.app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            app.borrow_mut().handle_key(&event.key());
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Reset and begin a run
    pub fn start(&self) {
        self.app.borrow_mut().start_run();
    }

    /// Route a key press (for pages that manage their own listeners)
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, key: &str) -> bool {
        self.app.borrow_mut().handle_key(key)
    }

    /// Step one frame; `dt` in seconds. Returns true on the crash frame.
    pub fn frame(&self, dt: f32) -> bool {
        self.app.borrow_mut().frame(dt).crashed
    }

    /// Request a theme for `prompt`. Returns false if the prompt is blank or
    /// a request is already running.
    pub fn generate(&self, prompt: &str) -> bool {
        let Some(prompt) = self.app.borrow_mut().begin_generation(prompt) else {
            return false;
        };
        let app = self.app.clone();
        spawn_local(async move {
            let outcome = generate_theme(&HostThemeSource, &prompt).await;
            app.borrow_mut().finish_generation(outcome);
        });
        true
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.app.borrow().phase().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.app.borrow().score() as f64
    }

    #[wasm_bindgen(getter, js_name = highScore)]
    pub fn high_score(&self) -> f64 {
        self.app.borrow().high_score() as f64
    }

    #[wasm_bindgen(getter, js_name = isGenerating)]
    pub fn is_generating(&self) -> bool {
        self.app.borrow().is_generating()
    }

    #[wasm_bindgen(getter)]
    pub fn notice(&self) -> Option<String> {
        self.app.borrow().notice().map(str::to_string)
    }

    #[wasm_bindgen(getter, js_name = playerX)]
    pub fn player_x(&self) -> f32 {
        self.app.borrow().player_x()
    }

    /// Obstacle positions as flat `[x0, z0, x1, z1, ...]`
    pub fn obstacles(&self) -> Vec<f32> {
        self.app
            .borrow()
            .state()
            .run
            .obstacles
            .iter()
            .flat_map(|o| [o.x, o.z])
            .collect()
    }

    /// Active theme as JSON (same schema the service returns)
    #[wasm_bindgen(js_name = themeJson)]
    pub fn theme_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.app.borrow().theme()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Theme colors in linear RGB: background, ground, player, obstacle, fog, sun
    #[wasm_bindgen(js_name = themeColors)]
    pub fn theme_colors(&self) -> Vec<f32> {
        let app = self.app.borrow();
        let c = &app.theme().colors;
        [c.background, c.ground, c.player, c.obstacle, c.fog, c.sun]
            .iter()
            .flat_map(|color| color.to_linear().to_array())
            .collect()
    }
}
