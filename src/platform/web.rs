//! Browser binding
//!
//! Exposes the engine to a page script. The page owns the canvas, the DOM
//! controls and `requestAnimationFrame`; it forwards key events and frame
//! timestamps (milliseconds, `performance.now()`) and draws the returned
//! snapshot JSON.

use wasm_bindgen::prelude::*;

use super::fps::FpsCounter;
use crate::settings::Settings;
use crate::sim::{Bounds, Category, Engine, Key, TickInput};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) only fails because a logger exists already
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pulse Field wasm module loaded");
}

/// Engine handle held by the page
#[wasm_bindgen]
pub struct WebSimulation {
    engine: Engine,
    input: TickInput,
    fps: FpsCounter,
}

#[wasm_bindgen]
impl WebSimulation {
    /// Create with default settings, or from a settings JSON string
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f32,
        height: f32,
        seed: u64,
        settings_json: Option<String>,
    ) -> Result<WebSimulation, JsValue> {
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Settings::default(),
        };
        Ok(Self {
            engine: Engine::new(settings, Bounds::new(width, height), seed),
            input: TickInput::default(),
            fps: FpsCounter::default(),
        })
    }

    /// `KeyboardEvent.key` went down; returns whether it was a movement key
    pub fn key_down(&mut self, name: &str) -> bool {
        match Key::from_key_name(name) {
            Some(key) => {
                self.input.set_key(key, true);
                self.input.presses += 1;
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_key_name(name) {
            self.input.set_key(key, false);
        }
    }

    /// Advance one frame; returns the render snapshot as JSON
    pub fn step(&mut self, now_ms: f64) -> Result<String, JsValue> {
        let now = now_ms / 1000.0;
        self.fps.frame(now);
        let snapshot = self.engine.step(now, &self.input);
        self.input.presses = 0;
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Set a category's particle count by name; false for unknown names
    pub fn set_count(&mut self, category: &str, count: u32) -> bool {
        match Category::from_str(category) {
            Some(category) => {
                self.engine.set_category_count(category, count);
                true
            }
            None => false,
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.engine.toggle_pause();
        self.engine.is_paused()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.input = TickInput::default();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.resize(Bounds::new(width, height));
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Elapsed time label (`m:ss`)
    pub fn elapsed_label(&self) -> String {
        self.engine.counters().elapsed_label()
    }
}
