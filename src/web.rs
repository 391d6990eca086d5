//! Browser entry points
//!
//! `WebGame` is the whole surface a JS renderer needs: feed it timestamps and
//! input, read back JSON snapshots. Drawing stays on the JS side.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

use crate::platform::storage::LocalStorage;
use crate::session::Session;
use crate::sim::{Difficulty, Intent, Language, Viewport};

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Serialization failed: {e}");
        String::new()
    })
}

/// Split a textarea's contents into words (one per line or comma separated)
fn split_words(text: &str) -> Vec<&str> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect()
}

#[wasm_bindgen]
pub struct WebGame {
    session: Rc<RefCell<Session<LocalStorage>>>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(LocalStorage::open(), seed, Viewport::new(width, height));
        WebGame {
            session: Rc::new(RefCell::new(session)),
        }
    }

    pub fn start(&mut self) -> bool {
        self.session.borrow_mut().start_run()
    }

    #[wasm_bindgen(js_name = backToStart)]
    pub fn back_to_start(&mut self) {
        self.session.borrow_mut().back_to_start();
    }

    /// Advance to a `requestAnimationFrame` timestamp and return the snapshot
    pub fn frame(&mut self, timestamp: f64) -> String {
        let mut session = self.session.borrow_mut();
        session.frame(timestamp);
        to_json(&session.snapshot())
    }

    pub fn snapshot(&self) -> String {
        to_json(&self.session.borrow().snapshot())
    }

    pub fn summary(&self) -> String {
        to_json(&self.session.borrow().summary())
    }

    /// Game events since the last call, as a JSON array
    pub fn events(&mut self) -> String {
        to_json(&self.session.borrow_mut().drain_events())
    }

    #[wasm_bindgen(js_name = bestScore)]
    pub fn best_score(&self) -> f64 {
        self.session.borrow().best_score() as f64
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.borrow_mut().set_viewport(width, height);
    }

    /// Tab became visible again
    pub fn resume(&mut self) {
        self.session.borrow_mut().resume_clock();
    }

    #[wasm_bindgen(js_name = moveUp)]
    pub fn move_up(&mut self) {
        self.session.borrow_mut().push_intent(Intent::Up);
    }

    #[wasm_bindgen(js_name = moveDown)]
    pub fn move_down(&mut self) {
        self.session.borrow_mut().push_intent(Intent::Down);
    }

    pub fn key(&mut self, key: &str) -> bool {
        self.session.borrow_mut().push_key(key)
    }

    pub fn pointer(&mut self, y: f32) {
        self.session.borrow_mut().push_pointer(y);
    }

    #[wasm_bindgen(js_name = setWords)]
    pub fn set_words(&mut self, text: &str) {
        self.session.borrow_mut().set_word_list(&split_words(text));
    }

    #[wasm_bindgen(js_name = useDefaultWords)]
    pub fn use_default_words(&mut self) {
        self.session.borrow_mut().use_default_words();
    }

    #[wasm_bindgen(js_name = setDifficulty)]
    pub fn set_difficulty(&mut self, name: &str) -> bool {
        match Difficulty::from_name(name) {
            Some(difficulty) => {
                self.session.borrow_mut().set_difficulty(difficulty);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&mut self, code: &str) -> bool {
        match Language::from_code(code) {
            Some(language) => {
                self.session.borrow_mut().set_language(language);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen(js_name = setIdle)]
    pub fn set_idle(&mut self, idle: bool) {
        self.session.borrow_mut().set_idle_mode(idle);
    }

    /// Route keyboard input from the document and taps on `canvas_id` straight
    /// into the game. Returns false when the canvas can't be found.
    #[wasm_bindgen(js_name = bindInput)]
    pub fn bind_input(&self, canvas_id: &str) -> bool {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return false;
        };
        let Some(canvas) = document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No canvas #{canvas_id}, input not bound");
            return false;
        };

        // Keyboard
        {
            let session = self.session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if session.borrow_mut().push_key(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer, converted to canvas-local CSS pixels
        {
            let session = self.session.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let rect = target.get_bounding_client_rect();
                let y = event.client_y() as f64 - rect.top();
                session.borrow_mut().push_pointer(y as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        log::info!("Input bound to #{canvas_id}");
        true
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Street Sweeper starting...");
}
