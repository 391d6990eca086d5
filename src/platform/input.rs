//! Input mapping
//!
//! The host pushes raw key names and pointer positions; the queue holds the
//! resulting lane intents until the next frame drains them.

pub use crate::sim::tick::Intent;

/// Lane intents collected between frames.
/// JS writes into the queue; Rust drains it once per frame.
#[derive(Debug, Clone, Default)]
pub struct IntentQueue {
    intents: Vec<Intent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self {
            intents: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Map a `KeyboardEvent.key` value; returns whether it was a game key
    pub fn push_key(&mut self, key: &str) -> bool {
        match intent_for_key(key) {
            Some(intent) => {
                self.push(intent);
                true
            }
            None => false,
        }
    }

    /// Drain all pending intents in arrival order
    pub fn drain(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }
}

/// Arrow keys, WASD and vi keys
pub fn intent_for_key(key: &str) -> Option<Intent> {
    match key {
        "ArrowUp" | "w" | "W" | "k" | "K" => Some(Intent::Up),
        "ArrowDown" | "s" | "S" | "j" | "J" => Some(Intent::Down),
        _ => None,
    }
}

/// A tap above the player moves up, below moves down, on the player nothing
pub fn intent_for_pointer(pointer_y: f32, player_y: f32) -> Option<Intent> {
    if !pointer_y.is_finite() {
        return None;
    }
    if pointer_y < player_y {
        Some(Intent::Up)
    } else if pointer_y > player_y {
        Some(Intent::Down)
    } else {
        None
    }
}
