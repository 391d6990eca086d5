//! Game settings and preferences
//!
//! Persisted separately from the best score.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_json, save_json};
use crate::sim::{Difficulty, Language, WordList};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Default word list and UI language
    pub language: Language,
    /// User-edited words, raw as typed
    pub custom_words: Vec<String>,
    pub use_custom_words: bool,
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "street_sweeper_settings";

    /// The active word list. Unusable custom lists fall back to the
    /// language defaults.
    pub fn word_list(&self) -> WordList {
        if self.use_custom_words {
            WordList::from_raw(&self.custom_words, self.language)
        } else {
            WordList::defaults(self.language)
        }
    }

    /// Replace the custom list and switch to it
    pub fn set_custom_words<S: AsRef<str>>(&mut self, words: &[S]) {
        self.custom_words = words.iter().map(|w| w.as_ref().trim().to_string()).collect();
        self.use_custom_words = true;
    }

    /// Load settings; missing or corrupt → defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json::<Settings>(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        match save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {e}"),
        }
    }
}
