//! Best score
//!
//! A single scalar persisted under its own key. Storage failures are logged
//! and otherwise ignored; the game just forgets the record.

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, load_json, save_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    pub const STORAGE_KEY: &'static str = "street_sweeper_best";

    pub fn new(score: u64) -> Self {
        Self { score }
    }

    /// A run only beats the record strictly
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Take `score` if it is a new record. Returns whether it was.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.score = score;
        true
    }

    /// Load from the store; missing, unreadable or corrupt → 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json::<BestScore>(store, Self::STORAGE_KEY) {
            Ok(Some(best)) => {
                log::info!("Loaded best score {}", best.score);
                best
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Best score unavailable: {e}");
                Self::default()
            }
        }
    }

    /// Write to the store; failures are logged only
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Best score saved ({})", self.score),
            Err(e) => log::warn!("Best score not saved: {e}"),
        }
    }
}
