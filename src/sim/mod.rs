//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod lane;
pub mod progression;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod words;

pub use collision::Rect;
pub use lane::LaneLayout;
pub use snapshot::{RenderSnapshot, snapshot};
pub use state::{
    Difficulty, EndReason, FloatingText, GameEvent, GamePhase, GameState, Letter, Obstacle,
    ObstacleKind, Player, Viewport, WordPhase,
};
pub use tick::{Intent, TickInput, clamp_dt, tick};
pub use words::{Language, TargetWord, Word, WordList, WordQueue};
