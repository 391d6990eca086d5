//! Street Sweeper - A lane-runner word game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, scoring, word progression)
//! - `platform`: Browser/native platform abstraction (clock, input, storage)
//! - `persistence`: Key-value storage for best score and word lists
//! - `tuning`: Data-driven game balance
//! - `session`: Run controller (START -> RUN -> OVER)

pub mod error;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ConfigError, StorageError};
pub use session::{RunSummary, Session};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Number of horizontal lanes
    pub const LANES: usize = 3;
    /// Default lane anchors as fractions of viewport height (lane 0 on top)
    pub const LANE_FRACTIONS: [f32; LANES] = [0.56, 0.71, 0.86];

    /// Upper bound on a single frame's delta time (seconds)
    pub const MAX_DT: f32 = 1.0;

    /// Round timer at the start of a run (seconds)
    pub const ROUND_TIME_START: f32 = 60.0;
    /// Lives at the start of a run
    pub const START_LIVES: u8 = 3;

    /// Score for a correct letter
    pub const SCORE_LETTER: u64 = 100;
    /// Bonus for finishing a word
    pub const SCORE_WORD: u64 = 500;
    /// Seconds lost on a wrong letter or obstacle hit
    pub const PENALTY_TIME: f32 = 2.0;

    /// Completed words per level (city)
    pub const WORDS_PER_LEVEL: u32 = 10;
    /// Longest accepted playable word
    pub const MAX_WORD_LEN: usize = 12;

    /// Viewport height the entity sizes below are authored for
    pub const REFERENCE_HEIGHT: f32 = 720.0;
    /// Player horizontal position as a fraction of viewport width
    pub const PLAYER_X_FRAC: f32 = 0.18;
    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Player hitbox is narrower than the sprite (broom sticks out)
    pub const PLAYER_HITBOX_WIDTH: f32 = 40.0;
    pub const PLAYER_HITBOX_HEIGHT: f32 = 64.0;
    /// Letter tile size (square hitbox)
    pub const LETTER_SIZE: f32 = 48.0;
    /// Letter glow makes the drawn tile wider than its hitbox
    pub const LETTER_VISUAL_WIDTH: f32 = 60.0;
    /// Obstacle hitbox
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_HEIGHT: f32 = 44.0;
    /// Obstacle sprites are drawn wider than their hitbox
    pub const OBSTACLE_VISUAL_WIDTH: f32 = 96.0;
    /// Offset from a lane anchor down to the shared ground line
    pub const FOOT_OFFSET: f32 = 6.0;
    /// Spawn distance past the right edge
    pub const SPAWN_MARGIN: f32 = 40.0;

    /// Player walk cycle frames per second
    pub const PLAYER_ANIM_FPS: f32 = 10.0;
    /// Frames in the walk cycle
    pub const PLAYER_ANIM_FRAMES: u32 = 4;

    /// City per level, wrapping
    pub const CITIES: &[&str] = &[
        "Paris", "London", "Lisbon", "Madrid", "Warsaw", "Oslo", "Berlin", "Rome", "Prague",
        "Vienna",
    ];
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-out on [0, 1]
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
