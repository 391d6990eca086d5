//! Render snapshot
//!
//! Everything a renderer or HUD needs for one frame, in plain serializable
//! form. Positions are final screen coordinates.

use serde::Serialize;

use super::state::{Difficulty, FloatingText, GamePhase, GameState, ObstacleKind, WordPhase};
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};

#[derive(Debug, Clone, Serialize)]
pub struct LetterView {
    pub id: u32,
    pub glyph: String,
    pub lane: usize,
    pub x: f32,
    /// Lane anchor the tile stands on
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: usize,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub lane: usize,
    pub x: f32,
    /// Animated anchor (tween and bounce applied)
    pub y: f32,
    /// Sprite size after viewport scaling
    pub width: f32,
    pub height: f32,
    pub frame: u32,
    pub moving: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    /// Entity size multiplier for the current viewport
    pub scale: f32,
    pub word_phase: WordPhase,
    pub difficulty: Difficulty,
    pub score: u64,
    pub best_score: u64,
    pub lives: u8,
    pub time_left: f32,
    pub level: u32,
    pub city: &'static str,
    pub words_completed: u32,
    pub word_display: String,
    pub word_playable: String,
    /// Playable letters collected
    pub collected: usize,
    /// Display chars to highlight as collected
    pub display_collected: usize,
    pub player: PlayerView,
    pub letters: Vec<LetterView>,
    pub obstacles: Vec<ObstacleView>,
    pub floaters: Vec<FloatingText>,
    pub flash: f32,
    pub level_banner: f32,
}

/// Build a snapshot of `state`
pub fn snapshot(state: &GameState, best_score: u64) -> RenderSnapshot {
    let h = state.viewport.height;
    let scale = state.viewport.scale();
    let target = &state.target;
    RenderSnapshot {
        phase: state.phase,
        scale,
        word_phase: state.word_phase,
        difficulty: state.difficulty,
        score: state.score,
        best_score: best_score.max(state.score),
        lives: state.lives,
        time_left: state.time_left,
        level: state.level,
        city: state.city_name(),
        words_completed: state.words_completed,
        word_display: target.word.display.clone(),
        word_playable: target.word.playable.clone(),
        collected: target.collected,
        display_collected: target.word.display_prefix_len(target.collected),
        player: PlayerView {
            lane: state.player.lane,
            x: state.viewport.player_x(),
            y: state.player.y,
            width: PLAYER_WIDTH * scale,
            height: PLAYER_HEIGHT * scale,
            frame: state.player.anim_frame,
            moving: state.player.is_moving(),
        },
        letters: state
            .letters
            .iter()
            .map(|l| LetterView {
                id: l.id,
                glyph: l.glyph.clone(),
                lane: l.lane,
                x: l.x,
                y: state.layout.anchor_y(l.lane, h),
            })
            .collect(),
        obstacles: state
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                id: o.id,
                kind: o.kind,
                lane: o.lane,
                x: o.x,
                y: state.layout.anchor_y(o.lane, h),
            })
            .collect(),
        floaters: state.floaters.clone(),
        flash: state.flash_timer,
        level_banner: state.level_banner_timer,
    }
}
