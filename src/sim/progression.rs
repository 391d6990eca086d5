//! Word progression and difficulty ramp
//!
//! Finishing a word freezes play for two short phases: `Celebrate` (banner)
//! then `Focus` (the next word is shown). Every completed word nudges the
//! difficulty; every `WORDS_PER_LEVEL` words the run moves to the next city.

use glam::Vec2;

use super::state::{COLOR_BONUS, GameEvent, GameState, WordPhase};
use super::words::TargetWord;
use crate::consts::{CITIES, SCORE_WORD, WORDS_PER_LEVEL};

/// Apply completion rewards and enter `Celebrate`
pub fn complete_word(state: &mut GameState, at: Vec2) {
    state.score += SCORE_WORD;
    state.add_time(state.tuning.word_time_bonus);
    state.words_completed += 1;
    bump_difficulty(state);
    state.push_floater(format!("+{SCORE_WORD}"), at, COLOR_BONUS);
    state.events.push(GameEvent::WordCompleted {
        word: state.target.word.display.clone(),
        words_completed: state.words_completed,
    });
    log::debug!(
        "Word {} complete ({} total)",
        state.target.word.display,
        state.words_completed
    );

    if state.words_completed.is_multiple_of(WORDS_PER_LEVEL) {
        level_up(state);
    }

    state.pending = Some(state.words.next_word(&mut state.rng));
    state.word_phase = WordPhase::Celebrate;
    state.phase_timer = state.tuning.celebrate_secs;
}

/// One step up the ramp: faster letters, quicker letter spawns
fn bump_difficulty(state: &mut GameState) {
    let step = state.tuning.letter_speed_step;
    state.letter_speed_min += step;
    state.letter_speed_max += step;
    state.letter_interval = (state.letter_interval - state.tuning.letter_interval_step)
        .max(state.tuning.letter_interval_min);
}

/// Next city: an extra difficulty step and faster obstacles
fn level_up(state: &mut GameState) {
    state.level = state.words_completed / WORDS_PER_LEVEL + 1;
    state.city_index = (state.level as usize - 1) % CITIES.len();
    bump_difficulty(state);
    state.obstacle_interval = (state.obstacle_interval * state.tuning.obstacle_level_factor)
        .max(state.tuning.obstacle_interval_min);
    state.level_banner_timer = state.tuning.level_banner_secs;
    let city = state.city_name().to_string();
    log::info!("Level {} - {}", state.level, city);
    state.events.push(GameEvent::LevelUp {
        level: state.level,
        city,
    });
}

/// Tick the word-phase timer. Returns true while gameplay is frozen.
pub fn advance_word_phase(state: &mut GameState, dt: f32) -> bool {
    match state.word_phase {
        WordPhase::None => false,
        WordPhase::Celebrate => {
            state.phase_timer -= dt;
            if state.phase_timer <= 0.0 {
                reveal_pending(state);
            }
            true
        }
        WordPhase::Focus => {
            state.phase_timer -= dt;
            if state.phase_timer <= 0.0 {
                state.phase_timer = 0.0;
                state.word_phase = WordPhase::None;
            }
            true
        }
    }
}

/// Make the pending word the target and enter `Focus`
fn reveal_pending(state: &mut GameState) {
    let word = match state.pending.take() {
        Some(word) => word,
        None => state.words.next_word(&mut state.rng),
    };
    state.target = TargetWord::new(word);
    // Tiles from the old word would only be traps now
    state.letters.clear();
    state.letter_timer = 0.0;
    state.safety_timer = 0.0;
    state.word_phase = WordPhase::Focus;
    state.phase_timer = state.tuning.focus_secs;
}
