//! Simulation tick
//!
//! One call advances the run by `dt` seconds. Order per tick: lane intents,
//! word-phase timers, round timer, spawners, entity movement, player
//! animation, feedback timers, then collision and scoring.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::progression;
use super::spawner;
use super::state::{COLOR_GOOD, EndReason, GameEvent, GamePhase, GameState};
use super::words::glyph_as_letter;
use crate::consts::{MAX_DT, SCORE_LETTER};

/// A discrete lane-change request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Up,
    Down,
}

/// Input for a single tick, drained from the host's intent queue
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Lane changes in arrival order
    pub intents: Vec<Intent>,
    /// Idle/demo mode - the autopilot steers
    pub idle_mode: bool,
}

/// Clamp a raw frame delta into [0, MAX_DT]
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = clamp_dt(dt);
    if state.phase != GamePhase::Run {
        return;
    }
    state.time_ticks += 1;

    // Lane changes only count during normal play
    if state.is_playing() {
        for intent in &input.intents {
            apply_intent(state, *intent);
        }
        if input.idle_mode && input.intents.is_empty() {
            if let Some(intent) = autopilot::suggest(state) {
                apply_intent(state, intent);
            }
        }
    }

    if progression::advance_word_phase(state, dt) {
        return;
    }

    state.time_left = (state.time_left - dt).max(0.0);
    if state.time_left <= 0.0 {
        state.end_run(EndReason::TimeUp);
        return;
    }

    spawner::spawn_letters(state, dt);
    spawner::spawn_obstacles(state, dt);

    for letter in &mut state.letters {
        letter.update(dt);
    }
    let scroll = state.scroll_speed();
    for obstacle in &mut state.obstacles {
        obstacle.update(dt, scroll);
    }
    let viewport = state.viewport;
    state.letters.retain(|l| !l.is_offscreen(&viewport));
    state.obstacles.retain(|o| !o.is_offscreen(&viewport));

    state.player.update(dt, &state.layout, &state.viewport);
    update_feedback(state, dt);

    resolve_collisions(state);
}

/// Apply one lane change. Out-of-range moves are ignored.
pub fn apply_intent(state: &mut GameState, intent: Intent) -> bool {
    match intent {
        Intent::Up => state.player.move_up(&state.tuning),
        Intent::Down => state.player.move_down(&state.tuning),
    }
}

/// Floating texts, hit flash, level banner
fn update_feedback(state: &mut GameState, dt: f32) {
    let rise = state.tuning.floater_rise;
    for floater in &mut state.floaters {
        floater.ttl -= dt;
        floater.pos.y -= rise * dt;
    }
    state.floaters.retain(|f| f.ttl > 0.0);
    state.flash_timer = (state.flash_timer - dt).max(0.0);
    state.level_banner_timer = (state.level_banner_timer - dt).max(0.0);
}

/// Player against letters and obstacles
pub fn resolve_collisions(state: &mut GameState) {
    if !state.is_playing() {
        return;
    }
    let player_rect = state.player.rect(&state.viewport);

    let mut i = 0;
    while i < state.letters.len() {
        let rect = state.letters[i].rect(&state.layout, &state.viewport);
        if !player_rect.overlaps(&rect) {
            i += 1;
            continue;
        }
        let letter = state.letters.remove(i);
        let at = rect.center();
        // Digraph tiles never count, even when they start with the needed letter
        let correct = state.target.needed().is_some()
            && glyph_as_letter(&letter.glyph) == state.target.needed();

        if correct {
            state.score += SCORE_LETTER;
            state.add_time(state.tuning.letter_time_bonus);
            state.safety_timer = 0.0;
            state.push_floater(format!("+{SCORE_LETTER}"), at, COLOR_GOOD);
            state.events.push(GameEvent::LetterCollected {
                glyph: letter.glyph,
            });
            if state.target.advance() {
                progression::complete_word(state, at);
                return;
            }
        } else {
            state.events.push(GameEvent::WrongLetter {
                glyph: letter.glyph,
            });
            state.apply_penalty(at);
            if state.phase != GamePhase::Run {
                return;
            }
        }
    }

    let mut i = 0;
    while i < state.obstacles.len() {
        let rect = state.obstacles[i].rect(&state.layout, &state.viewport);
        if !player_rect.overlaps(&rect) {
            i += 1;
            continue;
        }
        let obstacle = state.obstacles.remove(i);
        state
            .events
            .push(GameEvent::ObstacleHit { kind: obstacle.kind });
        state.apply_penalty(rect.center());
        if state.phase != GamePhase::Run {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LANES, PENALTY_TIME, ROUND_TIME_START, SCORE_WORD, START_LIVES};
    use crate::sim::state::{Difficulty, Letter, Obstacle, ObstacleKind, Viewport, WordPhase};
    use crate::sim::words::{Language, Word, WordList};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut s = GameState::new(
            21,
            Viewport::default(),
            Tuning::default(),
            WordList::defaults(Language::En),
        );
        s.set_difficulty(Difficulty::Easy);
        s.begin_run();
        s
    }

    /// Drop a letter right on top of the player
    fn letter_on_player(s: &mut GameState, glyph: &str) {
        let id = s.next_entity_id();
        s.letters.push(Letter {
            id,
            glyph: glyph.to_string(),
            lane: s.player.lane,
            x: s.viewport.player_x(),
            speed: 0.0,
        });
    }

    #[test]
    fn test_tick_does_nothing_outside_run() {
        let mut s = GameState::new(
            1,
            Viewport::default(),
            Tuning::default(),
            WordList::defaults(Language::En),
        );
        tick(&mut s, &TickInput::default(), 0.5);
        assert_eq!(s.phase, GamePhase::Start);
        assert_eq!(s.time_ticks, 0);
    }

    #[test]
    fn test_timer_counts_down_and_ends_run() {
        let mut s = running_state();
        tick(&mut s, &TickInput::default(), 0.5);
        assert!((s.time_left - (ROUND_TIME_START - 0.5)).abs() < 1e-4);

        s.time_left = 0.3;
        tick(&mut s, &TickInput::default(), 0.5);
        assert_eq!(s.time_left, 0.0);
        assert_eq!(s.phase, GamePhase::Over);
        assert_eq!(s.end_reason, Some(EndReason::TimeUp));
    }

    #[test]
    fn test_huge_dt_is_clamped() {
        let mut s = running_state();
        tick(&mut s, &TickInput::default(), 1000.0);
        assert!((s.time_left - (ROUND_TIME_START - MAX_DT)).abs() < 1e-4);
    }

    #[test]
    fn test_intents_move_player() {
        let mut s = running_state();
        let lane = s.player.lane;
        let input = TickInput {
            intents: vec![Intent::Up],
            ..Default::default()
        };
        tick(&mut s, &input, 0.01);
        assert_eq!(s.player.lane, lane - 1);
    }

    #[test]
    fn test_intents_ignored_during_word_phase() {
        let mut s = running_state();
        s.word_phase = WordPhase::Celebrate;
        s.phase_timer = 10.0;
        let lane = s.player.lane;
        let input = TickInput {
            intents: vec![Intent::Down],
            ..Default::default()
        };
        tick(&mut s, &input, 0.01);
        assert_eq!(s.player.lane, lane);
    }

    #[test]
    fn test_word_phase_freezes_timer_and_entities() {
        let mut s = running_state();
        s.word_phase = WordPhase::Focus;
        s.phase_timer = 5.0;
        s.letters.push(Letter {
            id: 1,
            glyph: "Z".into(),
            lane: 0,
            x: 800.0,
            speed: 200.0,
        });
        let time = s.time_left;
        tick(&mut s, &TickInput::default(), 0.5);
        assert_eq!(s.time_left, time);
        assert_eq!(s.letters[0].x, 800.0);
        assert!((s.phase_timer - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_bus_scenario() {
        let mut s = running_state();
        s.target = crate::sim::words::TargetWord::new(Word::parse("BUS").unwrap());
        let score0 = s.score;

        for glyph in ["B", "U", "S"] {
            letter_on_player(&mut s, glyph);
            resolve_collisions(&mut s);
        }

        assert_eq!(s.score - score0, 3 * SCORE_LETTER + SCORE_WORD);
        assert_eq!(s.target.collected, 3);
        assert_eq!(s.word_phase, WordPhase::Celebrate);
        assert_eq!(s.lives, START_LIVES);
    }

    #[test]
    fn test_accented_tile_counts_for_plain_letter() {
        let mut s = running_state();
        s.target = crate::sim::words::TargetWord::new(Word::parse("EAU").unwrap());
        letter_on_player(&mut s, "É");
        resolve_collisions(&mut s);
        assert_eq!(s.target.collected, 1);
    }

    #[test]
    fn test_digraph_never_advances() {
        let mut s = running_state();
        s.target = crate::sim::words::TargetWord::new(Word::parse("AUTO").unwrap());
        letter_on_player(&mut s, "AU");
        resolve_collisions(&mut s);
        assert_eq!(s.target.collected, 0);
        assert_eq!(s.lives, START_LIVES - 1);
    }

    #[test]
    fn test_wrong_letter_penalty() {
        let mut s = running_state();
        s.target = crate::sim::words::TargetWord::new(Word::parse("BUS").unwrap());
        let time = s.time_left;
        letter_on_player(&mut s, "P");
        resolve_collisions(&mut s);
        assert_eq!(s.lives, START_LIVES - 1);
        assert_eq!(s.time_left, time - PENALTY_TIME);
        assert!(s.flash_timer > 0.0);
        assert!(s.letters.is_empty());
    }

    #[test]
    fn test_obstacle_penalty() {
        let mut s = running_state();
        s.set_difficulty(Difficulty::Normal);
        s.time_left = 1.0;
        s.lives = 3;
        s.obstacles.push(Obstacle {
            id: 77,
            kind: ObstacleKind::Puddle,
            lane: s.player.lane,
            x: s.viewport.player_x(),
        });
        resolve_collisions(&mut s);
        assert_eq!(s.lives, 2);
        assert_eq!(s.time_left, 0.0);
        assert!(s.obstacles.is_empty());
    }

    #[test]
    fn test_three_hits_end_the_run_exactly_once() {
        let mut s = running_state();
        s.target = crate::sim::words::TargetWord::new(Word::parse("BUS").unwrap());
        for hit in 1..=3u8 {
            letter_on_player(&mut s, "Q");
            resolve_collisions(&mut s);
            assert_eq!(s.lives, START_LIVES - hit);
            let expected = if hit == 3 { GamePhase::Over } else { GamePhase::Run };
            assert_eq!(s.phase, expected);
        }
        letter_on_player(&mut s, "Q");
        resolve_collisions(&mut s);
        tick(&mut s, &TickInput::default(), 0.1);
        assert_eq!(s.lives, 0);
        let ended = s
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::RunEnded { .. }))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_letters_in_other_lanes_miss() {
        let mut s = running_state();
        let other = (s.player.lane + 1) % LANES;
        s.letters.push(Letter {
            id: 5,
            glyph: "Q".into(),
            lane: other,
            x: s.viewport.player_x(),
            speed: 0.0,
        });
        resolve_collisions(&mut s);
        assert_eq!(s.letters.len(), 1);
        assert_eq!(s.lives, START_LIVES);
    }

    #[test]
    fn test_offscreen_entities_culled() {
        let mut s = running_state();
        s.letters.push(Letter {
            id: 5,
            glyph: "Q".into(),
            lane: 0,
            x: -1000.0,
            speed: 10.0,
        });
        tick(&mut s, &TickInput::default(), 0.01);
        assert!(s.letters.iter().all(|l| l.id != 5));
    }

    #[test]
    fn test_idle_mode_stays_alive_a_while() {
        let mut s = running_state();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut s, &input, 1.0 / 60.0);
        }
        assert!(s.time_ticks > 0);
        assert!(s.player.lane < LANES);
    }

    proptest! {
        #[test]
        fn prop_clamp_dt_in_range(dt in proptest::num::f32::ANY) {
            let c = clamp_dt(dt);
            prop_assert!((0.0..=MAX_DT).contains(&c));
        }

        #[test]
        fn prop_lives_and_time_never_negative(
            seed in 0u64..500,
            steps in proptest::collection::vec((0u8..3, 0.0f32..2.0), 1..400),
        ) {
            let mut s = GameState::new(
                seed,
                Viewport::default(),
                Tuning::default(),
                WordList::defaults(Language::En),
            );
            s.begin_run();
            for (intent, dt) in steps {
                let intents = match intent {
                    0 => vec![Intent::Up],
                    1 => vec![Intent::Down],
                    _ => vec![],
                };
                tick(&mut s, &TickInput { intents, idle_mode: false }, dt);
                prop_assert!(s.time_left >= 0.0);
                prop_assert!(s.time_left <= ROUND_TIME_START);
                prop_assert!(s.lives <= START_LIVES);
                prop_assert!(s.player.lane < LANES);
            }
            let ended = s
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::RunEnded { .. }))
                .count();
            prop_assert!(ended <= 1);
            prop_assert_eq!(ended == 1, s.phase == GamePhase::Over);
        }
    }
}
