//! Idle/demo mode steering
//!
//! Heads for the lane of the nearest needed tile and sidesteps anything
//! harmful that is about to reach the player.

use super::state::GameState;
use super::tick::Intent;
use super::words::glyph_as_letter;
use crate::consts::LANES;

/// Seconds of approach the bot looks ahead for hazards
const HAZARD_LOOKAHEAD: f32 = 0.6;

/// Suggest a lane change, or `None` to stay put
pub fn suggest(state: &GameState) -> Option<Intent> {
    if state.player.is_moving() {
        return None;
    }
    let px = state.viewport.player_x();
    let reach = state.letter_speed_max * HAZARD_LOOKAHEAD;
    let needed = state.target.needed();

    let mut hazard = [false; LANES];
    for letter in &state.letters {
        let ahead = letter.x - px;
        if (-20.0..reach).contains(&ahead) && glyph_as_letter(&letter.glyph) != needed {
            hazard[letter.lane] = true;
        }
    }
    for obstacle in &state.obstacles {
        let ahead = obstacle.x - px;
        if (-20.0..reach).contains(&ahead) {
            hazard[obstacle.lane] = true;
        }
    }

    let goal = state
        .letters
        .iter()
        .filter(|l| l.x > px && glyph_as_letter(&l.glyph) == needed && needed.is_some())
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|l| l.lane);

    let lane = state.player.lane;
    let step_toward = |target: usize| -> Option<Intent> {
        if target < lane && !hazard[lane - 1] {
            Some(Intent::Up)
        } else if target > lane && !hazard[lane + 1] {
            Some(Intent::Down)
        } else {
            None
        }
    };

    if hazard[lane] {
        // Dodge, preferring the side the goal is on
        let preferred = goal.and_then(step_toward);
        let up = (lane > 0 && !hazard[lane - 1]).then_some(Intent::Up);
        let down = (lane + 1 < LANES && !hazard[lane + 1]).then_some(Intent::Down);
        return preferred.or(up).or(down);
    }
    goal.and_then(step_toward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Letter, Obstacle, ObstacleKind, Viewport};
    use crate::sim::words::{Language, TargetWord, Word, WordList};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let mut s = GameState::new(
            2,
            Viewport::default(),
            Tuning::default(),
            WordList::defaults(Language::En),
        );
        s.begin_run();
        s.target = TargetWord::new(Word::parse("BUS").unwrap());
        s.player.lane = 1;
        s
    }

    #[test]
    fn test_heads_for_needed_letter() {
        let mut s = state();
        s.letters.push(Letter {
            id: 1,
            glyph: "B".into(),
            lane: 0,
            x: 900.0,
            speed: 100.0,
        });
        assert_eq!(suggest(&s), Some(Intent::Up));
    }

    #[test]
    fn test_dodges_obstacle() {
        let mut s = state();
        let x = s.viewport.player_x() + 50.0;
        s.obstacles.push(Obstacle {
            id: 1,
            kind: ObstacleKind::Barrier,
            lane: 1,
            x,
        });
        assert!(suggest(&s).is_some());
    }

    #[test]
    fn test_stays_when_nothing_to_do() {
        let s = state();
        assert_eq!(suggest(&s), None);
    }
}
