//! Letter and obstacle spawning
//!
//! Letters spawn on one clock, obstacles on another. Each attempt picks a lane
//! under its cap; when every lane is full the attempt is dropped. The safety
//! timer bounds how long the needed letter can stay missing.

use rand::Rng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

use super::state::{Difficulty, GameState, Letter, Obstacle, ObstacleKind};
use super::words::{TargetWord, normalize_glyph};
use crate::consts::{LANES, LETTER_VISUAL_WIDTH, OBSTACLE_VISUAL_WIDTH};
use crate::tuning::Tuning;

/// How a letter glyph was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterChoice {
    /// The needed letter, forced by the safety timer
    Forced,
    /// The needed letter, by chance
    Needed,
    /// A plausible misspelling of the needed letter
    Confusable,
    /// Any other letter
    Random,
}

impl LetterChoice {
    pub fn is_needed(&self) -> bool {
        matches!(self, LetterChoice::Forced | LetterChoice::Needed)
    }
}

/// Lanes whose count is below `lane_cap`
pub fn open_lanes(counts: &[usize; LANES], lane_cap: usize) -> Vec<usize> {
    (0..LANES).filter(|&lane| counts[lane] < lane_cap).collect()
}

/// Pick a random open lane, or `None` when the global cap is reached or
/// every lane is full
pub fn pick_lane(
    counts: &[usize; LANES],
    lane_cap: usize,
    global_cap: usize,
    rng: &mut Pcg32,
) -> Option<usize> {
    let total: usize = counts.iter().sum();
    if total >= global_cap {
        return None;
    }
    open_lanes(counts, lane_cap).choose(rng).copied()
}

/// Per-lane counts of anything with a lane
pub fn lane_counts<T>(items: &[T], lane_of: impl Fn(&T) -> usize) -> [usize; LANES] {
    let mut counts = [0; LANES];
    for item in items {
        counts[lane_of(item).min(LANES - 1)] += 1;
    }
    counts
}

/// Letters and digraphs that are plausible spelling mistakes for `letter`
pub fn confusables(letter: char) -> &'static [&'static str] {
    match letter {
        'A' => &["E", "O", "AU", "U"],
        'B' => &["P", "D", "V"],
        'C' => &["K", "S", "Q", "G"],
        'D' => &["B", "T", "P"],
        'E' => &["A", "I", "AI", "EU"],
        'F' => &["PH", "V", "T"],
        'G' => &["J", "C", "Q", "K"],
        'H' => &["N", "K", "M"],
        'I' => &["E", "Y", "L", "J"],
        'J' => &["G", "I", "Y"],
        'K' => &["C", "Q", "CK", "X"],
        'L' => &["I", "T", "R"],
        'M' => &["N", "W", "NN"],
        'N' => &["M", "U", "H"],
        'O' => &["AU", "EAU", "A", "U", "Q"],
        'P' => &["B", "Q", "R"],
        'Q' => &["K", "C", "G", "O"],
        'R' => &["L", "P", "B"],
        'S' => &["C", "Z", "SS", "X"],
        'T' => &["D", "F", "L"],
        'U' => &["V", "O", "N", "W"],
        'V' => &["W", "F", "U", "B"],
        'W' => &["V", "U", "M"],
        'X' => &["KS", "CS", "Z"],
        'Y' => &["I", "J", "V"],
        'Z' => &["S", "X", "TS"],
        _ => &[],
    }
}

/// Uniform random letter other than `needed`
pub fn random_distractor(needed: char, rng: &mut Pcg32) -> char {
    loop {
        let c = (b'A' + rng.random_range(0..26u8)) as char;
        if c != needed {
            return c;
        }
    }
}

/// Decide which glyph the next letter spawn carries
pub fn choose_letter(
    target: &TargetWord,
    safety_expired: bool,
    tuning: &Tuning,
    rng: &mut Pcg32,
) -> Option<(String, LetterChoice)> {
    let needed = target.needed()?;
    let needed_glyph = target.needed_glyph()?;

    if safety_expired {
        return Some((needed_glyph, LetterChoice::Forced));
    }
    if rng.random::<f32>() < tuning.needed_letter_chance {
        return Some((needed_glyph, LetterChoice::Needed));
    }

    if rng.random::<f32>() < tuning.confusable_share {
        // A confusable must never fold back into the needed letter
        let needed_str = needed.to_string();
        let options: Vec<&str> = confusables(needed)
            .iter()
            .copied()
            .filter(|g| normalize_glyph(g) != needed_str)
            .collect();
        if let Some(glyph) = options.choose(rng) {
            return Some((glyph.to_string(), LetterChoice::Confusable));
        }
    }
    Some((
        random_distractor(needed, rng).to_string(),
        LetterChoice::Random,
    ))
}

/// Most obstacles allowed on screen at `level`; always leaves one lane open
pub fn obstacle_global_cap(level: u32) -> usize {
    (1 + (level.saturating_sub(1) / 2) as usize).min(LANES - 1)
}

/// Advance the letter clock and spawn at most one letter
pub fn spawn_letters(state: &mut GameState, dt: f32) -> Option<LetterChoice> {
    state.letter_timer += dt;
    state.safety_timer += dt;
    if state.letter_timer < state.letter_interval {
        return None;
    }
    state.letter_timer = 0.0;

    let counts = lane_counts(&state.letters, |l| l.lane);
    let Some(lane) = pick_lane(
        &counts,
        state.tuning.letter_lane_cap,
        state.tuning.letter_global_cap,
        &mut state.rng,
    ) else {
        log::trace!("Letter spawn dropped: no open lane");
        return None;
    };

    let safety_expired = state.safety_timer >= state.tuning.safety_spawn_after;
    let (glyph, choice) =
        choose_letter(&state.target, safety_expired, &state.tuning, &mut state.rng)?;
    if choice.is_needed() {
        state.safety_timer = 0.0;
    }

    let (lo, hi) = (state.letter_speed_min, state.letter_speed_max.max(state.letter_speed_min));
    let speed = state.rng.random_range(lo..=hi);
    let id = state.next_entity_id();
    let x = state.viewport.spawn_x(LETTER_VISUAL_WIDTH);
    log::trace!("Spawn letter {glyph} ({choice:?}) lane {lane}");
    state.letters.push(Letter {
        id,
        glyph,
        lane,
        x,
        speed,
    });
    Some(choice)
}

/// Advance the obstacle clock and spawn at most one obstacle
pub fn spawn_obstacles(state: &mut GameState, dt: f32) -> Option<ObstacleKind> {
    if state.difficulty == Difficulty::Easy {
        state.obstacles.clear();
        state.obstacle_timer = 0.0;
        return None;
    }

    state.obstacle_timer += dt;
    if state.obstacle_timer < state.obstacle_interval {
        return None;
    }
    state.obstacle_timer = 0.0;

    let counts = lane_counts(&state.obstacles, |o| o.lane);
    let lane = pick_lane(
        &counts,
        state.tuning.obstacle_lane_cap,
        obstacle_global_cap(state.level),
        &mut state.rng,
    )?;
    let kind = *ObstacleKind::ALL.choose(&mut state.rng)?;
    let id = state.next_entity_id();
    let x = state.viewport.spawn_x(OBSTACLE_VISUAL_WIDTH);
    state.obstacles.push(Obstacle { id, kind, lane, x });
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use crate::sim::words::{Language, Word, WordList, glyph_as_letter};
    use rand::SeedableRng;

    fn running_state() -> GameState {
        let mut s = GameState::new(
            5,
            Viewport::default(),
            Tuning::default(),
            WordList::defaults(Language::En),
        );
        s.begin_run();
        s
    }

    #[test]
    fn test_pick_lane_respects_lane_cap() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut counts = [2; LANES];
        counts[1] = 0;
        for _ in 0..50 {
            assert_eq!(pick_lane(&counts, 2, 99, &mut rng), Some(1));
        }
    }

    #[test]
    fn test_pick_lane_none_when_full() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(pick_lane(&[1; LANES], 1, 99, &mut rng), None);
        assert_eq!(pick_lane(&[0, 1, 1], 2, 2, &mut rng), None);
    }

    #[test]
    fn test_confusables_never_fold_to_their_letter() {
        for c in 'A'..='Z' {
            for glyph in confusables(c) {
                assert_ne!(glyph_as_letter(glyph), Some(c), "{c} -> {glyph}");
            }
        }
    }

    #[test]
    fn test_random_distractor_excludes_needed() {
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..500 {
            assert_ne!(random_distractor('E', &mut rng), 'E');
        }
    }

    #[test]
    fn test_forced_spawn_is_needed_letter() {
        let target = TargetWord::new(Word::parse("CAFÉ").unwrap());
        let mut rng = Pcg32::seed_from_u64(3);
        let (glyph, choice) = choose_letter(&target, true, &Tuning::default(), &mut rng).unwrap();
        assert_eq!(glyph, "C");
        assert_eq!(choice, LetterChoice::Forced);
    }

    #[test]
    fn test_accented_needed_letter_spawns_accented() {
        let mut target = TargetWord::new(Word::parse("CAFÉ").unwrap());
        target.collected = 3;
        let mut rng = Pcg32::seed_from_u64(3);
        let (glyph, _) = choose_letter(&target, true, &Tuning::default(), &mut rng).unwrap();
        assert_eq!(glyph, "É");
    }

    #[test]
    fn test_distractor_mix_favours_confusables() {
        let target = TargetWord::new(Word::parse("O").unwrap());
        let tuning = Tuning {
            needed_letter_chance: 0.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(11);
        let mut confusable = 0;
        let trials = 2000;
        for _ in 0..trials {
            let (_, choice) = choose_letter(&target, false, &tuning, &mut rng).unwrap();
            assert!(!choice.is_needed());
            if choice == LetterChoice::Confusable {
                confusable += 1;
            }
        }
        let share = confusable as f32 / trials as f32;
        assert!((0.62..0.78).contains(&share), "share {share}");
    }

    #[test]
    fn test_safety_timer_forces_needed_letter() {
        let mut s = running_state();
        s.tuning.needed_letter_chance = 0.0;
        s.safety_timer = s.tuning.safety_spawn_after;
        s.letter_timer = s.letter_interval;
        let choice = spawn_letters(&mut s, 0.0);
        assert_eq!(choice, Some(LetterChoice::Forced));
        assert_eq!(s.safety_timer, 0.0);
        assert_eq!(
            glyph_as_letter(&s.letters[0].glyph),
            s.target.needed()
        );
    }

    #[test]
    fn test_needed_letter_appears_within_bounded_time() {
        let mut s = running_state();
        s.tuning.needed_letter_chance = 0.0;
        let dt = 1.0 / 60.0;
        let bound = s.tuning.safety_spawn_after + s.letter_interval + dt;
        let mut elapsed = 0.0;
        let mut found = false;
        while elapsed <= bound {
            if spawn_letters(&mut s, dt).is_some_and(|c| c.is_needed()) {
                found = true;
                break;
            }
            // keep lanes open
            s.letters.clear();
            elapsed += dt;
        }
        assert!(found);
    }

    #[test]
    fn test_full_lanes_drop_spawn() {
        let mut s = running_state();
        for lane in 0..LANES {
            for _ in 0..s.tuning.letter_lane_cap {
                let id = s.next_entity_id();
                s.letters.push(Letter {
                    id,
                    glyph: "Q".into(),
                    lane,
                    x: 900.0,
                    speed: 100.0,
                });
            }
        }
        let before = s.letters.len();
        s.letter_timer = s.letter_interval;
        assert_eq!(spawn_letters(&mut s, 0.0), None);
        assert_eq!(s.letters.len(), before);
    }

    #[test]
    fn test_easy_mode_suppresses_and_clears_obstacles() {
        let mut s = running_state();
        s.obstacles.push(Obstacle {
            id: 99,
            kind: ObstacleKind::Cone,
            lane: 0,
            x: 500.0,
        });
        s.set_difficulty(Difficulty::Easy);
        s.obstacle_timer = s.obstacle_interval;
        assert_eq!(spawn_obstacles(&mut s, 1.0), None);
        assert!(s.obstacles.is_empty());
    }

    #[test]
    fn test_obstacles_leave_a_lane_open() {
        let mut s = running_state();
        s.level = 50;
        for _ in 0..20 {
            s.obstacle_timer = s.obstacle_interval;
            spawn_obstacles(&mut s, 0.0);
        }
        assert!(s.obstacles.len() <= LANES - 1);
        let counts = lane_counts(&s.obstacles, |o| o.lane);
        assert!(counts.iter().all(|&c| c <= s.tuning.obstacle_lane_cap));
    }

    #[test]
    fn test_obstacle_cap_grows_with_level() {
        assert_eq!(obstacle_global_cap(1), 1);
        assert!(obstacle_global_cap(3) >= obstacle_global_cap(1));
        assert_eq!(obstacle_global_cap(100), LANES - 1);
    }
}
