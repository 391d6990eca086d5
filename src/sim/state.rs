//! Game state and core simulation types
//!
//! `GameState` is the whole run: entities, timers, difficulty ramp and word
//! progress. It is owned by the session and only mutated inside `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::lane::LaneLayout;
use super::words::{TargetWord, Word, WordList, WordQueue};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{ease_out_cubic, lerp};

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulates
    Start,
    /// Active run
    Run,
    /// Run ended
    Over,
}

/// Pause sub-state entered after a word is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordPhase {
    /// Normal play
    None,
    /// Word just completed, banner showing, gameplay frozen
    Celebrate,
    /// New word revealed and highlighted, gameplay frozen
    Focus,
}

/// Difficulty preset chosen in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// No obstacles at all
    Easy,
    #[default]
    Normal,
    /// Faster letters, tighter spawn pacing
    Hard,
}

impl Difficulty {
    /// Case-insensitive `easy`/`normal`/`hard`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimeUp,
    OutOfLives,
}

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Entity size multiplier relative to the reference height
    pub fn scale(&self) -> f32 {
        (self.height / REFERENCE_HEIGHT).clamp(0.5, 2.0)
    }

    /// Fixed horizontal position of the player
    pub fn player_x(&self) -> f32 {
        self.width * PLAYER_X_FRAC
    }

    /// Where new letters and obstacles appear
    pub fn spawn_x(&self, visual_width: f32) -> f32 {
        self.width + SPAWN_MARGIN + visual_width * self.scale() / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, REFERENCE_HEIGHT)
    }
}

/// Lane-change interpolation with a decaying bounce
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneTween {
    pub from_y: f32,
    pub elapsed: f32,
    pub duration: f32,
    /// -1 moving up, +1 moving down
    pub direction: f32,
    pub bounce: f32,
}

impl LaneTween {
    /// Animated y at the tween's current progress
    pub fn sample(&self, to_y: f32) -> f32 {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        let base = lerp(self.from_y, to_y, ease_out_cubic(t));
        let bounce = self.direction * self.bounce * (t * std::f32::consts::TAU).sin() * (1.0 - t);
        base + bounce
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// The street sweeper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Discrete lane (always in 0..LANES)
    pub lane: usize,
    /// Animated vertical anchor. Drawing and collision both read this.
    pub y: f32,
    pub tween: Option<LaneTween>,
    /// Walk cycle frame
    pub anim_frame: u32,
    anim_clock: f32,
}

impl Player {
    pub fn new(lane: usize, layout: &LaneLayout, viewport: &Viewport) -> Self {
        let lane = lane.min(LANES - 1);
        Self {
            lane,
            y: layout.anchor_y(lane, viewport.height),
            tween: None,
            anim_frame: 0,
            anim_clock: 0.0,
        }
    }

    /// Start moving one lane up. No-op (returns false) in the top lane.
    pub fn move_up(&mut self, tuning: &Tuning) -> bool {
        if self.lane == 0 {
            return false;
        }
        self.lane -= 1;
        self.start_tween(-1.0, tuning);
        true
    }

    /// Start moving one lane down. No-op (returns false) in the bottom lane.
    pub fn move_down(&mut self, tuning: &Tuning) -> bool {
        if self.lane + 1 >= LANES {
            return false;
        }
        self.lane += 1;
        self.start_tween(1.0, tuning);
        true
    }

    fn start_tween(&mut self, direction: f32, tuning: &Tuning) {
        self.tween = Some(LaneTween {
            from_y: self.y,
            elapsed: 0.0,
            duration: tuning.lane_tween_secs,
            direction,
            bounce: tuning.lane_bounce_px,
        });
    }

    pub fn is_moving(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance walk cycle and lane tween
    pub fn update(&mut self, dt: f32, layout: &LaneLayout, viewport: &Viewport) {
        self.anim_clock += dt;
        let frame_secs = 1.0 / PLAYER_ANIM_FPS;
        while self.anim_clock >= frame_secs {
            self.anim_clock -= frame_secs;
            self.anim_frame = (self.anim_frame + 1) % PLAYER_ANIM_FRAMES;
        }

        let to_y = layout.anchor_y(self.lane, viewport.height);
        match self.tween.as_mut() {
            Some(tween) => {
                tween.elapsed += dt;
                if tween.finished() {
                    self.tween = None;
                    self.y = to_y;
                } else {
                    self.y = tween.sample(to_y);
                }
            }
            None => self.y = to_y,
        }
    }

    /// Snap to the current lane (viewport resize, run reset)
    pub fn snap(&mut self, layout: &LaneLayout, viewport: &Viewport) {
        self.tween = None;
        self.y = layout.anchor_y(self.lane, viewport.height);
    }

    /// Hitbox at the animated position
    pub fn rect(&self, viewport: &Viewport) -> Rect {
        let s = viewport.scale();
        Rect::from_foot(
            viewport.player_x(),
            self.y,
            PLAYER_HITBOX_WIDTH * s,
            PLAYER_HITBOX_HEIGHT * s,
        )
    }
}

/// A letter tile approaching along a lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Letter {
    pub id: u32,
    /// Display glyph, may be accented or a digraph ("É", "AU")
    pub glyph: String,
    pub lane: usize,
    /// Horizontal center
    pub x: f32,
    /// px/s, leftward
    pub speed: f32,
}

impl Letter {
    pub fn update(&mut self, dt: f32) {
        self.x -= self.speed * dt;
    }

    /// Fully past the left edge, glow included
    pub fn is_offscreen(&self, viewport: &Viewport) -> bool {
        self.x + LETTER_VISUAL_WIDTH * viewport.scale() / 2.0 < 0.0
    }

    pub fn rect(&self, layout: &LaneLayout, viewport: &Viewport) -> Rect {
        let size = LETTER_SIZE * viewport.scale();
        Rect::from_foot(self.x, layout.anchor_y(self.lane, viewport.height), size, size)
    }
}

/// Obstacle types (variety only, all share one hitbox)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cone,
    TrashBag,
    Puddle,
    Barrier,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Cone,
        ObstacleKind::TrashBag,
        ObstacleKind::Puddle,
        ObstacleKind::Barrier,
    ];
}

/// A street obstacle, scrolling with the background
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: usize,
    pub x: f32,
}

impl Obstacle {
    /// Obstacles have no speed of their own: they move with the scroll
    pub fn update(&mut self, dt: f32, scroll_speed: f32) {
        self.x -= scroll_speed * dt;
    }

    pub fn is_offscreen(&self, viewport: &Viewport) -> bool {
        self.x + OBSTACLE_VISUAL_WIDTH * viewport.scale() / 2.0 < 0.0
    }

    pub fn rect(&self, layout: &LaneLayout, viewport: &Viewport) -> Rect {
        let s = viewport.scale();
        Rect::from_foot(
            self.x,
            layout.anchor_y(self.lane, viewport.height),
            OBSTACLE_WIDTH * s,
            OBSTACLE_HEIGHT * s,
        )
    }
}

/// Floating feedback text ("+100", "-1")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub pos: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    /// Seconds remaining
    pub ttl: f32,
    pub max_ttl: f32,
}

pub const COLOR_GOOD: u32 = 0x4ade80;
pub const COLOR_BAD: u32 = 0xf87171;
pub const COLOR_BONUS: u32 = 0xfacc15;

/// Things the host may want to react to (sounds, notifications)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    LetterCollected { glyph: String },
    WrongLetter { glyph: String },
    ObstacleHit { kind: ObstacleKind },
    WordCompleted { word: String, words_completed: u32 },
    LevelUp { level: u32, city: String },
    RunEnded { score: u64, reason: EndReason },
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub difficulty: Difficulty,
    pub layout: LaneLayout,
    pub viewport: Viewport,

    pub phase: GamePhase,
    pub word_phase: WordPhase,
    /// Seconds left in the current word phase
    pub phase_timer: f32,

    pub score: u64,
    pub lives: u8,
    /// Round timer, clamped to [0, ROUND_TIME_START]
    pub time_left: f32,
    pub words_completed: u32,
    /// 1-based level
    pub level: u32,
    pub city_index: usize,

    /// Letter speed range (only grows within a run)
    pub letter_speed_min: f32,
    pub letter_speed_max: f32,
    /// Spawn pacing (only shrinks within a run, floored)
    pub letter_interval: f32,
    pub obstacle_interval: f32,
    pub letter_timer: f32,
    pub obstacle_timer: f32,
    /// Time since the needed letter last spawned
    pub safety_timer: f32,

    pub player: Player,
    pub letters: Vec<Letter>,
    pub obstacles: Vec<Obstacle>,
    pub floaters: Vec<FloatingText>,

    pub target: TargetWord,
    /// Next word, revealed when the celebrate phase ends
    pub pending: Option<Word>,
    pub words: WordQueue,
    /// The title-screen target has not been played yet
    target_fresh: bool,

    pub flash_timer: f32,
    pub level_banner_timer: f32,
    pub end_reason: Option<EndReason>,
    pub time_ticks: u64,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a state sitting on the title screen
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning, words: WordList) -> Self {
        let layout = LaneLayout::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut queue = WordQueue::new(words);
        let first = queue.next_word(&mut rng);
        Self {
            seed,
            rng,
            difficulty: Difficulty::default(),
            layout,
            viewport,
            phase: GamePhase::Start,
            word_phase: WordPhase::None,
            phase_timer: 0.0,
            score: 0,
            lives: START_LIVES,
            time_left: ROUND_TIME_START,
            words_completed: 0,
            level: 1,
            city_index: 0,
            letter_speed_min: tuning.letter_speed_min_start,
            letter_speed_max: tuning.letter_speed_max_start,
            letter_interval: tuning.letter_interval_start,
            obstacle_interval: tuning.obstacle_interval_start,
            letter_timer: 0.0,
            obstacle_timer: 0.0,
            safety_timer: 0.0,
            player: Player::new(LANES / 2, &layout, &viewport),
            letters: Vec::new(),
            obstacles: Vec::new(),
            floaters: Vec::new(),
            target: TargetWord::new(first),
            pending: None,
            words: queue,
            target_fresh: true,
            flash_timer: 0.0,
            level_banner_timer: 0.0,
            end_reason: None,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Reset every per-run field together and pick the run's first word.
    /// Leaves `phase` alone; see `begin_run`.
    pub fn reset_run(&mut self) {
        let (speed_factor, interval_factor) = match self.difficulty {
            Difficulty::Hard => (self.tuning.hard_speed_factor, self.tuning.hard_interval_factor),
            Difficulty::Easy | Difficulty::Normal => (1.0, 1.0),
        };

        self.word_phase = WordPhase::None;
        self.phase_timer = 0.0;
        self.score = 0;
        self.lives = START_LIVES;
        self.time_left = ROUND_TIME_START;
        self.words_completed = 0;
        self.level = 1;
        self.city_index = 0;
        self.letter_speed_min = self.tuning.letter_speed_min_start * speed_factor;
        self.letter_speed_max = self.tuning.letter_speed_max_start * speed_factor;
        self.letter_interval = (self.tuning.letter_interval_start * interval_factor)
            .max(self.tuning.letter_interval_min);
        self.obstacle_interval = (self.tuning.obstacle_interval_start * interval_factor)
            .max(self.tuning.obstacle_interval_min);
        self.letter_timer = 0.0;
        self.obstacle_timer = 0.0;
        self.safety_timer = 0.0;
        self.player = Player::new(LANES / 2, &self.layout, &self.viewport);
        self.letters.clear();
        self.obstacles.clear();
        self.floaters.clear();
        // Words already drawn but never played come first
        let first = match self.pending.take() {
            Some(word) => word,
            None if self.target_fresh => self.target.word.clone(),
            None => self.words.next_word(&mut self.rng),
        };
        self.target = TargetWord::new(first);
        self.target_fresh = false;
        self.flash_timer = 0.0;
        self.level_banner_timer = 0.0;
        self.end_reason = None;
        self.time_ticks = 0;
        self.events.clear();
    }

    /// Reset and enter RUN
    pub fn begin_run(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Run;
        self.events.push(GameEvent::RunStarted);
        log::info!(
            "Run started ({:?}), first word {}",
            self.difficulty,
            self.target.word.display
        );
    }

    /// Enter OVER. Only the first call of a run has any effect.
    pub fn end_run(&mut self, reason: EndReason) {
        if self.phase != GamePhase::Run {
            return;
        }
        self.phase = GamePhase::Over;
        self.end_reason = Some(reason);
        self.events.push(GameEvent::RunEnded {
            score: self.score,
            reason,
        });
        log::info!(
            "Run ended ({:?}): score {}, {} words",
            reason,
            self.score,
            self.words_completed
        );
    }

    /// Back to the title screen. A run in progress is abandoned without a
    /// `RunEnded` event.
    pub fn return_to_start(&mut self) {
        self.phase = GamePhase::Start;
        self.word_phase = WordPhase::None;
        self.phase_timer = 0.0;
        self.letters.clear();
        self.obstacles.clear();
        self.floaters.clear();
        self.flash_timer = 0.0;
        self.level_banner_timer = 0.0;
    }

    /// Background scroll speed; obstacles ride it
    pub fn scroll_speed(&self) -> f32 {
        self.letter_speed_min
    }

    pub fn city_name(&self) -> &'static str {
        CITIES[self.city_index % CITIES.len()]
    }

    /// True while gameplay (timer, spawns, scoring) advances
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Run && self.word_phase == WordPhase::None
    }

    /// Change difficulty. Switching to Easy removes obstacles immediately.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        if difficulty == Difficulty::Easy {
            self.obstacles.clear();
            self.obstacle_timer = 0.0;
        }
    }

    /// Resize; entities keep their lanes and the player snaps to its anchor
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.snap(&self.layout, &self.viewport);
    }

    /// Swap the word list. A target in play is kept until its word ends;
    /// words drawn from the old list but not yet played are redrawn.
    pub fn set_word_list(&mut self, list: WordList) {
        if !self.words.set_list(list) {
            return;
        }
        self.pending = None;
        if self.target_fresh {
            let first = self.words.next_word(&mut self.rng);
            self.target = TargetWord::new(first);
        }
    }

    /// Lose a life and some time, flash the screen
    pub fn apply_penalty(&mut self, at: Vec2) {
        self.lives = self.lives.saturating_sub(1);
        self.time_left = (self.time_left - PENALTY_TIME).max(0.0);
        self.flash_timer = self.tuning.flash_secs;
        self.push_floater("-1".to_string(), at, COLOR_BAD);
        if self.lives == 0 {
            self.end_run(EndReason::OutOfLives);
        } else if self.time_left <= 0.0 {
            self.end_run(EndReason::TimeUp);
        }
    }

    /// Add seconds, never past the round's starting time
    pub fn add_time(&mut self, secs: f32) {
        self.time_left = (self.time_left + secs).min(ROUND_TIME_START);
    }

    pub fn push_floater(&mut self, text: String, pos: Vec2, color: u32) {
        let ttl = self.tuning.floater_secs;
        self.floaters.push(FloatingText {
            text,
            pos,
            color,
            ttl,
            max_ttl: ttl,
        });
    }
}
