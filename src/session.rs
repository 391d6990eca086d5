//! Run/session controller
//!
//! Owns the simulation state plus everything around it that outlives a run:
//! the store, settings, best score, frame clock and pending input. Hosts talk
//! to this type only.

use serde::Serialize;

use crate::persistence::{BestScore, KeyValueStore};
use crate::platform::input::{IntentQueue, intent_for_pointer};
use crate::platform::time::FrameClock;
use crate::settings::Settings;
use crate::sim::{
    Difficulty, EndReason, GameEvent, GamePhase, GameState, Intent, Language, RenderSnapshot,
    TickInput, Viewport, snapshot, tick,
};
use crate::tuning::Tuning;

/// Undrained events kept for the host; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// End-of-run numbers for the game-over screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub score: u64,
    pub best_score: u64,
    /// This run set a new record
    pub new_best: bool,
    pub words_completed: u32,
    pub level: u32,
    pub city: &'static str,
    /// Whole seconds left on the clock
    pub time_left: u32,
    pub reason: Option<EndReason>,
}

pub struct Session<S: KeyValueStore> {
    state: GameState,
    store: S,
    settings: Settings,
    best: BestScore,
    /// Record at the start of the current run
    best_before_run: u64,
    clock: FrameClock,
    intents: IntentQueue,
    idle_mode: bool,
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S, seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(store, seed, viewport, Tuning::default())
    }

    /// Invalid tuning is replaced by the defaults
    pub fn with_tuning(store: S, seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning, using defaults: {e}");
                Tuning::default()
            }
        };
        let settings = Settings::load(&store);
        let best = BestScore::load(&store);
        let mut state = GameState::new(seed, viewport, tuning, settings.word_list());
        state.set_difficulty(settings.difficulty);
        log::info!(
            "Session ready (seed {seed}, {:?}, {} words)",
            settings.difficulty,
            state.words.list().len()
        );
        Self {
            state,
            store,
            settings,
            best_before_run: best.score,
            best,
            clock: FrameClock::new(),
            intents: IntentQueue::new(),
            idle_mode: false,
            events: Vec::new(),
        }
    }

    /// Start a fresh run from START or OVER. Ignored mid-run.
    pub fn start_run(&mut self) -> bool {
        if self.state.phase == GamePhase::Run {
            return false;
        }
        self.intents.clear();
        self.best_before_run = self.best.score;
        self.state.begin_run();
        self.collect_events();
        true
    }

    /// Back to the title screen
    pub fn back_to_start(&mut self) {
        self.intents.clear();
        self.state.return_to_start();
    }

    pub fn push_intent(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Returns whether `key` is a game key
    pub fn push_key(&mut self, key: &str) -> bool {
        self.intents.push_key(key)
    }

    /// Pointer/touch at viewport `y`
    pub fn push_pointer(&mut self, y: f32) {
        if let Some(intent) = intent_for_pointer(y, self.state.player.y) {
            self.intents.push(intent);
        }
    }

    /// Advance to host timestamp `now_ms`. Returns the dt used.
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        let dt = self.clock.advance(now_ms);
        self.step(dt);
        dt
    }

    /// Advance by `dt` seconds (clamped inside `tick`)
    pub fn step(&mut self, dt: f32) {
        let input = TickInput {
            intents: self.intents.drain(),
            idle_mode: self.idle_mode,
        };
        tick(&mut self.state, &input, dt);
        self.collect_events();
    }

    /// Forget the last timestamp so a hidden tab doesn't produce one huge step
    pub fn resume_clock(&mut self) {
        self.clock.reset();
    }

    fn collect_events(&mut self) {
        let events: Vec<GameEvent> = self.state.events.drain(..).collect();
        for event in &events {
            if let GameEvent::RunEnded { score, .. } = event {
                if self.best.record(*score) {
                    self.best.save(&mut self.store);
                }
            }
        }
        self.events.extend(events);
        if self.events.len() > MAX_PENDING_EVENTS {
            let excess = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        snapshot(&self.state, self.best.score)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.state.score,
            best_score: self.best.score,
            new_best: self.state.score > self.best_before_run,
            words_completed: self.state.words_completed,
            level: self.state.level,
            city: self.state.city_name(),
            time_left: self.state.time_left.max(0.0).round() as u32,
            reason: self.state.end_reason,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.state.set_viewport(Viewport::new(width, height));
    }

    /// Use a custom word list and persist it. The current word is finished
    /// first; unusable lists fall back to the language defaults.
    pub fn set_word_list<T: AsRef<str>>(&mut self, words: &[T]) {
        self.settings.set_custom_words(words);
        self.settings.save(&mut self.store);
        self.state.set_word_list(self.settings.word_list());
    }

    /// Drop the custom list in favour of the language defaults
    pub fn use_default_words(&mut self) {
        self.settings.use_custom_words = false;
        self.settings.save(&mut self.store);
        self.state.set_word_list(self.settings.word_list());
    }

    /// Hard-mode factors apply from the next run; Easy clears obstacles now
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        self.settings.save(&mut self.store);
        self.state.set_difficulty(difficulty);
    }

    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
        self.settings.save(&mut self.store);
        self.state.set_word_list(self.settings.word_list());
    }

    /// Let the autopilot steer whenever no intent is queued
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    pub fn best_score(&self) -> u64 {
        self.best.score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
