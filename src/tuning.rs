//! Data-driven game balance
//!
//! Every knob here was tuned by feel. Partial JSON overrides are accepted:
//! missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Letter pacing ===
    /// Seconds between letter spawn attempts at run start
    pub letter_interval_start: f32,
    /// Floor for the letter spawn interval
    pub letter_interval_min: f32,
    /// Interval reduction per completed word
    pub letter_interval_step: f32,

    // === Obstacle pacing ===
    /// Seconds between obstacle spawn attempts at run start
    pub obstacle_interval_start: f32,
    /// Floor for the obstacle spawn interval
    pub obstacle_interval_min: f32,
    /// Interval multiplier applied on each level-up
    pub obstacle_level_factor: f32,

    // === Speeds (px/s) ===
    pub letter_speed_min_start: f32,
    pub letter_speed_max_start: f32,
    /// Added to both ends of the speed range per increment
    pub letter_speed_step: f32,

    // === Caps ===
    pub letter_lane_cap: usize,
    pub letter_global_cap: usize,
    pub obstacle_lane_cap: usize,

    // === Spawn policy ===
    /// Chance a letter spawn is the needed letter
    pub needed_letter_chance: f32,
    /// Share of distractors drawn from the confusable table
    pub confusable_share: f32,
    /// Force the needed letter once it has been missing this long (seconds)
    pub safety_spawn_after: f32,

    // === Rewards ===
    /// Seconds added per correct letter
    pub letter_time_bonus: f32,
    /// Seconds added per completed word
    pub word_time_bonus: f32,

    // === Word phase durations (seconds) ===
    pub celebrate_secs: f32,
    pub focus_secs: f32,

    // === Feedback ===
    pub flash_secs: f32,
    pub level_banner_secs: f32,
    pub floater_secs: f32,
    /// Floating text rise speed (px/s)
    pub floater_rise: f32,

    // === Player tween ===
    pub lane_tween_secs: f32,
    /// Peak bounce offset during a lane change (px)
    pub lane_bounce_px: f32,

    // === Hard mode ===
    pub hard_speed_factor: f32,
    pub hard_interval_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            letter_interval_start: 0.85,
            letter_interval_min: 0.4,
            letter_interval_step: 0.02,

            obstacle_interval_start: 2.4,
            obstacle_interval_min: 0.9,
            obstacle_level_factor: 0.85,

            letter_speed_min_start: 160.0,
            letter_speed_max_start: 220.0,
            letter_speed_step: 8.0,

            letter_lane_cap: 2,
            letter_global_cap: 5,
            obstacle_lane_cap: 1,

            needed_letter_chance: 0.62,
            confusable_share: 0.7,
            safety_spawn_after: 2.0,

            letter_time_bonus: 1.0,
            word_time_bonus: 4.0,

            celebrate_secs: 1.4,
            focus_secs: 1.1,

            flash_secs: 0.3,
            level_banner_secs: 2.0,
            floater_secs: 0.9,
            floater_rise: 60.0,

            lane_tween_secs: 0.22,
            lane_bounce_px: 10.0,

            hard_speed_factor: 1.2,
            hard_interval_factor: 0.85,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = 0.0_f32..=1.0;
        if !unit.contains(&self.needed_letter_chance) {
            return Err(ConfigError::Invalid("needed_letter_chance must be in [0, 1]"));
        }
        if !unit.contains(&self.confusable_share) {
            return Err(ConfigError::Invalid("confusable_share must be in [0, 1]"));
        }
        if self.letter_interval_min <= 0.0 || self.obstacle_interval_min <= 0.0 {
            return Err(ConfigError::Invalid("spawn interval floors must be positive"));
        }
        if self.letter_interval_start < self.letter_interval_min
            || self.obstacle_interval_start < self.obstacle_interval_min
        {
            return Err(ConfigError::Invalid("spawn intervals must start above their floor"));
        }
        if self.letter_speed_min_start <= 0.0
            || self.letter_speed_max_start < self.letter_speed_min_start
        {
            return Err(ConfigError::Invalid("letter speed range is empty"));
        }
        if self.letter_lane_cap == 0 || self.letter_global_cap == 0 {
            return Err(ConfigError::Invalid("letter caps must be at least 1"));
        }
        if self.safety_spawn_after <= 0.0 {
            return Err(ConfigError::Invalid("safety_spawn_after must be positive"));
        }
        if self.obstacle_level_factor <= 0.0 || self.obstacle_level_factor > 1.0 {
            return Err(ConfigError::Invalid("obstacle_level_factor must be in (0, 1]"));
        }
        if self.lane_tween_secs <= 0.0 {
            return Err(ConfigError::Invalid("lane_tween_secs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "safety_spawn_after": 3.5 }"#).unwrap();
        assert_eq!(tuning.safety_spawn_after, 3.5);
        assert_eq!(tuning.confusable_share, Tuning::default().confusable_share);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "needed_letter_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
