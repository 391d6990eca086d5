//! Frame clock
//!
//! Turns host timestamps (milliseconds, e.g. `requestAnimationFrame`) into a
//! clamped per-frame delta.

use crate::sim::clamp_dt;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. The first call returns 0; backwards
    /// jumps return 0 and long stalls are capped at `MAX_DT`.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last = Some(now_ms);
        clamp_dt(dt)
    }

    /// Forget the previous timestamp, e.g. when a tab becomes visible again
    pub fn reset(&mut self) {
        self.last = None;
    }
}
