//! Lane geometry
//!
//! Maps a lane index to the vertical anchor every entity in that lane stands
//! on. Pure: the same (lane, height) always gives the same anchor, so drawing
//! and collision agree exactly.

use serde::{Deserialize, Serialize};

use crate::consts::{LANE_FRACTIONS, LANES};

/// Lane anchors as fractions of viewport height, strictly increasing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    fractions: [f32; LANES],
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self {
            fractions: LANE_FRACTIONS,
        }
    }
}

impl LaneLayout {
    /// Evenly spaced lanes between `top` and `bottom` (fractions of height)
    pub fn even(top: f32, bottom: f32) -> Option<Self> {
        if LANES == 1 {
            return Self::from_fractions([top; LANES]);
        }
        let step = (bottom - top) / (LANES - 1) as f32;
        let mut fractions = [0.0; LANES];
        for (i, f) in fractions.iter_mut().enumerate() {
            *f = top + step * i as f32;
        }
        Self::from_fractions(fractions)
    }

    /// Custom lane fractions. Rejects anything not strictly increasing inside [0, 1].
    pub fn from_fractions(fractions: [f32; LANES]) -> Option<Self> {
        let in_range = fractions.iter().all(|f| (0.0..=1.0).contains(f));
        let increasing = fractions.windows(2).all(|w| w[0] < w[1]);
        (in_range && increasing).then_some(Self { fractions })
    }

    /// Vertical anchor of `lane` for a viewport `height` px tall.
    /// Out-of-range lanes clamp to the nearest real lane.
    #[inline]
    pub fn anchor_y(&self, lane: usize, height: f32) -> f32 {
        self.fractions[lane.min(LANES - 1)] * height
    }

    /// Lane whose anchor is closest to `y`
    pub fn nearest_lane(&self, y: f32, height: f32) -> usize {
        (0..LANES)
            .min_by(|&a, &b| {
                let da = (self.anchor_y(a, height) - y).abs();
                let db = (self.anchor_y(b, height) - y).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(0)
    }
}
