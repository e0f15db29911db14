//! Experience to difficulty level mapping
//!
//! Square-root curve: the first levels arrive quickly, later ones need
//! quadratically more experience.

use serde::{Deserialize, Serialize};

/// Pure xp -> level curve, clamped to `[1, max_level]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCurve {
    /// Curve steepness: level = 1 + floor(k * sqrt(xp))
    pub k: f32,
    /// Inclusive level cap
    pub max_level: u32,
}

impl DifficultyCurve {
    pub fn new(k: f32, max_level: u32) -> Self {
        Self { k, max_level }
    }

    /// Map accumulated experience to a difficulty level.
    ///
    /// Monotone non-decreasing in `xp`; negative input is treated as zero.
    pub fn level_for(&self, xp: f32) -> u32 {
        let xp = xp.max(0.0);
        // The cast saturates for absurd xp, so the +1 must too
        let raw = ((self.k * xp.sqrt()) as u32).saturating_add(1);
        raw.clamp(1, self.max_level)
    }

    /// Level assigned before any experience is earned.
    pub fn floor_level(&self) -> u32 {
        self.level_for(0.0)
    }
}
