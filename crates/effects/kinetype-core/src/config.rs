//! Engine-wide tunables.

use serde::{Deserialize, Serialize};

/// Shared timing constants for all effects in one engine. Per-effect numbers
/// live on the specs; these are the knobs the effects treat as fixed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-tick probability scale for re-rolling an unrevealed scramble slot.
    /// Effective probability is `spec.speed * reroll_scale`, clamped to [0, 1].
    pub reroll_scale: f32,

    /// Pause between typewriter segments, seconds.
    pub segment_pause: f32,

    /// Caret fade duration in each direction, seconds.
    pub caret_fade: f32,

    /// Caret hold at full/zero opacity before each fade, seconds.
    pub caret_hold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reroll_scale: 0.1,
            segment_pause: 0.2,
            caret_fade: 0.5,
            caret_hold: 0.2,
        }
    }
}
