//! Effect configuration errors.

use thiserror::Error;

/// Rejections reported synchronously by `Engine::start_*`. Invalid requests
/// are never scheduled, and ticks themselves never error; empty input is not
/// an error (the effect completes immediately instead).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EffectError {
    #[error("duration must be >= 0, got {0}")]
    NegativeDuration(f32),
    #[error("reveal delay {reveal_delay} outside [0, {duration}]")]
    RevealDelayOutOfRange { reveal_delay: f32, duration: f32 },
    #[error("scramble speed must be > 0, got {0}")]
    NonPositiveSpeed(f32),
    #[error("start delay must be >= 0, got {0}")]
    NegativeDelay(f32),
    #[error("typing speed must be >= 0, got {0}")]
    NegativeTypingSpeed(f32),
    #[error("custom scramble alphabet is empty")]
    EmptyAlphabet,
}
