//! Scramble reveal: unrevealed slots flicker with alphabet characters while
//! the target string locks in over the reveal window.
//!
//! The sampler is a function of run-local elapsed time plus the retained
//! per-slot flicker memory; slots keep their last character between re-rolls
//! so the effect reads as flicker rather than full noise each frame.

use serde::{Deserialize, Serialize};

use crate::alphabet::ScrambleAlphabet;
use crate::config::Config;
use crate::error::EffectError;
use crate::rng::FlickerRng;

fn default_duration() -> f32 {
    2.0
}
fn default_speed() -> f32 {
    1.0
}
fn default_tween_length() -> bool {
    true
}

/// Request for one scramble reveal run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScrambleSpec {
    /// Target text; the output converges to exactly this string.
    pub text: String,

    /// Character set for unrevealed slots.
    #[serde(default)]
    pub chars: ScrambleAlphabet,

    /// Total run duration, seconds. Zero resolves to the target immediately.
    #[serde(default = "default_duration")]
    pub duration: f32,

    /// Delay before the run starts, seconds.
    #[serde(default)]
    pub delay: f32,

    /// Delay within the run before characters begin locking in.
    #[serde(default)]
    pub reveal_delay: f32,

    /// Scramble refresh rate: how often unrevealed slots re-roll.
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Reveal from the tail instead of the head.
    #[serde(default)]
    pub right_to_left: bool,

    /// Morph the visible length from the placeholder's to the target's over
    /// the run instead of snapping to the target length.
    #[serde(default = "default_tween_length")]
    pub tween_length: bool,

    /// Initial visible text; its length seeds the length tween. Defaults to
    /// the target text itself.
    #[serde(default)]
    pub placeholder: Option<String>,

    /// Fixed RNG seed. Derived from the handle when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ScrambleSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chars: ScrambleAlphabet::default(),
            duration: default_duration(),
            delay: 0.0,
            reveal_delay: 0.0,
            speed: default_speed(),
            right_to_left: false,
            tween_length: default_tween_length(),
            placeholder: None,
            seed: None,
        }
    }

    /// Final true content, for the host's assistive-technology label.
    pub fn accessible_text(&self) -> &str {
        &self.text
    }

    pub fn validate(&self) -> Result<(), EffectError> {
        if self.duration < 0.0 {
            return Err(EffectError::NegativeDuration(self.duration));
        }
        if self.delay < 0.0 {
            return Err(EffectError::NegativeDelay(self.delay));
        }
        if self.reveal_delay < 0.0 || self.reveal_delay > self.duration {
            return Err(EffectError::RevealDelayOutOfRange {
                reveal_delay: self.reveal_delay,
                duration: self.duration,
            });
        }
        if self.speed <= 0.0 {
            return Err(EffectError::NonPositiveSpeed(self.speed));
        }
        self.chars.resolve().map(|_| ())
    }
}

/// Live state for one run: resolved alphabet, target characters, the
/// previously displayed character per slot, and the flicker RNG.
#[derive(Debug)]
pub struct ScrambleState {
    spec: ScrambleSpec,
    target: Vec<char>,
    alphabet: Vec<char>,
    placeholder_len: usize,
    slots: Vec<char>,
    rng: FlickerRng,
    reroll_p: f32,
}

impl ScrambleState {
    pub fn new(spec: ScrambleSpec, cfg: &Config, fallback_seed: u64) -> Result<Self, EffectError> {
        spec.validate()?;
        let alphabet = spec.chars.resolve()?;
        let target: Vec<char> = spec.text.chars().collect();
        let placeholder_len = spec
            .placeholder
            .as_ref()
            .map(|p| p.chars().count())
            .unwrap_or(target.len());
        let mut rng = FlickerRng::new(spec.seed.unwrap_or(fallback_seed));
        let slot_count = placeholder_len.max(target.len());
        let slots = (0..slot_count)
            .map(|_| alphabet[rng.next_index(alphabet.len())])
            .collect();
        let reroll_p = (spec.speed * cfg.reroll_scale).clamp(0.0, 1.0);
        Ok(Self {
            spec,
            target,
            alphabet,
            placeholder_len,
            slots,
            rng,
            reroll_p,
        })
    }

    pub fn delay(&self) -> f32 {
        self.spec.delay
    }

    /// True once `local` reaches the end of the run, or there is nothing to
    /// animate in the first place.
    pub fn is_complete(&self, local: f32) -> bool {
        self.target.is_empty() || self.spec.duration <= 0.0 || local >= self.spec.duration
    }

    /// Final text, written verbatim on completion.
    pub fn final_text(&self) -> &str {
        &self.spec.text
    }

    /// Visible string at `local` seconds into the run. Advances the flicker
    /// memory for unrevealed slots.
    pub fn frame(&mut self, local: f32) -> String {
        if self.is_complete(local) {
            return self.spec.text.clone();
        }
        let duration = self.spec.duration;
        let total = (local / duration).clamp(0.0, 1.0);
        let reveal = reveal_progress(local, self.spec.reveal_delay, duration);
        let target_len = self.target.len();
        let displayed = if self.spec.tween_length {
            lerp_len(self.placeholder_len, target_len, total)
        } else {
            target_len
        };
        let revealed = revealed_count(reveal, target_len);

        let mut out = String::with_capacity(displayed);
        for i in 0..displayed {
            let locked = if self.spec.right_to_left {
                i + revealed >= displayed
            } else {
                i < revealed
            };
            if locked && i < target_len {
                out.push(self.target[i]);
            } else {
                if self.rng.next_f32() < self.reroll_p {
                    self.slots[i] = self.alphabet[self.rng.next_index(self.alphabet.len())];
                }
                out.push(self.slots[i]);
            }
        }
        out
    }
}

/// Fraction of the target considered locked in at `local` seconds. Clamped
/// to [0, 1]; when the reveal window collapses to zero the reveal snaps at
/// the end of the run.
pub fn reveal_progress(local: f32, reveal_delay: f32, duration: f32) -> f32 {
    let span = duration - reveal_delay;
    if span <= 0.0 {
        return if local >= duration { 1.0 } else { 0.0 };
    }
    ((local - reveal_delay) / span).clamp(0.0, 1.0)
}

/// Number of locked-in characters for a reveal fraction.
pub fn revealed_count(progress: f32, len: usize) -> usize {
    ((progress * len as f32).floor() as usize).min(len)
}

fn lerp_len(from: usize, to: usize, t: f32) -> usize {
    (from as f32 + (to as f32 - from as f32) * t).round() as usize
}
