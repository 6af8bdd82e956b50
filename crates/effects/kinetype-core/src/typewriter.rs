//! Typewriter sequencer: ordered segments typed one character at a time,
//! with an optional caret blinking once the sequence completes.
//!
//! Segments render into separate order-preserving sub-targets joined by a
//! single space at render time; insertion order equals display order. The
//! whole schedule is fixed at start, so the sequencer is a pure function of
//! run-local elapsed time.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::EffectError;

fn default_typing_speed() -> f32 {
    0.05
}
fn default_show_cursor() -> bool {
    true
}

/// Request for one typewriter run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypewriterSpec {
    /// Segments in display order.
    pub texts: Vec<String>,

    /// Delay before the run starts, seconds.
    #[serde(default)]
    pub delay: f32,

    /// Seconds per typed character.
    #[serde(default = "default_typing_speed")]
    pub typing_speed: f32,

    /// Blink a caret once the sequence completes.
    #[serde(default = "default_show_cursor")]
    pub show_cursor: bool,
}

impl TypewriterSpec {
    pub fn new(texts: Vec<String>) -> Self {
        Self {
            texts,
            delay: 0.0,
            typing_speed: default_typing_speed(),
            show_cursor: default_show_cursor(),
        }
    }

    /// Full content with the render-time single-space joins, for the host's
    /// assistive-technology label.
    pub fn accessible_text(&self) -> String {
        self.texts.join(" ")
    }

    pub fn validate(&self) -> Result<(), EffectError> {
        if self.delay < 0.0 {
            return Err(EffectError::NegativeDelay(self.delay));
        }
        if self.typing_speed < 0.0 {
            return Err(EffectError::NegativeTypingSpeed(self.typing_speed));
        }
        Ok(())
    }
}

/// Sequencer phase at a point in run-local time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Typing segment `index` with `visible` characters shown.
    Typing { index: usize, visible: usize },
    /// Waiting out the pause after segment `index`.
    Pause { index: usize },
    /// All segments fully typed.
    Done,
}

/// Precomputed schedule for one run.
#[derive(Debug)]
pub struct TypewriterState {
    spec: TypewriterSpec,
    /// Per-segment [start, end) typing windows in run-local seconds.
    windows: Vec<(f32, f32)>,
    seg_chars: Vec<Vec<char>>,
    /// Run-local time at which the sequence is done and the caret may blink.
    done_at: f32,
    caret_fade: f32,
    caret_hold: f32,
}

impl TypewriterState {
    pub fn new(spec: TypewriterSpec, cfg: &Config) -> Result<Self, EffectError> {
        spec.validate()?;
        let seg_chars: Vec<Vec<char>> = spec.texts.iter().map(|t| t.chars().collect()).collect();
        let mut windows = Vec::with_capacity(seg_chars.len());
        let mut cursor = 0.0f32;
        for chars in &seg_chars {
            let typed = chars.len() as f32 * spec.typing_speed;
            windows.push((cursor, cursor + typed));
            cursor += typed + cfg.segment_pause;
        }
        let done_at = windows.last().map(|w| w.1).unwrap_or(0.0);
        Ok(Self {
            spec,
            windows,
            seg_chars,
            done_at,
            caret_fade: cfg.caret_fade,
            caret_hold: cfg.caret_hold,
        })
    }

    pub fn delay(&self) -> f32 {
        self.spec.delay
    }

    pub fn show_cursor(&self) -> bool {
        self.spec.show_cursor
    }

    pub fn segment_count(&self) -> usize {
        self.seg_chars.len()
    }

    pub fn segment_text(&self, index: usize) -> &str {
        &self.spec.texts[index]
    }

    /// End of segment `index`'s typing window, run-local seconds.
    pub fn window_end(&self, index: usize) -> f32 {
        self.windows[index].1
    }

    /// Run-local time at which every segment is fully typed.
    pub fn done_at(&self) -> f32 {
        self.done_at
    }

    /// Phase of the sequencer at `local` seconds (`local >= 0`).
    pub fn phase_at(&self, local: f32) -> Phase {
        if self.windows.is_empty() || local >= self.done_at {
            return Phase::Done;
        }
        for (i, &(start, end)) in self.windows.iter().enumerate() {
            if local < start {
                // Segment 0 starts at 0, so a pause always follows i - 1.
                return Phase::Pause { index: i - 1 };
            }
            if local < end {
                return Phase::Typing {
                    index: i,
                    visible: self.visible_chars(i, local),
                };
            }
        }
        Phase::Done
    }

    /// Characters of segment `index` visible at `local` seconds.
    pub fn visible_chars(&self, index: usize, local: f32) -> usize {
        let (start, end) = self.windows[index];
        let len = self.seg_chars[index].len();
        if len == 0 || local >= end {
            return len;
        }
        if local <= start {
            return 0;
        }
        let progress = (local - start) / (end - start);
        ((progress * len as f32).floor() as usize).min(len)
    }

    /// Visible prefix of segment `index`.
    pub fn prefix(&self, index: usize, visible: usize) -> String {
        self.seg_chars[index][..visible.min(self.seg_chars[index].len())]
            .iter()
            .collect()
    }

    /// Caret opacity at `local` seconds: 1.0 until the sequence completes,
    /// then an infinite hold/fade blink loop.
    pub fn caret_opacity(&self, local: f32) -> f32 {
        if local < self.done_at {
            return 1.0;
        }
        let fade = self.caret_fade.max(1e-6);
        let half = self.caret_hold + fade;
        let period = 2.0 * half;
        let t = (local - self.done_at) % period;
        if t < self.caret_hold {
            1.0
        } else if t < half {
            1.0 - (t - self.caret_hold) / fade
        } else if t < half + self.caret_hold {
            0.0
        } else {
            (t - half - self.caret_hold) / fade
        }
    }
}
