//! Output contract from the engine.
//!
//! Changes carry per-key values for this tick; events are discrete semantic
//! signals. Adapters apply changes to the host and transport events.

use serde::{Deserialize, Serialize};

use crate::ids::HandleId;
use crate::value::Value;

/// One changed target value this tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Change {
    pub handle: HandleId,
    pub key: String, // TargetHandle (small string key)
    pub value: Value,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum EffectEvent {
    /// First write for an effect (start delay elapsed).
    Started { handle: HandleId },
    /// A typewriter segment reached full reveal.
    SegmentTyped { handle: HandleId, index: usize },
    /// The effect reached its final state.
    Completed { handle: HandleId },
}

/// Outputs returned by `Engine::update()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<EffectEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: EffectEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Last value written to `key` this tick, if any.
    pub fn latest_for(&self, key: &str) -> Option<&Value> {
        self.changes
            .iter()
            .rev()
            .find(|c| c.key == key)
            .map(|c| &c.value)
    }
}
