//! Runtime values emitted toward bound targets.
//!
//! `Text` carries the visible string for a slot; `Float` carries the caret
//! opacity. Serialized in the tagged `{ "type": ..., "data": ... }` form so
//! adapters can dispatch without peeking at the key.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Visible text for a target slot
    Text(String),

    /// Scalar float (caret opacity)
    Float(f32),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}
