//! Input contract for the engine.
//!
//! Hosts build one of these per tick. Cancellations are applied before
//! stepping, so a cancelled handle never writes again, including on the tick
//! that carries the cancel.

use serde::{Deserialize, Serialize};

use crate::ids::HandleId;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inputs {
    /// Handles to cancel before stepping.
    #[serde(default)]
    pub cancels: Vec<HandleId>,
}

impl Inputs {
    /// Convenience for the common single-cancel case.
    pub fn cancel(handle: HandleId) -> Self {
        Self {
            cancels: vec![handle],
        }
    }
}
