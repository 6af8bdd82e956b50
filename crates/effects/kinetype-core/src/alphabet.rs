//! Scramble alphabets.
//!
//! Named classes cover the common cases; `Custom` carries a caller-supplied
//! character set. Unrevealed slots draw from the resolved set.

use serde::{Deserialize, Serialize};

use crate::error::EffectError;

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ScrambleAlphabet {
    #[default]
    UpperCase,
    LowerCase,
    UpperAndLowerCase,
    Custom(String),
}

impl ScrambleAlphabet {
    /// Resolve to the concrete character set used for unrevealed slots.
    /// A custom set must contain at least one character.
    pub fn resolve(&self) -> Result<Vec<char>, EffectError> {
        let chars: Vec<char> = match self {
            Self::UpperCase => UPPER.chars().collect(),
            Self::LowerCase => LOWER.chars().collect(),
            Self::UpperAndLowerCase => UPPER.chars().chain(LOWER.chars()).collect(),
            Self::Custom(set) => set.chars().collect(),
        };
        if chars.is_empty() {
            return Err(EffectError::EmptyAlphabet);
        }
        Ok(chars)
    }
}
