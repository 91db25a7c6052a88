//! Score value object (0-100 integer scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A normalized performance score between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Zero score.
    pub const ZERO: Self = Self(0);

    /// Perfect score.
    pub const MAX: Self = Self(100);

    /// Creates a new Score, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range("score", 0, 100, i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Rounds a raw value half-up and clamps it into `[0, 100]`.
    ///
    /// NaN maps to zero.
    pub fn from_f64(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::ZERO;
        }
        let rounded = (raw + 0.5).floor().clamp(0.0, 100.0);
        Self(rounded as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as f64.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }

    /// Returns true if the score is strictly below `threshold`.
    pub fn is_below(&self, threshold: u8) -> bool {
        self.0 < threshold
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<u8> for Score {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
