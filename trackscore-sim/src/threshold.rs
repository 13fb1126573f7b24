use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tuning::BASELINE_THRESHOLD;

/// Minimum order-quality cutoff selected on the dashboard slider.
///
/// Always within `0..=100`; every constructor clamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    pub const MIN: Threshold = Threshold(0);
    pub const MAX: Threshold = Threshold(100);

    /// Clamp any integer into the slider range.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The threshold as a fraction in `0.0..=1.0`.
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Parse slider text. Integers and decimals are accepted and clamped;
    /// anything else is an error.
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err("threshold must not be empty".to_string());
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return Ok(Self::new(v));
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Self::new(v.round() as i64)),
            _ => Err(format!("expected a number between 0 and 100, got '{}'", trimmed)),
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(BASELINE_THRESHOLD)
    }
}

impl From<u8> for Threshold {
    fn from(value: u8) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<i64> for Threshold {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Threshold> for u8 {
    fn from(t: Threshold) -> Self {
        t.0
    }
}

impl FromStr for Threshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
