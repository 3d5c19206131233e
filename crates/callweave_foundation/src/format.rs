//! Decimal display policy for float values.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controls how a float renders as text.
///
/// A float always carries a format so that the same numeric value can
/// display differently depending on where it came from: a rounding method
/// keeps its input's format, while freshly computed floats pick up the
/// engine default of at most two decimals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloatFormat {
    /// Minimum number of decimal places always shown.
    pub min_decimals: u8,
    /// Maximum number of decimal places; the value is rounded to this.
    pub max_decimals: u8,
}

impl FloatFormat {
    /// The engine default: up to two decimals, trailing zeros trimmed.
    pub const DEFAULT: Self = Self {
        min_decimals: 0,
        max_decimals: 2,
    };

    /// Creates a format showing between `min` and `max` decimal places.
    ///
    /// If `min > max`, `max` wins for both bounds.
    #[must_use]
    pub fn new(min: u8, max: u8) -> Self {
        Self {
            min_decimals: min.min(max),
            max_decimals: max,
        }
    }

    /// Creates a format showing exactly `decimals` decimal places.
    #[must_use]
    pub fn exact(decimals: u8) -> Self {
        Self::new(decimals, decimals)
    }

    /// Renders `value` according to this format.
    ///
    /// The value is rounded to `max_decimals` places, then trailing zeros
    /// are trimmed down to `min_decimals`. A dangling decimal point is
    /// dropped.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let mut text = format!("{value:.*}", usize::from(self.max_decimals));
        if let Some(dot) = text.find('.') {
            let floor = dot + 1 + usize::from(self.min_decimals);
            while text.len() > floor && text.ends_with('0') {
                text.pop();
            }
            if text.ends_with('.') {
                text.pop();
            }
        }
        text
    }
}

impl Default for FloatFormat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} decimals", self.min_decimals, self.max_decimals)
    }
}
