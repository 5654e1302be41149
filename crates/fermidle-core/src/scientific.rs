//! Scientific-notation helpers.
//!
//! Answers are compared by their base-10 order of magnitude, so everything in
//! the game funnels through [`magnitude`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FermidleError;

/// A value split into `base × 10^magnitude`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scientific {
    /// Base-10 order of magnitude.
    pub magnitude: i32,
    /// The leading digit, rounded. May be 10 when the base rounds up.
    pub digit: u32,
    /// The base rendered with `precision - 1` decimals.
    pub base: String,
}

impl fmt::Display for Scientific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × 10^{}", self.base, self.magnitude)
    }
}

/// Base-10 order of magnitude of `value`, i.e. `floor(log10(value))`.
///
/// Read from the shortest round-trip exponent rather than `log10`, so values
/// written as exact powers of ten (`1e-23`, `1000.0`) land on their own
/// exponent.
pub fn magnitude(value: f64) -> Result<i32, FermidleError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FermidleError::InvalidValue(value));
    }
    format!("{value:e}")
        .rsplit_once('e')
        .and_then(|(_, exponent)| exponent.parse().ok())
        .ok_or(FermidleError::InvalidValue(value))
}

/// Split `value` into scientific notation with `precision` significant digits.
///
/// A precision of 0 is treated as 1.
pub fn scientific(value: f64, precision: usize) -> Result<Scientific, FermidleError> {
    let magnitude = magnitude(value)?;
    let base = value / 10f64.powi(magnitude);
    let decimals = precision.max(1) - 1;
    Ok(Scientific {
        magnitude,
        digit: base.round() as u32,
        base: format!("{base:.decimals$}"),
    })
}
