//! Domain service for the modulus backend

use tracing::debug;

use super::ops::{CalculatorOpError, CalculatorOps, Operands};

/// Truncating remainder of `dividend` by `divisor`.
///
/// The sign follows the dividend. A zero divisor yields `0` rather than an
/// error, and `i64::MIN % -1` wraps to `0`.
#[must_use]
pub fn truncated_remainder(dividend: i64, divisor: i64) -> i64 {
    if divisor == 0 {
        return 0;
    }
    dividend.wrapping_rem(divisor)
}

// Remainders of integers that came in as doubles; rounding only matters past 2^53.
#[allow(clippy::cast_precision_loss)]
fn to_wire(value: i64) -> f64 {
    value as f64
}

/// Stateless service implementing only `Modulus` of the calculator set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModulusService;

impl ModulusService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CalculatorOps for ModulusService {
    fn modulus(&self, operands: Operands) -> Result<f64, CalculatorOpError> {
        let (a, b) = operands.truncated();
        if b == 0 {
            debug!(a, "zero divisor, answering 0");
        }

        let remainder = truncated_remainder(a, b);
        debug!(a, b, remainder, "performing modulus");

        Ok(to_wire(remainder))
    }
}
