//! Calculator operation set.
//!
//! Every operation of the `calculator.Calculator` schema has a default
//! implementation that reports [`CalculatorOpError::Unimplemented`]. A backend
//! overrides only the operations it actually supports.

use std::fmt;

/// Operations defined by the calculator schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Exponentiate,
}

impl Operation {
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulus,
        Self::Exponentiate,
    ];

    /// gRPC method name, as it appears in `/calculator.Calculator/<name>`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Modulus => "Modulus",
            Self::Exponentiate => "Exponentiate",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operand pair as received on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operands {
    pub a: f64,
    pub b: f64,
}

impl Operands {
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Both operands truncated toward zero.
    ///
    /// `NaN` becomes `0`; infinities and out-of-range values saturate at
    /// `i64::MIN` / `i64::MAX`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn truncated(self) -> (i64, i64) {
        (self.a as i64, self.b as i64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculatorOpError {
    #[error("method {operation} not implemented")]
    Unimplemented { operation: Operation },
}

fn unimplemented(operation: Operation) -> CalculatorOpError {
    CalculatorOpError::Unimplemented { operation }
}

/// The calculator operation set.
///
/// # Errors
/// Every method returns [`CalculatorOpError::Unimplemented`] unless overridden.
pub trait CalculatorOps: Send + Sync + 'static {
    fn add(&self, _operands: Operands) -> Result<f64, CalculatorOpError> {
        Err(unimplemented(Operation::Add))
    }

    fn subtract(&self, _operands: Operands) -> Result<f64, CalculatorOpError> {
        Err(unimplemented(Operation::Subtract))
    }

    fn multiply(&self, _operands: Operands) -> Result<f64, CalculatorOpError> {
        Err(unimplemented(Operation::Multiply))
    }

    fn divide(&self, _operands: Operands) -> Result<f64, CalculatorOpError> {
        Err(unimplemented(Operation::Divide))
    }

    fn modulus(&self, _operands: Operands) -> Result<f64, CalculatorOpError> {
        Err(unimplemented(Operation::Modulus))
    }

    fn exponentiate(&self, _operands: Operands) -> Result<f64, CalculatorOpError> {
        Err(unimplemented(Operation::Exponentiate))
    }

    /// Dispatch `operation` to the matching method.
    fn apply(&self, operation: Operation, operands: Operands) -> Result<f64, CalculatorOpError> {
        match operation {
            Operation::Add => self.add(operands),
            Operation::Subtract => self.subtract(operands),
            Operation::Multiply => self.multiply(operands),
            Operation::Divide => self.divide(operands),
            Operation::Modulus => self.modulus(operands),
            Operation::Exponentiate => self.exponentiate(operands),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NothingImplemented;

    impl CalculatorOps for NothingImplemented {}

    struct AddOnly;

    impl CalculatorOps for AddOnly {
        fn add(&self, operands: Operands) -> Result<f64, CalculatorOpError> {
            Ok(operands.a + operands.b)
        }
    }

    #[test]
    fn every_default_operation_is_unimplemented() {
        let ops = NothingImplemented;
        for operation in Operation::ALL {
            assert_eq!(
                ops.apply(operation, Operands::new(1.0, 2.0)),
                Err(CalculatorOpError::Unimplemented { operation })
            );
        }
    }

    #[test]
    fn apply_routes_to_overridden_method() {
        let ops = AddOnly;
        assert_eq!(ops.apply(Operation::Add, Operands::new(1.5, 2.0)), Ok(3.5));
        assert!(ops.apply(Operation::Subtract, Operands::new(1.5, 2.0)).is_err());
    }

    #[test]
    fn unimplemented_error_names_the_method() {
        let err = unimplemented(Operation::Exponentiate);
        assert_eq!(err.to_string(), "method Exponentiate not implemented");
    }

    #[test]
    fn operation_names_match_schema_methods() {
        let names: Vec<&str> = Operation::ALL.iter().copied().map(Operation::name).collect();
        assert_eq!(
            names,
            ["Add", "Subtract", "Multiply", "Divide", "Modulus", "Exponentiate"]
        );
    }

    #[test]
    fn truncation_discards_fraction_toward_zero() {
        assert_eq!(Operands::new(7.9, 3.0).truncated(), (7, 3));
        assert_eq!(Operands::new(-7.9, -3.2).truncated(), (-7, -3));
        assert_eq!(Operands::new(0.99, -0.99).truncated(), (0, 0));
    }

    #[test]
    fn truncation_saturates_non_finite_values() {
        assert_eq!(Operands::new(f64::NAN, 1.0).truncated(), (0, 1));
        assert_eq!(
            Operands::new(f64::INFINITY, f64::NEG_INFINITY).truncated(),
            (i64::MAX, i64::MIN)
        );
        assert_eq!(Operands::new(1e300, -1e300).truncated(), (i64::MAX, i64::MIN));
    }
}
