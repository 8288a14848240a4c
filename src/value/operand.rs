//! Operands accepted by the mixed composite/scalar operations.

use crate::error::{McError, Result};

use super::McCormick;

/// Right-hand side of a binary operation: another composite value or a
/// plain scalar broadcast to both bounds.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// A composite value.
    Composite(&'a McCormick),
    /// A plain number.
    Scalar(f64),
}

impl Operand<'_> {
    /// Check that a scalar operand is a finite number.
    pub fn validate(self) -> Result<Self> {
        match self {
            Operand::Scalar(c) if !c.is_finite() => Err(McError::UnsupportedOperand(format!(
                "scalar operand {} is not finite",
                c
            ))),
            other => Ok(other),
        }
    }
}

impl<'a> From<&'a McCormick> for Operand<'a> {
    fn from(value: &'a McCormick) -> Self {
        Operand::Composite(value)
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<i32> for Operand<'_> {
    fn from(value: i32) -> Self {
        Operand::Scalar(f64::from(value))
    }
}
