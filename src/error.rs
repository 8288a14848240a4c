//! Error types for mccormick.

use thiserror::Error;

/// Error type for relaxation operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McError {
    /// Integer power outside the supported pattern.
    #[error("Unsupported exponent: x^{0} has no relaxation rule")]
    UnsupportedExponent(i32),

    /// Reciprocal or division over an interval containing zero.
    #[error("Singular reciprocal: interval [{lb}, {ub}] contains zero")]
    SingularReciprocal { lb: f64, ub: f64 },

    /// Logarithm over a domain that is not strictly positive.
    #[error("Invalid log domain: lower bound {lb} must be positive")]
    InvalidLogDomain { lb: f64 },

    /// Square root over a domain with negative values.
    #[error("Invalid sqrt domain: lower bound {lb} must be nonnegative")]
    InvalidSqrtDomain { lb: f64 },

    /// Scalar operand that is not a finite number.
    #[error("Unsupported operand: {0}")]
    UnsupportedOperand(String),

    /// Operands built from contexts with different dimensions.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Invalid leaf specification.
    #[error("Invalid leaf: {0}")]
    InvalidLeaf(String),
}

/// Result type for relaxation operations.
pub type Result<T> = std::result::Result<T, McError>;
