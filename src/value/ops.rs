//! Operator overloading for composite values.
//!
//! `+`, `-` and `*` accept composite values and `f64` scalars on either
//! side, owned or borrowed. They panic where the `try_*` methods on
//! [`McCormick`] return an error: operands from contexts of different
//! dimension, or a scalar that is not finite. Division can fail on
//! ordinary data (a divisor whose interval contains zero), so `/` returns
//! a [`Result`].

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::Result;

use super::McCormick;

fn unwrap_op(result: Result<McCormick>) -> McCormick {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

// ============================================================================
// Negation
// ============================================================================

impl Neg for McCormick {
    type Output = McCormick;

    fn neg(self) -> McCormick {
        self.negate()
    }
}

impl Neg for &McCormick {
    type Output = McCormick;

    fn neg(self) -> McCormick {
        self.negate()
    }
}

// ============================================================================
// Addition
// ============================================================================

impl Add<McCormick> for McCormick {
    type Output = McCormick;

    fn add(self, rhs: McCormick) -> McCormick {
        unwrap_op(self.try_add(&rhs))
    }
}

impl Add<&McCormick> for &McCormick {
    type Output = McCormick;

    fn add(self, rhs: &McCormick) -> McCormick {
        unwrap_op(self.try_add(rhs))
    }
}

impl Add<&McCormick> for McCormick {
    type Output = McCormick;

    fn add(self, rhs: &McCormick) -> McCormick {
        unwrap_op(self.try_add(rhs))
    }
}

impl Add<McCormick> for &McCormick {
    type Output = McCormick;

    fn add(self, rhs: McCormick) -> McCormick {
        unwrap_op(self.try_add(&rhs))
    }
}

impl Add<f64> for McCormick {
    type Output = McCormick;

    fn add(self, rhs: f64) -> McCormick {
        unwrap_op(self.try_add(rhs))
    }
}

impl Add<f64> for &McCormick {
    type Output = McCormick;

    fn add(self, rhs: f64) -> McCormick {
        unwrap_op(self.try_add(rhs))
    }
}

impl Add<McCormick> for f64 {
    type Output = McCormick;

    fn add(self, rhs: McCormick) -> McCormick {
        unwrap_op(rhs.try_add(self))
    }
}

impl Add<&McCormick> for f64 {
    type Output = McCormick;

    fn add(self, rhs: &McCormick) -> McCormick {
        unwrap_op(rhs.try_add(self))
    }
}

// ============================================================================
// Subtraction
// ============================================================================

impl Sub<McCormick> for McCormick {
    type Output = McCormick;

    fn sub(self, rhs: McCormick) -> McCormick {
        unwrap_op(self.try_sub(&rhs))
    }
}

impl Sub<&McCormick> for &McCormick {
    type Output = McCormick;

    fn sub(self, rhs: &McCormick) -> McCormick {
        unwrap_op(self.try_sub(rhs))
    }
}

impl Sub<&McCormick> for McCormick {
    type Output = McCormick;

    fn sub(self, rhs: &McCormick) -> McCormick {
        unwrap_op(self.try_sub(rhs))
    }
}

impl Sub<McCormick> for &McCormick {
    type Output = McCormick;

    fn sub(self, rhs: McCormick) -> McCormick {
        unwrap_op(self.try_sub(&rhs))
    }
}

impl Sub<f64> for McCormick {
    type Output = McCormick;

    fn sub(self, rhs: f64) -> McCormick {
        unwrap_op(self.try_sub(rhs))
    }
}

impl Sub<f64> for &McCormick {
    type Output = McCormick;

    fn sub(self, rhs: f64) -> McCormick {
        unwrap_op(self.try_sub(rhs))
    }
}

impl Sub<McCormick> for f64 {
    type Output = McCormick;

    fn sub(self, rhs: McCormick) -> McCormick {
        unwrap_op(rhs.negate().try_add(self))
    }
}

impl Sub<&McCormick> for f64 {
    type Output = McCormick;

    fn sub(self, rhs: &McCormick) -> McCormick {
        unwrap_op(rhs.negate().try_add(self))
    }
}

// ============================================================================
// Multiplication
// ============================================================================

impl Mul<McCormick> for McCormick {
    type Output = McCormick;

    fn mul(self, rhs: McCormick) -> McCormick {
        unwrap_op(self.try_mul(&rhs))
    }
}

impl Mul<&McCormick> for &McCormick {
    type Output = McCormick;

    fn mul(self, rhs: &McCormick) -> McCormick {
        unwrap_op(self.try_mul(rhs))
    }
}

impl Mul<&McCormick> for McCormick {
    type Output = McCormick;

    fn mul(self, rhs: &McCormick) -> McCormick {
        unwrap_op(self.try_mul(rhs))
    }
}

impl Mul<McCormick> for &McCormick {
    type Output = McCormick;

    fn mul(self, rhs: McCormick) -> McCormick {
        unwrap_op(self.try_mul(&rhs))
    }
}

impl Mul<f64> for McCormick {
    type Output = McCormick;

    fn mul(self, rhs: f64) -> McCormick {
        unwrap_op(self.try_mul(rhs))
    }
}

impl Mul<f64> for &McCormick {
    type Output = McCormick;

    fn mul(self, rhs: f64) -> McCormick {
        unwrap_op(self.try_mul(rhs))
    }
}

impl Mul<McCormick> for f64 {
    type Output = McCormick;

    fn mul(self, rhs: McCormick) -> McCormick {
        unwrap_op(rhs.try_mul(self))
    }
}

impl Mul<&McCormick> for f64 {
    type Output = McCormick;

    fn mul(self, rhs: &McCormick) -> McCormick {
        unwrap_op(rhs.try_mul(self))
    }
}

// ============================================================================
// Division
// ============================================================================

impl Div<McCormick> for McCormick {
    type Output = Result<McCormick>;

    fn div(self, rhs: McCormick) -> Result<McCormick> {
        self.try_div(&rhs)
    }
}

impl Div<&McCormick> for &McCormick {
    type Output = Result<McCormick>;

    fn div(self, rhs: &McCormick) -> Result<McCormick> {
        self.try_div(rhs)
    }
}

impl Div<&McCormick> for McCormick {
    type Output = Result<McCormick>;

    fn div(self, rhs: &McCormick) -> Result<McCormick> {
        self.try_div(rhs)
    }
}

impl Div<McCormick> for &McCormick {
    type Output = Result<McCormick>;

    fn div(self, rhs: McCormick) -> Result<McCormick> {
        self.try_div(&rhs)
    }
}

impl Div<f64> for McCormick {
    type Output = Result<McCormick>;

    fn div(self, rhs: f64) -> Result<McCormick> {
        self.try_div(rhs)
    }
}

impl Div<f64> for &McCormick {
    type Output = Result<McCormick>;

    fn div(self, rhs: f64) -> Result<McCormick> {
        self.try_div(rhs)
    }
}

impl Div<McCormick> for f64 {
    type Output = Result<McCormick>;

    fn div(self, rhs: McCormick) -> Result<McCormick> {
        rhs.try_rdiv(self)
    }
}

impl Div<&McCormick> for f64 {
    type Output = Result<McCormick>;

    fn div(self, rhs: &McCormick) -> Result<McCormick> {
        rhs.try_rdiv(self)
    }
}
