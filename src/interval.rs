//! Interval arithmetic.
//!
//! Every rule here returns an enclosure of the range of the operation over
//! the operand intervals. Domain checks for the partial functions
//! (reciprocal, log, sqrt) live here too, so the relaxation rules can
//! assume a valid domain.

use std::fmt;

use tracing::debug;

use crate::error::{McError, Result};
use crate::scalar::mid;

/// A closed interval `[lb, ub]` with `lb <= ub`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Lower bound.
    pub lb: f64,
    /// Upper bound.
    pub ub: f64,
}

impl Interval {
    /// Create an interval from its bounds.
    pub fn new(lb: f64, ub: f64) -> Self {
        debug_assert!(lb <= ub, "interval bounds out of order: [{lb}, {ub}]");
        Interval { lb, ub }
    }

    /// The degenerate interval `[x, x]`.
    pub fn point(x: f64) -> Self {
        Interval { lb: x, ub: x }
    }

    /// Check if `x` lies in the interval.
    pub fn contains(&self, x: f64) -> bool {
        self.lb <= x && x <= self.ub
    }

    /// Check if the interval contains or touches zero.
    pub fn contains_zero(&self) -> bool {
        self.lb * self.ub <= 0.0
    }

    /// Interval sum.
    pub fn add(&self, other: &Interval) -> Interval {
        Interval::new(self.lb + other.lb, self.ub + other.ub)
    }

    /// Shift both bounds by a constant.
    pub fn shift(&self, c: f64) -> Interval {
        Interval::new(self.lb + c, self.ub + c)
    }

    /// Negation `[-ub, -lb]`.
    pub fn neg(&self) -> Interval {
        Interval::new(-self.ub, -self.lb)
    }

    /// Multiplication by a scalar; a negative factor swaps the bounds.
    pub fn scale(&self, k: f64) -> Interval {
        if k >= 0.0 {
            Interval::new(k * self.lb, k * self.ub)
        } else {
            Interval::new(k * self.ub, k * self.lb)
        }
    }

    /// Interval product: hull of the four endpoint products.
    pub fn mul(&self, other: &Interval) -> Interval {
        let products = [
            self.lb * other.lb,
            self.lb * other.ub,
            self.ub * other.lb,
            self.ub * other.ub,
        ];
        let lb = products.iter().copied().fold(f64::INFINITY, f64::min);
        let ub = products.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Interval::new(lb, ub)
    }

    /// Positive even power. The lower bound is zero when the interval
    /// straddles zero.
    pub fn even_pow(&self, p: i32) -> Interval {
        debug_assert!(p > 0 && p % 2 == 0);
        let lb = mid(self.lb, self.ub, 0.0).powi(p);
        let ub = self.lb.powi(p).max(self.ub.powi(p));
        Interval::new(lb, ub)
    }

    /// Reciprocal `1/x`, defined only when the interval excludes zero.
    pub fn recip(&self) -> Result<Interval> {
        if self.contains_zero() {
            debug!(lb = self.lb, ub = self.ub, "reciprocal over interval containing zero");
            return Err(McError::SingularReciprocal {
                lb: self.lb,
                ub: self.ub,
            });
        }
        if self.ub < 0.0 {
            return Ok(self.neg().recip()?.neg());
        }
        let a = 1.0 / self.lb;
        let b = 1.0 / self.ub;
        Ok(Interval::new(a.min(b), a.max(b)))
    }

    /// Natural logarithm, defined for `lb > 0`.
    pub fn ln(&self) -> Result<Interval> {
        if self.lb.is_nan() || self.lb <= 0.0 {
            debug!(lb = self.lb, "log over nonpositive domain");
            return Err(McError::InvalidLogDomain { lb: self.lb });
        }
        Ok(Interval::new(self.lb.ln(), self.ub.ln()))
    }

    /// Square root, defined for `lb >= 0`.
    pub fn sqrt(&self) -> Result<Interval> {
        if self.lb.is_nan() || self.lb < 0.0 {
            debug!(lb = self.lb, "sqrt over negative domain");
            return Err(McError::InvalidSqrtDomain { lb: self.lb });
        }
        Ok(Interval::new(self.lb.sqrt(), self.ub.sqrt()))
    }

    /// Exponential.
    pub fn exp(&self) -> Interval {
        Interval::new(self.lb.exp(), self.ub.exp())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lb, self.ub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_neg() {
        let a = Interval::new(1.0, 2.0);
        let b = Interval::new(-3.0, 4.0);
        assert_eq!(a.add(&b), Interval::new(-2.0, 6.0));
        assert_eq!(b.neg(), Interval::new(-4.0, 3.0));
        assert_eq!(a.shift(-1.0), Interval::new(0.0, 1.0));
    }

    #[test]
    fn test_scale_swaps_on_negative() {
        let a = Interval::new(1.0, 2.0);
        assert_eq!(a.scale(3.0), Interval::new(3.0, 6.0));
        assert_eq!(a.scale(-3.0), Interval::new(-6.0, -3.0));
        assert_eq!(a.scale(0.0), Interval::new(0.0, 0.0));
    }

    #[test]
    fn test_mul() {
        let a = Interval::new(-1.0, 2.0);
        let b = Interval::new(-3.0, 4.0);
        assert_eq!(a.mul(&b), Interval::new(-6.0, 8.0));

        let c = Interval::new(1.0, 2.0);
        assert_eq!(c.mul(&c), Interval::new(1.0, 4.0));
    }

    #[test]
    fn test_even_pow_straddling_zero() {
        let a = Interval::new(-2.0, 3.0);
        assert_eq!(a.even_pow(2), Interval::new(0.0, 9.0));
        assert_eq!(a.even_pow(4), Interval::new(0.0, 81.0));

        let b = Interval::new(-3.0, -1.0);
        assert_eq!(b.even_pow(2), Interval::new(1.0, 9.0));
    }

    #[test]
    fn test_recip() {
        let a = Interval::new(2.0, 4.0);
        assert_eq!(a.recip().unwrap(), Interval::new(0.25, 0.5));

        let b = Interval::new(-4.0, -2.0);
        assert_eq!(b.recip().unwrap(), Interval::new(-0.5, -0.25));
    }

    #[test]
    fn test_recip_rejects_zero() {
        let a = Interval::new(-1.0, 1.0);
        assert!(matches!(
            a.recip(),
            Err(McError::SingularReciprocal { .. })
        ));
        let b = Interval::new(0.0, 1.0);
        assert!(b.recip().is_err());
    }

    #[test]
    fn test_log_sqrt_domains() {
        assert!(Interval::new(0.0, 1.0).ln().is_err());
        assert!(Interval::new(-1.0, 1.0).sqrt().is_err());
        assert_eq!(
            Interval::new(0.0, 4.0).sqrt().unwrap(),
            Interval::new(0.0, 2.0)
        );
        let l = Interval::new(1.0, std::f64::consts::E).ln().unwrap();
        assert_eq!(l.lb, 0.0);
        assert!((l.ub - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(-1.0, 2.5).to_string(), "[-1, 2.5]");
    }
}
