//! Elementary functions usable on both composite values and plain numbers.
//!
//! The same expression code can be evaluated in ordinary arithmetic and in
//! McCormick arithmetic: [`log`], [`sqrt`] and [`exp`] resolve statically to
//! the plain `f64` function or to the composite rule through the
//! [`Elementary`] trait.
//!
//! Composite values implement it by reference only, so the inherent
//! `McCormick::exp` and `McCormick::sqrt` keep their own return types when
//! the trait is in scope.

use crate::error::{McError, Result};

use super::{Context, McCormick};

/// Elementary transcendental functions.
pub trait Elementary {
    /// Result type.
    type Output;

    /// Natural logarithm.
    fn log(self) -> Self::Output;

    /// Square root.
    fn sqrt(self) -> Self::Output;

    /// Exponential.
    fn exp(self) -> Self::Output;
}

impl Elementary for f64 {
    type Output = f64;

    fn log(self) -> f64 {
        f64::ln(self)
    }

    fn sqrt(self) -> f64 {
        f64::sqrt(self)
    }

    fn exp(self) -> f64 {
        f64::exp(self)
    }
}

impl Elementary for &McCormick {
    type Output = Result<McCormick>;

    fn log(self) -> Result<McCormick> {
        McCormick::ln(self)
    }

    fn sqrt(self) -> Result<McCormick> {
        McCormick::sqrt(self)
    }

    fn exp(self) -> Result<McCormick> {
        Ok(McCormick::exp(self))
    }
}

/// Natural logarithm.
///
/// # Example
///
/// ```
/// use mccormick::prelude::*;
///
/// assert_eq!(log(1.0), 0.0);
///
/// let x = Context::new(1).variable(0, 1.0, 4.0, 2.0).unwrap();
/// let y = log(&x).unwrap();
/// assert_eq!(y.cc(), 2.0_f64.ln());
/// ```
pub fn log<T: Elementary>(x: T) -> T::Output {
    x.log()
}

/// Square root.
pub fn sqrt<T: Elementary>(x: T) -> T::Output {
    x.sqrt()
}

/// Exponential.
pub fn exp<T: Elementary>(x: T) -> T::Output {
    x.exp()
}

/// One sample of a univariate relaxation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Evaluation point.
    pub x: f64,
    /// Convex underestimator at `x`.
    pub cv: f64,
    /// Concave overestimator at `x`.
    pub cc: f64,
}

/// Evaluate the relaxation of a one-variable function at `samples` evenly
/// spaced points of `[lb, ub]`, endpoints included.
///
/// # Errors
///
/// Returns an error if fewer than two samples are requested, if the domain
/// is invalid, or if `f` fails at any point.
///
/// # Example
///
/// ```
/// use mccormick::prelude::*;
///
/// let rows = sample_univariate(-1.0, 1.0, 5, |x| x.powi(2)).unwrap();
/// assert_eq!(rows.len(), 5);
/// assert_eq!(rows[2].x, 0.0);
/// assert_eq!(rows[2].cv, 0.0);
/// ```
pub fn sample_univariate<F>(lb: f64, ub: f64, samples: usize, f: F) -> Result<Vec<Sample>>
where
    F: Fn(&McCormick) -> Result<McCormick>,
{
    if samples < 2 {
        return Err(McError::InvalidLeaf(format!(
            "at least two samples are required, got {}",
            samples
        )));
    }
    let ctx = Context::new(1);
    let step = (ub - lb) / (samples - 1) as f64;
    (0..samples)
        .map(|i| {
            let x = if i + 1 == samples {
                ub
            } else {
                lb + step * i as f64
            };
            let y = f(&ctx.variable(0, lb, ub, x)?)?;
            Ok(Sample {
                x,
                cv: y.cv(),
                cc: y.cc(),
            })
        })
        .collect()
}
