//! Composition rules for univariate elementary functions.
//!
//! For an outer function `f` that is convex or concave on the operand
//! interval, the convex envelope of `f` is either `f` itself (convex `f`)
//! or its chord (concave `f`), and the concave envelope is the other one.
//! McCormick's composition theorem evaluates the convex envelope at
//! `mid(cv, cc, xmin)` and the concave envelope at `mid(cv, cc, xmax)`,
//! where `xmin` minimises the convex envelope and `xmax` maximises the
//! concave envelope over the interval.

use tracing::trace;

use crate::error::Result;
use crate::interval::Interval;
use crate::scalar::{mid, secant, secant_slope};

use super::Relaxation;

/// Curvature of an elementary function over its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curvature {
    /// Convex: the function is its own convex envelope.
    Convex,
    /// Concave: the function is its own concave envelope.
    Concave,
}

/// A univariate elementary function with a known curvature on its domain.
pub trait Univariate {
    /// Function value.
    fn eval(&self, x: f64) -> f64;

    /// Derivative.
    fn deriv(&self, x: f64) -> f64;

    /// Curvature over the whole admissible domain.
    fn curvature(&self) -> Curvature;

    /// Interval enclosure of the range; fails outside the domain.
    fn range(&self, x: &Interval) -> Result<Interval>;

    /// Minimiser over `x` of the convex envelope.
    fn argmin(&self, x: &Interval) -> f64;

    /// Maximiser over `x` of the concave envelope.
    fn argmax(&self, x: &Interval) -> f64;
}

/// Positive even integer power `x^p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvenPower(pub i32);

impl Univariate for EvenPower {
    fn eval(&self, x: f64) -> f64 {
        x.powi(self.0)
    }

    fn deriv(&self, x: f64) -> f64 {
        f64::from(self.0) * x.powi(self.0 - 1)
    }

    fn curvature(&self) -> Curvature {
        Curvature::Convex
    }

    fn range(&self, x: &Interval) -> Result<Interval> {
        Ok(x.even_pow(self.0))
    }

    fn argmin(&self, x: &Interval) -> f64 {
        mid(x.lb, x.ub, 0.0)
    }

    // The chord rises towards the endpoint farther from zero.
    fn argmax(&self, x: &Interval) -> f64 {
        if x.ub.abs() >= x.lb.abs() {
            x.ub
        } else {
            x.lb
        }
    }
}

/// Reciprocal `1/x` on a strictly positive domain.
///
/// Negative domains are handled by the caller through `1/x = -(1/(-x))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reciprocal;

impl Univariate for Reciprocal {
    fn eval(&self, x: f64) -> f64 {
        1.0 / x
    }

    fn deriv(&self, x: f64) -> f64 {
        -1.0 / (x * x)
    }

    fn curvature(&self) -> Curvature {
        Curvature::Convex
    }

    fn range(&self, x: &Interval) -> Result<Interval> {
        x.recip()
    }

    fn argmin(&self, x: &Interval) -> f64 {
        x.ub
    }

    fn argmax(&self, x: &Interval) -> f64 {
        x.lb
    }
}

/// Natural logarithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Log;

impl Univariate for Log {
    fn eval(&self, x: f64) -> f64 {
        x.ln()
    }

    fn deriv(&self, x: f64) -> f64 {
        1.0 / x
    }

    fn curvature(&self) -> Curvature {
        Curvature::Concave
    }

    fn range(&self, x: &Interval) -> Result<Interval> {
        x.ln()
    }

    fn argmin(&self, x: &Interval) -> f64 {
        x.lb
    }

    fn argmax(&self, x: &Interval) -> f64 {
        x.ub
    }
}

/// Square root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sqrt;

impl Univariate for Sqrt {
    fn eval(&self, x: f64) -> f64 {
        x.sqrt()
    }

    fn deriv(&self, x: f64) -> f64 {
        0.5 / x.sqrt()
    }

    fn curvature(&self) -> Curvature {
        Curvature::Concave
    }

    fn range(&self, x: &Interval) -> Result<Interval> {
        x.sqrt()
    }

    fn argmin(&self, x: &Interval) -> f64 {
        x.lb
    }

    fn argmax(&self, x: &Interval) -> f64 {
        x.ub
    }
}

/// Exponential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exp;

impl Univariate for Exp {
    fn eval(&self, x: f64) -> f64 {
        x.exp()
    }

    fn deriv(&self, x: f64) -> f64 {
        x.exp()
    }

    fn curvature(&self) -> Curvature {
        Curvature::Convex
    }

    fn range(&self, x: &Interval) -> Result<Interval> {
        Ok(x.exp())
    }

    fn argmin(&self, x: &Interval) -> f64 {
        x.lb
    }

    fn argmax(&self, x: &Interval) -> f64 {
        x.ub
    }
}

/// Active branch of one side of a univariate rule.
///
/// The slope is the derivative of the outer envelope at the operand bound
/// that was used as its argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Branch {
    /// The interval bound dominates; the relaxation is locally flat.
    Clamped,
    /// The envelope was evaluated at the operand's convex bound.
    ThroughCv(f64),
    /// The envelope was evaluated at the operand's concave bound.
    ThroughCc(f64),
    /// The envelope was evaluated at its own extremum.
    Flat,
}

/// Result of a univariate composition rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnivariateRelaxation {
    /// Interval enclosure of the result.
    pub interval: Interval,
    /// Relaxation pair of the result.
    pub relaxation: Relaxation,
    /// Active branch for the convex underestimator.
    pub cv_branch: Branch,
    /// Active branch for the concave overestimator.
    pub cc_branch: Branch,
}

/// Convex envelope of `f` over `x`, evaluated at `at`, with its slope.
fn convex_envelope<F: Univariate + ?Sized>(f: &F, x: &Interval, at: f64) -> (f64, f64) {
    match f.curvature() {
        Curvature::Convex => (f.eval(at), f.deriv(at)),
        Curvature::Concave => (
            secant(|v| f.eval(v), x.lb, x.ub, at),
            secant_slope(|v| f.eval(v), x.lb, x.ub),
        ),
    }
}

/// Concave envelope of `f` over `x`, evaluated at `at`, with its slope.
fn concave_envelope<F: Univariate + ?Sized>(f: &F, x: &Interval, at: f64) -> (f64, f64) {
    match f.curvature() {
        Curvature::Concave => (f.eval(at), f.deriv(at)),
        Curvature::Convex => (
            secant(|v| f.eval(v), x.lb, x.ub, at),
            secant_slope(|v| f.eval(v), x.lb, x.ub),
        ),
    }
}

/// Relax `f(g)` given the interval `x` and relaxation `r` of the inner `g`.
pub fn relax_univariate<F: Univariate + ?Sized>(
    f: &F,
    x: &Interval,
    r: &Relaxation,
) -> Result<UnivariateRelaxation> {
    let interval = f.range(x)?;
    Ok(relax_on_range(f, x, interval, r))
}

/// Relax `f(g)` when the range `interval` of `f` over `x` is already known.
pub fn relax_on_range<F: Univariate + ?Sized>(
    f: &F,
    x: &Interval,
    interval: Interval,
    r: &Relaxation,
) -> UnivariateRelaxation {
    let xmin = f.argmin(x);
    let cv_arg = mid(r.cv, r.cc, xmin);
    let (cv_value, _) = convex_envelope(f, x, cv_arg);
    let cv = interval.lb.max(cv_value);
    let cv_branch = if interval.lb > cv_value {
        trace!(bound = interval.lb, value = cv_value, "convex relaxation clamped");
        Branch::Clamped
    } else if xmin > r.cc {
        Branch::ThroughCc(convex_envelope(f, x, r.cc).1)
    } else if xmin <= r.cv {
        Branch::ThroughCv(convex_envelope(f, x, r.cv).1)
    } else {
        Branch::Flat
    };

    let xmax = f.argmax(x);
    let cc_arg = mid(r.cv, r.cc, xmax);
    let (cc_value, _) = concave_envelope(f, x, cc_arg);
    let cc = interval.ub.min(cc_value);
    let cc_branch = if interval.ub < cc_value {
        trace!(bound = interval.ub, value = cc_value, "concave relaxation clamped");
        Branch::Clamped
    } else if xmax >= r.cc {
        Branch::ThroughCc(concave_envelope(f, x, r.cc).1)
    } else if xmax < r.cv {
        Branch::ThroughCv(concave_envelope(f, x, r.cv).1)
    } else {
        Branch::Flat
    };

    UnivariateRelaxation {
        interval,
        relaxation: Relaxation::new(cv, cc),
        cv_branch,
        cc_branch,
    }
}
