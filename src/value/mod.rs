//! Composite McCormick values.
//!
//! A [`McCormick`] value bundles, for one function at one evaluation point:
//! - an interval enclosure of the function over the domain box
//! - the values of a convex underestimator and a concave overestimator
//! - a subgradient and a supergradient of those relaxations
//!
//! Leaves are created through a [`Context`], which fixes the number of
//! decision variables. Every operation returns a fresh value.

pub mod functions;
pub mod operand;
pub mod ops;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::DVector;
use tracing::trace;

use crate::error::{McError, Result};
use crate::interval::Interval;
use crate::relax::{
    relax_on_range, relax_product, relax_univariate, EvenPower, Exp, Log, Reciprocal,
    Relaxation, Sqrt, Univariate, UnivariateRelaxation,
};
use crate::subgradient::Subgradient;

pub use functions::{exp, log, sample_univariate, sqrt, Elementary, Sample};
pub use operand::Operand;

/// Identity of a composite value.
///
/// Clones share the identity of their source, since they denote the same
/// function. Every operation produces a new identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId(u64);

impl ValueId {
    /// Generate a new unique ID.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        ValueId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ValueId {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluation context shared by all values of one expression.
///
/// The dimension is the number of decision variables, i.e. the length of
/// every subgradient vector. A zero-dimensional context evaluates bounds
/// and relaxations only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Context {
    dimension: usize,
}

impl Context {
    /// Create a context for `dimension` decision variables.
    pub fn new(dimension: usize) -> Self {
        Context { dimension }
    }

    /// Number of decision variables.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Create the leaf for decision variable `index` with domain `[lb, ub]`
    /// evaluated at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are out of order or not finite, if `x`
    /// lies outside the domain, or if `index` is not below the dimension.
    /// A zero-dimensional context ignores `index`.
    ///
    /// # Example
    ///
    /// ```
    /// use mccormick::prelude::*;
    ///
    /// let ctx = Context::new(1);
    /// let x = ctx.variable(0, -2.0, 3.0, 1.0).unwrap();
    /// let y = x.powi(2).unwrap();
    /// assert_eq!(y.lower(), 0.0);
    /// assert_eq!(y.upper(), 9.0);
    /// assert!(y.cv() <= 1.0 && 1.0 <= y.cc());
    /// ```
    pub fn variable(&self, index: usize, lb: f64, ub: f64, x: f64) -> Result<McCormick> {
        if !(lb.is_finite() && ub.is_finite() && x.is_finite()) {
            return Err(McError::InvalidLeaf(format!(
                "domain [{}, {}] and point {} must be finite",
                lb, ub, x
            )));
        }
        if lb > ub {
            return Err(McError::InvalidLeaf(format!(
                "lower bound {} exceeds upper bound {}",
                lb, ub
            )));
        }
        if x < lb || x > ub {
            return Err(McError::InvalidLeaf(format!(
                "point {} outside domain [{}, {}]",
                x, lb, ub
            )));
        }
        if self.dimension > 0 && index >= self.dimension {
            return Err(McError::InvalidLeaf(format!(
                "index {} out of range for dimension {}",
                index, self.dimension
            )));
        }
        Ok(McCormick::from_parts(
            Interval::new(lb, ub),
            Relaxation::point(x),
            Subgradient::unit(self.dimension, index),
        ))
    }

    /// Create leaves for all decision variables at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of domains or points differs from the
    /// dimension, or if any leaf is invalid.
    pub fn variables(&self, domains: &[(f64, f64)], point: &[f64]) -> Result<Vec<McCormick>> {
        if domains.len() != self.dimension {
            return Err(McError::DimensionMismatch {
                expected: self.dimension,
                got: domains.len(),
            });
        }
        if point.len() != self.dimension {
            return Err(McError::DimensionMismatch {
                expected: self.dimension,
                got: point.len(),
            });
        }
        domains
            .iter()
            .zip(point)
            .enumerate()
            .map(|(i, (&(lb, ub), &x))| self.variable(i, lb, ub, x))
            .collect()
    }

    /// Create a constant with zero subgradients.
    ///
    /// # Errors
    ///
    /// Returns an error if `c` is not finite.
    pub fn constant(&self, c: f64) -> Result<McCormick> {
        Operand::Scalar(c).validate()?;
        Ok(McCormick::from_parts(
            Interval::point(c),
            Relaxation::point(c),
            Subgradient::zeros(self.dimension),
        ))
    }
}

/// A composite value: interval, relaxation pair and subgradient pair.
#[derive(Debug, Clone)]
pub struct McCormick {
    id: ValueId,
    interval: Interval,
    relaxation: Relaxation,
    subgradient: Subgradient,
}

/// Values compare by their numeric content; identity is ignored.
impl PartialEq for McCormick {
    fn eq(&self, other: &Self) -> bool {
        self.interval == other.interval
            && self.relaxation == other.relaxation
            && self.subgradient == other.subgradient
    }
}

/// Affine under- or overestimator `slope · y + intercept` built from a
/// subgradient at the evaluation point.
#[derive(Debug, Clone, PartialEq)]
pub struct Linearization {
    /// Gradient of the affine function.
    pub slope: DVector<f64>,
    /// Constant term.
    pub intercept: f64,
}

impl Linearization {
    /// Evaluate the affine function at `y`.
    pub fn eval(&self, y: &DVector<f64>) -> f64 {
        self.slope.dot(y) + self.intercept
    }
}

impl McCormick {
    pub(crate) fn from_parts(
        interval: Interval,
        relaxation: Relaxation,
        subgradient: Subgradient,
    ) -> Self {
        McCormick {
            id: ValueId::new(),
            interval,
            relaxation,
            subgradient,
        }
    }

    fn from_univariate(out: UnivariateRelaxation, sg: &Subgradient) -> Self {
        McCormick::from_parts(
            out.interval,
            out.relaxation,
            sg.compose(out.cv_branch, out.cc_branch),
        )
    }

    /// Identity of this value.
    pub fn id(&self) -> ValueId {
        self.id
    }

    /// Interval enclosure.
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Relaxation pair.
    pub fn relaxation(&self) -> &Relaxation {
        &self.relaxation
    }

    /// Subgradient pair.
    pub fn subgradient(&self) -> &Subgradient {
        &self.subgradient
    }

    /// Lower interval bound.
    pub fn lower(&self) -> f64 {
        self.interval.lb
    }

    /// Upper interval bound.
    pub fn upper(&self) -> f64 {
        self.interval.ub
    }

    /// Convex underestimator value.
    pub fn cv(&self) -> f64 {
        self.relaxation.cv
    }

    /// Concave overestimator value.
    pub fn cc(&self) -> f64 {
        self.relaxation.cc
    }

    /// Number of decision variables.
    pub fn dimension(&self) -> usize {
        self.subgradient.dim()
    }

    /// Check `lb <= cv <= cc <= ub` up to an absolute tolerance.
    pub fn is_consistent(&self, tol: f64) -> bool {
        let (lb, ub) = (self.interval.lb, self.interval.ub);
        let (cv, cc) = (self.relaxation.cv, self.relaxation.cc);
        lb <= ub && lb - tol <= cv && cv <= cc + tol && cc <= ub + tol
    }

    fn check_dimension(&self, other: &McCormick) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(McError::DimensionMismatch {
                expected: self.dimension(),
                got: other.dimension(),
            });
        }
        Ok(())
    }

    /// Negation.
    pub fn negate(&self) -> McCormick {
        McCormick::from_parts(
            self.interval.neg(),
            self.relaxation.neg(),
            self.subgradient.neg(),
        )
    }

    fn shift(&self, c: f64) -> McCormick {
        McCormick::from_parts(
            self.interval.shift(c),
            self.relaxation.shift(c),
            self.subgradient.clone(),
        )
    }

    fn scale(&self, k: f64) -> McCormick {
        McCormick::from_parts(
            self.interval.scale(k),
            self.relaxation.scale(k),
            self.subgradient.scale(k),
        )
    }

    /// Sum with a composite value or a scalar.
    pub fn try_add<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<McCormick> {
        match rhs.into().validate()? {
            Operand::Composite(other) => {
                self.check_dimension(other)?;
                Ok(McCormick::from_parts(
                    self.interval.add(&other.interval),
                    self.relaxation.add(&other.relaxation),
                    self.subgradient.add(&other.subgradient),
                ))
            }
            Operand::Scalar(c) => Ok(self.shift(c)),
        }
    }

    /// Difference with a composite value or a scalar.
    pub fn try_sub<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<McCormick> {
        match rhs.into().validate()? {
            Operand::Composite(other) => self.try_add(&other.scale(-1.0)),
            Operand::Scalar(c) => Ok(self.shift(-c)),
        }
    }

    /// Product with a composite value or a scalar.
    ///
    /// Multiplying a value by itself (or a clone of itself) uses the tighter
    /// square rule.
    pub fn try_mul<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<McCormick> {
        match rhs.into().validate()? {
            Operand::Composite(other) => {
                self.check_dimension(other)?;
                if self.id == other.id {
                    return Ok(self.even_pow(2));
                }
                let out = relax_product(
                    &self.interval,
                    &self.relaxation,
                    &other.interval,
                    &other.relaxation,
                );
                let sg = Subgradient::product(
                    &self.interval,
                    &self.subgradient,
                    &other.interval,
                    &other.subgradient,
                    out.cv_selection,
                    out.cc_selection,
                );
                Ok(McCormick::from_parts(out.interval, out.relaxation, sg))
            }
            Operand::Scalar(k) => Ok(self.scale(k)),
        }
    }

    /// Quotient by a composite value or a scalar: `self * rhs^(-1)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the divisor's interval contains zero.
    pub fn try_div<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<McCormick> {
        match rhs.into().validate()? {
            Operand::Composite(other) => self.try_mul(&other.recip()?),
            Operand::Scalar(c) if c == 0.0 => Err(McError::SingularReciprocal { lb: c, ub: c }),
            Operand::Scalar(c) => Ok(self.scale(1.0 / c)),
        }
    }

    /// Quotient of a scalar by this value: `self^(-1) * c`.
    pub fn try_rdiv(&self, c: f64) -> Result<McCormick> {
        self.recip()?.try_mul(c)
    }

    fn apply<F: Univariate>(&self, f: &F) -> Result<McCormick> {
        let out = relax_univariate(f, &self.interval, &self.relaxation)?;
        Ok(McCormick::from_univariate(out, &self.subgradient))
    }

    fn even_pow(&self, p: i32) -> McCormick {
        let f = EvenPower(p);
        let out = relax_on_range(
            &f,
            &self.interval,
            self.interval.even_pow(p),
            &self.relaxation,
        );
        McCormick::from_univariate(out, &self.subgradient)
    }

    /// Integer power.
    ///
    /// Even positive powers use their own rule, odd powers are built as
    /// `x * x^(p-1)` and negative powers as `(1/x)^(-p)`.
    ///
    /// # Errors
    ///
    /// Returns an error for `p == 0`, and for negative `p` when the interval
    /// contains zero.
    pub fn powi(&self, p: i32) -> Result<McCormick> {
        match p {
            1 => Ok(self.clone()),
            -1 => self.recip(),
            p if p > 0 && p % 2 == 0 => Ok(self.even_pow(p)),
            p if p > 2 => {
                trace!(p, "odd power as product");
                self.try_mul(&self.powi(p - 1)?)
            }
            p if p < -1 => {
                trace!(p, "negative power through reciprocal");
                let q = p.checked_neg().ok_or(McError::UnsupportedExponent(p))?;
                self.recip()?.powi(q)
            }
            p => Err(McError::UnsupportedExponent(p)),
        }
    }

    /// Reciprocal `1/x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval contains zero.
    pub fn recip(&self) -> Result<McCormick> {
        if self.interval.ub < 0.0 {
            return Ok(self.negate().apply(&Reciprocal)?.negate());
        }
        self.apply(&Reciprocal)
    }

    /// Natural logarithm.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is not strictly positive.
    pub fn ln(&self) -> Result<McCormick> {
        self.apply(&Log)
    }

    /// Square root.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval contains negative values.
    pub fn sqrt(&self) -> Result<McCormick> {
        self.apply(&Sqrt)
    }

    /// Exponential.
    pub fn exp(&self) -> McCormick {
        let out = relax_on_range(&Exp, &self.interval, self.interval.exp(), &self.relaxation);
        McCormick::from_univariate(out, &self.subgradient)
    }

    fn linearization(
        &self,
        value: f64,
        slope: &DVector<f64>,
        point: &DVector<f64>,
    ) -> Result<Linearization> {
        if point.len() != self.dimension() {
            return Err(McError::DimensionMismatch {
                expected: self.dimension(),
                got: point.len(),
            });
        }
        Ok(Linearization {
            slope: slope.clone(),
            intercept: value - slope.dot(point),
        })
    }

    /// Affine underestimator through the convex relaxation at `point`, the
    /// evaluation point of the leaves.
    pub fn cv_linearization(&self, point: &DVector<f64>) -> Result<Linearization> {
        self.linearization(self.relaxation.cv, &self.subgradient.cv, point)
    }

    /// Affine overestimator through the concave relaxation at `point`.
    pub fn cc_linearization(&self, point: &DVector<f64>) -> Result<Linearization> {
        self.linearization(self.relaxation.cc, &self.subgradient.cc, point)
    }
}

impl fmt::Display for McCormick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "McCormick {{ interval: {}, relaxation: {} }}",
            self.interval, self.relaxation
        )
    }
}
