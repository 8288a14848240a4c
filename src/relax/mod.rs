//! McCormick relaxation rules.
//!
//! This module computes the convex underestimator / concave overestimator
//! pair `(cv, cc)` of each operation:
//! - Affine rules (sum, shift, scaling) directly on [`Relaxation`]
//! - Univariate composition rules for convex or concave outer functions
//! - The bilinear product envelope
//!
//! Every nonlinear rule also reports which branch of its formula is active,
//! so the subgradient rules can follow the same case split.

pub mod product;
pub mod univariate;

use std::fmt;

pub use product::{relax_product, ProductRelaxation, Selection};
pub use univariate::{
    relax_on_range, relax_univariate, Branch, Curvature, EvenPower, Exp, Log, Reciprocal, Sqrt,
    Univariate, UnivariateRelaxation,
};

/// A convex/concave relaxation pair evaluated at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relaxation {
    /// Value of the convex underestimator.
    pub cv: f64,
    /// Value of the concave overestimator.
    pub cc: f64,
}

impl Relaxation {
    /// Create a relaxation pair.
    pub fn new(cv: f64, cc: f64) -> Self {
        Relaxation { cv, cc }
    }

    /// The exact relaxation of an affine leaf at `x`.
    pub fn point(x: f64) -> Self {
        Relaxation { cv: x, cc: x }
    }

    /// Sum of two relaxations.
    pub fn add(&self, other: &Relaxation) -> Relaxation {
        Relaxation::new(self.cv + other.cv, self.cc + other.cc)
    }

    /// Shift both bounds by a constant.
    pub fn shift(&self, c: f64) -> Relaxation {
        Relaxation::new(self.cv + c, self.cc + c)
    }

    /// Multiplication by a scalar. A negative factor turns the concave
    /// bound into the convex one and vice versa.
    pub fn scale(&self, k: f64) -> Relaxation {
        if k >= 0.0 {
            Relaxation::new(k * self.cv, k * self.cc)
        } else {
            Relaxation::new(k * self.cc, k * self.cv)
        }
    }

    /// Negation.
    pub fn neg(&self) -> Relaxation {
        Relaxation::new(-self.cc, -self.cv)
    }

    /// Gap `cc - cv`.
    pub fn gap(&self) -> f64 {
        self.cc - self.cv
    }

    /// Check if `x` lies between the bounds.
    pub fn contains(&self, x: f64) -> bool {
        self.cv <= x && x <= self.cc
    }
}

impl fmt::Display for Relaxation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(cv: {}, cc: {})", self.cv, self.cc)
    }
}
