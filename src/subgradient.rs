//! Subgradient propagation.
//!
//! A [`Subgradient`] holds a subgradient of the convex underestimator and a
//! supergradient of the concave overestimator, both with respect to the
//! decision variables of the evaluation context. The nonlinear rules follow
//! the branch reported by the relaxation rules in [`crate::relax`].

use nalgebra::DVector;

use crate::interval::Interval;
use crate::relax::{Branch, Selection};

/// Subgradient/supergradient pair of a relaxation.
#[derive(Debug, Clone, PartialEq)]
pub struct Subgradient {
    /// Subgradient of the convex underestimator.
    pub cv: DVector<f64>,
    /// Supergradient of the concave overestimator.
    pub cc: DVector<f64>,
}

impl Subgradient {
    /// Create a subgradient pair.
    pub fn new(cv: DVector<f64>, cc: DVector<f64>) -> Self {
        debug_assert_eq!(cv.len(), cc.len());
        Subgradient { cv, cc }
    }

    /// Zero subgradients of dimension `n`.
    pub fn zeros(n: usize) -> Self {
        Subgradient {
            cv: DVector::zeros(n),
            cc: DVector::zeros(n),
        }
    }

    /// Unit basis vector `e_index` on both sides.
    pub fn unit(n: usize, index: usize) -> Self {
        let e = DVector::from_fn(n, |i, _| if i == index { 1.0 } else { 0.0 });
        Subgradient {
            cv: e.clone(),
            cc: e,
        }
    }

    /// Number of decision variables.
    pub fn dim(&self) -> usize {
        self.cv.len()
    }

    /// Sum of two subgradient pairs.
    pub fn add(&self, other: &Subgradient) -> Subgradient {
        Subgradient::new(&self.cv + &other.cv, &self.cc + &other.cc)
    }

    /// Multiplication by a scalar; a negative factor swaps the sides.
    pub fn scale(&self, k: f64) -> Subgradient {
        if k >= 0.0 {
            Subgradient::new(scaled(&self.cv, k), scaled(&self.cc, k))
        } else {
            Subgradient::new(scaled(&self.cc, k), scaled(&self.cv, k))
        }
    }

    /// Negation.
    pub fn neg(&self) -> Subgradient {
        Subgradient::new(-&self.cc, -&self.cv)
    }

    /// Chain rule through a univariate rule.
    pub fn compose(&self, cv_branch: Branch, cc_branch: Branch) -> Subgradient {
        Subgradient::new(self.through(cv_branch), self.through(cc_branch))
    }

    fn through(&self, branch: Branch) -> DVector<f64> {
        match branch {
            Branch::Clamped | Branch::Flat => DVector::zeros(self.dim()),
            Branch::ThroughCv(slope) => scaled(&self.cv, slope),
            Branch::ThroughCc(slope) => scaled(&self.cc, slope),
        }
    }

    /// Subgradients of the bilinear product rule.
    ///
    /// Each term `k * x` contributes `k * sg_cv` or `k * sg_cc` depending on
    /// the sign of the endpoint `k` and on whether the term is a lower or an
    /// upper bound. On a tie the midpoint of both contributions is reported,
    /// which is a valid subgradient at the kink and keeps the product
    /// symmetric in its factors.
    pub fn product(
        x1: &Interval,
        sg1: &Subgradient,
        x2: &Interval,
        sg2: &Subgradient,
        cv_selection: Selection,
        cc_selection: Selection,
    ) -> Subgradient {
        let n = sg1.dim();

        let cv = match cv_selection {
            Selection::Clamped => DVector::zeros(n),
            Selection::First => sg1.lower_term(x2.lb) + sg2.lower_term(x1.lb),
            Selection::Second => sg1.lower_term(x2.ub) + sg2.lower_term(x1.ub),
            // Midpoint of both candidates, so `a * b` and `b * a` agree.
            Selection::Tie => {
                let alpha = sg1.lower_term(x2.lb) + sg2.lower_term(x1.lb);
                let beta = sg1.lower_term(x2.ub) + sg2.lower_term(x1.ub);
                (alpha + beta) * 0.5
            }
        };

        let cc = match cc_selection {
            Selection::Clamped => DVector::zeros(n),
            Selection::First => sg1.upper_term(x2.lb) + sg2.upper_term(x1.ub),
            Selection::Second => sg1.upper_term(x2.ub) + sg2.upper_term(x1.lb),
            Selection::Tie => {
                let gamma = sg1.upper_term(x2.lb) + sg2.upper_term(x1.ub);
                let delta = sg1.upper_term(x2.ub) + sg2.upper_term(x1.lb);
                (gamma + delta) * 0.5
            }
        };

        Subgradient::new(cv, cc)
    }

    /// Subgradient of `min(k*cv, k*cc)`.
    fn lower_term(&self, k: f64) -> DVector<f64> {
        if k >= 0.0 {
            scaled(&self.cv, k)
        } else {
            scaled(&self.cc, k)
        }
    }

    /// Supergradient of `max(k*cv, k*cc)`.
    fn upper_term(&self, k: f64) -> DVector<f64> {
        if k >= 0.0 {
            scaled(&self.cc, k)
        } else {
            scaled(&self.cv, k)
        }
    }
}

/// `k * v` where zero entries stay zero, also for an infinite `k`.
///
/// A slope is infinite when `sqrt` is evaluated at zero; the variables the
/// operand does not depend on must keep a zero entry.
fn scaled(v: &DVector<f64>, k: f64) -> DVector<f64> {
    if k == 0.0 {
        return DVector::zeros(v.len());
    }
    v.map(|g| if g == 0.0 { 0.0 } else { g * k })
}
