//! McCormick envelope of a bilinear product.
//!
//! For `x1 ∈ [lb1, ub1]` and `x2 ∈ [lb2, ub2]` the convex envelope of
//! `x1 * x2` is `max(lb2*x1 + lb1*x2 - lb1*lb2, ub2*x1 + ub1*x2 - ub1*ub2)`
//! and the concave envelope is
//! `min(lb2*x1 + ub1*x2 - ub1*lb2, ub2*x1 + lb1*x2 - lb1*ub2)`. When the
//! factors are themselves relaxed, each term `k * x` is bounded by the
//! minimum (or maximum) of `k*cv` and `k*cc`, depending on the sign of `k`.

use crate::interval::Interval;

use super::Relaxation;

/// Which candidate of an outer `max` (convex side) or `min` (concave side)
/// determines the relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// The interval bound dominates both candidates.
    Clamped,
    /// The lower-lower candidate (convex side) or lower-upper candidate
    /// (concave side) is active.
    First,
    /// The upper-upper candidate (convex side) or upper-lower candidate
    /// (concave side) is active.
    Second,
    /// Both candidates are equal.
    Tie,
}

/// Result of the product rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductRelaxation {
    /// Interval enclosure of the product.
    pub interval: Interval,
    /// Relaxation pair of the product.
    pub relaxation: Relaxation,
    /// Active candidate for the convex underestimator.
    pub cv_selection: Selection,
    /// Active candidate for the concave overestimator.
    pub cc_selection: Selection,
}

/// Lower bound of `k * x` for `x ∈ [cv, cc]`.
fn term_min(k: f64, r: &Relaxation) -> f64 {
    (k * r.cv).min(k * r.cc)
}

/// Upper bound of `k * x` for `x ∈ [cv, cc]`.
fn term_max(k: f64, r: &Relaxation) -> f64 {
    (k * r.cv).max(k * r.cc)
}

fn select_max(bound: f64, first: f64, second: f64) -> Selection {
    if bound > first.max(second) {
        Selection::Clamped
    } else if first > second {
        Selection::First
    } else if second > first {
        Selection::Second
    } else {
        Selection::Tie
    }
}

fn select_min(bound: f64, first: f64, second: f64) -> Selection {
    if bound < first.min(second) {
        Selection::Clamped
    } else if first < second {
        Selection::First
    } else if second < first {
        Selection::Second
    } else {
        Selection::Tie
    }
}

/// Relax the product of two factors given their intervals and relaxations.
///
/// The rule is symmetric: swapping the factors yields the same interval and
/// relaxation, with the concave-side candidates exchanged.
pub fn relax_product(
    x1: &Interval,
    r1: &Relaxation,
    x2: &Interval,
    r2: &Relaxation,
) -> ProductRelaxation {
    let interval = x1.mul(x2);

    let alpha1 = term_min(x2.lb, r1);
    let alpha2 = term_min(x1.lb, r2);
    let beta1 = term_min(x2.ub, r1);
    let beta2 = term_min(x1.ub, r2);
    let gamma1 = term_max(x2.lb, r1);
    let gamma2 = term_max(x1.ub, r2);
    let delta1 = term_max(x2.ub, r1);
    let delta2 = term_max(x1.lb, r2);

    let alpha = alpha1 + alpha2 - x1.lb * x2.lb;
    let beta = beta1 + beta2 - x1.ub * x2.ub;
    let gamma = gamma1 + gamma2 - x1.ub * x2.lb;
    let delta = delta1 + delta2 - x1.lb * x2.ub;

    let cv = interval.lb.max(alpha.max(beta));
    let cc = interval.ub.min(gamma.min(delta));

    ProductRelaxation {
        interval,
        relaxation: Relaxation::new(cv, cc),
        cv_selection: select_max(interval.lb, alpha, beta),
        cc_selection: select_min(interval.ub, gamma, delta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_of_leaves_at_center() {
        let x = Interval::new(1.0, 2.0);
        let r = Relaxation::point(1.5);
        let out = relax_product(&x, &r, &x, &r);

        assert_eq!(out.interval, Interval::new(1.0, 4.0));
        assert_eq!(out.relaxation, Relaxation::new(2.0, 2.5));
        assert_eq!(out.cv_selection, Selection::Tie);
        assert_eq!(out.cc_selection, Selection::Tie);
    }

    #[test]
    fn test_product_off_center() {
        let x = Interval::new(1.0, 2.0);
        let out = relax_product(
            &x,
            &Relaxation::point(1.25),
            &x,
            &Relaxation::point(1.75),
        );

        // alpha = 1.25 + 1.75 - 1 = 2.0, beta = 2.5 + 3.5 - 4 = 2.0
        // gamma = 1.25 + 3.5 - 2 = 2.75, delta = 2.5 + 1.75 - 2 = 2.25
        assert_eq!(out.relaxation, Relaxation::new(2.0, 2.25));
        assert_eq!(out.cc_selection, Selection::Second);
        assert!(out.relaxation.contains(1.25 * 1.75));
    }

    #[test]
    fn test_product_is_symmetric() {
        let x1 = Interval::new(-1.0, 2.0);
        let r1 = Relaxation::new(-0.5, 0.75);
        let x2 = Interval::new(0.5, 3.0);
        let r2 = Relaxation::new(1.0, 2.0);

        let a = relax_product(&x1, &r1, &x2, &r2);
        let b = relax_product(&x2, &r2, &x1, &r1);
        assert_eq!(a.interval, b.interval);
        assert_eq!(a.relaxation, b.relaxation);
        assert_eq!(a.cv_selection, b.cv_selection);
    }

    #[test]
    fn test_product_sign_mixed() {
        let x1 = Interval::new(-2.0, -1.0);
        let x2 = Interval::new(-1.0, 3.0);
        let out = relax_product(
            &x1,
            &Relaxation::point(-1.5),
            &x2,
            &Relaxation::point(1.0),
        );
        assert_eq!(out.interval, Interval::new(-6.0, 2.0));
        assert!(out.relaxation.cv <= -1.5);
        assert!(out.relaxation.cc >= -1.5);
        assert!(out.relaxation.cv >= out.interval.lb);
        assert!(out.relaxation.cc <= out.interval.ub);
    }
}
