//! Scalar helpers shared by the interval, relaxation and subgradient rules.

/// Project `c` into the range spanned by `a` and `b`: `max(a, min(b, c))`.
///
/// With `a <= b` this is the median of the three values. It is used to
/// project the minimiser (or maximiser) of an outer function's envelope
/// into the current relaxation `[cv, cc]` of its argument.
///
/// ```
/// use mccormick::scalar::mid;
///
/// assert_eq!(mid(1.0, 3.0, 2.0), 2.0);
/// assert_eq!(mid(1.0, 3.0, 0.0), 1.0);
/// assert_eq!(mid(1.0, 3.0, 5.0), 3.0);
/// ```
pub fn mid(a: f64, b: f64, c: f64) -> f64 {
    a.max(b.min(c))
}

/// Slope of the chord of `f` between `lb` and `ub`.
///
/// A degenerate interval has a flat chord.
pub fn secant_slope(f: impl Fn(f64) -> f64, lb: f64, ub: f64) -> f64 {
    if ub > lb {
        (f(ub) - f(lb)) / (ub - lb)
    } else {
        0.0
    }
}

/// Value at `x` of the chord of `f` through `(lb, f(lb))` and `(ub, f(ub))`.
pub fn secant(f: impl Fn(f64) -> f64, lb: f64, ub: f64, x: f64) -> f64 {
    let slope = secant_slope(&f, lb, ub);
    f(lb) + slope * (x - lb)
}
