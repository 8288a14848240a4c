//! Property-based soundness tests for composed relaxations.
//!
//! Random expressions over two variables are evaluated once in McCormick
//! arithmetic at a point `p` of a random box, and again at points `y` of the
//! same box. For every `y`:
//! - `f(y)` lies in the interval enclosure and in `[cv(y), cc(y)]`
//! - `cv(y) >= cv(p) + sg_cv·(y - p)` and `cc(y) <= cc(p) + sg_cc·(y - p)`
//!
//! and at `p` itself `cv <= f(p) <= cc`.
//!
//! Operations with a restricted domain are applied to a shifted argument
//! whose interval lies inside the domain. The shift depends on interval
//! bounds only, so both evaluations describe the same function.
//!
//! A relative tolerance covers floating-point rounding; no directed
//! rounding is used.

use mccormick::prelude::*;
use nalgebra::DVector;
use proptest::prelude::*;

/// Tolerance for floating-point precision in soundness checks, relative to
/// the magnitude of the quantities involved.
const FP_TOLERANCE: f64 = 1e-8;

const DIM: usize = 2;

#[derive(Debug, Clone)]
enum Expr {
    Var(usize),
    Const(f64),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Scale(f64, Box<Expr>),
    Shift(f64, Box<Expr>),
    Square(Box<Expr>),
    Cube(Box<Expr>),
    SelfMul(Box<Expr>),
    InvSquare(Box<Expr>),
    RecipNeg(Box<Expr>),
    Exp(Box<Expr>),
    Log(Box<Expr>),
    Sqrt(Box<Expr>),
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        3 => (0..DIM).prop_map(Expr::Var),
        1 => (-3.0..3.0f64).prop_map(Expr::Const),
    ];
    leaf.prop_recursive(3, 12, 2, |inner| {
        let unary = |f: fn(Box<Expr>) -> Expr| inner.clone().prop_map(move |e| f(Box::new(e)));
        let binary = |f: fn(Box<Expr>, Box<Expr>) -> Expr| {
            (inner.clone(), inner.clone()).prop_map(move |(a, b)| f(Box::new(a), Box::new(b)))
        };
        let arithmetic = prop_oneof![
            unary(Expr::Neg),
            binary(Expr::Add),
            binary(Expr::Sub),
            binary(Expr::Mul),
            binary(Expr::Div),
            (-3.0..3.0f64, inner.clone()).prop_map(|(k, e)| Expr::Scale(k, Box::new(e))),
            (-3.0..3.0f64, inner.clone()).prop_map(|(c, e)| Expr::Shift(c, Box::new(e))),
        ];
        let functions = prop_oneof![
            unary(Expr::Square),
            unary(Expr::Cube),
            unary(Expr::SelfMul),
            unary(Expr::InvSquare),
            unary(Expr::RecipNeg),
            unary(Expr::Exp),
            unary(Expr::Log),
            unary(Expr::Sqrt),
        ];
        prop_oneof![arithmetic, functions]
    })
}

/// Strategy to generate valid interval bounds [lower, upper] where lower <= upper.
fn valid_interval(range: f64) -> impl Strategy<Value = (f64, f64)> {
    (-range..range).prop_flat_map(move |a| (-range..range).prop_map(move |b| (a.min(b), a.max(b))))
}

/// Map fractions of the box to points, clamped against rounding.
fn point_in(domains: &[(f64, f64)], t: &[f64]) -> Vec<f64> {
    domains
        .iter()
        .zip(t)
        .map(|(&(lb, ub), &t)| (lb + (ub - lb) * t).clamp(lb, ub))
        .collect()
}

/// Evaluate `e` in McCormick arithmetic on the leaves `vars` and in plain
/// arithmetic at `y`.
fn eval(e: &Expr, ctx: &Context, vars: &[McCormick], y: &[f64]) -> (McCormick, f64) {
    let shifted = |a: &Expr, target: fn(&McCormick) -> f64| eval_shifted(a, ctx, vars, y, target);
    match e {
        Expr::Var(i) => (vars[*i].clone(), y[*i]),
        Expr::Const(c) => (ctx.constant(*c).unwrap(), *c),
        Expr::Neg(a) => {
            let (m, v) = eval(a, ctx, vars, y);
            (-m, -v)
        }
        Expr::Add(a, b) => {
            let (ma, va) = eval(a, ctx, vars, y);
            let (mb, vb) = eval(b, ctx, vars, y);
            (&ma + &mb, va + vb)
        }
        Expr::Sub(a, b) => {
            let (ma, va) = eval(a, ctx, vars, y);
            let (mb, vb) = eval(b, ctx, vars, y);
            (&ma - &mb, va - vb)
        }
        Expr::Mul(a, b) => {
            let (ma, va) = eval(a, ctx, vars, y);
            let (mb, vb) = eval(b, ctx, vars, y);
            (&ma * &mb, va * vb)
        }
        Expr::Div(a, b) => {
            let (ma, va) = eval(a, ctx, vars, y);
            let (mb, vb) = shifted(b, |m: &McCormick| 0.5 - m.lower());
            ((&ma / &mb).unwrap(), va / vb)
        }
        Expr::Scale(k, a) => {
            let (m, v) = eval(a, ctx, vars, y);
            (*k * &m, *k * v)
        }
        Expr::Shift(c, a) => {
            let (m, v) = eval(a, ctx, vars, y);
            (&m + *c, v + *c)
        }
        Expr::Square(a) => {
            let (m, v) = eval(a, ctx, vars, y);
            (m.powi(2).unwrap(), v.powi(2))
        }
        Expr::Cube(a) => {
            let (m, v) = eval(a, ctx, vars, y);
            (m.powi(3).unwrap(), v.powi(3))
        }
        Expr::SelfMul(a) => {
            let (m, v) = eval(a, ctx, vars, y);
            (&m * &m.clone(), v * v)
        }
        Expr::InvSquare(a) => {
            let (m, v) = shifted(a, |m: &McCormick| 0.5 - m.lower());
            (m.powi(-2).unwrap(), v.powi(-2))
        }
        Expr::RecipNeg(a) => {
            let (m, v) = shifted(a, |m: &McCormick| -0.5 - m.upper());
            (m.recip().unwrap(), 1.0 / v)
        }
        Expr::Exp(a) => {
            // Normalise to roughly [0, 1] to keep magnitudes bounded.
            let (m, v) = eval(a, ctx, vars, y);
            let c = m.lower();
            let k = 1.0 / (m.upper() - c).max(1.0);
            (((&m - c) * k).exp(), ((v - c) * k).exp())
        }
        Expr::Log(a) => {
            let (m, v) = shifted(a, |m: &McCormick| 1.0 - m.lower());
            (log(&m).unwrap(), log(v))
        }
        Expr::Sqrt(a) => {
            let (m, v) = shifted(a, |m: &McCormick| 0.25 - m.lower());
            (sqrt(&m).unwrap(), sqrt(v))
        }
    }
}

/// Evaluate `e` shifted by a constant computed from its interval.
fn eval_shifted(
    e: &Expr,
    ctx: &Context,
    vars: &[McCormick],
    y: &[f64],
    target: fn(&McCormick) -> f64,
) -> (McCormick, f64) {
    let (m, v) = eval(e, ctx, vars, y);
    let c = target(&m);
    (&m + c, v + c)
}

fn leaves(ctx: &Context, domains: &[(f64, f64)], p: &[f64]) -> Vec<McCormick> {
    ctx.variables(domains, p).unwrap()
}

fn below(a: f64, b: f64, scale: f64) -> bool {
    a <= b + FP_TOLERANCE * scale
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Interval and relaxation bound the function; subgradients at `p` give
    /// valid cuts of the relaxation everywhere in the box.
    #[test]
    fn soundness_composed(
        expr in expr_strategy(),
        d0 in valid_interval(2.0),
        d1 in valid_interval(2.0),
        tp in prop::collection::vec(0.0..=1.0f64, DIM),
        ty in prop::collection::vec(prop::collection::vec(0.0..=1.0f64, DIM), 1..6),
    ) {
        let ctx = Context::new(DIM);
        let domains = [d0, d1];
        let p = point_in(&domains, &tp);
        let vars = leaves(&ctx, &domains, &p);

        let (f, fp) = eval(&expr, &ctx, &vars, &p);
        let scale = 1.0 + f.lower().abs() + f.upper().abs() + fp.abs();

        prop_assert!(f.cv().is_finite() && f.cc().is_finite(), "non-finite relaxation {}", f);
        prop_assert!(below(f.lower(), f.cv(), scale), "cv below interval: {}", f);
        prop_assert!(below(f.cc(), f.upper(), scale), "cc above interval: {}", f);
        prop_assert!(
            below(f.cv(), fp, scale) && below(fp, f.cc(), scale),
            "f({:?})={} not in relaxation {} of {:?}", p, fp, f, expr
        );

        let p_vec = DVector::from_vec(p.clone());
        let under = f.cv_linearization(&p_vec).unwrap();
        let over = f.cc_linearization(&p_vec).unwrap();

        for t in &ty {
            let y = point_in(&domains, t);
            let (g, fy) = eval(&expr, &ctx, &leaves(&ctx, &domains, &y), &y);
            let y_vec = DVector::from_vec(y.clone());
            let step = (&y_vec - &p_vec).abs();
            let scale = scale
                + fy.abs()
                + g.cv().abs()
                + g.cc().abs()
                + f.subgradient().cv.abs().dot(&step)
                + f.subgradient().cc.abs().dot(&step);

            prop_assert_eq!(g.interval(), f.interval());
            prop_assert!(
                below(f.lower(), fy, scale) && below(fy, f.upper(), scale),
                "f({:?})={} not in interval {} of {:?}", y, fy, f.interval(), expr
            );
            prop_assert!(
                below(g.cv(), fy, scale) && below(fy, g.cc(), scale),
                "f({:?})={} not in relaxation {} of {:?}", y, fy, g, expr
            );
            prop_assert!(
                below(under.eval(&y_vec), g.cv(), scale),
                "subgradient cut {} above cv({:?})={} for {:?}", under.eval(&y_vec), y, g.cv(), expr
            );
            prop_assert!(
                below(g.cc(), over.eval(&y_vec), scale),
                "supergradient cut {} below cc({:?})={} for {:?}", over.eval(&y_vec), y, g.cc(), expr
            );
        }
    }

    /// Negating twice restores the value exactly.
    #[test]
    fn double_negation_is_identity(
        expr in expr_strategy(),
        d0 in valid_interval(2.0),
        d1 in valid_interval(2.0),
        tp in prop::collection::vec(0.0..=1.0f64, DIM),
    ) {
        let ctx = Context::new(DIM);
        let domains = [d0, d1];
        let p = point_in(&domains, &tp);
        let vars = leaves(&ctx, &domains, &p);

        let (f, _) = eval(&expr, &ctx, &vars, &p);
        prop_assert_eq!(-(-&f), f);
    }

    /// Sum and product do not depend on the order of their operands.
    #[test]
    fn binary_operations_commute(
        a in expr_strategy(),
        b in expr_strategy(),
        d0 in valid_interval(2.0),
        d1 in valid_interval(2.0),
        tp in prop::collection::vec(0.0..=1.0f64, DIM),
    ) {
        let ctx = Context::new(DIM);
        let domains = [d0, d1];
        let p = point_in(&domains, &tp);
        let vars = leaves(&ctx, &domains, &p);

        let (ma, _) = eval(&a, &ctx, &vars, &p);
        let (mb, _) = eval(&b, &ctx, &vars, &p);
        prop_assert_eq!(&ma + &mb, &mb + &ma);
        prop_assert_eq!(&ma * &mb, &mb * &ma);
    }

    /// A value multiplied by itself is relaxed as a square, which is never
    /// looser than the bilinear rule on an independent copy.
    #[test]
    fn self_product_is_square(
        expr in expr_strategy(),
        d0 in valid_interval(2.0),
        d1 in valid_interval(2.0),
        tp in prop::collection::vec(0.0..=1.0f64, DIM),
    ) {
        let ctx = Context::new(DIM);
        let domains = [d0, d1];
        let p = point_in(&domains, &tp);
        let vars = leaves(&ctx, &domains, &p);

        let (f, _) = eval(&expr, &ctx, &vars, &p);
        let square = f.powi(2).unwrap();
        prop_assert_eq!(&f * &f, square.clone());

        let copy = &f + 0.0;
        let bilinear = &f * &copy;
        let scale = 1.0 + square.upper().abs();
        prop_assert!(below(bilinear.cv(), square.cv(), scale));
        prop_assert!(below(square.cc(), bilinear.cc(), scale));
    }
}
