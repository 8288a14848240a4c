//! # mccormick
//!
//! McCormick relaxations of factorable functions, with interval bounds and
//! subgradients.
//!
//! Evaluating an expression with [`McCormick`] values instead of plain
//! numbers yields, at the evaluation point:
//! - an interval enclosure of the function over the whole domain box
//! - a convex underestimator value `cv` and a concave overestimator value `cc`
//! - a subgradient of the underestimator and a supergradient of the
//!   overestimator, ready to be used as linear cuts
//!
//! ## Quick Start
//!
//! ```
//! use mccormick::prelude::*;
//!
//! // Two decision variables on [1, 2] x [1, 2], evaluated at (1.25, 1.75).
//! let ctx = Context::new(2);
//! let x = ctx.variable(0, 1.0, 2.0, 1.25)?;
//! let y = ctx.variable(1, 1.0, 2.0, 1.75)?;
//!
//! let f = (&x * &y - log(&x)?).powi(2)?;
//!
//! assert!(f.lower() <= f.cv() && f.cv() <= f.cc() && f.cc() <= f.upper());
//! println!("{f}");
//! # Ok::<(), mccormick::McError>(())
//! ```
//!
//! ## Supported Operations
//!
//! - Affine: `+`, `-`, unary `-`, multiplication and division by scalars
//! - Bilinear: `*` between composite values
//! - Powers: [`McCormick::powi`] for any nonzero integer exponent
//! - Reciprocal and division: [`McCormick::recip`], `/`
//! - Transcendental: [`log`](value::log), [`sqrt`](value::sqrt),
//!   [`exp`](value::exp)
//!
//! ## Architecture
//!
//! - [`interval`]: interval arithmetic and domain checks
//! - [`relax`]: convex/concave composition rules, recording the active branch
//! - [`subgradient`]: subgradient propagation following that branch
//! - [`value`]: the composite value type and operator overloading

pub mod error;
pub mod interval;
pub mod relax;
pub mod scalar;
pub mod subgradient;
pub mod value;

/// Prelude module for convenient imports.
///
/// ```
/// use mccormick::prelude::*;
/// ```
pub mod prelude {
    // Values
    pub use crate::value::{
        exp, log, sample_univariate, sqrt, Context, Elementary, Linearization, McCormick,
        Operand, Sample, ValueId,
    };

    // Components
    pub use crate::interval::Interval;
    pub use crate::relax::Relaxation;
    pub use crate::subgradient::Subgradient;

    // Errors
    pub use crate::error::{McError, Result};
}

// Re-export main types at crate root
pub use error::{McError, Result};
pub use value::{Context, McCormick};
