//! # cspace
//!
//! Best approximations in C([a, b]) through linear functionals, computed
//! exactly.
//!
//! Pick a family of linear functionals (point derivatives for Taylor
//! polynomials, moments, Legendre-indexed inner products) and a basis; the
//! engine builds the functional-value matrix, solves it over the rationals
//! and rebuilds the approximation as a combination of the basis. The crate
//! also computes repeated antiderivatives both by iteration and by Cauchy's
//! formula.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cspace::prelude::*;
//!
//! let mut cas = Cas::new();
//! let s = StandardSymbols::new(cas.arena_mut());
//! let zero = cas.arena_mut().integer(0);
//! let template = cas.arena_mut().pow(s.x, s.n);
//! let target = cas.arena_mut().exp(s.x);
//!
//! let functionals = derivative_functional_family(2, zero, s.x);
//! let basis = basis_family(&mut cas, template, s.n, 2)?;
//! let taylor = approximate(&mut cas, &functionals, &basis, target)?;
//! // x^2/2 + x + 1
//! ```
//!
//! Symbolic work goes through the [`ComputerAlgebra`](cspace_cas::ComputerAlgebra)
//! trait, implemented exactly by [`Cas`](cspace_cas::Cas).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod antiderivative;
pub mod approximation;
pub mod basis;
pub mod error;
pub mod functional;
pub mod norm;
pub mod reference;
pub mod symbols;

#[cfg(test)]
mod proptests;

pub use cspace_cas as cas;
pub use cspace_core as core;
pub use cspace_integers as integers;
pub use cspace_linalg as linalg;
pub use cspace_rings as rings;

pub use antiderivative::{antiderivative, antiderivative_integral, repeated_antiderivative};
pub use approximation::{approximate, approximate_detailed, matrix_of, Approximation};
pub use basis::basis_family;
pub use error::ApproxError;
pub use functional::{
    derivative_functional, derivative_functional_family, inner_product, integral_functional,
    integral_functional_family, FunctionalFamily, LinearFunctional,
};
pub use norm::{supremum_norm, SamplingConfig, DEFAULT_TOLERANCE};
pub use reference::legendre_approximation;
pub use symbols::StandardSymbols;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        antiderivative, antiderivative_integral, approximate, approximate_detailed, basis_family,
        derivative_functional, derivative_functional_family, inner_product, integral_functional,
        integral_functional_family, legendre_approximation, matrix_of, repeated_antiderivative,
        supremum_norm, ApproxError, Approximation, LinearFunctional, SamplingConfig, StandardSymbols,
        DEFAULT_TOLERANCE,
    };
    pub use cspace_cas::{Cas, CasError, ComputerAlgebra, PolynomialFamily};
    pub use cspace_core::{ExprArena, ExprHandle};
    pub use cspace_integers::{Integer, Rational};
    pub use cspace_linalg::DenseMatrix;
}
