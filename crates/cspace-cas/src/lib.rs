//! # cspace-cas
//!
//! The exact computer-algebra backend of cspace.
//!
//! This crate provides:
//! - A canonical normal form for exponential polynomials
//!   (`Σ c · Π aᵏ · exp(L) · √r` over the Gaussian rationals) and their
//!   quotients, so exact linear solves can divide by `π` or `b - a`
//! - Lowering of expression trees into it and raising back out, with
//!   `sin`/`cos` recombined from conjugate exponentials
//! - Term-wise differentiation, integration and substitution
//! - Expanded Legendre and Chebyshev polynomials
//! - Complex floating-point evaluation of trees
//! - The [`ComputerAlgebra`] service trait and its implementation [`Cas`]
//!
//! ## Supported class
//!
//! Sums, products and quotients of rationals, `π`, `i`, symbols,
//! `exp`/`sin`/`cos` of linear forms, square roots of rationals and integer
//! powers. Rotations `exp(iπs)` with `s` a multiple of `1/12` are expanded
//! into radicals, so zero testing is exact whenever every rotation is of
//! that kind. A difference that keeps another rotation (e.g.
//! `cos(π/5) - cos(2π/5) - 1/2`) may vanish through an algebraic relation
//! the normal form does not apply; `simplify_equal` then reports
//! [`CasError::UndecidedEquality`] rather than guessing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod calculus;
pub mod error;
pub mod evaluate;
pub mod lower;
pub mod normal;
pub mod orthogonal;
pub mod raise;
pub mod service;

#[cfg(test)]
mod proptests;

pub use error::CasError;
pub use normal::{Atom, ExpPoly, LinearForm, Monomial, Quotient};
pub use orthogonal::PolynomialFamily;
pub use service::{Cas, ComputerAlgebra};
