//! # cspace-linalg
//!
//! Exact dense linear algebra for cspace.
//!
//! This crate provides:
//! - Dense row-major matrices over any entry type
//! - Gauss–Jordan solving over any [`Field`](cspace_rings::Field)
//!
//! Functional-value systems are tiny and frequently ill-conditioned (the
//! moment functionals give Hilbert matrices), so elimination is always exact.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;
pub mod error;

pub use dense_matrix::DenseMatrix;
pub use error::SolveError;
