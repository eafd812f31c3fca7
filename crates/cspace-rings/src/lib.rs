//! # cspace-rings
//!
//! Algebraic structures for cspace.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `UnitRing`, `Field`
//! - The field Q (implemented directly on `cspace_integers::Rational`)
//! - The Gaussian rationals Q(i)
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Ring
//!  └── UnitRing   (some elements have known inverses)
//!       └── Field (every non-zero element is a unit)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod gaussian;
pub mod rationals;
pub mod traits;

pub use gaussian::GaussianRational;
pub use traits::{Field, Ring, UnitRing};
