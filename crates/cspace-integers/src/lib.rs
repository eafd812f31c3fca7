//! # cspace-integers
//!
//! Arbitrary precision integer and rational arithmetic for cspace.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`) with factorials and
//!   square-free splitting of radicands
//! - Arbitrary precision rationals (`Rational`) with floor/ceil and
//!   exact square-root extraction
//!
//! Every coefficient the approximation engine solves for is a `Rational`
//! (or a Gaussian rational built from two of them), which keeps Hilbert-type
//! moment systems exact.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::{Integer, TRIAL_DIVISION_LIMIT};
pub use rational::Rational;
