//! The canonical normal form: exponential polynomials.
//!
//! Every expression the service can compute with is lowered into a
//! [`Quotient`] of [`ExpPoly`] values, operated on there, and raised back
//! into the arena. Equal normal forms are equal functions. The converse
//! holds unless a term keeps an `exp(iπs)` rotation that is not a multiple
//! of `π/12` (see [`ExpPoly::has_free_rotation`]).

pub mod atom;
pub mod expoly;
pub mod linear;
pub mod monomial;
pub mod quotient;

pub use atom::Atom;
pub use expoly::ExpPoly;
pub use linear::LinearForm;
pub use monomial::Monomial;
pub use quotient::Quotient;
