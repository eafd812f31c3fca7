//! Classical orthogonal polynomial families.
//!
//! Polynomials are built by their three-term recurrences directly in the
//! normal form, so the argument may be any exponential polynomial (a bare
//! symbol in practice) and coefficients stay exact.

use cspace_integers::Rational;
use cspace_rings::{GaussianRational, Ring};

use crate::normal::ExpPoly;

/// A named family of orthogonal polynomials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolynomialFamily {
    /// Legendre polynomials `Pₙ`, orthogonal on `[-1, 1]` with weight 1.
    Legendre,
    /// Chebyshev polynomials of the first kind `Tₙ`, orthogonal on `[-1, 1]`
    /// with weight `1/√(1 - x²)`.
    Chebyshev,
}

impl PolynomialFamily {
    /// Evaluates the `n`-th member of the family at `var`.
    #[must_use]
    pub fn evaluate(self, n: u32, var: &ExpPoly) -> ExpPoly {
        match self {
            PolynomialFamily::Legendre => legendre(n, var),
            PolynomialFamily::Chebyshev => chebyshev(n, var),
        }
    }
}

/// `Pₙ(v)` by Bonnet's recursion `(k+1)Pₖ₊₁ = (2k+1)·v·Pₖ - k·Pₖ₋₁`.
#[must_use]
pub fn legendre(n: u32, var: &ExpPoly) -> ExpPoly {
    let mut previous = ExpPoly::one();
    if n == 0 {
        return previous;
    }
    let mut current = var.clone();
    for k in 1..n {
        let k = i64::from(k);
        let scaled = (var * &current).scale(&ratio(2 * k + 1, k + 1));
        let next = scaled - previous.scale(&ratio(k, k + 1));
        previous = std::mem::replace(&mut current, next);
    }
    current
}

/// `Tₙ(v)` by `Tₖ₊₁ = 2·v·Tₖ - Tₖ₋₁`.
#[must_use]
pub fn chebyshev(n: u32, var: &ExpPoly) -> ExpPoly {
    let mut previous = ExpPoly::one();
    if n == 0 {
        return previous;
    }
    let mut current = var.clone();
    for _ in 1..n {
        let next = (var * &current).scale(&ratio(2, 1)) - previous;
        previous = std::mem::replace(&mut current, next);
    }
    current
}

fn ratio(numerator: i64, denominator: i64) -> GaussianRational {
    GaussianRational::real(Rational::from_i64(numerator, denominator))
}
