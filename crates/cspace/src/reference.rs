//! Closed-form reference approximations.

use cspace_cas::{CasError, ComputerAlgebra, PolynomialFamily};
use cspace_core::ExprHandle;
use smallvec::smallvec;

use crate::functional::inner_product;

/// The order-`n` Legendre series of `target` on `[-1, 1]`.
///
/// Uses the orthonormal polynomials `pᵢ = Pᵢ · √((2i + 1)/2)`: the result is
/// `Σᵢ ⟨target, pᵢ⟩ · pᵢ` for `i = 0..=n`. It coincides with the engine's
/// approximation from Legendre-indexed integral functionals and a Legendre
/// basis on the same interval.
///
/// # Errors
///
/// Propagates the service's integration error.
pub fn legendre_approximation<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    target: ExprHandle,
    n: u32,
    x: ExprHandle,
) -> Result<ExprHandle, CasError> {
    let minus_one = cas.arena_mut().integer(-1);
    let one = cas.arena_mut().integer(1);

    let mut terms = Vec::new();
    for i in 0..=n {
        let polynomial = cas.orthogonal_polynomial(PolynomialFamily::Legendre, i, x)?;
        let arena = cas.arena_mut();
        let weight = arena.rational(2 * i64::from(i) + 1, 2);
        let scale = arena.sqrt(weight);
        let orthonormal = arena.mul(smallvec![scale, polynomial]);

        let coefficient = inner_product(cas, target, orthonormal, minus_one, one, x)?;
        terms.push(cas.arena_mut().mul(smallvec![coefficient, orthonormal]));
    }
    let series = cas.arena_mut().add(terms);
    cas.simplify(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cspace_cas::Cas;

    use crate::StandardSymbols;

    #[test]
    fn test_polynomials_are_reproduced() {
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let three = cas.arena_mut().integer(3);
        let cube = cas.arena_mut().pow(s.x, three);

        let series = legendre_approximation(&mut cas, cube, 3, s.x).unwrap();
        assert!(cas.simplify_equal(series, cube).unwrap());
    }

    #[test]
    fn test_order_zero_is_the_mean() {
        // The constant term of x^2 on [-1, 1] is its mean value 1/3
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let two = cas.arena_mut().integer(2);
        let square = cas.arena_mut().pow(s.x, two);

        let series = legendre_approximation(&mut cas, square, 0, s.x).unwrap();
        let third = cas.arena_mut().rational(1, 3);
        assert_eq!(series, third);
    }
}
