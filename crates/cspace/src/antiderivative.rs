//! Definite and repeated antiderivatives.
//!
//! The `n`-fold repeated antiderivative of `f` from `a` is computed two
//! ways, and both must give the same normal form:
//!
//! - directly, integrating `n + 1` times with the upper bound left as `x`
//!   until the last step;
//! - through Cauchy's formula `∫_a^b (b - x)ⁿ/n! · f(x) dx`.

use cspace_cas::{CasError, ComputerAlgebra};
use cspace_core::ExprHandle;
use cspace_integers::Rational;
use smallvec::smallvec;
use tracing::trace;

/// `∫_a^b f dx`.
///
/// # Errors
///
/// Propagates the service's integration error.
pub fn antiderivative<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    f: ExprHandle,
    a: ExprHandle,
    b: ExprHandle,
    x: ExprHandle,
) -> Result<ExprHandle, CasError> {
    cas.integrate(f, x, a, b)
}

/// `∫_a^b ∫_a^{x_n} … ∫_a^{x_1} f` with `n + 1` integrations.
///
/// Order 0 is [`antiderivative`].
///
/// # Errors
///
/// Propagates the service's integration error.
pub fn repeated_antiderivative<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    n: u32,
    f: ExprHandle,
    a: ExprHandle,
    b: ExprHandle,
    x: ExprHandle,
) -> Result<ExprHandle, CasError> {
    (0..=n).try_fold(f, |running, step| {
        let upper = if step == n { b } else { x };
        let next = cas.integrate(running, x, a, upper)?;
        trace!(step, value = %cas.arena().display(next), "integrated");
        Ok(next)
    })
}

/// Cauchy's formula for the repeated integral: `∫_a^b (b - x)ⁿ/n! · f dx`.
///
/// # Errors
///
/// Propagates the service's integration error.
pub fn antiderivative_integral<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    n: u32,
    f: ExprHandle,
    a: ExprHandle,
    b: ExprHandle,
    x: ExprHandle,
) -> Result<ExprHandle, CasError> {
    let scale = Rational::from_integer(cas.factorial(n)).recip();
    let arena = cas.arena_mut();
    let distance = arena.sub(b, x);
    let exponent = arena.integer(i64::from(n));
    let power = arena.pow(distance, exponent);
    let weight = arena.number(scale);
    let kernel = arena.mul(smallvec![weight, power, f]);
    antiderivative(cas, kernel, a, b, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cspace_cas::Cas;

    use crate::StandardSymbols;

    #[test]
    fn test_order_zero_is_plain_integral() {
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let sin = cas.arena_mut().sin(s.x);

        let direct = repeated_antiderivative(&mut cas, 0, sin, s.a, s.b, s.x).unwrap();
        let plain = antiderivative(&mut cas, sin, s.a, s.b, s.x).unwrap();
        assert_eq!(direct, plain);
        assert_eq!(cas.arena().display(plain).to_string(), "-cos(b) + cos(a)");
    }

    #[test]
    fn test_cauchy_matches_for_a_polynomial() {
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let two = cas.arena_mut().integer(2);
        let square = cas.arena_mut().pow(s.x, two);

        for n in 0..4 {
            let direct = repeated_antiderivative(&mut cas, n, square, s.a, s.b, s.x).unwrap();
            let cauchy = antiderivative_integral(&mut cas, n, square, s.a, s.b, s.x).unwrap();
            assert_eq!(direct, cauchy, "n = {n}");
        }
    }
}
