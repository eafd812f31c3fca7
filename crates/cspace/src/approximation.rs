//! The linear-functional approximation engine.
//!
//! Given functionals `Φ₀ … Φₙ`, basis vectors `v₀ … vₙ` and a target `f`,
//! the engine solves `Σⱼ cⱼ Φᵢ(vⱼ) = Φᵢ(f)` exactly and returns `Σ cⱼ vⱼ`.
//! When the functionals are independent on the span of the vectors, this is
//! the unique element of the span on which every functional agrees with
//! the target.

use cspace_cas::ComputerAlgebra;
use cspace_core::ExprHandle;
use cspace_linalg::DenseMatrix;
use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::error::ApproxError;
use crate::functional::LinearFunctional;

/// Every intermediate of one approximation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Approximation {
    /// `matrix[(i, j)] = Φᵢ(vⱼ)`.
    pub matrix: DenseMatrix<ExprHandle>,
    /// `Φᵢ(target)`.
    pub target_values: Vec<ExprHandle>,
    /// The solution `c` of `matrix · c = target_values`.
    pub coefficients: Vec<ExprHandle>,
    /// `Σ cᵢ vᵢ` in normal form.
    pub expression: ExprHandle,
}

/// The functional-value matrix, rows following `functionals` and columns
/// following `vectors`.
///
/// # Errors
///
/// Propagates the first error of applying a functional.
pub fn matrix_of<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    functionals: &[LinearFunctional],
    vectors: &[ExprHandle],
) -> Result<DenseMatrix<ExprHandle>, ApproxError> {
    let matrix = DenseMatrix::try_from_fn(functionals.len(), vectors.len(), |i, j| {
        functionals[i].apply(cas, vectors[j])
    })?;
    Ok(matrix)
}

/// Approximates `target` in the span of `vectors` through `functionals`.
///
/// # Errors
///
/// - [`ApproxError::EmptySystem`] or [`ApproxError::LengthMismatch`] before
///   any symbolic work;
/// - [`ApproxError::Cas`] when a functional cannot be applied or the system
///   is singular.
pub fn approximate<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    functionals: &[LinearFunctional],
    vectors: &[ExprHandle],
    target: ExprHandle,
) -> Result<ExprHandle, ApproxError> {
    approximate_detailed(cas, functionals, vectors, target).map(|approximation| approximation.expression)
}

/// Like [`approximate`], returning the matrix, target values and
/// coefficients as well.
///
/// # Errors
///
/// See [`approximate`].
#[tracing::instrument(level = "debug", skip_all, fields(size = functionals.len()))]
pub fn approximate_detailed<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    functionals: &[LinearFunctional],
    vectors: &[ExprHandle],
    target: ExprHandle,
) -> Result<Approximation, ApproxError> {
    if functionals.len() != vectors.len() {
        return Err(ApproxError::LengthMismatch {
            functionals: functionals.len(),
            vectors: vectors.len(),
        });
    }
    let Some(first) = functionals.first() else {
        return Err(ApproxError::EmptySystem);
    };
    debug!(family = %first.family(), "building functional-value matrix");

    let matrix = matrix_of(cas, functionals, vectors)?;
    let target_values = functionals
        .iter()
        .map(|functional| functional.apply(cas, target))
        .collect::<Result<Vec<_>, _>>()?;

    let coefficients = cas
        .solve_linear_system(&matrix, &target_values)
        .inspect_err(|error| debug!(%error, "no unique solution"))?;
    debug!("system solved");

    let terms: SmallVec<[ExprHandle; 4]> = coefficients
        .iter()
        .zip(vectors)
        .map(|(&coefficient, &vector)| cas.arena_mut().mul(smallvec![coefficient, vector]))
        .collect();
    let sum = cas.arena_mut().add(terms);
    let expression = cas.simplify(sum)?;
    debug!(approximation = %cas.arena().display(expression), "rebuilt approximation");

    Ok(Approximation {
        matrix,
        target_values,
        coefficients,
        expression,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cspace_cas::{Cas, CasError};
    use cspace_linalg::SolveError;

    use crate::functional::{derivative_functional, derivative_functional_family};
    use crate::StandardSymbols;

    #[test]
    fn test_exact_for_polynomials_in_the_span() {
        // 1 - 3x + x^2 through value, slope and curvature at 1
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let arena = cas.arena_mut();
        let one = arena.integer(1);
        let two = arena.integer(2);
        let minus_three = arena.integer(-3);
        let x2 = arena.pow(s.x, two);
        let linear = arena.mul(smallvec![minus_three, s.x]);
        let target = arena.add(smallvec![one, linear, x2]);
        let vectors = [one, s.x, x2];

        let functionals = derivative_functional_family(2, one, s.x);
        let result = approximate(&mut cas, &functionals, &vectors, target).unwrap();
        assert!(cas.simplify_equal(result, target).unwrap());
    }

    #[test]
    fn test_detailed_exposes_intermediates() {
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let zero = cas.arena_mut().integer(0);
        let one = cas.arena_mut().integer(1);
        let ex = cas.arena_mut().exp(s.x);

        let functionals = derivative_functional_family(1, zero, s.x);
        let detail = approximate_detailed(&mut cas, &functionals, &[one, s.x], ex).unwrap();
        assert!(detail.matrix.is_square());
        assert_eq!(detail.target_values, vec![one, one]);
        assert_eq!(detail.coefficients, vec![one, one]);
        let expected = cas.arena_mut().add(smallvec![s.x, one]);
        assert_eq!(detail.expression, expected);
    }

    #[test]
    fn test_usage_errors_come_first() {
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let zero = cas.arena_mut().integer(0);

        assert_eq!(
            approximate(&mut cas, &[], &[], s.x),
            Err(ApproxError::EmptySystem)
        );
        let functionals = derivative_functional_family(1, zero, s.x);
        assert_eq!(
            approximate(&mut cas, &functionals, &[s.x], s.x),
            Err(ApproxError::LengthMismatch {
                functionals: 2,
                vectors: 1
            })
        );
    }

    #[test]
    fn test_singular_system() {
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let zero = cas.arena_mut().integer(0);
        let one = cas.arena_mut().integer(1);
        let phi = derivative_functional(0, zero, s.x);

        let result = approximate(&mut cas, &[phi, phi], &[one, s.x], s.x);
        assert!(matches!(
            result,
            Err(ApproxError::Cas(CasError::Solve(SolveError::Singular { .. })))
        ));
    }
}
