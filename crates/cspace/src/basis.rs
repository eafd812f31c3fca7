//! Indexed families of basis vectors.

use cspace_cas::{CasError, ComputerAlgebra};
use cspace_core::ExprHandle;

/// Substitutes `index ↦ i` into `template` for `i = 0..=n`.
///
/// # Errors
///
/// [`CasError::NotASymbol`] when `index` is not a symbol.
pub(crate) fn instantiate<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    template: ExprHandle,
    index: ExprHandle,
    n: u32,
) -> Result<Vec<ExprHandle>, CasError> {
    (0..=n)
        .map(|i| {
            let value = cas.arena_mut().integer(i64::from(i));
            cas.substitute(template, index, value)
        })
        .collect()
}

/// The `n + 1` vectors `template[index ↦ i]`, `i = 0..=n`.
///
/// `basis_family(x^n, n, 3)` gives `1, x, x^2, x^3` (as unsimplified
/// powers); `legendre(n, x)` gives the first Legendre polynomials.
///
/// # Errors
///
/// [`CasError::NotASymbol`] when `index` is not a symbol.
pub fn basis_family<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    template: ExprHandle,
    index: ExprHandle,
    n: u32,
) -> Result<Vec<ExprHandle>, CasError> {
    instantiate(cas, template, index, n)
}
