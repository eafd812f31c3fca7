//! Linear functionals on C([a, b]) and their indexed families.
//!
//! Two kinds are modelled:
//!
//! - integral functionals `Φ_g(f) = ∫_a^b f(x)·g(x) dx` for a fixed kernel
//!   `g`, which give moment functionals (`g = x^i`) and Legendre-indexed
//!   functionals (`g = Pᵢ`);
//! - derivative functionals `Φ_{k,x₀}(f) = f⁽ᵏ⁾(x₀)`, which give the Taylor
//!   setup.
//!
//! Constructing a functional never fails; applying one delegates to the
//! computer-algebra service and propagates its errors unchanged.

use std::fmt;

use cspace_cas::{CasError, ComputerAlgebra};
use cspace_core::ExprHandle;
use smallvec::smallvec;

use crate::basis::instantiate;

/// The kind of a [`LinearFunctional`], reported in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionalFamily {
    /// Inner product against a fixed kernel.
    Integral,
    /// A derivative evaluated at a point.
    DerivativeAt,
}

impl fmt::Display for FunctionalFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionalFamily::Integral => f.write_str("integral"),
            FunctionalFamily::DerivativeAt => f.write_str("derivative-at-point"),
        }
    }
}

/// A linear map from expressions to expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinearFunctional {
    /// `f ↦ ∫_lower^upper f·kernel d(var)`.
    Integral {
        /// The fixed kernel `g`.
        kernel: ExprHandle,
        /// Lower end of the interval.
        lower: ExprHandle,
        /// Upper end of the interval.
        upper: ExprHandle,
        /// The integration variable.
        var: ExprHandle,
    },
    /// `f ↦ f⁽ᵒʳᵈᵉʳ⁾(point)`; order 0 is plain evaluation.
    DerivativeAt {
        /// The derivative order.
        order: u32,
        /// The evaluation point.
        point: ExprHandle,
        /// The differentiation variable.
        var: ExprHandle,
    },
}

impl LinearFunctional {
    /// The kind of this functional.
    #[must_use]
    pub fn family(&self) -> FunctionalFamily {
        match self {
            LinearFunctional::Integral { .. } => FunctionalFamily::Integral,
            LinearFunctional::DerivativeAt { .. } => FunctionalFamily::DerivativeAt,
        }
    }

    /// Applies the functional to `f`.
    ///
    /// # Errors
    ///
    /// Propagates the service's error when `f` (times the kernel) has no
    /// closed form.
    pub fn apply<C: ComputerAlgebra + ?Sized>(&self, cas: &mut C, f: ExprHandle) -> Result<ExprHandle, CasError> {
        match *self {
            LinearFunctional::Integral {
                kernel,
                lower,
                upper,
                var,
            } => inner_product(cas, f, kernel, lower, upper, var),
            LinearFunctional::DerivativeAt { order, point, var } => {
                let derivative = cas.differentiate(f, var, order)?;
                let at_point = cas.substitute(derivative, var, point)?;
                cas.simplify(at_point)
            }
        }
    }
}

/// `⟨f, g⟩ = ∫_a^b f·g dx`.
///
/// # Errors
///
/// Propagates the service's integration error.
pub fn inner_product<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    f: ExprHandle,
    g: ExprHandle,
    a: ExprHandle,
    b: ExprHandle,
    x: ExprHandle,
) -> Result<ExprHandle, CasError> {
    let product = cas.arena_mut().mul(smallvec![f, g]);
    cas.integrate(product, x, a, b)
}

/// The functional `f ↦ ⟨f, kernel⟩` on `[a, b]`.
#[must_use]
pub fn integral_functional(kernel: ExprHandle, a: ExprHandle, b: ExprHandle, x: ExprHandle) -> LinearFunctional {
    LinearFunctional::Integral {
        kernel,
        lower: a,
        upper: b,
        var: x,
    }
}

/// The `n + 1` integral functionals with kernels `template[index ↦ i]`,
/// `i = 0..=n`.
///
/// # Errors
///
/// [`CasError::NotASymbol`] when `index` is not a symbol.
pub fn integral_functional_family<C: ComputerAlgebra + ?Sized>(
    cas: &mut C,
    template: ExprHandle,
    index: ExprHandle,
    n: u32,
    a: ExprHandle,
    b: ExprHandle,
    x: ExprHandle,
) -> Result<Vec<LinearFunctional>, CasError> {
    let kernels = instantiate(cas, template, index, n)?;
    Ok(kernels
        .into_iter()
        .map(|kernel| integral_functional(kernel, a, b, x))
        .collect())
}

/// The functional `f ↦ f⁽ᵒʳᵈᵉʳ⁾(x₀)`.
#[must_use]
pub fn derivative_functional(order: u32, x0: ExprHandle, x: ExprHandle) -> LinearFunctional {
    LinearFunctional::DerivativeAt {
        order,
        point: x0,
        var: x,
    }
}

/// Derivative functionals of orders `0..=n` at `x₀`.
#[must_use]
pub fn derivative_functional_family(n: u32, x0: ExprHandle, x: ExprHandle) -> Vec<LinearFunctional> {
    (0..=n).map(|order| derivative_functional(order, x0, x)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cspace_cas::Cas;

    use crate::StandardSymbols;

    #[test]
    fn test_derivative_functional_evaluates() {
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let arena = cas.arena_mut();
        let three = arena.integer(3);
        let cube = arena.pow(s.x, three);
        let two = arena.integer(2);

        // (x^3)'' at 2 = 12
        let phi = derivative_functional(2, two, s.x);
        let value = phi.apply(&mut cas, cube).unwrap();
        let twelve = cas.arena_mut().integer(12);
        assert_eq!(value, twelve);

        // order 0 is evaluation: 2^3 = 8
        let value = derivative_functional(0, two, s.x).apply(&mut cas, cube).unwrap();
        let eight = cas.arena_mut().integer(8);
        assert_eq!(value, eight);
    }

    #[test]
    fn test_integral_functional_with_symbolic_interval() {
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let one = cas.arena_mut().integer(1);

        // ∫_a^b 1·1 dx = b - a
        let phi = integral_functional(one, s.a, s.b, s.x);
        let value = phi.apply(&mut cas, one).unwrap();
        let expected = cas.arena_mut().sub(s.b, s.a);
        assert!(cas.simplify_equal(value, expected).unwrap());
        assert_eq!(phi.family(), FunctionalFamily::Integral);
    }

    #[test]
    fn test_family_sizes() {
        let mut cas = Cas::new();
        let s = StandardSymbols::new(cas.arena_mut());
        let zero = cas.arena_mut().integer(0);
        let one = cas.arena_mut().integer(1);
        let template = cas.arena_mut().pow(s.x, s.n);

        for n in 0..4 {
            assert_eq!(derivative_functional_family(n, zero, s.x).len(), n as usize + 1);
            let family = integral_functional_family(&mut cas, template, s.n, n, zero, one, s.x).unwrap();
            assert_eq!(family.len(), n as usize + 1);
        }
    }

    #[test]
    fn test_family_display() {
        assert_eq!(FunctionalFamily::DerivativeAt.to_string(), "derivative-at-point");
    }
}
