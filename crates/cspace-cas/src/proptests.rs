//! Property-based tests for the normal form and its calculus.

#[cfg(test)]
mod tests {
    use cspace_core::ExprArena;
    use cspace_integers::Rational;
    use cspace_rings::{GaussianRational, Ring};
    use proptest::prelude::*;

    use crate::calculus::{antiderivative, differentiate};
    use crate::lower::lower_polynomial;
    use crate::normal::{Atom, ExpPoly, LinearForm, Monomial};
    use crate::raise::raise;

    /// `c · xᵖ · e^{(r + ik)x}`
    fn term() -> impl Strategy<Value = (i64, u32, i64, i64)> {
        (-5i64..=5, 0u32..3, -2i64..=2, -2i64..=2)
    }

    fn expoly(var: Atom) -> impl Strategy<Value = ExpPoly> {
        prop::collection::vec(term(), 0..4).prop_map(move |terms| {
            let mut poly = ExpPoly::zero();
            for (coeff, power, rate, frequency) in terms {
                let rate = GaussianRational::new(Rational::from(rate), Rational::from(frequency));
                let monomial = Monomial::atom_power(var, power).with_exponent(LinearForm::atom(var, rate));
                poly.add_term(monomial, GaussianRational::from(coeff));
            }
            poly
        })
    }

    proptest! {
        #[test]
        fn multiplication_distributes(
            a in expoly(Atom::Symbol(0)),
            b in expoly(Atom::Symbol(0)),
            c in expoly(Atom::Symbol(0)),
        ) {
            let lhs = &a * &(b.clone() + c.clone());
            let rhs = &a * &b + &a * &c;
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn subtraction_cancels(a in expoly(Atom::Symbol(0))) {
            prop_assert!((a.clone() - a).is_zero());
        }

        #[test]
        fn antiderivative_then_derivative_is_identity(p in expoly(Atom::Symbol(0))) {
            let x = Atom::Symbol(0);
            prop_assert_eq!(differentiate(&antiderivative(&p, x), x), p);
        }

        #[test]
        fn derivative_is_linear(
            a in expoly(Atom::Symbol(0)),
            b in expoly(Atom::Symbol(0)),
            k in -4i64..=4,
        ) {
            let x = Atom::Symbol(0);
            let k = GaussianRational::from(k);
            let combined = differentiate(&(a.scale(&k) + b.clone()), x);
            let separate = differentiate(&a, x).scale(&k) + differentiate(&b, x);
            prop_assert_eq!(combined, separate);
        }

        #[test]
        fn raise_then_lower_is_identity(p in expoly(Atom::Symbol(0))) {
            let mut arena = ExprArena::new();
            arena.symbol("x");
            let raised = raise(&mut arena, &p);
            prop_assert_eq!(lower_polynomial(&arena, raised).unwrap(), p);
        }
    }
}
