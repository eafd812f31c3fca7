//! Differentiation, integration and substitution on the normal form.
//!
//! Every operation works term by term. A term `c · vᵏ · e^{λv} · R`, with
//! `R` free of `v`, differentiates to `c·k·vᵏ⁻¹e^{λv}R + c·λ·vᵏe^{λv}R` and
//! integrates through the closed form of `∫ vᵏ e^{λv} dv`.

use cspace_integers::Rational;
use cspace_rings::{Field, Ring};

use crate::normal::{Atom, ExpPoly, Monomial, Quotient};

/// `d/dv` of `poly`.
#[must_use]
pub fn differentiate(poly: &ExpPoly, var: Atom) -> ExpPoly {
    let mut result = ExpPoly::zero();
    for (monomial, coeff) in poly.terms() {
        let power = monomial.power(var);
        let rate = monomial.exponent().coefficient(var);
        if power > 0 {
            let mut lowered = monomial.clone();
            lowered.set_power(var, power - 1);
            result.add_term(lowered, coeff.scale(&Rational::from(i64::from(power))));
        }
        if !rate.is_zero() {
            result.add_term(monomial.clone(), coeff * &rate);
        }
    }
    result
}

/// An antiderivative of `poly` in `v`, with zero constant of integration.
///
/// For `λ ≠ 0`:
/// `∫ vᵏ e^{λv} dv = e^{λv} Σⱼ₌₀ᵏ (-1)ʲ · k!/(k-j)! · vᵏ⁻ʲ / λʲ⁺¹`.
#[must_use]
pub fn antiderivative(poly: &ExpPoly, var: Atom) -> ExpPoly {
    let mut result = ExpPoly::zero();
    for (monomial, coeff) in poly.terms() {
        let power = monomial.power(var);
        let rate = monomial.exponent().coefficient(var);

        let Some(inverse_rate) = rate.inv() else {
            let mut raised = monomial.clone();
            raised.set_power(var, power + 1);
            let scale = Rational::from_i64(1, i64::from(power) + 1);
            result.add_term(raised, coeff.scale(&scale));
            continue;
        };

        // falling = k!/(k-j)!, step = (-1)ʲ / λʲ⁺¹
        let mut falling = Rational::from(1);
        let mut step = coeff * &inverse_rate;
        for j in 0..=power {
            let mut term = monomial.clone();
            term.set_power(var, power - j);
            result.add_term(term, step.scale(&falling));

            falling = falling * Rational::from(i64::from(power - j));
            step = -(&step * &inverse_rate);
        }
    }
    result
}

/// Replaces `var` by `value` in `poly`.
///
/// Returns `None` when `var` occurs in an exponent and `value` is not a
/// linear form, since the result would leave the normal form.
#[must_use]
pub fn substitute(poly: &ExpPoly, var: Atom, value: &ExpPoly) -> Option<ExpPoly> {
    if !poly.mentions(var) {
        return Some(poly.clone());
    }
    let linear = value.as_linear_form();

    let mut result = ExpPoly::zero();
    for (monomial, coeff) in poly.terms() {
        let power = monomial.power(var);
        let rate = monomial.exponent().coefficient(var);

        let mut rest: Monomial = monomial.clone();
        rest.set_power(var, 0);
        if !rate.is_zero() {
            let form = linear.as_ref()?;
            let exponent = monomial.exponent().without(var) + form.scale(&rate);
            rest = rest.with_exponent(exponent);
        }
        let term = ExpPoly::monomial(rest, coeff.clone());
        result = result + &term * &value.pow(power);
    }
    Some(result)
}

/// `∫ₗᵘ poly dv`, as `F(u) - F(l)` for the antiderivative `F`.
///
/// Returns `None` under the same condition as [`substitute`].
#[must_use]
pub fn definite_integral(poly: &ExpPoly, var: Atom, lower: &ExpPoly, upper: &ExpPoly) -> Option<ExpPoly> {
    let primitive = antiderivative(poly, var);
    let at_upper = substitute(&primitive, var, upper)?;
    let at_lower = substitute(&primitive, var, lower)?;
    Some(at_upper - at_lower)
}

/// The `order`-th derivative.
#[must_use]
pub fn nth_derivative(poly: &ExpPoly, var: Atom, order: u32) -> ExpPoly {
    (0..order).fold(poly.clone(), |acc, _| differentiate(&acc, var))
}

/// `d/dv` of a quotient, by the quotient rule when the denominator
/// depends on `v`.
#[must_use]
pub fn differentiate_quotient(value: &Quotient, var: Atom) -> Quotient {
    let num = value.numerator();
    let den = value.denominator();
    if !den.mentions(var) {
        return value.with_numerator(differentiate(num, var));
    }
    let top = &differentiate(num, var) * den - num * &differentiate(den, var);
    Quotient::new(top, den * den)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normal::LinearForm;
    use cspace_rings::GaussianRational;

    const X: Atom = Atom::Symbol(0);
    const A: Atom = Atom::Symbol(1);
    const B: Atom = Atom::Symbol(2);

    fn sym(atom: Atom) -> ExpPoly {
        ExpPoly::atom(atom)
    }

    fn q(n: i64, d: i64) -> ExpPoly {
        ExpPoly::rational(Rational::from_i64(n, d))
    }

    fn exp_of(atom: Atom, rate: GaussianRational) -> ExpPoly {
        ExpPoly::exp(LinearForm::atom(atom, rate))
    }

    fn sin_x() -> ExpPoly {
        // sin x = (-i/2)e^{ix} + (i/2)e^{-ix}
        let half_i = GaussianRational::i().scale(&Rational::from_i64(1, 2));
        exp_of(X, GaussianRational::i()).scale(&-half_i.clone()) + exp_of(X, -GaussianRational::i()).scale(&half_i)
    }

    fn cos_x() -> ExpPoly {
        let half = GaussianRational::real(Rational::from_i64(1, 2));
        (exp_of(X, GaussianRational::i()) + exp_of(X, -GaussianRational::i())).scale(&half)
    }

    #[test]
    fn test_polynomial_derivative() {
        // d/dx (x^3 + 2x) = 3x^2 + 2
        let p = sym(X) * sym(X) * sym(X) + q(2, 1) * sym(X);
        assert_eq!(differentiate(&p, X), q(3, 1) * sym(X) * sym(X) + q(2, 1));
        assert!(differentiate(&q(7, 1), X).is_zero());
    }

    #[test]
    fn test_trig_derivatives() {
        assert_eq!(differentiate(&sin_x(), X), cos_x());
        assert_eq!(differentiate(&cos_x(), X), -sin_x());
        assert_eq!(nth_derivative(&sin_x(), X, 4), sin_x());
    }

    #[test]
    fn test_product_rule() {
        // d/dx (x e^x) = e^x + x e^x
        let ex = exp_of(X, GaussianRational::one());
        let p = sym(X) * ex.clone();
        assert_eq!(differentiate(&p, X), ex.clone() + sym(X) * ex);
    }

    #[test]
    fn test_antiderivative_inverts_derivative() {
        let ex = exp_of(X, GaussianRational::from(2));
        let cases = [
            sym(X) * sym(X),
            sin_x(),
            sym(X) * sym(X) * ex.clone(),
            sym(X) * cos_x() + q(1, 3),
        ];
        for case in cases {
            assert_eq!(differentiate(&antiderivative(&case, X), X), case);
        }
    }

    #[test]
    fn test_definite_integrals() {
        // ∫₀¹ x² dx = 1/3
        let square = sym(X) * sym(X);
        assert_eq!(definite_integral(&square, X, &q(0, 1), &q(1, 1)), Some(q(1, 3)));

        // ∫₀^π sin x dx = 2
        let pi = sym(Atom::Pi);
        assert_eq!(definite_integral(&sin_x(), X, &q(0, 1), &pi), Some(q(2, 1)));

        // ∫ₐᵇ e^x dx = e^b - e^a
        let ex = exp_of(X, GaussianRational::one());
        let expected = exp_of(B, GaussianRational::one()) - exp_of(A, GaussianRational::one());
        assert_eq!(definite_integral(&ex, X, &sym(A), &sym(B)), Some(expected));
    }

    #[test]
    fn test_substitution() {
        // (x^2)[x := a + 1] = a^2 + 2a + 1
        let square = sym(X) * sym(X);
        let shifted = sym(A) + q(1, 1);
        assert_eq!(substitute(&square, X, &shifted), Some(shifted.clone() * shifted));

        // e^x with x := a^2 has no normal form
        let ex = exp_of(X, GaussianRational::one());
        assert_eq!(substitute(&ex, X, &(sym(A) * sym(A))), None);

        // Terms not mentioning the variable are untouched
        assert_eq!(substitute(&sym(A), X, &(sym(A) * sym(A))), Some(sym(A)));
    }

    #[test]
    fn test_quotient_derivatives() {
        // d/dx (x² / π) = 2x / π
        let over_pi = Quotient::new(sym(X) * sym(X), sym(Atom::Pi));
        let expected = Quotient::new(sym(X).scale(&GaussianRational::from(2)), sym(Atom::Pi));
        assert_eq!(differentiate_quotient(&over_pi, X), expected);

        // d/dx 1/(x + 1) = -1/(x + 1)²
        let shifted = sym(X) + q(1, 1);
        let inverse = Quotient::new(q(1, 1), shifted.clone());
        let expected = Quotient::new(-q(1, 1), &shifted * &shifted);
        assert_eq!(differentiate_quotient(&inverse, X), expected);
    }
}
