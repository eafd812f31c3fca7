//! Linear forms: the exponents of the normal form.

use std::collections::BTreeMap;
use std::ops::{Add, Neg, Sub};

use cspace_integers::Rational;
use cspace_rings::{GaussianRational, Ring};

use super::atom::Atom;

/// `λ₀ + Σ λₐ·a` over atoms `a`, with Gaussian-rational coefficients.
///
/// Zero coefficients are never stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LinearForm {
    constant: GaussianRational,
    coeffs: BTreeMap<Atom, GaussianRational>,
}

impl LinearForm {
    /// The zero form.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// A constant form.
    #[must_use]
    pub fn constant(value: GaussianRational) -> Self {
        Self {
            constant: value,
            coeffs: BTreeMap::new(),
        }
    }

    /// The form `coeff · atom`.
    #[must_use]
    pub fn atom(atom: Atom, coeff: GaussianRational) -> Self {
        let mut form = Self::zero();
        form.set_coefficient(atom, coeff);
        form
    }

    /// Returns true if every coefficient is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.constant.is_zero() && self.coeffs.is_empty()
    }

    /// Returns true if the form has no atom terms.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// The constant term `λ₀`.
    #[must_use]
    pub fn constant_term(&self) -> &GaussianRational {
        &self.constant
    }

    /// The coefficient of `atom` (zero when absent).
    #[must_use]
    pub fn coefficient(&self, atom: Atom) -> GaussianRational {
        self.coeffs.get(&atom).cloned().unwrap_or_else(GaussianRational::zero)
    }

    /// Iterates over the non-zero atom coefficients in atom order.
    pub fn coefficients(&self) -> impl Iterator<Item = (Atom, &GaussianRational)> + '_ {
        self.coeffs.iter().map(|(atom, coeff)| (*atom, coeff))
    }

    /// Sets the coefficient of `atom`, removing it when zero.
    pub fn set_coefficient(&mut self, atom: Atom, coeff: GaussianRational) {
        if coeff.is_zero() {
            self.coeffs.remove(&atom);
        } else {
            self.coeffs.insert(atom, coeff);
        }
    }

    /// Returns the form with the `atom` term removed.
    #[must_use]
    pub fn without(&self, atom: Atom) -> Self {
        let mut form = self.clone();
        form.coeffs.remove(&atom);
        form
    }

    /// Multiplies every coefficient by `factor`.
    #[must_use]
    pub fn scale(&self, factor: &GaussianRational) -> Self {
        if factor.is_zero() {
            return Self::zero();
        }
        Self {
            constant: &self.constant * factor,
            coeffs: self
                .coeffs
                .iter()
                .map(|(atom, coeff)| (*atom, coeff * factor))
                .collect(),
        }
    }

    /// Splits `L = A + i·B` into the real forms `A` and `B`.
    #[must_use]
    pub fn split(&self) -> (LinearForm, LinearForm) {
        let part = |select: fn(&GaussianRational) -> &Rational| {
            let mut form = LinearForm::constant(GaussianRational::real(select(&self.constant).clone()));
            for (atom, coeff) in &self.coeffs {
                form.set_coefficient(*atom, GaussianRational::real(select(coeff).clone()));
            }
            form
        };
        (part(GaussianRational::re), part(GaussianRational::im))
    }

    /// Sign of the first non-zero real part, constant term first.
    ///
    /// Returns 0 for the zero form.
    #[must_use]
    pub fn leading_sign(&self) -> i8 {
        std::iter::once(&self.constant)
            .chain(self.coeffs.values())
            .map(|coeff| coeff.re().signum())
            .find(|&sign| sign != 0)
            .unwrap_or(0)
    }
}

impl Add for LinearForm {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.constant = self.constant + rhs.constant;
        for (atom, coeff) in rhs.coeffs {
            let sum = self.coefficient(atom) + coeff;
            self.set_coefficient(atom, sum);
        }
        self
    }
}

impl Sub for LinearForm {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Neg for LinearForm {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            constant: -self.constant,
            coeffs: self.coeffs.into_iter().map(|(atom, coeff)| (atom, -coeff)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(re: i64, im: i64) -> GaussianRational {
        GaussianRational::new(Rational::from(re), Rational::from(im))
    }

    #[test]
    fn test_cancellation_drops_terms() {
        let x = Atom::Symbol(0);
        let a = LinearForm::atom(x, g(2, 1));
        let b = LinearForm::atom(x, g(-2, -1));
        assert!((a + b).is_zero());
    }

    #[test]
    fn test_split() {
        let x = Atom::Symbol(0);
        let mut form = LinearForm::constant(g(1, -3));
        form.set_coefficient(x, g(0, 2));
        let (re, im) = form.split();
        assert_eq!(re, LinearForm::constant(g(1, 0)));
        assert_eq!(im.coefficient(x), g(2, 0));
        assert_eq!(im.constant_term(), &g(-3, 0));
    }

    #[test]
    fn test_leading_sign() {
        let x = Atom::Symbol(0);
        assert_eq!(LinearForm::atom(x, g(-1, 0)).leading_sign(), -1);
        assert_eq!(LinearForm::constant(g(2, 0)).leading_sign(), 1);
        assert_eq!(LinearForm::zero().leading_sign(), 0);
    }
}
