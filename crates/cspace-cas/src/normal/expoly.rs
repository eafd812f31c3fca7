//! Exponential polynomials in canonical form.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use cspace_integers::{Integer, Rational};
use cspace_rings::{Field, GaussianRational, Ring, UnitRing};

use super::atom::Atom;
use super::linear::LinearForm;
use super::monomial::Monomial;

/// Bound on the steps of an exact division, whose candidates descend
/// but need not reach the floor in finitely many steps.
const MAX_DIVISION_STEPS: usize = 1 << 12;

/// A finite sum `Σ cₖ · Mₖ` of normalised monomials with non-zero
/// Gaussian-rational coefficients.
///
/// Equal values are equal functions. The converse holds when no term keeps
/// a free rotation (see [`ExpPoly::has_free_rotation`]): rotations by
/// multiples of `π/12` are expanded into radicals, any other `exp(iπs)` is
/// kept as an independent term.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ExpPoly {
    terms: BTreeMap<Monomial, GaussianRational>,
}

impl ExpPoly {
    /// A constant.
    #[must_use]
    pub fn constant(value: GaussianRational) -> Self {
        let mut poly = Self::default();
        poly.add_normalized(Monomial::one(), value);
        poly
    }

    /// A rational constant.
    #[must_use]
    pub fn rational(value: Rational) -> Self {
        Self::constant(GaussianRational::real(value))
    }

    /// The atom `a` itself.
    #[must_use]
    pub fn atom(atom: Atom) -> Self {
        Self::monomial(Monomial::atom_power(atom, 1), GaussianRational::one())
    }

    /// `exp(L)`.
    #[must_use]
    pub fn exp(exponent: LinearForm) -> Self {
        Self::monomial(Monomial::one().with_exponent(exponent), GaussianRational::one())
    }

    /// `√|r|` for a rational `r`, times `i` when `r` is negative.
    ///
    /// The radicand is split by [`Integer::square_free_parts`], so a square
    /// factor made only of primes above
    /// [`TRIAL_DIVISION_LIMIT`](cspace_integers::TRIAL_DIVISION_LIMIT) can
    /// stay under the root when the rest is not a square.
    #[must_use]
    pub fn sqrt_rational(value: &Rational) -> Self {
        let Some((root, square_free)) = value.sqrt_parts() else {
            return Self::zero();
        };
        let coeff = if value.is_negative() {
            GaussianRational::i().scale(&root)
        } else {
            GaussianRational::real(root)
        };
        Self::monomial(Monomial::one().with_radical(square_free), coeff)
    }

    /// `coeff · monomial`, normalising the monomial.
    #[must_use]
    pub fn monomial(monomial: Monomial, coeff: GaussianRational) -> Self {
        let mut poly = Self::default();
        poly.add_term(monomial, coeff);
        poly
    }

    /// Adds `coeff · monomial`, normalising the monomial first.
    pub fn add_term(&mut self, monomial: Monomial, coeff: GaussianRational) {
        if coeff.is_zero() {
            return;
        }
        for (factor, normal) in monomial.normalize() {
            self.add_normalized(normal, &coeff * &factor);
        }
    }

    /// Adds `coeff · monomial` for a monomial already in normal form.
    fn add_normalized(&mut self, monomial: Monomial, coeff: GaussianRational) {
        if coeff.is_zero() {
            return;
        }
        let sum = match self.terms.remove(&monomial) {
            Some(existing) => existing + coeff,
            None => coeff,
        };
        if !sum.is_zero() {
            self.terms.insert(monomial, sum);
        }
    }

    /// Iterates over `(monomial, coefficient)` in monomial order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (&Monomial, &GaussianRational)> + '_ {
        self.terms.iter()
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true for the zero polynomial.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, factor: &GaussianRational) -> Self {
        if factor.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|(monomial, coeff)| (monomial.clone(), coeff * factor))
                .collect(),
        }
    }

    /// The value as a constant, if it has no monomial other than `1`.
    #[must_use]
    pub fn as_constant(&self) -> Option<GaussianRational> {
        match self.terms.len() {
            0 => Some(GaussianRational::zero()),
            1 => self
                .terms
                .iter()
                .next()
                .filter(|(monomial, _)| monomial.is_one())
                .map(|(_, coeff)| coeff.clone()),
            _ => None,
        }
    }

    /// The value as a rational constant.
    #[must_use]
    pub fn as_rational(&self) -> Option<Rational> {
        self.as_constant()
            .filter(GaussianRational::is_real)
            .map(|value| value.re().clone())
    }

    /// The value as a linear form `λ₀ + Σ λₐ·a`, if it is one.
    #[must_use]
    pub fn as_linear_form(&self) -> Option<LinearForm> {
        let mut form = LinearForm::zero();
        for (monomial, coeff) in &self.terms {
            if monomial.is_one() {
                form = form + LinearForm::constant(coeff.clone());
                continue;
            }
            let mut powers = monomial.powers();
            let (atom, power) = powers.next()?;
            let plain = power == 1
                && powers.next().is_none()
                && monomial.exponent().is_zero()
                && monomial.radical() == &Integer::new(1);
            if !plain {
                return None;
            }
            form = form + LinearForm::atom(atom, coeff.clone());
        }
        Some(form)
    }

    /// Returns true if any term mentions `atom` as a power or in its exponent.
    #[must_use]
    pub fn mentions(&self, atom: Atom) -> bool {
        self.terms.keys().any(|monomial| {
            monomial.power(atom) > 0 || !monomial.exponent().coefficient(atom).is_zero()
        })
    }

    /// All atoms appearing in the polynomial, in atom order.
    #[must_use]
    pub fn atoms(&self) -> Vec<Atom> {
        let mut atoms: Vec<Atom> = self
            .terms
            .keys()
            .flat_map(|monomial| {
                monomial
                    .powers()
                    .map(|(atom, _)| atom)
                    .chain(monomial.exponent().coefficients().map(|(atom, _)| atom))
                    .collect::<Vec<_>>()
            })
            .collect();
        atoms.sort_unstable();
        atoms.dedup();
        atoms
    }

    /// Returns true if some term keeps an `exp(iπs)` rotation without a
    /// radical form. Such terms can satisfy algebraic relations that the
    /// normal form does not apply.
    #[must_use]
    pub fn has_free_rotation(&self) -> bool {
        self.terms.keys().any(Monomial::has_free_rotation)
    }

    /// The atom powers dividing every term.
    #[must_use]
    pub fn power_content(&self) -> BTreeMap<Atom, u32> {
        let mut monomials = self.terms.keys();
        let Some(first) = monomials.next() else {
            return BTreeMap::new();
        };
        let mut content: BTreeMap<Atom, u32> = first.powers().collect();
        for monomial in monomials {
            content.retain(|&atom, power| {
                *power = (*power).min(monomial.power(atom));
                *power > 0
            });
        }
        content
    }

    /// Divides every term by `Π aᵏ`, saturating at power zero.
    #[must_use]
    pub fn divide_powers(&self, powers: &BTreeMap<Atom, u32>) -> Self {
        let mut result = Self::zero();
        for (monomial, coeff) in &self.terms {
            let mut reduced = monomial.clone();
            for (&atom, &power) in powers {
                reduced.set_power(atom, monomial.power(atom).saturating_sub(power));
            }
            result.add_normalized(reduced, coeff.clone());
        }
        result
    }

    /// The greatest term under [`Monomial::term_order`].
    #[must_use]
    pub fn leading_term(&self) -> Option<(&Monomial, &GaussianRational)> {
        self.terms.iter().max_by(|(a, _), (b, _)| a.term_order(b))
    }

    /// The least term under [`Monomial::term_order`].
    #[must_use]
    pub fn trailing_term(&self) -> Option<(&Monomial, &GaussianRational)> {
        self.terms.iter().min_by(|(a, _), (b, _)| a.term_order(b))
    }

    /// `self / divisor` when the division is exact.
    ///
    /// The divisor must be free of radicals and rotations, so that the term
    /// order is compatible with multiplying by it. Any other divisor, or a
    /// non-zero remainder, gives `None`.
    #[must_use]
    pub fn divide_exact(&self, divisor: &Self) -> Option<Self> {
        if divisor
            .terms
            .keys()
            .any(|monomial| monomial.radical() != &Integer::new(1) || monomial.has_free_rotation())
        {
            return None;
        }
        let (lead, lead_coeff) = divisor.leading_term()?;
        let (trail, _) = divisor.trailing_term()?;
        let lead_inverse = lead_coeff.inv()?;
        let Some((self_trail, _)) = self.trailing_term() else {
            return Some(Self::zero());
        };
        // An exact quotient has no term below trail(self) / trail(divisor)
        let floor = self_trail.divided_by(trail)?;

        let mut remainder = self.clone();
        let mut quotient = Self::zero();
        for _ in 0..MAX_DIVISION_STEPS {
            let Some((monomial, coeff)) = remainder.leading_term() else {
                return Some(quotient);
            };
            let candidate = monomial.divided_by(lead)?;
            if candidate.term_order(&floor).is_lt() {
                return None;
            }
            let step = Self::monomial(candidate, coeff * &lead_inverse);
            remainder = remainder - &step * divisor;
            quotient = quotient + step;
        }
        None
    }
}

impl Ring for ExpPoly {
    fn zero() -> Self {
        Self::default()
    }

    fn one() -> Self {
        Self::constant(GaussianRational::one())
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c.is_one())
    }
}

impl UnitRing for ExpPoly {
    /// A single power-free term `c · exp(L) · √r` is a unit.
    fn unit_inverse(&self) -> Option<Self> {
        if self.terms.len() != 1 {
            return None;
        }
        let (monomial, coeff) = self.terms.iter().next()?;
        let (scale, inverse) = monomial.inverse()?;
        let coeff_inverse = coeff.inv()?;
        Some(Self::monomial(inverse, coeff_inverse * scale))
    }
}

impl Add for ExpPoly {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (monomial, coeff) in rhs.terms {
            self.add_normalized(monomial, coeff);
        }
        self
    }
}

impl Sub for ExpPoly {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Neg for ExpPoly {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            terms: self.terms.into_iter().map(|(m, c)| (m, -c)).collect(),
        }
    }
}

impl Mul for ExpPoly {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Mul for &ExpPoly {
    type Output = ExpPoly;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut product = ExpPoly::default();
        for (left, left_coeff) in &self.terms {
            for (right, right_coeff) in &rhs.terms {
                let coeff = left_coeff * right_coeff;
                for (factor, monomial) in left.multiply(right) {
                    product.add_normalized(monomial, &coeff * &factor);
                }
            }
        }
        product
    }
}

impl fmt::Debug for ExpPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.terms.iter()).finish()
    }
}
