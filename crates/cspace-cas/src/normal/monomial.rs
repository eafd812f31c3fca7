//! Monomials of the normal form and their canonicalisation.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use cspace_integers::{Integer, Rational};
use cspace_rings::{GaussianRational, Ring};
use smallvec::{smallvec, SmallVec};

use super::atom::Atom;
use super::linear::LinearForm;

/// `Π aᵏ · exp(L) · √r`.
///
/// Invariants (established by [`Monomial::normalize`]):
/// - no power is zero;
/// - `r` is a square-free positive integer (`1` when there is no radical);
/// - the imaginary part of the π coefficient of `L` lies in `(-1/4, 1/4)`
///   and has a denominator not dividing 12 when non-zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Monomial {
    powers: BTreeMap<Atom, u32>,
    exponent: LinearForm,
    radical: Integer,
}

/// A normalised monomial can expand into a few terms (`exp(iπ/6)` becomes
/// `√3/2 + i/2`).
pub type Expansion = SmallVec<[(GaussianRational, Monomial); 2]>;

impl Default for Monomial {
    fn default() -> Self {
        Self::one()
    }
}

impl Monomial {
    /// The empty monomial `1`.
    #[must_use]
    pub fn one() -> Self {
        Self {
            powers: BTreeMap::new(),
            exponent: LinearForm::zero(),
            radical: Integer::new(1),
        }
    }

    /// `atom^power`.
    #[must_use]
    pub fn atom_power(atom: Atom, power: u32) -> Self {
        let mut monomial = Self::one();
        monomial.set_power(atom, power);
        monomial
    }

    /// Returns true for the empty monomial.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.powers.is_empty() && self.exponent.is_zero() && self.radical == Integer::new(1)
    }

    /// Returns true if the monomial has no atom powers.
    #[must_use]
    pub fn is_power_free(&self) -> bool {
        self.powers.is_empty()
    }

    /// The power of `atom` (zero when absent).
    #[must_use]
    pub fn power(&self, atom: Atom) -> u32 {
        self.powers.get(&atom).copied().unwrap_or(0)
    }

    /// Iterates over atom powers in atom order.
    pub fn powers(&self) -> impl Iterator<Item = (Atom, u32)> + '_ {
        self.powers.iter().map(|(atom, power)| (*atom, *power))
    }

    /// Sets the power of `atom`, removing it when zero.
    pub fn set_power(&mut self, atom: Atom, power: u32) {
        if power == 0 {
            self.powers.remove(&atom);
        } else {
            self.powers.insert(atom, power);
        }
    }

    /// The exponent `L`.
    #[must_use]
    pub fn exponent(&self) -> &LinearForm {
        &self.exponent
    }

    /// The square-free radicand `r`.
    #[must_use]
    pub fn radical(&self) -> &Integer {
        &self.radical
    }

    /// Returns the same monomial with a different exponent, not yet
    /// normalised.
    #[must_use]
    pub fn with_exponent(&self, exponent: LinearForm) -> Self {
        Self {
            powers: self.powers.clone(),
            exponent,
            radical: self.radical.clone(),
        }
    }

    /// Returns the same monomial with a different radicand, not yet
    /// normalised.
    #[must_use]
    pub fn with_radical(&self, radical: Integer) -> Self {
        Self {
            powers: self.powers.clone(),
            exponent: self.exponent.clone(),
            radical,
        }
    }

    /// Returns the monomial with every atom power removed.
    #[must_use]
    pub fn without_powers(&self) -> Self {
        Self {
            powers: BTreeMap::new(),
            exponent: self.exponent.clone(),
            radical: self.radical.clone(),
        }
    }

    /// Multiplies two monomials, returning the normalised expansion.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Expansion {
        let mut powers = self.powers.clone();
        for (atom, power) in &other.powers {
            *powers.entry(*atom).or_insert(0) += power;
        }
        Self {
            powers,
            exponent: self.exponent.clone() + other.exponent.clone(),
            radical: self.radical.clone() * other.radical.clone(),
        }
        .normalize()
    }

    /// Brings a monomial into canonical form.
    ///
    /// The radicand may be any positive integer; it is split into a rational
    /// factor and a square-free part. The imaginary π coefficient `t` of the
    /// exponent is written `t = m/2 + s` with `s ∈ (-1/4, 1/4]`, and
    /// `exp(iπm/2) = iᵐ` moves into the coefficient. When `exp(iπs)` is itself
    /// a combination of square roots (`12s` an integer) it is expanded.
    #[must_use]
    pub fn normalize(mut self) -> Expansion {
        self.powers.retain(|_, power| *power > 0);

        let table = quarter_turn_table();
        let mut coefficient = GaussianRational::one();
        let mut rotation: &[(GaussianRational, Integer)] = &[];

        let pi_coeff = self.exponent.coefficient(Atom::Pi);
        let turns = pi_coeff.im().clone();
        if !Ring::is_zero(&turns) {
            let two = Rational::from(2);
            let half = Rational::from_i64(1, 2);
            // m = ceil(2t - 1/2), s = t - m/2
            let m = (&(&two * &turns) - &half).ceil();
            let rest = &turns - &(Rational::from_integer(m.clone()) / two);
            coefficient = GaussianRational::i_pow(quarter_turns(&m));

            let entry = table.iter().find(|(s, _)| *s == rest);
            let remaining = if let Some((_, expansion)) = entry {
                rotation = expansion.as_slice();
                Rational::from(0)
            } else {
                rest
            };
            self.exponent.set_coefficient(
                Atom::Pi,
                GaussianRational::new(pi_coeff.re().clone(), remaining),
            );
        }

        let mut expansion = Expansion::new();
        let default_rotation = [(GaussianRational::one(), Integer::new(1))];
        let rotation = if rotation.is_empty() {
            &default_rotation[..]
        } else {
            rotation
        };
        for (factor, extra_radical) in rotation {
            let radicand = self.radical.clone() * extra_radical.clone();
            let (root, square_free) = radicand.square_free_parts();
            let coeff = (&coefficient * factor).scale(&Rational::from_integer(root));
            expansion.push((coeff, self.with_radical(square_free)));
        }
        expansion
    }

    /// The inverse of a power-free monomial: `exp(-L) · √r / r`.
    ///
    /// Returns `None` when the monomial has atom powers.
    #[must_use]
    pub fn inverse(&self) -> Option<(GaussianRational, Monomial)> {
        if !self.is_power_free() {
            return None;
        }
        let scale = Rational::from_integer(self.radical.clone()).recip();
        let inverse = Self {
            powers: BTreeMap::new(),
            exponent: -self.exponent.clone(),
            radical: self.radical.clone(),
        };
        // Negation keeps the π coefficient inside the canonical window, so
        // this only re-splits the radicand.
        let mut expansion = inverse.normalize();
        if expansion.len() == 1 {
            let (coeff, monomial) = expansion.remove(0);
            Some((coeff.scale(&scale), monomial))
        } else {
            None
        }
    }

    /// `self / divisor`, for a divisor with no radical and no rotation.
    ///
    /// Returns `None` for any other divisor, or when a power of `divisor`
    /// exceeds the one in `self`.
    #[must_use]
    pub fn divided_by(&self, divisor: &Self) -> Option<Self> {
        if divisor.radical != Integer::new(1) || divisor.has_free_rotation() {
            return None;
        }
        let mut quotient = self.with_exponent(self.exponent.clone() - divisor.exponent.clone());
        for (&atom, &power) in &divisor.powers {
            let remaining = self.power(atom).checked_sub(power)?;
            quotient.set_power(atom, remaining);
        }
        Some(quotient)
    }

    /// A term order compatible with multiplication by rotation-free
    /// monomials: atom powers lexicographically in atom order, then the
    /// exponent coefficient by coefficient, then the radical.
    #[must_use]
    pub fn term_order(&self, other: &Self) -> Ordering {
        let atoms: BTreeSet<Atom> = self.powers.keys().chain(other.powers.keys()).copied().collect();
        let by_powers = atoms
            .into_iter()
            .map(|atom| self.power(atom).cmp(&other.power(atom)))
            .find(|ordering| ordering.is_ne());
        by_powers
            .unwrap_or_else(|| exponent_order(&self.exponent, &other.exponent))
            .then_with(|| self.radical.cmp(&other.radical))
    }

    /// Returns true if the exponent keeps a rotation `exp(iπs)` that has no
    /// radical form.
    #[must_use]
    pub fn has_free_rotation(&self) -> bool {
        !Ring::is_zero(self.exponent.coefficient(Atom::Pi).im())
    }
}

/// Compares exponents as vectors of coefficients: atoms in atom order,
/// then the constant term.
fn exponent_order(a: &LinearForm, b: &LinearForm) -> Ordering {
    let atoms: BTreeSet<Atom> = a.coefficients().chain(b.coefficients()).map(|(atom, _)| atom).collect();
    atoms
        .into_iter()
        .map(|atom| a.coefficient(atom).cmp(&b.coefficient(atom)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.constant_term().cmp(b.constant_term()))
}

/// `m mod 4` as an `i64` in `-3..=3`.
fn quarter_turns(m: &Integer) -> i64 {
    (m.clone() % Integer::new(4)).to_i64().unwrap_or(0)
}

/// Exact values of `exp(iπs)` for `s ∈ (-1/4, 1/4]` with `12s` an integer,
/// as sums of `c · √r`.
fn quarter_turn_table() -> [(Rational, SmallVec<[(GaussianRational, Integer); 2]>); 5] {
    let q = Rational::from_i64;
    let g = |re: Rational, im: Rational| GaussianRational::new(re, im);
    [
        // exp(iπ/4) = (1 + i)·√2/2
        (
            q(1, 4),
            smallvec![(g(q(1, 2), q(1, 2)), Integer::new(2))],
        ),
        // exp(±iπ/6) = √3/2 ± i/2
        (
            q(1, 6),
            smallvec![
                (g(q(1, 2), q(0, 1)), Integer::new(3)),
                (g(q(0, 1), q(1, 2)), Integer::new(1)),
            ],
        ),
        (
            q(-1, 6),
            smallvec![
                (g(q(1, 2), q(0, 1)), Integer::new(3)),
                (g(q(0, 1), q(-1, 2)), Integer::new(1)),
            ],
        ),
        // exp(±iπ/12) = (√6 + √2)/4 ± i(√6 - √2)/4
        (
            q(1, 12),
            smallvec![
                (g(q(1, 4), q(1, 4)), Integer::new(6)),
                (g(q(1, 4), q(-1, 4)), Integer::new(2)),
            ],
        ),
        (
            q(-1, 12),
            smallvec![
                (g(q(1, 4), q(-1, 4)), Integer::new(6)),
                (g(q(1, 4), q(1, 4)), Integer::new(2)),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pi_exponent(turns: Rational) -> Monomial {
        Monomial::one().with_exponent(LinearForm::atom(
            Atom::Pi,
            GaussianRational::new(Rational::from(0), turns),
        ))
    }

    #[test]
    fn test_exp_i_pi_is_minus_one() {
        let expansion = pi_exponent(Rational::from(1)).normalize();
        assert_eq!(expansion.len(), 1);
        assert_eq!(expansion[0].0, -GaussianRational::one());
        assert!(expansion[0].1.is_one());
    }

    #[test]
    fn test_exp_i_pi_half_is_i() {
        let expansion = pi_exponent(Rational::from_i64(1, 2)).normalize();
        assert_eq!(expansion[0].0, GaussianRational::i());
        assert!(expansion[0].1.is_one());

        let expansion = pi_exponent(Rational::from_i64(-3, 2)).normalize();
        assert_eq!(expansion[0].0, GaussianRational::i());
    }

    #[test]
    fn test_exp_i_pi_quarter_expands() {
        let expansion = pi_exponent(Rational::from_i64(1, 4)).normalize();
        assert_eq!(expansion.len(), 1);
        let half = Rational::from_i64(1, 2);
        assert_eq!(expansion[0].0, GaussianRational::new(half.clone(), half));
        assert_eq!(expansion[0].1.radical(), &Integer::new(2));
    }

    #[test]
    fn test_generic_turn_is_kept() {
        // exp(iπ/5) has no radical form; it stays an exponential
        let expansion = pi_exponent(Rational::from_i64(1, 5)).normalize();
        assert_eq!(expansion.len(), 1);
        assert!(!expansion[0].1.exponent().is_zero());
        assert_eq!(expansion[0].0, GaussianRational::one());
    }

    #[test]
    fn test_radicals_multiply_square_free() {
        let root2 = Monomial::one().with_radical(Integer::new(2));
        let root6 = Monomial::one().with_radical(Integer::new(6));
        // √2 · √6 = 2√3
        let product = root2.multiply(&root6);
        assert_eq!(product[0].0, GaussianRational::from(2));
        assert_eq!(product[0].1.radical(), &Integer::new(3));
    }

    #[test]
    fn test_inverse() {
        let x = Atom::Symbol(0);
        let m = Monomial::one()
            .with_exponent(LinearForm::atom(x, GaussianRational::one()))
            .with_radical(Integer::new(2));
        let (coeff, inverse) = m.inverse().unwrap();
        let product = m.multiply(&inverse);
        assert_eq!(product.len(), 1);
        assert_eq!(&coeff * &product[0].0, GaussianRational::one());
        assert!(product[0].1.is_one());

        assert!(Monomial::atom_power(x, 1).inverse().is_none());
    }

    #[test]
    fn test_divided_by_atom_powers() {
        let x = Atom::Symbol(0);
        let mut x2_pi = Monomial::atom_power(x, 2);
        x2_pi.set_power(Atom::Pi, 1);
        let quotient = x2_pi.divided_by(&Monomial::atom_power(x, 1)).unwrap();
        assert_eq!(quotient.power(x), 1);
        assert_eq!(quotient.power(Atom::Pi), 1);

        assert!(Monomial::atom_power(x, 1).divided_by(&Monomial::atom_power(x, 2)).is_none());
        let root2 = Monomial::one().with_radical(Integer::new(2));
        assert!(x2_pi.divided_by(&root2).is_none());

        // x² · e^{2a} / (x · e^{a}) = x · e^{a}
        let a = Atom::Symbol(1);
        let growth = |rate: i64| LinearForm::atom(a, GaussianRational::from(rate));
        let numerator = Monomial::atom_power(x, 2).with_exponent(growth(2));
        let divisor = Monomial::atom_power(x, 1).with_exponent(growth(1));
        let expected = Monomial::atom_power(x, 1).with_exponent(growth(1));
        assert_eq!(numerator.divided_by(&divisor), Some(expected));
    }

    #[test]
    fn test_term_order() {
        let x = Atom::Symbol(0);
        let e = Monomial::one().with_exponent(LinearForm::constant(GaussianRational::one()));
        let x_over_e = Monomial::atom_power(x, 1).with_exponent(LinearForm::constant(-GaussianRational::one()));
        assert_eq!(e.term_order(&Monomial::one()), Ordering::Greater);
        assert_eq!(x_over_e.term_order(&e), Ordering::Greater);
        assert_eq!(e.term_order(&e), Ordering::Equal);
    }

    #[test]
    fn test_free_rotation() {
        let fifth = pi_exponent(Rational::from_i64(1, 5)).normalize();
        assert!(fifth[0].1.has_free_rotation());
        let sixth = pi_exponent(Rational::from_i64(1, 6)).normalize();
        assert!(sixth.iter().all(|(_, monomial)| !monomial.has_free_rotation()));
    }
}
