//! Quotients of exponential polynomials.
//!
//! Functional values such as `π`, `e - 1` or `b - a` are not units of
//! [`ExpPoly`], yet a linear system built from them must still be solved
//! exactly. A [`Quotient`] stores `num / den` and keeps it reduced:
//!
//! - zero is `0 / 1`;
//! - atom powers common to every term of both sides are cancelled;
//! - a denominator that is a unit of [`ExpPoly`] is divided into the
//!   numerator;
//! - a denominator that divides the numerator exactly is divided out;
//! - otherwise the leading coefficient of the denominator is 1.
//!
//! There is no multivariate gcd, so two reduced quotients of the same value
//! can still differ in representation. Equality compares cross products and
//! is exact.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use cspace_integers::Rational;
use cspace_rings::{Field, GaussianRational, Ring, UnitRing};

use super::expoly::ExpPoly;

/// `num / den` with a non-zero denominator.
#[derive(Clone)]
pub struct Quotient {
    num: ExpPoly,
    den: ExpPoly,
}

impl Quotient {
    /// Creates the reduced quotient `num / den`.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero. Use [`Quotient::checked_new`] for
    /// denominators that come from user input.
    #[must_use]
    pub fn new(num: ExpPoly, den: ExpPoly) -> Self {
        assert!(!den.is_zero(), "denominator cannot be zero");
        Self::reduce(num, den)
    }

    /// Creates `num / den`, or `None` when `den` is zero.
    #[must_use]
    pub fn checked_new(num: ExpPoly, den: ExpPoly) -> Option<Self> {
        (!den.is_zero()).then(|| Self::reduce(num, den))
    }

    /// The numerator.
    #[must_use]
    pub fn numerator(&self) -> &ExpPoly {
        &self.num
    }

    /// The denominator.
    #[must_use]
    pub fn denominator(&self) -> &ExpPoly {
        &self.den
    }

    /// Splits into numerator and denominator.
    #[must_use]
    pub fn into_parts(self) -> (ExpPoly, ExpPoly) {
        (self.num, self.den)
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub fn is_polynomial(&self) -> bool {
        self.den.is_one()
    }

    /// The numerator, if the denominator is 1.
    #[must_use]
    pub fn as_polynomial(&self) -> Option<&ExpPoly> {
        self.is_polynomial().then_some(&self.num)
    }

    /// Converts into an exponential polynomial, if the denominator is 1.
    #[must_use]
    pub fn into_polynomial(self) -> Option<ExpPoly> {
        self.is_polynomial().then_some(self.num)
    }

    /// The value as a rational constant.
    #[must_use]
    pub fn as_rational(&self) -> Option<Rational> {
        self.as_polynomial().and_then(ExpPoly::as_rational)
    }

    /// `num' / den` for a new numerator over the same denominator.
    #[must_use]
    pub fn with_numerator(&self, num: ExpPoly) -> Self {
        Self::reduce(num, self.den.clone())
    }

    fn reduce(num: ExpPoly, den: ExpPoly) -> Self {
        if num.is_zero() {
            return Self::from(num);
        }

        let mut content = num.power_content();
        let den_content = den.power_content();
        content.retain(|atom, power| {
            *power = (*power).min(den_content.get(atom).copied().unwrap_or(0));
            *power > 0
        });
        let (num, den) = if content.is_empty() {
            (num, den)
        } else {
            (num.divide_powers(&content), den.divide_powers(&content))
        };

        if let Some(inverse) = den.unit_inverse() {
            return Self::from(num * inverse);
        }
        if let Some(exact) = num.divide_exact(&den) {
            return Self::from(exact);
        }
        if let Some(ratio) = constant_ratio(&num, &den) {
            return Self::from(ExpPoly::constant(ratio));
        }

        let scale = den
            .leading_term()
            .and_then(|(_, coeff)| coeff.inv())
            .unwrap_or_else(GaussianRational::one);
        Self {
            num: num.scale(&scale),
            den: den.scale(&scale),
        }
    }
}

/// `c` with `num = c · den`, if there is one.
fn constant_ratio(num: &ExpPoly, den: &ExpPoly) -> Option<GaussianRational> {
    if num.len() != den.len() {
        return None;
    }
    let (num_lead, num_coeff) = num.leading_term()?;
    let (den_lead, den_coeff) = den.leading_term()?;
    if num_lead != den_lead {
        return None;
    }
    let ratio = num_coeff * &den_coeff.inv()?;
    (den.scale(&ratio) == *num).then_some(ratio)
}

impl From<ExpPoly> for Quotient {
    fn from(poly: ExpPoly) -> Self {
        Self {
            num: poly,
            den: ExpPoly::one(),
        }
    }
}

impl PartialEq for Quotient {
    fn eq(&self, other: &Self) -> bool {
        &self.num * &other.den == &other.num * &self.den
    }
}

impl Eq for Quotient {}

impl Ring for Quotient {
    fn zero() -> Self {
        Self::from(ExpPoly::zero())
    }

    fn one() -> Self {
        Self::from(ExpPoly::one())
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    fn is_one(&self) -> bool {
        self.num == self.den
    }
}

impl UnitRing for Quotient {
    /// Every non-zero quotient is invertible.
    fn unit_inverse(&self) -> Option<Self> {
        (!self.num.is_zero()).then(|| Self::reduce(self.den.clone(), self.num.clone()))
    }
}

impl Field for Quotient {}

impl Add for Quotient {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        if self.den == rhs.den {
            return Self::reduce(self.num + rhs.num, self.den);
        }
        let num = &self.num * &rhs.den + &rhs.num * &self.den;
        Self::reduce(num, self.den * rhs.den)
    }
}

impl Sub for Quotient {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Neg for Quotient {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            num: -self.num,
            den: self.den,
        }
    }
}

impl Mul for Quotient {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::reduce(self.num * rhs.num, self.den * rhs.den)
    }
}

impl fmt::Debug for Quotient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_polynomial() {
            write!(f, "{:?}", self.num)
        } else {
            write!(f, "({:?}) / ({:?})", self.num, self.den)
        }
    }
}
