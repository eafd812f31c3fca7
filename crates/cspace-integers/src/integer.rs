//! Arbitrary precision integers.
//!
//! This module wraps `dashu::IBig` with the handful of number-theoretic
//! helpers the expression normaliser needs: gcd, factorials and square-free
//! decomposition of radicands.

use dashu::base::{Abs, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// Largest trial divisor used by [`Integer::square_free_parts`].
pub const TRIAL_DIVISION_LIMIT: i64 = 1 << 16;

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Computes the greatest common divisor (always non-negative).
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Attempts to convert to an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Converts to the nearest f64.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }

    /// Computes self^exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Computes n!.
    #[must_use]
    pub fn factorial(n: u32) -> Self {
        (2..=n).fold(Self::one(), |acc, k| acc * Self::new(i64::from(k)))
    }

    /// Splits a positive integer as `k² · s`.
    ///
    /// Returns `(k, s)`. Trial division runs up to
    /// [`TRIAL_DIVISION_LIMIT`], after which a cofactor that is a perfect
    /// square still moves into `k`. The split is exact unless that cofactor
    /// is a non-square with a repeated prime factor, e.g. `p² · q` with `p`
    /// and `q` both above the limit; `s` then keeps the square.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not positive.
    #[must_use]
    pub fn square_free_parts(&self) -> (Self, Self) {
        assert!(self.signum() > 0, "square-free split of a non-positive integer");

        let limit = Self::new(TRIAL_DIVISION_LIMIT);
        let mut rest = self.clone();
        let mut root = Self::one();
        let mut square_free = Self::one();
        let mut divisor = Self::new(2);

        while divisor <= limit && &divisor * &divisor <= rest {
            let mut multiplicity = 0u32;
            while (rest.clone() % divisor.clone()).is_zero() {
                rest = rest / divisor.clone();
                multiplicity += 1;
            }
            root = root * divisor.pow(multiplicity / 2);
            if multiplicity % 2 == 1 {
                square_free = square_free * divisor.clone();
            }
            divisor = divisor + Self::one();
        }

        let side = rest.floor_sqrt();
        if &side * &side == rest {
            return (root * side, square_free);
        }
        (root, square_free * rest)
    }

    /// `⌊√self⌋` for a non-negative integer, by Newton's iteration.
    #[must_use]
    pub fn floor_sqrt(&self) -> Self {
        if *self <= Self::one() {
            return self.clone();
        }
        let two = Self::new(2);
        let mut current = self.clone();
        let mut next = (current.clone() + self.clone() / current.clone()) / two.clone();
        while next < current {
            current = next;
            next = (current.clone() + self.clone() / current.clone()) / two.clone();
        }
        current
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Integer {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                Self(self.0.$method(rhs.0))
            }
        }

        impl $trait<&Integer> for Integer {
            type Output = Self;

            fn $method(self, rhs: &Integer) -> Self::Output {
                Self(self.0.$method(&rhs.0))
            }
        }

        impl $trait for &Integer {
            type Output = Integer;

            fn $method(self, rhs: Self) -> Self::Output {
                Integer((&self.0).$method(&rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);
forward_binop!(Rem, rem);

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Integer::new(10);
        let b = Integer::new(3);

        assert_eq!((a.clone() + b.clone()).to_i64(), Some(13));
        assert_eq!((a.clone() - b.clone()).to_i64(), Some(7));
        assert_eq!((&a * &b).to_i64(), Some(30));
        assert_eq!((a.clone() / b.clone()).to_i64(), Some(3));
        assert_eq!((a % b).to_i64(), Some(1));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(Integer::factorial(0), Integer::new(1));
        assert_eq!(Integer::factorial(1), Integer::new(1));
        assert_eq!(Integer::factorial(5), Integer::new(120));
        assert_eq!(Integer::factorial(20).to_i64(), Some(2_432_902_008_176_640_000));
    }

    #[test]
    fn test_square_free_parts() {
        // 18 = 3² · 2
        assert_eq!(
            Integer::new(18).square_free_parts(),
            (Integer::new(3), Integer::new(2))
        );
        // 10 is already square-free
        assert_eq!(
            Integer::new(10).square_free_parts(),
            (Integer::new(1), Integer::new(10))
        );
        // 144 = 12²
        assert_eq!(
            Integer::new(144).square_free_parts(),
            (Integer::new(12), Integer::new(1))
        );
        assert_eq!(
            Integer::new(1).square_free_parts(),
            (Integer::new(1), Integer::new(1))
        );
    }

    #[test]
    fn test_square_free_parts_beyond_trial_division() {
        // 1000003 and 999983 are primes above the trial-division limit
        let large = Integer::new(1_000_003);
        let other = Integer::new(999_983);
        let doubled_square = Integer::new(2) * large.clone() * large.clone();
        assert_eq!(doubled_square.square_free_parts(), (large.clone(), Integer::new(2)));

        let product = large * other;
        assert_eq!(product.square_free_parts(), (Integer::new(1), product.clone()));
    }

    #[test]
    fn test_floor_sqrt() {
        assert_eq!(Integer::new(0).floor_sqrt(), Integer::new(0));
        assert_eq!(Integer::new(15).floor_sqrt(), Integer::new(3));
        assert_eq!(Integer::new(16).floor_sqrt(), Integer::new(4));
        let big = Integer::new(1_000_003) * Integer::new(1_000_003);
        assert_eq!(big.floor_sqrt(), Integer::new(1_000_003));
    }

    #[test]
    fn test_gcd_is_non_negative() {
        assert_eq!(Integer::new(-48).gcd(&Integer::new(18)), Integer::new(6));
    }
}
