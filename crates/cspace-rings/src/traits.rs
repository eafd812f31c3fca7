//! Algebraic structure traits.
//!
//! The exact solver is generic over [`Field`], so the same elimination
//! code runs over Q, Q(i) and quotients of exponential polynomials. Rings
//! that only know some of their units (exponential polynomials themselves)
//! implement [`UnitRing`].

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// A commutative ring with identity.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative and commutative with identity `one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`neg`)
pub trait Ring:
    Clone + Eq + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// Computes self^n for non-negative n by repeated squaring.
    fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            exp >>= 1;
            if exp > 0 {
                base = base.clone() * base;
            }
        }

        result
    }
}

/// A ring that can recognise some of its units.
///
/// `unit_inverse` returns the inverse when the element is known to be a
/// unit and `None` otherwise. For a field every non-zero element is a unit;
/// for symbolic rings a non-zero element may still answer `None` when its
/// inverse lies outside the ring.
pub trait UnitRing: Ring {
    /// Returns the multiplicative inverse if `self` is a recognised unit.
    fn unit_inverse(&self) -> Option<Self>;
}

/// A field: every non-zero element is a unit.
pub trait Field: UnitRing {
    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` only if the element is zero.
    fn inv(&self) -> Option<Self> {
        self.unit_inverse()
    }

    /// Divides by another element.
    ///
    /// Returns `None` if `other` is zero.
    fn checked_div(&self, other: &Self) -> Option<Self> {
        other.inv().map(|inv| self.clone() * inv)
    }
}
