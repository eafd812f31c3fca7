//! The field of rational numbers Q.

use cspace_integers::Rational;
use num_traits::{One, Zero};

use crate::traits::{Field, Ring, UnitRing};

impl Ring for Rational {
    fn zero() -> Self {
        <Rational as Zero>::zero()
    }

    fn one() -> Self {
        <Rational as One>::one()
    }

    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }

    fn is_one(&self) -> bool {
        One::is_one(self)
    }
}

impl UnitRing for Rational {
    fn unit_inverse(&self) -> Option<Self> {
        if Zero::is_zero(self) {
            None
        } else {
            Some(self.recip())
        }
    }
}

impl Field for Rational {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse() {
        let r = Rational::from_i64(-2, 7);
        assert_eq!(r.inv(), Some(Rational::from_i64(-7, 2)));
        assert_eq!(<Rational as Ring>::zero().inv(), None);
    }
}
