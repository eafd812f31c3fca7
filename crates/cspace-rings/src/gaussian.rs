//! The Gaussian rationals Q(i).
//!
//! `sin` and `cos` are carried as complex exponentials inside the
//! normal form, so coefficients live in Q(i) rather than Q.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use cspace_integers::Rational;
use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::traits::{Field, Ring, UnitRing};

/// An element `re + im·i` of Q(i).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GaussianRational {
    re: Rational,
    im: Rational,
}

impl GaussianRational {
    /// Creates `re + im·i`.
    #[must_use]
    pub fn new(re: Rational, im: Rational) -> Self {
        Self { re, im }
    }

    /// Embeds a rational.
    #[must_use]
    pub fn real(re: Rational) -> Self {
        Self {
            re,
            im: <Rational as Zero>::zero(),
        }
    }

    /// The imaginary unit `i`.
    #[must_use]
    pub fn i() -> Self {
        Self {
            re: <Rational as Zero>::zero(),
            im: <Rational as One>::one(),
        }
    }

    /// Computes `i^k` for any integer `k`.
    #[must_use]
    pub fn i_pow(k: i64) -> Self {
        match k.rem_euclid(4) {
            0 => Self::one(),
            1 => Self::i(),
            2 => -Self::one(),
            _ => -Self::i(),
        }
    }

    /// Real part.
    #[must_use]
    pub fn re(&self) -> &Rational {
        &self.re
    }

    /// Imaginary part.
    #[must_use]
    pub fn im(&self) -> &Rational {
        &self.im
    }

    /// Returns true if the imaginary part is zero.
    #[must_use]
    pub fn is_real(&self) -> bool {
        Zero::is_zero(&self.im)
    }

    /// Complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: -&self.im,
        }
    }

    /// Multiplies by a rational scalar.
    #[must_use]
    pub fn scale(&self, factor: &Rational) -> Self {
        Self {
            re: &self.re * factor,
            im: &self.im * factor,
        }
    }

    /// Converts to a floating-point complex number.
    #[must_use]
    pub fn to_complex64(&self) -> Complex64 {
        Complex64::new(self.re.to_f64(), self.im.to_f64())
    }
}

impl Ring for GaussianRational {
    fn zero() -> Self {
        Self::default()
    }

    fn one() -> Self {
        Self::real(<Rational as One>::one())
    }

    fn is_zero(&self) -> bool {
        Zero::is_zero(&self.re) && Zero::is_zero(&self.im)
    }

    fn is_one(&self) -> bool {
        One::is_one(&self.re) && Zero::is_zero(&self.im)
    }
}

impl UnitRing for GaussianRational {
    fn unit_inverse(&self) -> Option<Self> {
        if Ring::is_zero(self) {
            return None;
        }
        // (a + bi)⁻¹ = (a - bi) / (a² + b²)
        let norm = &self.re * &self.re + &self.im * &self.im;
        Some(self.conj().scale(&norm.recip()))
    }
}

impl Field for GaussianRational {}

impl Add for GaussianRational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Add for &GaussianRational {
    type Output = GaussianRational;

    fn add(self, rhs: Self) -> Self::Output {
        GaussianRational {
            re: &self.re + &rhs.re,
            im: &self.im + &rhs.im,
        }
    }
}

impl Sub for GaussianRational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Sub for &GaussianRational {
    type Output = GaussianRational;

    fn sub(self, rhs: Self) -> Self::Output {
        GaussianRational {
            re: &self.re - &rhs.re,
            im: &self.im - &rhs.im,
        }
    }
}

impl Mul for GaussianRational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Mul for &GaussianRational {
    type Output = GaussianRational;

    fn mul(self, rhs: Self) -> Self::Output {
        GaussianRational {
            re: &self.re * &rhs.re - &self.im * &rhs.im,
            im: &self.re * &rhs.im + &self.im * &rhs.re,
        }
    }
}

impl Neg for GaussianRational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl Neg for &GaussianRational {
    type Output = GaussianRational;

    fn neg(self) -> Self::Output {
        GaussianRational {
            re: -&self.re,
            im: -&self.im,
        }
    }
}

impl From<Rational> for GaussianRational {
    fn from(re: Rational) -> Self {
        Self::real(re)
    }
}

impl From<i64> for GaussianRational {
    fn from(n: i64) -> Self {
        Self::real(Rational::from(n))
    }
}

impl fmt::Debug for GaussianRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GaussianRational({self})")
    }
}

impl fmt::Display for GaussianRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_real() {
            write!(f, "{}", self.re)
        } else if Zero::is_zero(&self.re) {
            write!(f, "{}*I", self.im)
        } else if self.im.is_negative() {
            write!(f, "{} - {}*I", self.re, self.im.abs())
        } else {
            write!(f, "{} + {}*I", self.re, self.im)
        }
    }
}
