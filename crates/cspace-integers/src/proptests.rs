//! Property-based tests for arbitrary precision arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);

            prop_assert!((a % g.clone()).is_zero());
            prop_assert!((b % g).is_zero());
        }

        #[test]
        fn square_free_parts_recompose(n in 1i64..100_000i64) {
            let n = Integer::new(n);
            let (root, square_free) = n.square_free_parts();
            prop_assert_eq!(&root * &root * square_free.clone(), n);

            // No square of a prime below 100 divides the square-free part.
            for p in [2i64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47] {
                let p2 = Integer::new(p * p);
                prop_assert!(!(square_free.clone() % p2).is_zero());
            }
        }

        #[test]
        fn sqrt_parts_square_back(num in non_zero_int(), den in 1i64..1000i64) {
            let r = Rational::from_i64(num, den);
            let (c, s) = r.sqrt_parts().unwrap();
            prop_assert_eq!(&c * &c * Rational::from(s), r.abs());
        }

        #[test]
        fn floor_brackets_value(num in small_int(), den in 1i64..1000i64) {
            let r = Rational::from_i64(num, den);
            let floor = Rational::from(r.floor());
            prop_assert!(floor <= r);
            prop_assert!(r < floor + Rational::one());
        }

        #[test]
        fn rational_distributive(
            num_a in small_int(),
            den_a in non_zero_int(),
            num_b in small_int(),
            den_b in non_zero_int(),
            num_c in small_int(),
            den_c in non_zero_int()
        ) {
            let a = Rational::from_i64(num_a, den_a);
            let b = Rational::from_i64(num_b, den_b);
            let c = Rational::from_i64(num_c, den_c);
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn rational_multiplicative_inverse(num in non_zero_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            prop_assert!((a.recip() * a).is_one());
        }
    }
}
