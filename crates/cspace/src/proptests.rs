//! Property-based tests for the approximation API.

#[cfg(test)]
mod tests {
    use cspace_cas::{Cas, ComputerAlgebra};
    use cspace_core::ExprHandle;
    use proptest::prelude::*;
    use smallvec::smallvec;

    use crate::{antiderivative, StandardSymbols};

    /// One of a few closed-form integrands in `x`.
    fn integrand(cas: &mut Cas, x: ExprHandle, which: u8) -> ExprHandle {
        let arena = cas.arena_mut();
        match which {
            0 => x,
            1 => {
                let three = arena.integer(3);
                arena.pow(x, three)
            }
            2 => arena.sin(x),
            3 => arena.exp(x),
            _ => {
                let two = arena.integer(2);
                let double = arena.mul(smallvec![two, x]);
                let c = arena.cos(double);
                arena.mul(smallvec![x, c])
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn antiderivative_is_linear(
            f in 0u8..5,
            g in 0u8..5,
            alpha in -6i64..=6,
            beta in -6i64..=6,
        ) {
            let mut cas = Cas::new();
            let s = StandardSymbols::new(cas.arena_mut());
            let f = integrand(&mut cas, s.x, f);
            let g = integrand(&mut cas, s.x, g);

            let arena = cas.arena_mut();
            let alpha = arena.integer(alpha);
            let beta = arena.integer(beta);
            let alpha_f = arena.mul(smallvec![alpha, f]);
            let beta_g = arena.mul(smallvec![beta, g]);
            let combination = arena.add(smallvec![alpha_f, beta_g]);

            let lhs = antiderivative(&mut cas, combination, s.a, s.b, s.x).unwrap();
            let int_f = antiderivative(&mut cas, f, s.a, s.b, s.x).unwrap();
            let int_g = antiderivative(&mut cas, g, s.a, s.b, s.x).unwrap();
            let arena = cas.arena_mut();
            let alpha_int_f = arena.mul(smallvec![alpha, int_f]);
            let beta_int_g = arena.mul(smallvec![beta, int_g]);
            let rhs = arena.add(smallvec![alpha_int_f, beta_int_g]);

            prop_assert!(cas.simplify_equal(lhs, rhs).unwrap());
        }
    }
}
