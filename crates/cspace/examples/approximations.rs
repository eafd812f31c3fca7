//! Prints Taylor, moment and Legendre approximations of a few functions,
//! then checks repeated antiderivatives against Cauchy's formula.
//!
//! Run with `RUST_LOG=cspace=debug` to see the engine's events.

use cspace::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ApproxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cas = Cas::new();
    let s = StandardSymbols::new(cas.arena_mut());
    let arena = cas.arena_mut();
    let zero = arena.integer(0);
    let one = arena.integer(1);
    let minus_one = arena.integer(-1);
    let two = arena.integer(2);
    let monomials = arena.pow(s.x, s.n);
    let legendre = arena.legendre(s.n, s.x);
    let targets = [
        ("sin(x)", arena.sin(s.x)),
        ("exp(x)", arena.exp(s.x)),
        ("x^2", arena.pow(s.x, two)),
    ];

    let n = 2;
    let taylor = derivative_functional_family(n, zero, s.x);
    let moments = integral_functional_family(&mut cas, monomials, s.n, n, zero, one, s.x)?;
    let legendre_functionals = integral_functional_family(&mut cas, legendre, s.n, n, minus_one, one, s.x)?;
    let monomial_basis = basis_family(&mut cas, monomials, s.n, n)?;
    let legendre_basis = basis_family(&mut cas, legendre, s.n, n)?;

    for (name, target) in targets {
        println!("{name}");
        let approximation = approximate(&mut cas, &taylor, &monomial_basis, target)?;
        println!("  taylor   : {}", cas.arena().display(approximation));
        let approximation = approximate(&mut cas, &moments, &monomial_basis, target)?;
        println!("  moments  : {}", cas.arena().display(approximation));
        let approximation = approximate(&mut cas, &legendre_functionals, &legendre_basis, target)?;
        println!("  legendre : {}", cas.arena().display(approximation));

        let reference = legendre_approximation(&mut cas, target, n, s.x)?;
        let gap = supremum_norm(&cas, approximation, reference, s.x, &SamplingConfig::default())?;
        println!("  sup |legendre - series| = {gap:e}");
    }

    let f = cas.arena_mut().exp(s.x);
    for order in 0..4 {
        let repeated = repeated_antiderivative(&mut cas, order, f, s.a, s.b, s.x)?;
        let cauchy = antiderivative_integral(&mut cas, order, f, s.a, s.b, s.x)?;
        let agree = cas.simplify_equal(repeated, cauchy)?;
        println!("order {order}: {} (cauchy agrees: {agree})", cas.arena().display(repeated));
    }

    Ok(())
}
