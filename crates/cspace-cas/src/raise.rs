//! Raising normal forms back into expression trees.
//!
//! Conjugate exponentials are recombined into `cos`/`sin`, so a real-valued
//! function comes back as a real-looking tree. The conversion is
//! deterministic: equal normal forms raise to the same handle.

use std::collections::BTreeMap;

use cspace_core::{ExprArena, ExprHandle, ExprNode};
use cspace_integers::{Integer, Rational};
use cspace_rings::{GaussianRational, Ring};
use smallvec::SmallVec;

use crate::normal::{Atom, ExpPoly, LinearForm, Quotient};

/// Terms sharing everything but the sign of their oscillating exponent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    powers: Vec<(Atom, u32)>,
    radical: Integer,
    /// Real part `A` of the exponent.
    growth: LinearForm,
    /// Imaginary part `B` of the exponent, sign-normalised.
    frequency: LinearForm,
}

/// Coefficients of `e^{A + iB}` and `e^{A - iB}`.
#[derive(Debug, Default)]
struct Group {
    rising: GaussianRational,
    falling: GaussianRational,
}

#[derive(Clone, Copy)]
enum Oscillation {
    None,
    Cos,
    Sin,
}

/// Builds the tree of `value`: its numerator alone when the denominator
/// is 1, otherwise `num / den`.
pub fn raise_quotient(arena: &mut ExprArena, value: &Quotient) -> ExprHandle {
    let num = raise(arena, value.numerator());
    if value.is_polynomial() {
        return num;
    }
    let den = raise(arena, value.denominator());
    arena.div(num, den)
}

/// Builds the real-form tree of `poly` in `arena`.
pub fn raise(arena: &mut ExprArena, poly: &ExpPoly) -> ExprHandle {
    let mut groups: BTreeMap<GroupKey, Group> = BTreeMap::new();
    for (monomial, coeff) in poly.terms() {
        let (growth, frequency) = monomial.exponent().split();
        let sign = frequency.leading_sign();
        let key = GroupKey {
            powers: monomial.powers().collect(),
            radical: monomial.radical().clone(),
            growth,
            frequency: if sign < 0 { -frequency } else { frequency },
        };
        let group = groups.entry(key).or_default();
        if sign < 0 {
            group.falling = group.falling.clone() + coeff.clone();
        } else {
            group.rising = group.rising.clone() + coeff.clone();
        }
    }

    let mut terms: SmallVec<[ExprHandle; 4]> = SmallVec::new();
    // Highest powers first
    for (key, group) in groups.into_iter().rev() {
        if key.frequency.is_zero() {
            terms.extend(raise_term(arena, &key, &group.rising, Oscillation::None));
            continue;
        }
        // c₊e^{iB} + c₋e^{-iB} = (c₊ + c₋)·cos B + i(c₊ - c₋)·sin B
        let cos_coeff = &group.rising + &group.falling;
        let sin_coeff = GaussianRational::i() * (&group.rising - &group.falling);
        terms.extend(raise_term(arena, &key, &cos_coeff, Oscillation::Cos));
        terms.extend(raise_term(arena, &key, &sin_coeff, Oscillation::Sin));
    }
    arena.add(terms)
}

fn raise_term(
    arena: &mut ExprArena,
    key: &GroupKey,
    coeff: &GaussianRational,
    oscillation: Oscillation,
) -> Option<ExprHandle> {
    if coeff.is_zero() {
        return None;
    }

    let mut factors: SmallVec<[ExprHandle; 4]> = SmallVec::new();
    let negative = push_coefficient(arena, coeff, &mut factors);

    if key.radical != Integer::new(1) {
        let radicand = arena.number(Rational::from_integer(key.radical.clone()));
        factors.push(arena.sqrt(radicand));
    }
    for &(atom, power) in &key.powers {
        let base = atom_tree(arena, atom);
        if power == 1 {
            factors.push(base);
        } else {
            let exponent = arena.integer(i64::from(power));
            factors.push(arena.pow(base, exponent));
        }
    }
    if !key.growth.is_zero() {
        let argument = linear_tree(arena, &key.growth);
        factors.push(arena.exp(argument));
    }
    match oscillation {
        Oscillation::None => {}
        Oscillation::Cos => {
            let argument = linear_tree(arena, &key.frequency);
            factors.push(arena.cos(argument));
        }
        Oscillation::Sin => {
            let argument = linear_tree(arena, &key.frequency);
            factors.push(arena.sin(argument));
        }
    }

    let product = if factors.is_empty() {
        arena.integer(1)
    } else {
        arena.mul(factors)
    };
    Some(if negative { arena.neg(product) } else { product })
}

/// Pushes the magnitude of `coeff` (omitted when it is 1) and returns
/// whether the term must be negated.
fn push_coefficient(
    arena: &mut ExprArena,
    coeff: &GaussianRational,
    factors: &mut SmallVec<[ExprHandle; 4]>,
) -> bool {
    let (scalar, imaginary) = if coeff.is_real() {
        (coeff.re().clone(), false)
    } else if Ring::is_zero(coeff.re()) {
        (coeff.im().clone(), true)
    } else {
        // A genuinely complex coefficient: re + im·I
        let re = arena.number(coeff.re().clone());
        let im = arena.number(coeff.im().clone());
        let unit = arena.imaginary_unit();
        let imaginary = arena.mul(smallvec::smallvec![im, unit]);
        factors.push(arena.add(smallvec::smallvec![re, imaginary]));
        return false;
    };

    let magnitude = scalar.abs();
    if !Ring::is_one(&magnitude) {
        factors.push(arena.number(magnitude));
    }
    if imaginary {
        factors.push(arena.imaginary_unit());
    }
    scalar.is_negative()
}

fn atom_tree(arena: &mut ExprArena, atom: Atom) -> ExprHandle {
    match atom {
        Atom::Pi => arena.pi(),
        Atom::Symbol(id) => arena.intern(ExprNode::Symbol(id)),
    }
}

/// Tree of a real linear form: atom terms in atom order, constant last.
fn linear_tree(arena: &mut ExprArena, form: &LinearForm) -> ExprHandle {
    let mut terms: SmallVec<[ExprHandle; 4]> = SmallVec::new();
    for (atom, coeff) in form.coefficients() {
        let base = atom_tree(arena, atom);
        terms.push(scaled(arena, coeff.re(), base));
    }
    let constant = form.constant_term().re();
    if !Ring::is_zero(constant) {
        terms.push(arena.number(constant.clone()));
    }
    arena.add(terms)
}

fn scaled(arena: &mut ExprArena, coeff: &Rational, base: ExprHandle) -> ExprHandle {
    let magnitude = coeff.abs();
    let term = if Ring::is_one(&magnitude) {
        base
    } else {
        let factor = arena.number(magnitude);
        arena.mul(smallvec::smallvec![factor, base])
    };
    if coeff.is_negative() {
        arena.neg(term)
    } else {
        term
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lower::{lower, lower_polynomial};
    use smallvec::smallvec;

    fn roundtrip(arena: &mut ExprArena, expr: ExprHandle) -> ExprHandle {
        let poly = lower_polynomial(arena, expr).unwrap();
        let raised = raise(arena, &poly);
        assert_eq!(lower_polynomial(arena, raised).unwrap(), poly);
        raised
    }

    #[test]
    fn test_trig_comes_back_real() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let three = arena.integer(3);
        let s = arena.sin(x);
        let c = arena.cos(x);
        let scaled_sin = arena.mul(smallvec![three, s]);
        let sum = arena.sub(scaled_sin, c);

        let raised = roundtrip(&mut arena, sum);
        assert_eq!(arena.display(raised).to_string(), "-cos(x) + 3*sin(x)");
    }

    #[test]
    fn test_polynomial_ordering() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let three = arena.integer(3);
        let six = arena.integer(6);
        let cube = arena.pow(x, three);
        let term = arena.div(cube, six);
        let poly = arena.sub(term, x);

        let raised = roundtrip(&mut arena, poly);
        assert_eq!(arena.display(raised).to_string(), "x^3/6 - x");
    }

    #[test]
    fn test_exponentials_and_radicals() {
        let mut arena = ExprArena::new();
        let a = arena.symbol("a");
        let b = arena.symbol("b");
        let ea = arena.exp(a);
        let eb = arena.exp(b);
        let diff = arena.sub(eb, ea);
        let raised = roundtrip(&mut arena, diff);
        assert_eq!(arena.display(raised).to_string(), "exp(b) - exp(a)");

        let half = arena.rational(5, 2);
        let root = arena.sqrt(half);
        let raised = roundtrip(&mut arena, root);
        assert_eq!(arena.display(raised).to_string(), "sqrt(10)/2");
    }

    #[test]
    fn test_equal_forms_share_a_handle() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.integer(1);
        let two = arena.integer(2);
        // (x + 1)^2 and x^2 + 2x + 1
        let sum = arena.add(smallvec![x, one]);
        let square = arena.pow(sum, two);
        let x2 = arena.pow(x, two);
        let two_x = arena.mul(smallvec![two, x]);
        let expanded = arena.add(smallvec![x2, two_x, one]);

        assert_eq!(roundtrip(&mut arena, square), roundtrip(&mut arena, expanded));
    }

    #[test]
    fn test_zero_raises_to_zero() {
        let mut arena = ExprArena::new();
        let zero = arena.integer(0);
        assert_eq!(raise(&mut arena, &ExpPoly::zero()), zero);
    }

    #[test]
    fn test_quotient_raises_to_division() {
        let mut arena = ExprArena::new();
        let a = arena.symbol("a");
        let b = arena.symbol("b");
        let two = arena.integer(2);
        let diff = arena.sub(b, a);
        let ratio = arena.div(two, diff);

        let value = lower(&arena, ratio).unwrap();
        let raised = raise_quotient(&mut arena, &value);
        assert!(matches!(arena.get(raised), ExprNode::Div { .. }));
        assert_eq!(lower(&arena, raised).unwrap(), value);

        let polynomial = Quotient::from(ExpPoly::one());
        let one = arena.integer(1);
        assert_eq!(raise_quotient(&mut arena, &polynomial), one);
    }
}
