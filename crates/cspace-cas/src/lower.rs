//! Lowering expression trees into the normal form.

use cspace_core::{functions, Constant, ExprArena, ExprHandle, ExprNode};
use cspace_integers::{Integer, Rational};
use cspace_rings::{Field, GaussianRational, Ring};
use hashbrown::HashMap;

use crate::error::CasError;
use crate::normal::{Atom, ExpPoly, LinearForm, Quotient};
use crate::orthogonal::legendre;

/// Converts trees into [`Quotient`] values, caching shared subtrees.
pub struct Lowerer<'a> {
    arena: &'a ExprArena,
    memo: HashMap<ExprHandle, Quotient>,
}

impl<'a> Lowerer<'a> {
    /// Creates a lowerer over `arena`.
    #[must_use]
    pub fn new(arena: &'a ExprArena) -> Self {
        Self {
            arena,
            memo: HashMap::new(),
        }
    }

    /// Lowers `expr` to its normal form.
    ///
    /// # Errors
    ///
    /// Returns a [`CasError`] naming the first subtree outside the
    /// supported class.
    pub fn lower(&mut self, expr: ExprHandle) -> Result<Quotient, CasError> {
        if let Some(done) = self.memo.get(&expr) {
            return Ok(done.clone());
        }
        let value = self.lower_node(expr)?;
        self.memo.insert(expr, value.clone());
        Ok(value)
    }

    /// Lowers `expr`, which must have denominator 1.
    ///
    /// # Errors
    ///
    /// As [`Lowerer::lower`], plus [`CasError::ProperQuotient`].
    pub fn lower_polynomial(&mut self, expr: ExprHandle) -> Result<ExpPoly, CasError> {
        self.lower(expr)?
            .into_polynomial()
            .ok_or_else(|| CasError::ProperQuotient(self.render(expr)))
    }

    fn lower_node(&mut self, expr: ExprHandle) -> Result<Quotient, CasError> {
        let arena = self.arena;
        match arena.get(expr) {
            ExprNode::Number(value) => Ok(ExpPoly::rational(value.clone()).into()),
            ExprNode::Constant(Constant::Pi) => Ok(ExpPoly::atom(Atom::Pi).into()),
            ExprNode::Constant(Constant::E) => Ok(ExpPoly::exp(LinearForm::constant(GaussianRational::one())).into()),
            ExprNode::Constant(Constant::I) => Ok(ExpPoly::constant(GaussianRational::i()).into()),
            ExprNode::Symbol(id) => Ok(ExpPoly::atom(Atom::Symbol(*id)).into()),
            ExprNode::Add(args) => {
                let mut sum = Quotient::zero();
                for &arg in args {
                    sum = sum + self.lower(arg)?;
                }
                Ok(sum)
            }
            ExprNode::Mul(args) => {
                let mut product = Quotient::one();
                for &arg in args {
                    product = product * self.lower(arg)?;
                }
                Ok(product)
            }
            ExprNode::Neg(arg) => Ok(-self.lower(*arg)?),
            ExprNode::Div { num, den } => {
                let numerator = self.lower(*num)?;
                let inverse = self
                    .lower(*den)?
                    .inv()
                    .ok_or_else(|| CasError::DivisionByZero(self.render(expr)))?;
                Ok(numerator * inverse)
            }
            ExprNode::Pow { base, exp } => self.lower_pow(expr, *base, *exp),
            ExprNode::Function { id, args } => self.lower_function(expr, *id, args),
        }
    }

    fn lower_pow(&mut self, expr: ExprHandle, base: ExprHandle, exp: ExprHandle) -> Result<Quotient, CasError> {
        // e^L is exp(L); any other base needs a literal exponent
        if matches!(self.arena.get(base), ExprNode::Constant(Constant::E)) {
            return Ok(ExpPoly::exp(self.linear_argument(exp)?).into());
        }
        let Some(power) = self.lower(exp)?.as_rational() else {
            return Err(CasError::SymbolicExponent(self.render(expr)));
        };

        if power.is_integer() {
            let lowered_base = self.lower(base)?;
            return self.integer_power(expr, &lowered_base, &power.numerator());
        }
        if power.denominator() == Integer::new(2) {
            let radicand = self
                .lower(base)?
                .as_rational()
                .ok_or_else(|| CasError::FractionalPower(self.render(expr)))?;
            let root: Quotient = ExpPoly::sqrt_rational(&radicand).into();
            return self.integer_power(expr, &root, &power.numerator());
        }
        Err(CasError::FractionalPower(self.render(expr)))
    }

    fn integer_power(&self, expr: ExprHandle, base: &Quotient, power: &Integer) -> Result<Quotient, CasError> {
        let magnitude = power
            .abs()
            .to_i64()
            .and_then(|k| u32::try_from(k).ok())
            .ok_or_else(|| CasError::SymbolicExponent(self.render(expr)))?;
        if power.is_negative() {
            let inverse = base
                .inv()
                .ok_or_else(|| CasError::DivisionByZero(self.render(expr)))?;
            Ok(inverse.pow(magnitude))
        } else {
            Ok(base.pow(magnitude))
        }
    }

    fn lower_function(&mut self, expr: ExprHandle, id: u32, args: &[ExprHandle]) -> Result<Quotient, CasError> {
        match (id, args) {
            (functions::EXP, [arg]) => Ok(ExpPoly::exp(self.linear_argument(*arg)?).into()),
            (functions::SIN, [arg]) => {
                // sin L = (-i/2)·e^{iL} + (i/2)·e^{-iL}
                let form = self.linear_argument(*arg)?;
                let half_i = GaussianRational::i().scale(&Rational::from_i64(1, 2));
                let (rising, falling) = rotations(&form);
                Ok((rising.scale(&-half_i.clone()) + falling.scale(&half_i)).into())
            }
            (functions::COS, [arg]) => {
                // cos L = e^{iL}/2 + e^{-iL}/2
                let form = self.linear_argument(*arg)?;
                let half = GaussianRational::real(Rational::from_i64(1, 2));
                let (rising, falling) = rotations(&form);
                Ok((rising + falling).scale(&half).into())
            }
            (functions::SQRT, [arg]) => {
                let radicand = self
                    .lower(*arg)?
                    .as_rational()
                    .ok_or_else(|| CasError::FractionalPower(self.render(expr)))?;
                Ok(ExpPoly::sqrt_rational(&radicand).into())
            }
            (functions::LEGENDRE, [index, var]) => {
                let n = self
                    .lower(*index)?
                    .as_rational()
                    .and_then(|value| value.to_i64())
                    .and_then(|value| u32::try_from(value).ok())
                    .ok_or_else(|| CasError::UnresolvedIndex(self.render(expr)))?;
                let var = self.lower_polynomial(*var)?;
                Ok(legendre(n, &var).into())
            }
            _ => Err(CasError::UnsupportedFunction(self.render(expr))),
        }
    }

    fn linear_argument(&mut self, arg: ExprHandle) -> Result<LinearForm, CasError> {
        self.lower(arg)?
            .as_polynomial()
            .and_then(ExpPoly::as_linear_form)
            .ok_or_else(|| CasError::NonLinearArgument(self.render(arg)))
    }

    fn render(&self, expr: ExprHandle) -> String {
        self.arena.display(expr).to_string()
    }
}

/// Lowers `expr` to its normal form.
///
/// # Errors
///
/// See [`Lowerer::lower`].
pub fn lower(arena: &ExprArena, expr: ExprHandle) -> Result<Quotient, CasError> {
    Lowerer::new(arena).lower(expr)
}

/// Lowers `expr`, which must have denominator 1.
///
/// # Errors
///
/// See [`Lowerer::lower_polynomial`].
pub fn lower_polynomial(arena: &ExprArena, expr: ExprHandle) -> Result<ExpPoly, CasError> {
    Lowerer::new(arena).lower_polynomial(expr)
}

/// `(e^{iL}, e^{-iL})`.
fn rotations(form: &LinearForm) -> (ExpPoly, ExpPoly) {
    let turned = form.scale(&GaussianRational::i());
    (ExpPoly::exp(turned.clone()), ExpPoly::exp(-turned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_sin_squared_plus_cos_squared() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let two = arena.integer(2);
        let s = arena.sin(x);
        let c = arena.cos(x);
        let s2 = arena.pow(s, two);
        let c2 = arena.pow(c, two);
        let sum = arena.add(smallvec![s2, c2]);
        assert_eq!(lower_polynomial(&arena, sum).unwrap(), ExpPoly::one());
    }

    #[test]
    fn test_e_power_is_exp() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let e = arena.e();
        let power = arena.pow(e, x);
        let exp = arena.exp(x);
        assert_eq!(lower_polynomial(&arena, power).unwrap(), lower_polynomial(&arena, exp).unwrap());
    }

    #[test]
    fn test_sin_pi_vanishes() {
        let mut arena = ExprArena::new();
        let pi = arena.pi();
        let s = arena.sin(pi);
        let c = arena.cos(pi);
        assert!(lower_polynomial(&arena, s).unwrap().is_zero());
        assert_eq!(lower_polynomial(&arena, c).unwrap(), -ExpPoly::one());
    }

    #[test]
    fn test_half_integer_power() {
        let mut arena = ExprArena::new();
        let base = arena.rational(3, 2);
        let half = arena.rational(1, 2);
        let root = arena.pow(base, half);
        let sqrt = arena.sqrt(base);
        let lowered = lower_polynomial(&arena, root).unwrap();
        assert_eq!(lowered, lower_polynomial(&arena, sqrt).unwrap());
        assert_eq!(&lowered * &lowered, ExpPoly::rational(Rational::from_i64(3, 2)));
    }

    #[test]
    fn test_division_by_unit() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let six = arena.integer(6);
        let quotient = arena.div(x, six);
        let expected = ExpPoly::atom(Atom::Symbol(0)).scale(&GaussianRational::real(Rational::from_i64(1, 6)));
        assert_eq!(lower_polynomial(&arena, quotient).unwrap(), expected);
    }

    #[test]
    fn test_division_by_non_unit_is_a_quotient() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let pi = arena.pi();
        let two = arena.integer(2);
        let quotient = arena.div(two, pi);
        let lowered = lower(&arena, quotient).unwrap();
        assert_eq!(lowered.numerator(), &ExpPoly::rational(Rational::from_i64(2, 1)));
        assert_eq!(lowered.denominator(), &ExpPoly::atom(Atom::Pi));

        // x / (x · π) reduces to 1/π; (π · 2/π) is 2 again
        let x_pi = arena.mul(smallvec![x, pi]);
        let cancelled = arena.div(x, x_pi);
        let inverse = lower(&arena, cancelled).unwrap();
        assert_eq!(inverse, Quotient::new(ExpPoly::one(), ExpPoly::atom(Atom::Pi)));
        let back = arena.mul(smallvec![pi, quotient]);
        assert_eq!(lower_polynomial(&arena, back).unwrap(), ExpPoly::rational(Rational::from_i64(2, 1)));
    }

    #[test]
    fn test_negative_power_of_sum() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.integer(1);
        let minus_one = arena.integer(-1);
        let sum = arena.add(smallvec![x, one]);
        let inverse = arena.pow(sum, minus_one);
        let product = arena.mul(smallvec![sum, inverse]);
        assert!(lower(&arena, inverse).unwrap().numerator().is_one());
        assert_eq!(lower_polynomial(&arena, product).unwrap(), ExpPoly::one());
    }

    #[test]
    fn test_legendre_with_literal_index() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let two = arena.integer(2);
        let p2 = arena.legendre(two, x);
        let expected = legendre(2, &ExpPoly::atom(Atom::Symbol(0)));
        assert_eq!(lower_polynomial(&arena, p2).unwrap(), expected);
    }

    #[test]
    fn test_errors() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let n = arena.symbol("n");

        let power = arena.pow(x, n);
        assert!(matches!(lower_polynomial(&arena, power), Err(CasError::SymbolicExponent(_))));

        let p = arena.legendre(n, x);
        assert!(matches!(lower_polynomial(&arena, p), Err(CasError::UnresolvedIndex(_))));

        let square = arena.mul(smallvec![x, x]);
        let s = arena.sin(square);
        assert!(matches!(lower_polynomial(&arena, s), Err(CasError::NonLinearArgument(_))));

        let quotient = arena.div(n, x);
        assert!(matches!(lower_polynomial(&arena, quotient), Err(CasError::ProperQuotient(_))));

        let zero = arena.integer(0);
        let by_zero = arena.div(x, zero);
        assert!(matches!(lower(&arena, by_zero), Err(CasError::DivisionByZero(_))));

        let inverted = arena.div(x, square);
        let p = arena.legendre(n, inverted);
        assert!(matches!(lower(&arena, p), Err(CasError::UnresolvedIndex(_))));
        let two = arena.integer(2);
        let p = arena.legendre(two, inverted);
        assert!(matches!(lower(&arena, p), Err(CasError::ProperQuotient(_))));

        let root = arena.sqrt(x);
        assert!(matches!(lower_polynomial(&arena, root), Err(CasError::FractionalPower(_))));

        let tan = arena.function(99, smallvec![x]);
        assert!(matches!(lower_polynomial(&arena, tan), Err(CasError::UnsupportedFunction(_))));
    }
}
