//! Floating-point evaluation of expression trees.
//!
//! Evaluation runs in `Complex64` so that trees carrying the imaginary unit
//! (or an even root of a negative number) still evaluate; callers of
//! [`ComputerAlgebra::evaluate_numeric`](crate::ComputerAlgebra) take the
//! real part.

use cspace_core::{functions, Constant, ExprArena, ExprHandle, ExprNode, SymbolId};
use hashbrown::HashMap;
use num_complex::Complex64;

use crate::error::CasError;

/// Tolerance for reading an evaluated index as an integer.
const INDEX_TOLERANCE: f64 = 1e-9;

/// Evaluates trees with one symbol bound to a number.
pub struct Evaluator<'a> {
    arena: &'a ExprArena,
    var: SymbolId,
    value: Complex64,
    memo: HashMap<ExprHandle, Complex64>,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator binding `var` to `value`.
    #[must_use]
    pub fn new(arena: &'a ExprArena, var: SymbolId, value: f64) -> Self {
        Self {
            arena,
            var,
            value: Complex64::new(value, 0.0),
            memo: HashMap::new(),
        }
    }

    /// Evaluates `expr`.
    ///
    /// # Errors
    ///
    /// [`CasError::UnboundSymbol`] for any symbol other than the bound one,
    /// [`CasError::UnresolvedIndex`] for a non-integer polynomial index and
    /// [`CasError::UnsupportedFunction`] for unknown functions.
    pub fn eval(&mut self, expr: ExprHandle) -> Result<Complex64, CasError> {
        if let Some(&done) = self.memo.get(&expr) {
            return Ok(done);
        }
        let value = self.eval_node(expr)?;
        self.memo.insert(expr, value);
        Ok(value)
    }

    fn eval_node(&mut self, expr: ExprHandle) -> Result<Complex64, CasError> {
        let arena = self.arena;
        match arena.get(expr) {
            ExprNode::Number(value) => Ok(Complex64::new(value.to_f64(), 0.0)),
            ExprNode::Constant(Constant::Pi) => Ok(Complex64::new(std::f64::consts::PI, 0.0)),
            ExprNode::Constant(Constant::E) => Ok(Complex64::new(std::f64::consts::E, 0.0)),
            ExprNode::Constant(Constant::I) => Ok(Complex64::i()),
            ExprNode::Symbol(id) if *id == self.var => Ok(self.value),
            ExprNode::Symbol(id) => Err(CasError::UnboundSymbol(
                arena.symbol_name(*id).unwrap_or("?").to_string(),
            )),
            ExprNode::Add(args) => args.iter().try_fold(Complex64::new(0.0, 0.0), |acc, &arg| Ok(acc + self.eval(arg)?)),
            ExprNode::Mul(args) => args.iter().try_fold(Complex64::new(1.0, 0.0), |acc, &arg| Ok(acc * self.eval(arg)?)),
            ExprNode::Neg(arg) => Ok(-self.eval(*arg)?),
            ExprNode::Div { num, den } => Ok(self.eval(*num)? / self.eval(*den)?),
            ExprNode::Pow { base, exp } => {
                let base = self.eval(*base)?;
                let exp = self.eval(*exp)?;
                Ok(power(base, exp))
            }
            ExprNode::Function { id, args } => self.eval_function(expr, *id, args),
        }
    }

    fn eval_function(&mut self, expr: ExprHandle, id: u32, args: &[ExprHandle]) -> Result<Complex64, CasError> {
        match (id, args) {
            (functions::SIN, [arg]) => Ok(self.eval(*arg)?.sin()),
            (functions::COS, [arg]) => Ok(self.eval(*arg)?.cos()),
            (functions::EXP, [arg]) => Ok(self.eval(*arg)?.exp()),
            (functions::SQRT, [arg]) => Ok(self.eval(*arg)?.sqrt()),
            (functions::LEGENDRE, [index, arg]) => {
                let n = self.eval(*index)?;
                let rounded = n.re.round();
                if n.im.abs() > INDEX_TOLERANCE || (n.re - rounded).abs() > INDEX_TOLERANCE || rounded < 0.0 {
                    return Err(CasError::UnresolvedIndex(self.arena.display(expr).to_string()));
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let n = rounded as u32;
                Ok(legendre(n, self.eval(*arg)?))
            }
            _ => Err(CasError::UnsupportedFunction(self.arena.display(expr).to_string())),
        }
    }
}

/// `base^exp`, using exact repeated multiplication for integral exponents.
fn power(base: Complex64, exp: Complex64) -> Complex64 {
    if exp.im == 0.0 && exp.re.fract() == 0.0 && exp.re.abs() < f64::from(i32::MAX) {
        #[allow(clippy::cast_possible_truncation)]
        let exponent = exp.re as i32;
        return base.powi(exponent);
    }
    if exp.im == 0.0 && base.im == 0.0 && base.re >= 0.0 {
        return Complex64::new(base.re.powf(exp.re), 0.0);
    }
    base.powc(exp)
}

/// `Pₙ(z)` by Bonnet's recursion.
fn legendre(n: u32, z: Complex64) -> Complex64 {
    let mut previous = Complex64::new(1.0, 0.0);
    if n == 0 {
        return previous;
    }
    let mut current = z;
    for k in 1..n {
        let k = f64::from(k);
        let next = ((2.0 * k + 1.0) * z * current - k * previous) / (k + 1.0);
        previous = std::mem::replace(&mut current, next);
    }
    current
}

/// Evaluates `expr` at each point, binding `var`, and keeps the real part.
///
/// # Errors
///
/// See [`Evaluator::eval`].
pub fn evaluate_real(arena: &ExprArena, expr: ExprHandle, var: SymbolId, points: &[f64]) -> Result<Vec<f64>, CasError> {
    points
        .iter()
        .map(|&point| Evaluator::new(arena, var, point).eval(expr).map(|value| value.re))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_polynomial_values() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let id = arena.symbol_id(x).unwrap();
        let two = arena.integer(2);
        let one = arena.integer(1);
        let square = arena.pow(x, two);
        let p = arena.add(smallvec![square, one]);

        let values = evaluate_real(&arena, p, id, &[0.0, 1.0, -2.0]).unwrap();
        assert!(close(values[0], 1.0));
        assert!(close(values[1], 2.0));
        assert!(close(values[2], 5.0));
    }

    #[test]
    fn test_complex_intermediate_is_real() {
        // (e^{ix} + e^{-ix})/2 = cos x
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let id = arena.symbol_id(x).unwrap();
        let i = arena.imaginary_unit();
        let ix = arena.mul(smallvec![i, x]);
        let minus_ix = arena.neg(ix);
        let rising = arena.exp(ix);
        let falling = arena.exp(minus_ix);
        let sum = arena.add(smallvec![rising, falling]);
        let two = arena.integer(2);
        let cos = arena.div(sum, two);

        let values = evaluate_real(&arena, cos, id, &[0.3, 1.7]).unwrap();
        assert!(close(values[0], 0.3_f64.cos()));
        assert!(close(values[1], 1.7_f64.cos()));
    }

    #[test]
    fn test_legendre_numeric() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let id = arena.symbol_id(x).unwrap();
        let three = arena.integer(3);
        let p3 = arena.legendre(three, x);
        let value = evaluate_real(&arena, p3, id, &[0.5]).unwrap()[0];
        // P3(1/2) = (5/8 - 3/2)/2 = -7/16
        assert!(close(value, -7.0 / 16.0));
    }

    #[test]
    fn test_unbound_symbol() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let id = arena.symbol_id(x).unwrap();
        let sum = arena.add(smallvec![x, y]);
        assert_eq!(
            evaluate_real(&arena, sum, id, &[1.0]),
            Err(CasError::UnboundSymbol("y".to_string()))
        );
    }
}
