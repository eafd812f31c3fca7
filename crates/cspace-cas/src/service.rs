//! The computer-algebra service used by the approximation engine.
//!
//! [`ComputerAlgebra`] is the seam between the engine and the symbolic
//! backend. [`Cas`] implements it by lowering trees into quotients of
//! exponential polynomials, computing there exactly, and raising the result
//! back into its arena.

use cspace_core::{ExprArena, ExprHandle, SymbolId};
use cspace_integers::Integer;
use cspace_linalg::DenseMatrix;
use cspace_rings::Ring;
use tracing::{debug, trace};

use crate::calculus;
use crate::error::CasError;
use crate::evaluate::evaluate_real;
use crate::lower::{lower, Lowerer};
use crate::normal::{Atom, ExpPoly, Quotient};
use crate::orthogonal::PolynomialFamily;
use crate::raise::raise_quotient;

/// Symbolic operations over expressions stored in an [`ExprArena`].
///
/// Every returned expression is simplified. Results with no denominator are
/// canonical: two that are equal as functions are the same handle. A result
/// with a denominator is reduced but not canonical, so compare such results
/// with [`ComputerAlgebra::simplify_equal`].
pub trait ComputerAlgebra {
    /// The arena holding every expression of this service.
    fn arena(&self) -> &ExprArena;

    /// Mutable access to the arena, for building expressions.
    fn arena_mut(&mut self) -> &mut ExprArena;

    /// `∫_lower^upper expr d(var)`.
    ///
    /// # Errors
    ///
    /// Fails when `var` is not a symbol, an operand leaves the supported
    /// expression class, or the integrand has a denominator depending on
    /// `var` ([`CasError::VariableDenominator`]).
    fn integrate(
        &mut self,
        expr: ExprHandle,
        var: ExprHandle,
        lower: ExprHandle,
        upper: ExprHandle,
    ) -> Result<ExprHandle, CasError>;

    /// An antiderivative of `expr` in `var`, with zero constant.
    ///
    /// # Errors
    ///
    /// As for [`ComputerAlgebra::integrate`].
    fn antiderivative(&mut self, expr: ExprHandle, var: ExprHandle) -> Result<ExprHandle, CasError>;

    /// The `order`-th derivative of `expr` in `var`. Order 0 simplifies.
    ///
    /// # Errors
    ///
    /// As for [`ComputerAlgebra::integrate`].
    fn differentiate(&mut self, expr: ExprHandle, var: ExprHandle, order: u32) -> Result<ExprHandle, CasError>;

    /// Replaces the symbol `var` by `value` throughout `expr`, without
    /// simplifying.
    ///
    /// # Errors
    ///
    /// [`CasError::NotASymbol`] when `var` is not a symbol.
    fn substitute(&mut self, expr: ExprHandle, var: ExprHandle, value: ExprHandle) -> Result<ExprHandle, CasError>;

    /// The canonical form of `expr`.
    ///
    /// # Errors
    ///
    /// Fails when `expr` leaves the supported expression class.
    fn simplify(&mut self, expr: ExprHandle) -> Result<ExprHandle, CasError>;

    /// Solves `matrix · c = rhs` exactly.
    ///
    /// # Errors
    ///
    /// [`CasError::Solve`] for shape errors and singular systems, or a
    /// lowering error for an unsupported entry.
    fn solve_linear_system(
        &mut self,
        matrix: &DenseMatrix<ExprHandle>,
        rhs: &[ExprHandle],
    ) -> Result<Vec<ExprHandle>, CasError>;

    /// Evaluates `expr` at each point with `var` bound to it.
    ///
    /// # Errors
    ///
    /// [`CasError::UnboundSymbol`] when another symbol is free in `expr`.
    fn evaluate_numeric(&self, expr: ExprHandle, var: ExprHandle, points: &[f64]) -> Result<Vec<f64>, CasError>;

    /// The expanded `index`-th member of `family` at `var`.
    ///
    /// # Errors
    ///
    /// Fails when `var` leaves the supported expression class.
    fn orthogonal_polynomial(
        &mut self,
        family: PolynomialFamily,
        index: u32,
        var: ExprHandle,
    ) -> Result<ExprHandle, CasError>;

    /// Returns true if `lhs` and `rhs` are equal as functions.
    ///
    /// The answer is exact when every `exp(iπs)` rotation left in
    /// `lhs - rhs` has `s` a multiple of `1/12`; those are expanded into
    /// radicals. Any other rotation can satisfy relations the normal form
    /// does not apply (`cos(π/5) - cos(2π/5) = 1/2`), so a difference that
    /// does not vanish but keeps one is reported as undecided.
    ///
    /// # Errors
    ///
    /// Fails when either side leaves the supported expression class, and
    /// with [`CasError::UndecidedEquality`] when the answer is not exact.
    fn simplify_equal(&mut self, lhs: ExprHandle, rhs: ExprHandle) -> Result<bool, CasError>;

    /// `n!`.
    fn factorial(&self, n: u32) -> Integer {
        Integer::factorial(n)
    }
}

/// The exact computer-algebra service.
#[derive(Debug, Default)]
pub struct Cas {
    arena: ExprArena,
}

impl Cas {
    /// Creates a service with an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service over an existing arena.
    #[must_use]
    pub fn with_arena(arena: ExprArena) -> Self {
        Self { arena }
    }

    /// Consumes the service, returning its arena.
    #[must_use]
    pub fn into_arena(self) -> ExprArena {
        self.arena
    }

    /// The normal form of `expr`.
    ///
    /// # Errors
    ///
    /// Fails when `expr` leaves the supported expression class.
    pub fn normalize(&self, expr: ExprHandle) -> Result<Quotient, CasError> {
        lower(&self.arena, expr)
    }

    /// Raises a normal form into the arena.
    pub fn render(&mut self, value: &Quotient) -> ExprHandle {
        raise_quotient(&mut self.arena, value)
    }

    fn display(&self, expr: ExprHandle) -> String {
        self.arena.display(expr).to_string()
    }

    /// The normal form of `expr`, which must have no denominator.
    fn polynomial(&self, expr: ExprHandle) -> Result<ExpPoly, CasError> {
        self.normalize(expr)?
            .into_polynomial()
            .ok_or_else(|| CasError::ProperQuotient(self.display(expr)))
    }

    /// The normal form of an integrand whose denominator is free of `var`.
    fn integrand(&self, expr: ExprHandle, var: SymbolId) -> Result<Quotient, CasError> {
        let value = self.normalize(expr)?;
        if value.denominator().mentions(Atom::Symbol(var)) {
            return Err(CasError::VariableDenominator(self.display(expr)));
        }
        Ok(value)
    }

    fn symbol_of(&self, var: ExprHandle) -> Result<SymbolId, CasError> {
        self.arena
            .symbol_id(var)
            .ok_or_else(|| CasError::NotASymbol(self.display(var)))
    }
}

impl ComputerAlgebra for Cas {
    fn arena(&self) -> &ExprArena {
        &self.arena
    }

    fn arena_mut(&mut self) -> &mut ExprArena {
        &mut self.arena
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn integrate(
        &mut self,
        expr: ExprHandle,
        var: ExprHandle,
        lower: ExprHandle,
        upper: ExprHandle,
    ) -> Result<ExprHandle, CasError> {
        let id = self.symbol_of(var)?;
        let value = self.integrand(expr, id)?;
        let from = self.polynomial(lower)?;
        let to = self.polynomial(upper)?;
        let Some(integral) = calculus::definite_integral(value.numerator(), Atom::Symbol(id), &from, &to) else {
            // Only a bound entering an exponent can fail
            let bound = if to.as_linear_form().is_none() { upper } else { lower };
            return Err(CasError::NonLinearArgument(self.display(bound)));
        };
        let result = self.render(&value.with_numerator(integral));
        trace!(result = %self.arena.display(result), "integrated");
        Ok(result)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn antiderivative(&mut self, expr: ExprHandle, var: ExprHandle) -> Result<ExprHandle, CasError> {
        let id = self.symbol_of(var)?;
        let value = self.integrand(expr, id)?;
        let primitive = calculus::antiderivative(value.numerator(), Atom::Symbol(id));
        Ok(self.render(&value.with_numerator(primitive)))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn differentiate(&mut self, expr: ExprHandle, var: ExprHandle, order: u32) -> Result<ExprHandle, CasError> {
        let id = self.symbol_of(var)?;
        let derivative = (0..order).fold(self.normalize(expr)?, |acc, _| {
            calculus::differentiate_quotient(&acc, Atom::Symbol(id))
        });
        Ok(self.render(&derivative))
    }

    fn substitute(&mut self, expr: ExprHandle, var: ExprHandle, value: ExprHandle) -> Result<ExprHandle, CasError> {
        self.symbol_of(var)?;
        Ok(self.arena.replace(expr, var, value))
    }

    fn simplify(&mut self, expr: ExprHandle) -> Result<ExprHandle, CasError> {
        let value = self.normalize(expr)?;
        Ok(self.render(&value))
    }

    fn solve_linear_system(
        &mut self,
        matrix: &DenseMatrix<ExprHandle>,
        rhs: &[ExprHandle],
    ) -> Result<Vec<ExprHandle>, CasError> {
        debug!(rows = matrix.num_rows(), cols = matrix.num_cols(), "solving exact linear system");
        let (system, values) = {
            let mut lowerer = Lowerer::new(&self.arena);
            let system = matrix.try_map(|&entry| lowerer.lower(entry))?;
            let values = rhs
                .iter()
                .map(|&entry| lowerer.lower(entry))
                .collect::<Result<Vec<_>, _>>()?;
            (system, values)
        };

        let solution = system.solve(&values)?;
        Ok(solution.iter().map(|value| self.render(value)).collect())
    }

    fn evaluate_numeric(&self, expr: ExprHandle, var: ExprHandle, points: &[f64]) -> Result<Vec<f64>, CasError> {
        let id = self.symbol_of(var)?;
        evaluate_real(&self.arena, expr, id, points)
    }

    fn orthogonal_polynomial(
        &mut self,
        family: PolynomialFamily,
        index: u32,
        var: ExprHandle,
    ) -> Result<ExprHandle, CasError> {
        let argument = self.polynomial(var)?;
        let poly = family.evaluate(index, &argument);
        Ok(self.render(&poly.into()))
    }

    fn simplify_equal(&mut self, lhs: ExprHandle, rhs: ExprHandle) -> Result<bool, CasError> {
        if lhs == rhs {
            return Ok(true);
        }
        let mut lowerer = Lowerer::new(&self.arena);
        let difference = lowerer.lower(lhs)? - lowerer.lower(rhs)?;
        if difference.is_zero() {
            return Ok(true);
        }
        if difference.numerator().has_free_rotation() {
            let rendered = format!("{} - ({})", self.display(lhs), self.display(rhs));
            return Err(CasError::UndecidedEquality(rendered));
        }
        Ok(false)
    }
}
