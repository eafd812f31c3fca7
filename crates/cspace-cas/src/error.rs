//! Errors reported by the computer algebra service.

use cspace_linalg::SolveError;
use thiserror::Error;

/// Errors that can occur in a CAS operation.
///
/// Expressions are rendered into the message so the error stays meaningful
/// after the arena that produced it is gone.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CasError {
    /// A power whose exponent is not a literal, e.g. `x^n` with `n` free.
    #[error("exponent is not a literal in `{0}`")]
    SymbolicExponent(String),

    /// A fractional power of something other than a rational literal.
    #[error("fractional power has no closed form here: `{0}`")]
    FractionalPower(String),

    /// `exp`, `sin` or `cos` applied to a non-linear argument.
    #[error("argument is not linear in its symbols: `{0}`")]
    NonLinearArgument(String),

    /// A function the normal form does not model.
    #[error("unsupported function `{0}`")]
    UnsupportedFunction(String),

    /// Division by an expression whose normal form is zero.
    #[error("division by zero in `{0}`")]
    DivisionByZero(String),

    /// A quotient where an exponential polynomial is required, e.g. the
    /// variable of `legendre(n, 1/x)`.
    #[error("`{0}` has a non-trivial denominator")]
    ProperQuotient(String),

    /// Integration of a quotient whose denominator depends on the variable.
    #[error("denominator depends on the variable of integration in `{0}`")]
    VariableDenominator(String),

    /// An equality the normal form cannot decide. The difference keeps a
    /// rotation `exp(iπs)` with no radical expansion.
    #[error("cannot decide whether `{0}` is zero")]
    UndecidedEquality(String),

    /// An indexed family (e.g. `legendre(n, x)`) whose index is not a
    /// non-negative integer literal.
    #[error("index is not a non-negative integer in `{0}`")]
    UnresolvedIndex(String),

    /// A variable of integration, differentiation or evaluation that is not a
    /// bare symbol.
    #[error("`{0}` is not a symbol")]
    NotASymbol(String),

    /// Numeric evaluation met a symbol with no value.
    #[error("symbol `{0}` has no numeric value")]
    UnboundSymbol(String),

    /// The exact linear solve failed.
    #[error(transparent)]
    Solve(#[from] SolveError),
}
