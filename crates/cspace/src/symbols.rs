//! The default symbols of the approximation API.

use cspace_core::{ExprArena, ExprHandle};

/// The symbols `x`, `a`, `b` and `n` interned in one arena.
///
/// `x` is the function variable, `[a, b]` the default interval and `n` the
/// index symbol of family templates such as `x^n` or `legendre(n, x)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardSymbols {
    /// The function variable.
    pub x: ExprHandle,
    /// The lower end of the interval.
    pub a: ExprHandle,
    /// The upper end of the interval.
    pub b: ExprHandle,
    /// The family index.
    pub n: ExprHandle,
}

impl StandardSymbols {
    /// Interns the symbols under their default names.
    pub fn new(arena: &mut ExprArena) -> Self {
        Self::with_names(arena, ["x", "a", "b", "n"])
    }

    /// Interns the symbols under custom names, given in the order
    /// `x`, `a`, `b`, `n`.
    pub fn with_names(arena: &mut ExprArena, [x, a, b, n]: [&str; 4]) -> Self {
        Self {
            x: arena.symbol(x),
            a: arena.symbol(a),
            b: arena.symbol(b),
            n: arena.symbol(n),
        }
    }
}
