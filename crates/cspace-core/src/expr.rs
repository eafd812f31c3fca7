//! Expression node types.
//!
//! This module defines the nodes stored in the arena. Trees are purely
//! structural: `x^n` with a free `n` or an unexpanded `legendre(n, x)` are
//! valid nodes, and only the normaliser decides which trees it understands.

use cspace_integers::Rational;
use smallvec::SmallVec;

use crate::handle::ExprHandle;

/// Unique identifier for a symbol.
pub type SymbolId = u32;

/// Unique identifier for a function.
pub type FunctionId = u32;

/// Named mathematical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constant {
    /// The circle constant π.
    Pi,
    /// Euler's number e.
    E,
    /// The imaginary unit i.
    I,
}

impl Constant {
    /// Printed name of the constant.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
            Constant::I => "I",
        }
    }
}

/// An expression node stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    // === Atoms ===
    /// An exact rational literal (integers have denominator 1).
    Number(Rational),

    /// A named constant.
    Constant(Constant),

    /// A symbolic variable.
    Symbol(SymbolId),

    // === Compound Expressions ===
    /// Sum of expressions: a + b + c + ...
    ///
    /// Invariant: at least 2 arguments.
    Add(SmallVec<[ExprHandle; 4]>),

    /// Product of expressions: a * b * c * ...
    ///
    /// Invariant: at least 2 arguments.
    Mul(SmallVec<[ExprHandle; 4]>),

    /// Power expression: base^exp.
    Pow {
        /// The base of the power.
        base: ExprHandle,
        /// The exponent.
        exp: ExprHandle,
    },

    /// Negation: -expr.
    Neg(ExprHandle),

    /// Division: numerator / denominator.
    Div {
        /// The numerator.
        num: ExprHandle,
        /// The denominator.
        den: ExprHandle,
    },

    // === Functions ===
    /// A function application: f(arg1, arg2, ...).
    Function {
        /// The function identifier (see [`functions`]).
        id: FunctionId,
        /// The arguments.
        args: SmallVec<[ExprHandle; 2]>,
    },
}

impl ExprNode {
    /// Returns true if this node is an atom (no children).
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            ExprNode::Number(_) | ExprNode::Constant(_) | ExprNode::Symbol(_)
        )
    }

    /// Returns the numeric value if this node is a literal.
    #[must_use]
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            ExprNode::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the children of this node.
    #[must_use]
    pub fn children(&self) -> SmallVec<[ExprHandle; 4]> {
        match self {
            ExprNode::Number(_) | ExprNode::Constant(_) | ExprNode::Symbol(_) => SmallVec::new(),
            ExprNode::Add(args) | ExprNode::Mul(args) => args.clone(),
            ExprNode::Pow { base, exp } => smallvec::smallvec![*base, *exp],
            ExprNode::Neg(arg) => smallvec::smallvec![*arg],
            ExprNode::Div { num, den } => smallvec::smallvec![*num, *den],
            ExprNode::Function { args, .. } => args.iter().copied().collect(),
        }
    }

    /// Rebuilds this node with new children, in the order of [`children`].
    ///
    /// [`children`]: ExprNode::children
    #[must_use]
    pub fn with_children(&self, children: &[ExprHandle]) -> ExprNode {
        match self {
            ExprNode::Number(_) | ExprNode::Constant(_) | ExprNode::Symbol(_) => self.clone(),
            ExprNode::Add(_) => ExprNode::Add(children.iter().copied().collect()),
            ExprNode::Mul(_) => ExprNode::Mul(children.iter().copied().collect()),
            ExprNode::Pow { .. } => ExprNode::Pow {
                base: children[0],
                exp: children[1],
            },
            ExprNode::Neg(_) => ExprNode::Neg(children[0]),
            ExprNode::Div { .. } => ExprNode::Div {
                num: children[0],
                den: children[1],
            },
            ExprNode::Function { id, .. } => ExprNode::Function {
                id: *id,
                args: children.iter().copied().collect(),
            },
        }
    }
}

/// Standard function identifiers.
pub mod functions {
    use super::FunctionId;

    /// Sine function.
    pub const SIN: FunctionId = 0;
    /// Cosine function.
    pub const COS: FunctionId = 1;
    /// Natural exponential.
    pub const EXP: FunctionId = 2;
    /// Square root.
    pub const SQRT: FunctionId = 3;
    /// Legendre polynomial `legendre(n, x)`; expanded once `n` is a literal.
    pub const LEGENDRE: FunctionId = 4;

    /// Printed name of a function, if it is one of the standard ones.
    #[must_use]
    pub fn name(id: FunctionId) -> Option<&'static str> {
        match id {
            SIN => Some("sin"),
            COS => Some("cos"),
            EXP => Some("exp"),
            SQRT => Some("sqrt"),
            LEGENDRE => Some("legendre"),
            _ => None,
        }
    }
}
