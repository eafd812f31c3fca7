//! Type-safe expression handles.
//!
//! Handles are 32-bit indices into the arena. Because the arena hash-conses
//! every node, comparing two handles compares the trees they point to.

use std::fmt;

/// A handle to an expression in the arena.
///
/// Two handles from the same arena are equal if and only if they point to
/// structurally identical expressions. Handles from different arenas must
/// not be mixed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprHandle(u32);

impl ExprHandle {
    /// Creates a handle from a raw arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self.0)
    }
}
