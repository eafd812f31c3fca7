//! Atoms of the normal form.

use cspace_core::SymbolId;

/// An indivisible factor that can carry a power or an exponent coefficient.
///
/// π is an atom rather than a number so that `exp(iπ)` can be recognised
/// and folded to `-1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Atom {
    /// The circle constant.
    Pi,
    /// A free symbol.
    Symbol(SymbolId),
}

impl Atom {
    /// Returns the symbol id, if this atom is a symbol.
    #[must_use]
    pub fn symbol(self) -> Option<SymbolId> {
        match self {
            Atom::Pi => None,
            Atom::Symbol(id) => Some(id),
        }
    }
}
