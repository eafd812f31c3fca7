//! Arena allocator for expression storage.
//!
//! Every expression built by the engine lives in one arena. Nodes are stored
//! contiguously and hash-consed, so a handle identifies a tree up to
//! structural equality.

use cspace_integers::Rational;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::expr::{functions, Constant, ExprNode, FunctionId, SymbolId};
use crate::handle::ExprHandle;
use crate::intern::InternTable;

/// The arena holding every expression node.
#[derive(Debug, Default)]
pub struct ExprArena {
    /// Storage for all expression nodes.
    nodes: Vec<ExprNode>,
    /// Interning table: maps node content to its handle.
    intern_map: HashMap<ExprNode, ExprHandle>,
    /// Symbol names by id.
    symbols: InternTable<String>,
}

impl ExprArena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            intern_map: HashMap::with_capacity(capacity),
            symbols: InternTable::new(),
        }
    }

    /// Interns an expression node, returning its handle.
    ///
    /// If an identical node already exists, returns the existing handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena holds `u32::MAX` nodes.
    pub fn intern(&mut self, node: ExprNode) -> ExprHandle {
        if let Some(&handle) = self.intern_map.get(&node) {
            return handle;
        }

        let index = u32::try_from(self.nodes.len()).expect("arena capacity exceeded");
        let handle = ExprHandle::new(index);
        self.nodes.push(node.clone());
        self.intern_map.insert(node, handle);
        handle
    }

    /// Gets the node at the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this arena.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &ExprNode {
        &self.nodes[handle.index() as usize]
    }

    /// Interns a symbol name, returning its unique id.
    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        self.symbols.intern(name.to_string())
    }

    /// Gets the name of a symbol by its id.
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(id).map(String::as_str)
    }

    /// Returns the symbol id if `handle` is a bare symbol.
    #[must_use]
    pub fn symbol_id(&self, handle: ExprHandle) -> Option<SymbolId> {
        match self.get(handle) {
            ExprNode::Symbol(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Convenience constructors ===

    /// Creates an integer literal.
    pub fn integer(&mut self, value: i64) -> ExprHandle {
        self.intern(ExprNode::Number(Rational::from(value)))
    }

    /// Creates the rational literal `numerator / denominator`.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    pub fn rational(&mut self, numerator: i64, denominator: i64) -> ExprHandle {
        self.intern(ExprNode::Number(Rational::from_i64(numerator, denominator)))
    }

    /// Creates a literal from an exact rational.
    pub fn number(&mut self, value: Rational) -> ExprHandle {
        self.intern(ExprNode::Number(value))
    }

    /// Creates a symbol expression.
    pub fn symbol(&mut self, name: &str) -> ExprHandle {
        let id = self.intern_symbol(name);
        self.intern(ExprNode::Symbol(id))
    }

    /// Creates a named constant.
    pub fn constant(&mut self, constant: Constant) -> ExprHandle {
        self.intern(ExprNode::Constant(constant))
    }

    /// The constant π.
    pub fn pi(&mut self) -> ExprHandle {
        self.constant(Constant::Pi)
    }

    /// Euler's number e.
    pub fn e(&mut self) -> ExprHandle {
        self.constant(Constant::E)
    }

    /// The imaginary unit.
    pub fn imaginary_unit(&mut self) -> ExprHandle {
        self.constant(Constant::I)
    }

    /// Creates an addition expression. An empty sum is `0`.
    pub fn add(&mut self, args: impl Into<SmallVec<[ExprHandle; 4]>>) -> ExprHandle {
        let args = args.into();
        match args.len() {
            0 => self.integer(0),
            1 => args[0],
            _ => self.intern(ExprNode::Add(args)),
        }
    }

    /// Creates a multiplication expression. An empty product is `1`.
    pub fn mul(&mut self, args: impl Into<SmallVec<[ExprHandle; 4]>>) -> ExprHandle {
        let args = args.into();
        match args.len() {
            0 => self.integer(1),
            1 => args[0],
            _ => self.intern(ExprNode::Mul(args)),
        }
    }

    /// Creates a power expression.
    pub fn pow(&mut self, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Pow { base, exp })
    }

    /// Creates a negation expression.
    pub fn neg(&mut self, arg: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Neg(arg))
    }

    /// Creates `lhs - rhs` as `lhs + (-rhs)`.
    pub fn sub(&mut self, lhs: ExprHandle, rhs: ExprHandle) -> ExprHandle {
        let negated = self.neg(rhs);
        self.add(smallvec::smallvec![lhs, negated])
    }

    /// Creates a division expression.
    pub fn div(&mut self, num: ExprHandle, den: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Div { num, den })
    }

    /// Creates a function application.
    pub fn function(&mut self, id: FunctionId, args: impl Into<SmallVec<[ExprHandle; 2]>>) -> ExprHandle {
        self.intern(ExprNode::Function {
            id,
            args: args.into(),
        })
    }

    /// Creates `sin(arg)`.
    pub fn sin(&mut self, arg: ExprHandle) -> ExprHandle {
        self.function(functions::SIN, smallvec::smallvec![arg])
    }

    /// Creates `cos(arg)`.
    pub fn cos(&mut self, arg: ExprHandle) -> ExprHandle {
        self.function(functions::COS, smallvec::smallvec![arg])
    }

    /// Creates `exp(arg)`.
    pub fn exp(&mut self, arg: ExprHandle) -> ExprHandle {
        self.function(functions::EXP, smallvec::smallvec![arg])
    }

    /// Creates `sqrt(arg)`.
    pub fn sqrt(&mut self, arg: ExprHandle) -> ExprHandle {
        self.function(functions::SQRT, smallvec::smallvec![arg])
    }

    /// Creates the unexpanded Legendre polynomial `legendre(index, var)`.
    pub fn legendre(&mut self, index: ExprHandle, var: ExprHandle) -> ExprHandle {
        self.function(functions::LEGENDRE, smallvec::smallvec![index, var])
    }

    // === Structural rewriting ===

    /// Replaces every occurrence of `from` inside `expr` with `to`.
    ///
    /// Matching is by handle, so it is structural: no simplification is
    /// performed and `to` is inserted verbatim.
    pub fn replace(&mut self, expr: ExprHandle, from: ExprHandle, to: ExprHandle) -> ExprHandle {
        let mut memo = HashMap::new();
        self.replace_memo(expr, from, to, &mut memo)
    }

    fn replace_memo(
        &mut self,
        expr: ExprHandle,
        from: ExprHandle,
        to: ExprHandle,
        memo: &mut HashMap<ExprHandle, ExprHandle>,
    ) -> ExprHandle {
        if expr == from {
            return to;
        }
        if let Some(&done) = memo.get(&expr) {
            return done;
        }

        let node = self.get(expr).clone();
        if node.is_atom() {
            return expr;
        }

        let children = node.children();
        let mut rewritten: SmallVec<[ExprHandle; 4]> = SmallVec::with_capacity(children.len());
        for child in children {
            rewritten.push(self.replace_memo(child, from, to, memo));
        }

        let result = self.intern(node.with_children(&rewritten));
        memo.insert(expr, result);
        result
    }

    /// Returns true if `needle` occurs anywhere inside `expr`.
    #[must_use]
    pub fn contains(&self, expr: ExprHandle, needle: ExprHandle) -> bool {
        if expr == needle {
            return true;
        }
        self.get(expr)
            .children()
            .into_iter()
            .any(|child| self.contains(child, needle))
    }
}
