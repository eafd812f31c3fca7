//! Interning tables.
//!
//! Symbols are interned by name so that `x` created twice is the same
//! `SymbolId`, and therefore the same node in the arena.

use hashbrown::HashMap;
use std::hash::Hash;

/// A generic interning table mapping values to dense `u32` ids.
#[derive(Debug)]
pub struct InternTable<T> {
    map: HashMap<T, u32>,
    values: Vec<T>,
}

impl<T: Clone + Eq + Hash> Default for InternTable<T> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            values: Vec::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> InternTable<T> {
    /// Creates a new empty interning table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a value, returning its id. Existing values keep their id.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` values are interned.
    pub fn intern(&mut self, value: T) -> u32 {
        if let Some(&id) = self.map.get(&value) {
            return id;
        }

        let id = u32::try_from(self.values.len()).expect("intern table capacity exceeded");
        self.map.insert(value.clone(), id);
        self.values.push(value);
        id
    }

    /// Gets a value by its id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&T> {
        self.values.get(id as usize)
    }

    /// Returns the number of interned values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
