use std::collections::HashMap;

use crate::{ast::Variable, util::num::Number};

/// Maps variable names to the single shared [`Variable`] of one parse.
///
/// The first lookup of a name creates its variable; later lookups return
/// handles to the same cell, so a value assigned in one statement is seen by
/// every later occurrence. A table lives for exactly one `parse` call.
#[derive(Debug)]
pub struct SymbolTable<N> {
    symbols: HashMap<String, Variable<N>>,
}

impl<N: Number> SymbolTable<N> {
    #[must_use]
    pub fn new() -> Self {
        Self { symbols: HashMap::new() }
    }

    /// Returns the variable called `name`, creating it on first use.
    pub fn resolve(&mut self, name: &str) -> Variable<N> {
        if let Some(variable) = self.symbols.get(name) {
            return variable.clone();
        }
        tracing::trace!(name, "new symbol");
        let variable = Variable::new(name);
        self.symbols.insert(name.to_string(), variable.clone());
        variable
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable<N>> {
        self.symbols.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<N: Number> Default for SymbolTable<N> {
    fn default() -> Self {
        Self::new()
    }
}
