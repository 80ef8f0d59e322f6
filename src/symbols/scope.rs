//! Scope stack (symbol table)
//!
//! An ordered sequence of scopes, innermost first. Each scope maps a name to
//! a [`SymbolId`] in the [`SymbolArena`]. Shadowing across scopes is legal;
//! a name may appear at most once per scope.

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use super::{SymbolArena, SymbolId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("operation on an empty scope stack")]
    EmptyScope,
    #[error("{name:?} already declared in the innermost scope")]
    DuplicateName { name: String },
}

type Scope = HashMap<String, SymbolId>;

#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    // innermost scope is last
    scopes: Vec<Scope>,
}

impl ScopeStack {
    /// A stack with no scopes. Push one before declaring anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack holding one empty scope
    pub fn with_scope() -> Self {
        let mut stack = Self::new();
        stack.push_scope();
        stack
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        debug!("pushed scope, depth {}", self.scopes.len());
    }

    pub fn pop_scope(&mut self) -> Result<(), ScopeError> {
        self.scopes.pop().ok_or(ScopeError::EmptyScope)?;
        debug!("popped scope, depth {}", self.scopes.len());
        Ok(())
    }

    pub fn declare(&mut self, name: &str, symbol: SymbolId) -> Result<(), ScopeError> {
        let scope = self.scopes.last_mut().ok_or(ScopeError::EmptyScope)?;
        if scope.contains_key(name) {
            return Err(ScopeError::DuplicateName {
                name: name.to_string(),
            });
        }
        scope.insert(name.to_string(), symbol);
        Ok(())
    }

    /// Innermost scope only
    pub fn lookup_local(&self, name: &str) -> Result<Option<SymbolId>, ScopeError> {
        let scope = self.scopes.last().ok_or(ScopeError::EmptyScope)?;
        Ok(scope.get(name).copied())
    }

    /// Innermost to outermost, first match wins
    pub fn lookup_global(&self, name: &str) -> Result<Option<SymbolId>, ScopeError> {
        if self.scopes.is_empty() {
            return Err(ScopeError::EmptyScope);
        }
        Ok(self
            .scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied()))
    }

    /// Human-readable listing of every scope, innermost first.
    pub fn debug_dump(&self, symbols: &SymbolArena) -> String {
        let mut output = String::from("\nSym Table\n");
        for scope in self.scopes.iter().rev() {
            let mut names: Vec<&String> = scope.keys().collect();
            names.sort();
            let entries: Vec<String> = names
                .into_iter()
                .map(|name| format!("{}={}", name, symbols.describe(scope[name])))
                .collect();
            output.push('{');
            output.push_str(&entries.join(", "));
            output.push_str("}\n");
        }
        output.push('\n');
        output
    }
}
