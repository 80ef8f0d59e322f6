//! Symbol model
//!
//! Every declared entity is a [`Symbol`] stored in the [`SymbolArena`].
//! AST nodes and scopes refer to symbols through copyable [`SymbolId`]
//! handles, never through references.

use std::fmt;

use crate::error::{SemaError, SemaResult};
use crate::types::Type;

pub mod scope;

pub use scope::{ScopeError, ScopeStack};

/// Stable handle into a [`SymbolArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Handle for the arena slot at `index`
    fn from_index(index: usize) -> SemaResult<Self> {
        u32::try_from(index)
            .map(SymbolId)
            .map_err(|_| SemaError::internal(format!("symbol arena overflow at index {}", index)))
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum SymbolKind {
    /// A variable (or formal) of primitive type
    Variable { ty: Type },
    /// A struct type; owns the table of its fields
    StructDef { fields: ScopeStack },
    /// A variable of struct type; `def` is the `StructDef` it instantiates
    StructVar { def: SymbolId },
    Function { params: Vec<Type>, ret: Type },
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_struct_def(&self) -> bool {
        matches!(self.kind, SymbolKind::StructDef { .. })
    }
}

/// Owner of every symbol created during an analysis
#[derive(Debug, Clone, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SemaResult<SymbolId> {
        let id = SymbolId::from_index(self.symbols.len())?;
        self.symbols.push(symbol);
        Ok(id)
    }

    pub fn get(&self, id: SymbolId) -> SemaResult<&Symbol> {
        self.symbols
            .get(id.index())
            .ok_or(SemaError::DanglingSymbol { id: id.0 })
    }

    pub fn get_mut(&mut self, id: SymbolId) -> SemaResult<&mut Symbol> {
        self.symbols
            .get_mut(id.index())
            .ok_or(SemaError::DanglingSymbol { id: id.0 })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The type an identifier bound to `id` has when used as an expression.
    pub fn type_of(&self, id: SymbolId) -> SemaResult<Type> {
        let symbol = self.get(id)?;
        Ok(match &symbol.kind {
            SymbolKind::Variable { ty } => ty.clone(),
            SymbolKind::StructDef { .. } => Type::StructDef(symbol.name.clone()),
            SymbolKind::StructVar { def } => Type::Struct(self.get(*def)?.name.clone()),
            SymbolKind::Function { params, ret } => Type::function(params.clone(), ret.clone()),
        })
    }

    /// Field table of the struct a struct-typed symbol refers to.
    ///
    /// `None` when `id` is not a struct variable.
    pub fn fields_of(&self, id: SymbolId) -> SemaResult<Option<&ScopeStack>> {
        let SymbolKind::StructVar { def } = self.get(id)?.kind else {
            return Ok(None);
        };
        match &self.get(def)?.kind {
            SymbolKind::StructDef { fields } => Ok(Some(fields)),
            _ => Err(SemaError::internal(format!(
                "struct variable {} points at non-struct symbol {}",
                id, def
            ))),
        }
    }

    /// Text form of a symbol's type: `int`, `Point`, `int,bool->void`
    pub fn describe(&self, id: SymbolId) -> String {
        match self.type_of(id) {
            Ok(ty) => ty.to_string(),
            Err(_) => format!("<dangling {}>", id),
        }
    }
}
