//! # C-flat semantic analysis
//!
//! The semantic phase of a compiler for C-flat, a small C-like teaching
//! language with `int`, `bool`, `void`, structs and functions.
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//! - `ast`: the tree a parser hands over, with write-once attachment
//!   points for symbol bindings and expression types
//! - `symbols`: the symbol arena and the scope stack
//! - `semantic`: name resolution and the driver running both passes
//! - `types`: the type representation and the type checker
//! - `config`: analysis options
//! - `error`: internal errors, semantic error messages and diagnostic sinks
//!
//! Name resolution always finishes for the whole program before type
//! checking starts.

pub mod ast;
pub mod config;
pub mod error;
pub mod semantic;
pub mod symbols;
pub mod types;

// Re-export commonly used types
pub use ast::Program;
pub use config::AnalysisConfig;
pub use error::{DiagnosticSink, Diagnostics, SemaError, SemaResult, SemanticError, SourceLocation};
pub use semantic::{Analysis, SemanticAnalyzer};
pub use symbols::{SymbolArena, SymbolId};
pub use types::Type;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Analyse a parsed program with the default configuration
///
/// Decorates `program` in place and reports every semantic error to
/// `sink`. Returns `Err` only when an internal invariant is violated.
pub fn analyze(program: &mut Program, sink: &mut dyn DiagnosticSink) -> SemaResult<Analysis> {
    SemanticAnalyzer::new().analyze(program, sink)
}
