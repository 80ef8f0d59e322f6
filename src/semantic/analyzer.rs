//! Semantic analyzer
//!
//! Sequences the two passes over one program: name resolution over the
//! whole tree, then type checking. The program-wide scope table does not
//! survive the first pass; the checker works from the bindings alone.

use log::info;

use crate::ast::Program;
use crate::config::AnalysisConfig;
use crate::error::{DiagnosticSink, SemaResult};
use crate::symbols::SymbolArena;
use crate::types::TypeChecker;

use super::Resolver;

/// Outcome of one analysis run
#[derive(Debug)]
pub struct Analysis {
    /// Every symbol the program declared, addressed by the handles left on the tree
    pub symbols: SymbolArena,
    pub name_errors: usize,
    pub type_errors: usize,
    /// `false` when type checking was skipped
    pub type_checked: bool,
    pub well_typed: bool,
}

impl Analysis {
    pub fn error_count(&self) -> usize {
        self.name_errors + self.type_errors
    }

    /// Both passes ran and neither reported anything
    pub fn is_ok(&self) -> bool {
        self.name_errors == 0 && self.type_checked && self.well_typed
    }
}

/// Semantic analyzer
#[derive(Debug, Clone, Default)]
pub struct SemanticAnalyzer {
    config: AnalysisConfig,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Decorate `program` with symbol bindings and types.
    ///
    /// Problems in the program go to `sink`; an `Err` means an internal
    /// invariant broke, for example a tree that was already analysed.
    pub fn analyze(
        &self,
        program: &mut Program,
        sink: &mut dyn DiagnosticSink,
    ) -> SemaResult<Analysis> {
        let mut resolver = Resolver::new(sink).with_scope_dump(self.config.dump_scopes);
        resolver.resolve_program(program)?;
        let name_errors = resolver.error_count();
        let symbols = resolver.into_symbols();

        if name_errors > 0 && !self.config.type_check_after_name_errors {
            info!("skipping type checking after {} name errors", name_errors);
            return Ok(Analysis {
                symbols,
                name_errors,
                type_errors: 0,
                type_checked: false,
                well_typed: false,
            });
        }

        let (well_typed, type_errors) = {
            let mut checker = TypeChecker::new(&symbols, sink);
            let well_typed = checker.check_program(program)?;
            (well_typed, checker.error_count())
        };

        Ok(Analysis {
            symbols,
            name_errors,
            type_errors,
            type_checked: true,
            well_typed,
        })
    }
}
