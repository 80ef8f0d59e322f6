//! Analysis options

/// Knobs for a [`SemanticAnalyzer`](crate::semantic::SemanticAnalyzer) run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Run type checking even when name resolution reported errors.
    /// Unbound identifiers are then typed as `Error` without a new report.
    pub type_check_after_name_errors: bool,
    /// Log the program-level scope table at debug level before it is dropped
    pub dump_scopes: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            type_check_after_name_errors: true,
            dump_scopes: false,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_check_after_name_errors(mut self, enabled: bool) -> Self {
        self.type_check_after_name_errors = enabled;
        self
    }

    pub fn with_dump_scopes(mut self, enabled: bool) -> Self {
        self.dump_scopes = enabled;
        self
    }
}
