//! Error handling and diagnostics for semantic analysis
//!
//! Two disjoint classes of failure live here:
//! - [`SemanticError`]: problems in the user's program. These are rendered
//!   to text and reported through a [`DiagnosticSink`]; analysis continues.
//! - [`SemaError`]: violated internal invariants (scope underflow, a slot
//!   written twice). These are returned as `Err` and end the analysis.

use std::fmt;

use thiserror::Error;

use crate::symbols::scope::ScopeError;

pub mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticSink, Diagnostics, Severity};

/// Result type alias for operations that can hit an internal invariant
pub type SemaResult<T> = Result<T, SemaError>;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Optional filename
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            filename,
        }
    }

    /// Create a source location without a filename
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(line, column, None)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Internal compiler error. Never caused by the analysed program itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemaError {
    #[error("Internal Error: {0}")]
    Scope(#[from] ScopeError),
    #[error("Internal Error: {what} slot filled twice")]
    SlotAlreadyFilled { what: &'static str },
    #[error("Internal Error: symbol #{id} is not in the arena")]
    DanglingSymbol { id: u32 },
    #[error("Internal Error: {message}")]
    Internal { message: String },
}

impl SemaError {
    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the error kind as a string
    pub fn kind(&self) -> &str {
        "Internal Error"
    }
}

/// Every user-facing semantic diagnostic the two passes can emit.
///
/// The `Display` text is what reaches [`DiagnosticSink::fatal`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticError {
    // name resolution
    #[error("Non-function declared void")]
    NonFunctionVoid,
    #[error("Invalid name of struct type")]
    InvalidStructType,
    #[error("Multiply declared identifier")]
    MultiplyDeclared,
    #[error("Undeclared identifier")]
    Undeclared,
    #[error("Dot-access of non-struct type")]
    DotAccessNonStruct,
    #[error("Invalid struct field name")]
    InvalidStructField,

    // operators
    #[error("Arithmetic operator applied to non-numeric operand")]
    ArithmeticNonNumeric,
    #[error("Logical operator applied to non-bool operand")]
    LogicalNonBool,
    #[error("Relational operator applied to non-numeric operand")]
    RelationalNonNumeric,
    #[error("Equality operator applied to void functions")]
    EqualityVoid,
    #[error("Equality operator applied to functions")]
    EqualityFunctions,
    #[error("Equality operator applied to struct names")]
    EqualityStructNames,
    #[error("Equality operator applied to struct variables")]
    EqualityStructVars,
    #[error("Type mismatch")]
    TypeMismatch,

    // assignment
    #[error("Function assignment")]
    FunctionAssignment,
    #[error("Struct name assignment")]
    StructNameAssignment,
    #[error("Struct variable assignment")]
    StructVarAssignment,

    // calls
    #[error("Attempt to call a non-function")]
    CallNonFunction,
    #[error("Function call with wrong number of args")]
    WrongArgCount,
    #[error("Type of actual does not match type of formal")]
    ActualFormalMismatch,

    // read / write
    #[error("Attempt to read a function")]
    ReadFunction,
    #[error("Attempt to read a struct name")]
    ReadStructName,
    #[error("Attempt to read a struct variable")]
    ReadStructVar,
    #[error("Attempt to read a string literal")]
    ReadStringLiteral,
    #[error("Attempt to write a function")]
    WriteFunction,
    #[error("Attempt to write a struct name")]
    WriteStructName,
    #[error("Attempt to write a struct variable")]
    WriteStructVar,
    #[error("Attempt to write void")]
    WriteVoid,

    // control flow
    #[error("Non-bool expression used as an if condition")]
    NonBoolIf,
    #[error("Non-bool expression used as a while condition")]
    NonBoolWhile,
    #[error("Return with a value in a void function")]
    ReturnValueInVoid,
    #[error("Missing return value")]
    MissingReturnValue,
    #[error("Bad return value")]
    BadReturnValue,
}
