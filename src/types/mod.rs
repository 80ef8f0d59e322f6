//! Type system module
//!
//! This module holds the type representation and the type-checking pass.

pub mod type_def;
pub mod checker;

pub use type_def::Type;
pub use checker::TypeChecker;
