//! Semantic analysis module
//!
//! Name resolution and the driver that sequences it with type checking.

pub mod analyzer;
pub mod resolver;

pub use analyzer::{Analysis, SemanticAnalyzer};
pub use resolver::Resolver;
