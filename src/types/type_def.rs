//! Type definitions
//!
//! This module defines the nominal type system of C-flat.

use std::fmt;

/// Type information attached to every expression
#[derive(Debug, Clone)]
pub enum Type {
    Int,
    Bool,
    Void,
    String,
    /// A variable of the named struct type
    Struct(String),
    /// The name of a struct type used where a value is expected
    StructDef(String),
    Function {
        params: Vec<Type>,
        ret: Box<Type>,
    },
    /// Already reported; never equal to anything, itself included
    Error,
}

impl Type {
    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::Function {
            params,
            ret: Box::new(ret),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function { .. })
    }

    pub fn is_struct_var(&self) -> bool {
        matches!(self, Type::Struct(_))
    }

    pub fn is_struct_def(&self) -> bool {
        matches!(self, Type::StructDef(_))
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Int, Type::Int)
            | (Type::Bool, Type::Bool)
            | (Type::Void, Type::Void)
            | (Type::String, Type::String) => true,
            (Type::Struct(a), Type::Struct(b)) => a == b,
            (Type::StructDef(a), Type::StructDef(b)) => a == b,
            (
                Type::Function { params: p1, ret: r1 },
                Type::Function { params: p2, ret: r2 },
            ) => p1 == p2 && r1 == r2,
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::String => write!(f, "String"),
            Type::Struct(name) | Type::StructDef(name) => write!(f, "{}", name),
            Type::Function { params, ret } => {
                let params: Vec<String> = params.iter().map(Type::to_string).collect();
                write!(f, "{}->{}", params.join(","), ret)
            }
            Type::Error => write!(f, "error"),
        }
    }
}
