//! Abstract Syntax Tree definitions
//!
//! This module defines the node catalogue the analysis consumes. Trees are
//! built by the parser (see the constructors in [`build`]) and decorated in
//! place: identifier nodes get a symbol binding during name resolution and
//! expression nodes get a type during type checking.

use crate::error::SourceLocation;
use crate::symbols::SymbolId;
use crate::types::Type;

pub mod build;
pub mod slot;
pub mod walk;

pub use slot::Slot;

/// Root AST node representing a complete program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub decls: Vec<Decl>,
}

/// An identifier with its binding slot
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub location: SourceLocation,
    pub symbol: Slot<SymbolId>,
}

/// Declared type as written in the source
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Int,
    Bool,
    Void,
    /// `struct Name`; the identifier is bound to the struct type
    Struct(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
    Struct(StructDecl),
}

/// Variable declaration: `int x;` or `struct Point p;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: TypeNode,
    pub id: Ident,
}

/// Formal parameter: `int x`
#[derive(Debug, Clone, PartialEq)]
pub struct FormalDecl {
    pub ty: TypeNode,
    pub id: Ident,
}

/// Function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub ret: TypeNode,
    pub id: Ident,
    pub formals: Vec<FormalDecl>,
    pub body: Block,
}

/// Struct type declaration: `struct Point { int x; int y; };`
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub id: Ident,
    pub fields: Vec<VarDecl>,
}

/// Declarations followed by statements; function bodies and branch bodies
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
}

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `lhs = rhs;` (holds an [`ExprKind::Assign`])
    Assign(Expr),
    /// `e++;`
    PostInc(Expr),
    /// `e--;`
    PostDec(Expr),
    /// `cin >> e;`
    Read(Expr),
    /// `cout << e;`
    Write(Expr),
    If {
        cond: Expr,
        body: Block,
    },
    IfElse {
        cond: Expr,
        then_body: Block,
        else_body: Block,
    },
    While {
        cond: Expr,
        body: Block,
    },
    /// `f(args);` (holds an [`ExprKind::Call`])
    Call(Expr),
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },
}

/// Expression node with its type slot
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: SourceLocation,
    pub ty: Slot<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntLit(i32),
    StrLit(String),
    True,
    False,
    Id(Ident),
    /// `lhs.field`; `failed` is set when resolution of `lhs` already failed
    DotAccess {
        lhs: Box<Expr>,
        field: Ident,
        failed: bool,
    },
    Assign {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        callee: Ident,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
}

/// Operator families sharing one typing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCategory {
    Arithmetic,
    Logical,
    Relational,
    Equality,
}

impl BinaryOp {
    pub fn category(self) -> OpCategory {
        match self {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                OpCategory::Arithmetic
            }
            BinaryOp::And | BinaryOp::Or => OpCategory::Logical,
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEq | BinaryOp::GreaterEq => {
                OpCategory::Relational
            }
            BinaryOp::Eq | BinaryOp::NotEq => OpCategory::Equality,
        }
    }
}
