//! Node constructors
//!
//! The parser builds trees through these; every binding and type slot
//! starts out empty.

use crate::error::SourceLocation;

use super::{
    BinaryOp, Block, Decl, Expr, ExprKind, FnDecl, FormalDecl, Ident, Program, Slot, Stmt,
    StructDecl, TypeNode, UnaryOp, VarDecl,
};

impl Program {
    pub fn new(decls: Vec<Decl>) -> Self {
        Self { decls }
    }
}

impl Ident {
    pub fn new(name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            location,
            symbol: Slot::empty("binding"),
        }
    }
}

impl TypeNode {
    /// `struct Name` as a type
    pub fn structure(name: impl Into<String>, location: SourceLocation) -> Self {
        TypeNode::Struct(Ident::new(name, location))
    }
}

impl VarDecl {
    pub fn new(ty: TypeNode, id: Ident) -> Self {
        Self { ty, id }
    }
}

impl FormalDecl {
    pub fn new(ty: TypeNode, id: Ident) -> Self {
        Self { ty, id }
    }
}

impl Block {
    pub fn new(decls: Vec<VarDecl>, stmts: Vec<Stmt>) -> Self {
        Self { decls, stmts }
    }

    pub fn stmts(stmts: Vec<Stmt>) -> Self {
        Self::new(Vec::new(), stmts)
    }
}

impl Decl {
    pub fn var(ty: TypeNode, id: Ident) -> Self {
        Decl::Var(VarDecl::new(ty, id))
    }

    pub fn func(ret: TypeNode, id: Ident, formals: Vec<FormalDecl>, body: Block) -> Self {
        Decl::Fn(FnDecl {
            ret,
            id,
            formals,
            body,
        })
    }

    pub fn structure(id: Ident, fields: Vec<VarDecl>) -> Self {
        Decl::Struct(StructDecl { id, fields })
    }
}

impl Expr {
    pub fn new(kind: ExprKind, location: SourceLocation) -> Self {
        Self {
            kind,
            location,
            ty: Slot::empty("type"),
        }
    }

    pub fn int_lit(value: i32, location: SourceLocation) -> Self {
        Self::new(ExprKind::IntLit(value), location)
    }

    pub fn str_lit(value: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(ExprKind::StrLit(value.into()), location)
    }

    pub fn true_lit(location: SourceLocation) -> Self {
        Self::new(ExprKind::True, location)
    }

    pub fn false_lit(location: SourceLocation) -> Self {
        Self::new(ExprKind::False, location)
    }

    pub fn id(name: impl Into<String>, location: SourceLocation) -> Self {
        let ident = Ident::new(name, location.clone());
        Self::new(ExprKind::Id(ident), location)
    }

    /// `lhs.field`, located at the start of `lhs`
    pub fn dot(lhs: Expr, field: Ident) -> Self {
        let location = lhs.location.clone();
        Self::new(
            ExprKind::DotAccess {
                lhs: Box::new(lhs),
                field,
                failed: false,
            },
            location,
        )
    }

    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        let location = lhs.location.clone();
        Self::new(
            ExprKind::Assign {
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            location,
        )
    }

    pub fn call(callee: Ident, args: Vec<Expr>) -> Self {
        let location = callee.location.clone();
        Self::new(ExprKind::Call { callee, args }, location)
    }

    pub fn unary(op: UnaryOp, operand: Expr, location: SourceLocation) -> Self {
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            location,
        )
    }

    /// Binary expression, located at the start of `lhs`
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        let location = lhs.location.clone();
        Self::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            location,
        )
    }
}

impl Stmt {
    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        Stmt::Assign(Expr::assign(lhs, rhs))
    }

    pub fn call(callee: Ident, args: Vec<Expr>) -> Self {
        Stmt::Call(Expr::call(callee, args))
    }

    pub fn ret(value: Option<Expr>, location: SourceLocation) -> Self {
        Stmt::Return { value, location }
    }
}
