//! Read-only traversals over a decorated tree
//!
//! Consumers (and tests) use these to inspect every identifier use or every
//! expression without re-implementing the recursion.

use super::{Block, Decl, Expr, ExprKind, Ident, Program, Stmt};

impl Program {
    /// Every expression node, outermost before its children
    pub fn exprs(&self) -> Vec<&Expr> {
        let mut out = Vec::new();
        for decl in &self.decls {
            if let Decl::Fn(func) = decl {
                collect_block(&func.body, &mut out);
            }
        }
        out
    }

    /// Every identifier *use*: plain identifiers, dot-access fields, callees
    pub fn ident_uses(&self) -> Vec<&Ident> {
        let mut out = Vec::new();
        for expr in self.exprs() {
            match &expr.kind {
                ExprKind::Id(ident) => out.push(ident),
                ExprKind::DotAccess { field, .. } => out.push(field),
                ExprKind::Call { callee, .. } => out.push(callee),
                _ => {}
            }
        }
        out
    }
}

fn collect_block<'a>(block: &'a Block, out: &mut Vec<&'a Expr>) {
    for stmt in &block.stmts {
        collect_stmt(stmt, out);
    }
}

fn collect_stmt<'a>(stmt: &'a Stmt, out: &mut Vec<&'a Expr>) {
    match stmt {
        Stmt::Assign(expr)
        | Stmt::PostInc(expr)
        | Stmt::PostDec(expr)
        | Stmt::Read(expr)
        | Stmt::Write(expr)
        | Stmt::Call(expr) => collect_expr(expr, out),
        Stmt::If { cond, body } | Stmt::While { cond, body } => {
            collect_expr(cond, out);
            collect_block(body, out);
        }
        Stmt::IfElse {
            cond,
            then_body,
            else_body,
        } => {
            collect_expr(cond, out);
            collect_block(then_body, out);
            collect_block(else_body, out);
        }
        Stmt::Return { value, .. } => {
            if let Some(value) = value {
                collect_expr(value, out);
            }
        }
    }
}

fn collect_expr<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    out.push(expr);
    match &expr.kind {
        ExprKind::IntLit(_)
        | ExprKind::StrLit(_)
        | ExprKind::True
        | ExprKind::False
        | ExprKind::Id(_) => {}
        ExprKind::DotAccess { lhs, .. } => collect_expr(lhs, out),
        ExprKind::Unary { operand, .. } => collect_expr(operand, out),
        ExprKind::Assign { lhs, rhs } | ExprKind::Binary { lhs, rhs, .. } => {
            collect_expr(lhs, out);
            collect_expr(rhs, out);
        }
        ExprKind::Call { args, .. } => {
            for arg in args {
                collect_expr(arg, out);
            }
        }
    }
}
