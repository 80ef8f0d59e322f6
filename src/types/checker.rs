//! Type checker implementation
//!
//! Second pass. Runs only after name resolution has finished for the whole
//! program and reads nothing but the symbol bindings it left on identifier
//! nodes. Every expression gets exactly one [`Type`]; every statement
//! reports whether it checked cleanly.
//!
//! Operands are always evaluated before any rule is applied, so independent
//! errors inside one statement are all found. An operand typed
//! [`Type::Error`] has already been reported and is never reported again.

use log::{debug, info};

use crate::ast::{
    Block, Decl, Expr, ExprKind, FnDecl, Ident, OpCategory, Program, Stmt, TypeNode, UnaryOp,
};
use crate::error::{DiagnosticSink, SemaResult, SemanticError, SourceLocation};
use crate::symbols::SymbolArena;

use super::Type;

/// Type checker
pub struct TypeChecker<'a> {
    symbols: &'a SymbolArena,
    sink: &'a mut dyn DiagnosticSink,
    errors: usize,
}

impl<'a> TypeChecker<'a> {
    pub fn new(symbols: &'a SymbolArena, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            symbols,
            sink,
            errors: 0,
        }
    }

    /// Number of fatal diagnostics reported so far
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// Type check every function body. `Ok(true)` when nothing was wrong.
    pub fn check_program(&mut self, program: &mut Program) -> SemaResult<bool> {
        info!("type checking started");

        let mut ok = true;
        for decl in &mut program.decls {
            if let Decl::Fn(func) = decl {
                ok &= self.check_fn(func)?;
            }
        }

        info!("type checking finished: {} errors", self.errors);
        Ok(ok)
    }

    fn report(&mut self, location: &SourceLocation, error: SemanticError) {
        self.errors += 1;
        debug!("{}: {}", location, error);
        self.sink.fatal(location.line, location.column, &error.to_string());
    }

    fn check_fn(&mut self, func: &mut FnDecl) -> SemaResult<bool> {
        let ret = match &func.ret {
            TypeNode::Int => Type::Int,
            TypeNode::Bool => Type::Bool,
            TypeNode::Void => Type::Void,
            TypeNode::Struct(id) if id.symbol.is_filled() => Type::Struct(id.name.clone()),
            // invalid struct name, reported during name resolution
            TypeNode::Struct(_) => Type::Error,
        };
        self.check_block(&mut func.body, &ret)
    }

    fn check_block(&mut self, block: &mut Block, ret: &Type) -> SemaResult<bool> {
        let mut ok = true;
        for stmt in &mut block.stmts {
            ok &= self.check_stmt(stmt, ret)?;
        }
        Ok(ok)
    }

    /// Check a statement inside a function returning `ret`
    fn check_stmt(&mut self, stmt: &mut Stmt, ret: &Type) -> SemaResult<bool> {
        match stmt {
            Stmt::Assign(expr) | Stmt::Call(expr) => Ok(!self.check_expr(expr)?.is_error()),

            Stmt::PostInc(expr) | Stmt::PostDec(expr) => {
                let ty = self.check_expr(expr)?;
                Ok(self.expect_operand(
                    &ty,
                    &expr.location,
                    Type::is_int,
                    SemanticError::ArithmeticNonNumeric,
                ))
            }

            Stmt::Read(expr) => {
                let ty = self.check_expr(expr)?;
                let error = match ty {
                    Type::Error => return Ok(false),
                    Type::Function { .. } => SemanticError::ReadFunction,
                    Type::StructDef(_) => SemanticError::ReadStructName,
                    Type::Struct(_) => SemanticError::ReadStructVar,
                    Type::String => SemanticError::ReadStringLiteral,
                    _ => return Ok(true),
                };
                self.report(&expr.location, error);
                Ok(false)
            }

            Stmt::Write(expr) => {
                let ty = self.check_expr(expr)?;
                let error = match ty {
                    Type::Error => return Ok(false),
                    Type::Function { .. } => SemanticError::WriteFunction,
                    Type::StructDef(_) => SemanticError::WriteStructName,
                    Type::Struct(_) => SemanticError::WriteStructVar,
                    Type::Void => SemanticError::WriteVoid,
                    _ => return Ok(true),
                };
                self.report(&expr.location, error);
                Ok(false)
            }

            Stmt::If { cond, body } => {
                let cond_ok = self.check_condition(cond, SemanticError::NonBoolIf)?;
                let body_ok = self.check_block(body, ret)?;
                Ok(cond_ok && body_ok)
            }

            Stmt::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                let cond_ok = self.check_condition(cond, SemanticError::NonBoolIf)?;
                let then_ok = self.check_block(then_body, ret)?;
                let else_ok = self.check_block(else_body, ret)?;
                Ok(cond_ok && then_ok && else_ok)
            }

            Stmt::While { cond, body } => {
                let cond_ok = self.check_condition(cond, SemanticError::NonBoolWhile)?;
                let body_ok = self.check_block(body, ret)?;
                Ok(cond_ok && body_ok)
            }

            Stmt::Return { value, location } => match value {
                Some(value) => {
                    let ty = self.check_expr(value)?;
                    if ret.is_void() {
                        self.report(&value.location, SemanticError::ReturnValueInVoid);
                        Ok(false)
                    } else if ty.is_error() || ret.is_error() {
                        Ok(false)
                    } else if ty != *ret {
                        self.report(&value.location, SemanticError::BadReturnValue);
                        Ok(false)
                    } else {
                        Ok(true)
                    }
                }
                None if ret.is_void() => Ok(true),
                None if ret.is_error() => Ok(false),
                None => {
                    self.report(location, SemanticError::MissingReturnValue);
                    Ok(false)
                }
            },
        }
    }

    fn check_condition(&mut self, cond: &mut Expr, error: SemanticError) -> SemaResult<bool> {
        let ty = self.check_expr(cond)?;
        Ok(self.expect_operand(&ty, &cond.location, Type::is_bool, error))
    }

    /// `true` when `ty` passes `want`; reports `error` unless `ty` is `Error`
    fn expect_operand(
        &mut self,
        ty: &Type,
        location: &SourceLocation,
        want: fn(&Type) -> bool,
        error: SemanticError,
    ) -> bool {
        if ty.is_error() {
            false
        } else if want(ty) {
            true
        } else {
            self.report(location, error);
            false
        }
    }

    /// Compute, store and return the type of an expression
    fn check_expr(&mut self, expr: &mut Expr) -> SemaResult<Type> {
        let ty = match &mut expr.kind {
            ExprKind::IntLit(_) => Type::Int,
            ExprKind::StrLit(_) => Type::String,
            ExprKind::True | ExprKind::False => Type::Bool,

            ExprKind::Id(ident) => self.ident_type(ident)?,

            ExprKind::DotAccess { lhs, field, .. } => {
                self.check_expr(lhs)?;
                self.ident_type(field)?
            }

            ExprKind::Assign { lhs, rhs } => {
                let lhs_ty = self.check_expr(lhs)?;
                let rhs_ty = self.check_expr(rhs)?;
                self.check_assign(&lhs.location, &lhs_ty, &rhs_ty)
            }

            ExprKind::Call { callee, args } => self.check_call(callee, args)?,

            ExprKind::Unary { op, operand } => {
                let ty = self.check_expr(operand)?;
                let (want, result, error): (fn(&Type) -> bool, Type, SemanticError) = match op {
                    UnaryOp::Neg => (Type::is_int, Type::Int, SemanticError::ArithmeticNonNumeric),
                    UnaryOp::Not => (Type::is_bool, Type::Bool, SemanticError::LogicalNonBool),
                };
                if self.expect_operand(&ty, &operand.location, want, error) {
                    result
                } else {
                    Type::Error
                }
            }

            ExprKind::Binary { op, lhs, rhs } => {
                let lhs_ty = self.check_expr(lhs)?;
                let rhs_ty = self.check_expr(rhs)?;
                self.check_binary(op.category(), lhs, &lhs_ty, rhs, &rhs_ty)
            }
        };

        expr.ty.fill(ty.clone())?;
        Ok(ty)
    }

    /// Type of an identifier use; unbound identifiers were already reported
    fn ident_type(&self, ident: &Ident) -> SemaResult<Type> {
        match ident.symbol.copied() {
            Some(symbol) => self.symbols.type_of(symbol),
            None => Ok(Type::Error),
        }
    }

    fn check_assign(&mut self, location: &SourceLocation, lhs: &Type, rhs: &Type) -> Type {
        if lhs.is_error() || rhs.is_error() {
            return Type::Error;
        }

        let error = if lhs.is_function() && rhs.is_function() {
            SemanticError::FunctionAssignment
        } else if lhs.is_struct_def() && rhs.is_struct_def() {
            SemanticError::StructNameAssignment
        } else if lhs.is_struct_var() && rhs.is_struct_var() {
            SemanticError::StructVarAssignment
        } else if (lhs.is_int() && rhs.is_int()) || (lhs.is_bool() && rhs.is_bool()) {
            return lhs.clone();
        } else {
            SemanticError::TypeMismatch
        };

        self.report(location, error);
        Type::Error
    }

    /// Each bad operand of an arithmetic, logical or relational operator is
    /// reported on its own
    fn check_binary(
        &mut self,
        category: OpCategory,
        lhs: &Expr,
        lhs_ty: &Type,
        rhs: &Expr,
        rhs_ty: &Type,
    ) -> Type {
        let (want, result, error): (fn(&Type) -> bool, Type, SemanticError) = match category {
            OpCategory::Arithmetic => {
                (Type::is_int, Type::Int, SemanticError::ArithmeticNonNumeric)
            }
            OpCategory::Logical => (Type::is_bool, Type::Bool, SemanticError::LogicalNonBool),
            OpCategory::Relational => {
                (Type::is_int, Type::Bool, SemanticError::RelationalNonNumeric)
            }
            OpCategory::Equality => return self.check_equality(&lhs.location, lhs_ty, rhs_ty),
        };

        let lhs_ok = self.expect_operand(lhs_ty, &lhs.location, want, error);
        let rhs_ok = self.expect_operand(rhs_ty, &rhs.location, want, error);
        if lhs_ok && rhs_ok {
            result
        } else {
            Type::Error
        }
    }

    fn check_equality(&mut self, location: &SourceLocation, lhs: &Type, rhs: &Type) -> Type {
        if lhs.is_error() || rhs.is_error() {
            return Type::Error;
        }

        let error = if lhs.is_void() && rhs.is_void() {
            SemanticError::EqualityVoid
        } else if lhs.is_function() && rhs.is_function() {
            SemanticError::EqualityFunctions
        } else if lhs.is_struct_def() && rhs.is_struct_def() {
            SemanticError::EqualityStructNames
        } else if lhs.is_struct_var() && rhs.is_struct_var() {
            SemanticError::EqualityStructVars
        } else if (lhs.is_int() && rhs.is_int()) || (lhs.is_bool() && rhs.is_bool()) {
            return Type::Bool;
        } else {
            SemanticError::TypeMismatch
        };

        self.report(location, error);
        Type::Error
    }

    fn check_call(&mut self, callee: &Ident, args: &mut [Expr]) -> SemaResult<Type> {
        let signature = match self.ident_type(callee)? {
            Type::Function { params, ret } => Some((params, *ret)),
            Type::Error => None,
            _ => {
                self.report(&callee.location, SemanticError::CallNonFunction);
                None
            }
        };

        // arguments are typed even when the callee is unusable
        let mut actuals = Vec::with_capacity(args.len());
        for arg in args.iter_mut() {
            actuals.push(self.check_expr(arg)?);
        }

        let Some((params, ret)) = signature else {
            return Ok(Type::Error);
        };

        if actuals.len() != params.len() {
            self.report(&callee.location, SemanticError::WrongArgCount);
            return Ok(ret);
        }

        for ((actual, formal), arg) in actuals.iter().zip(&params).zip(args.iter()) {
            if actual.is_error() || formal.is_error() {
                continue;
            }
            let matches = (actual.is_int() && formal.is_int())
                || (actual.is_bool() && formal.is_bool());
            if !matches {
                self.report(&arg.location, SemanticError::ActualFormalMismatch);
            }
        }

        Ok(ret)
    }
}
