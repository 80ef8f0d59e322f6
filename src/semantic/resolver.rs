//! Name resolution
//!
//! First pass over the tree. Declarations create symbols in the
//! [`SymbolArena`] and register them in the current [`ScopeStack`]; every
//! identifier use is bound to the symbol it refers to. Struct declarations
//! build their own field table, which the struct's symbol keeps.

use log::{debug, info, trace};

use crate::ast::{Block, Decl, Expr, ExprKind, FnDecl, Ident, Program, Stmt, StructDecl, TypeNode};
use crate::error::{DiagnosticSink, SemaResult, SemanticError, SourceLocation};
use crate::symbols::{ScopeStack, Symbol, SymbolArena, SymbolKind};
use crate::types::Type;

pub struct Resolver<'a> {
    symbols: SymbolArena,
    sink: &'a mut dyn DiagnosticSink,
    errors: usize,
    dump_scopes: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            symbols: SymbolArena::new(),
            sink,
            errors: 0,
            dump_scopes: false,
        }
    }

    pub fn with_scope_dump(mut self, enabled: bool) -> Self {
        self.dump_scopes = enabled;
        self
    }

    /// Number of fatal diagnostics reported so far
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// Hand over the symbols so consumers can interpret bindings
    pub fn into_symbols(self) -> SymbolArena {
        self.symbols
    }

    /// Resolve the whole program in one program-level scope.
    pub fn resolve_program(&mut self, program: &mut Program) -> SemaResult<()> {
        info!("name resolution: {} top-level declarations", program.decls.len());

        let mut table = ScopeStack::with_scope();
        for decl in &mut program.decls {
            self.resolve_decl(decl, &mut table)?;
        }

        if self.dump_scopes {
            debug!("{}", table.debug_dump(&self.symbols));
        }
        table.pop_scope()?;

        info!(
            "name resolution finished: {} symbols, {} errors",
            self.symbols.len(),
            self.errors
        );
        Ok(())
    }

    fn report(&mut self, location: &SourceLocation, error: SemanticError) {
        self.errors += 1;
        debug!("{}: {}", location, error);
        self.sink.fatal(location.line, location.column, &error.to_string());
    }

    fn resolve_decl(&mut self, decl: &mut Decl, table: &mut ScopeStack) -> SemaResult<()> {
        match decl {
            Decl::Var(var) => self.declare_variable(&mut var.ty, &mut var.id, table, None),
            Decl::Fn(func) => self.resolve_fn(func, table),
            Decl::Struct(decl) => self.resolve_struct(decl, table),
        }
    }

    /// Declare a variable, formal or struct field in `target`.
    ///
    /// Struct type names are looked up in `types`, or in `target` itself
    /// when `types` is `None`. Field tables pass the enclosing table here.
    fn declare_variable(
        &mut self,
        ty: &mut TypeNode,
        id: &mut Ident,
        target: &mut ScopeStack,
        types: Option<&ScopeStack>,
    ) -> SemaResult<()> {
        let kind = match ty {
            TypeNode::Void => {
                self.report(&id.location, SemanticError::NonFunctionVoid);
                None
            }
            TypeNode::Int => Some(SymbolKind::Variable { ty: Type::Int }),
            TypeNode::Bool => Some(SymbolKind::Variable { ty: Type::Bool }),
            TypeNode::Struct(type_id) => {
                let lookup = types.unwrap_or(target).lookup_global(&type_id.name)?;
                match lookup {
                    Some(def) if self.symbols.get(def)?.is_struct_def() => {
                        type_id.symbol.fill(def)?;
                        Some(SymbolKind::StructVar { def })
                    }
                    _ => {
                        self.report(&type_id.location, SemanticError::InvalidStructType);
                        None
                    }
                }
            }
        };

        if target.lookup_local(&id.name)?.is_some() {
            self.report(&id.location, SemanticError::MultiplyDeclared);
            return Ok(());
        }

        if let Some(kind) = kind {
            let symbol = self.symbols.alloc(Symbol::new(id.name.clone(), kind))?;
            target.declare(&id.name, symbol)?;
            id.symbol.fill(symbol)?;
            trace!("declared {} as {}", id.name, symbol);
        }
        Ok(())
    }

    fn resolve_fn(&mut self, func: &mut FnDecl, table: &mut ScopeStack) -> SemaResult<()> {
        let ret = self.resolve_return_type(&mut func.ret, table)?;

        let function = if table.lookup_local(&func.id.name)?.is_some() {
            self.report(&func.id.location, SemanticError::MultiplyDeclared);
            None
        } else {
            let symbol = self.symbols.alloc(Symbol::new(
                func.id.name.clone(),
                SymbolKind::Function {
                    params: Vec::new(),
                    ret,
                },
            ))?;
            table.declare(&func.id.name, symbol)?;
            func.id.symbol.fill(symbol)?;
            Some(symbol)
        };

        table.push_scope();

        let mut param_types = Vec::with_capacity(func.formals.len());
        for formal in &mut func.formals {
            self.declare_variable(&mut formal.ty, &mut formal.id, table, None)?;
            param_types.push(declared_type(&formal.ty));
        }
        if let Some(symbol) = function {
            if let SymbolKind::Function { params, .. } = &mut self.symbols.get_mut(symbol)?.kind {
                *params = param_types;
            }
        }

        self.resolve_block(&mut func.body, table)?;
        table.pop_scope()?;
        Ok(())
    }

    fn resolve_return_type(&mut self, ty: &mut TypeNode, table: &ScopeStack) -> SemaResult<Type> {
        let TypeNode::Struct(type_id) = ty else {
            return Ok(declared_type(ty));
        };
        match table.lookup_global(&type_id.name)? {
            Some(def) if self.symbols.get(def)?.is_struct_def() => {
                type_id.symbol.fill(def)?;
                Ok(Type::Struct(type_id.name.clone()))
            }
            _ => {
                self.report(&type_id.location, SemanticError::InvalidStructType);
                Ok(Type::Error)
            }
        }
    }

    fn resolve_struct(&mut self, decl: &mut StructDecl, table: &mut ScopeStack) -> SemaResult<()> {
        let duplicate = table.lookup_local(&decl.id.name)?.is_some();
        if duplicate {
            self.report(&decl.id.location, SemanticError::MultiplyDeclared);
        }

        let mut fields = ScopeStack::with_scope();
        for field in &mut decl.fields {
            self.declare_variable(&mut field.ty, &mut field.id, &mut fields, Some(&*table))?;
        }

        if !duplicate {
            let symbol = self.symbols.alloc(Symbol::new(
                decl.id.name.clone(),
                SymbolKind::StructDef { fields },
            ))?;
            table.declare(&decl.id.name, symbol)?;
            decl.id.symbol.fill(symbol)?;
            trace!("declared struct {} as {}", decl.id.name, symbol);
        }
        Ok(())
    }

    /// Declarations then statements, in the current innermost scope
    fn resolve_block(&mut self, block: &mut Block, table: &mut ScopeStack) -> SemaResult<()> {
        for decl in &mut block.decls {
            self.declare_variable(&mut decl.ty, &mut decl.id, table, None)?;
        }
        for stmt in &mut block.stmts {
            self.resolve_stmt(stmt, table)?;
        }
        Ok(())
    }

    fn resolve_nested_block(
        &mut self,
        block: &mut Block,
        table: &mut ScopeStack,
    ) -> SemaResult<()> {
        table.push_scope();
        self.resolve_block(block, table)?;
        table.pop_scope()?;
        Ok(())
    }

    fn resolve_stmt(&mut self, stmt: &mut Stmt, table: &mut ScopeStack) -> SemaResult<()> {
        match stmt {
            Stmt::Assign(expr)
            | Stmt::PostInc(expr)
            | Stmt::PostDec(expr)
            | Stmt::Read(expr)
            | Stmt::Write(expr)
            | Stmt::Call(expr) => self.resolve_expr(expr, table),
            Stmt::If { cond, body } | Stmt::While { cond, body } => {
                self.resolve_expr(cond, table)?;
                self.resolve_nested_block(body, table)
            }
            Stmt::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                self.resolve_expr(cond, table)?;
                self.resolve_nested_block(then_body, table)?;
                self.resolve_nested_block(else_body, table)
            }
            Stmt::Return { value, .. } => match value {
                Some(value) => self.resolve_expr(value, table),
                None => Ok(()),
            },
        }
    }

    fn resolve_expr(&mut self, expr: &mut Expr, table: &ScopeStack) -> SemaResult<()> {
        match &mut expr.kind {
            ExprKind::IntLit(_) | ExprKind::StrLit(_) | ExprKind::True | ExprKind::False => Ok(()),
            ExprKind::Id(ident) => self.resolve_use(ident, table),
            ExprKind::DotAccess { lhs, field, failed } => {
                self.resolve_expr(lhs, table)?;
                self.resolve_field(lhs, field, failed)
            }
            ExprKind::Assign { lhs, rhs } | ExprKind::Binary { lhs, rhs, .. } => {
                self.resolve_expr(lhs, table)?;
                self.resolve_expr(rhs, table)
            }
            ExprKind::Call { callee, args } => {
                self.resolve_use(callee, table)?;
                for arg in args {
                    self.resolve_expr(arg, table)?;
                }
                Ok(())
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand, table),
        }
    }

    fn resolve_use(&mut self, ident: &mut Ident, table: &ScopeStack) -> SemaResult<()> {
        match table.lookup_global(&ident.name)? {
            Some(symbol) => {
                ident.symbol.fill(symbol)?;
                trace!("bound {} at {} to {}", ident.name, ident.location, symbol);
            }
            None => self.report(&ident.location, SemanticError::Undeclared),
        }
        Ok(())
    }

    /// Bind the field of `lhs.field` once `lhs` has been resolved.
    fn resolve_field(
        &mut self,
        lhs: &Expr,
        field: &mut Ident,
        failed: &mut bool,
    ) -> SemaResult<()> {
        let base = match &lhs.kind {
            // already reported as undeclared
            ExprKind::Id(ident) if !ident.symbol.is_filled() => {
                *failed = true;
                return Ok(());
            }
            ExprKind::Id(ident) => ident.symbol.copied(),
            ExprKind::DotAccess {
                failed: true, ..
            } => {
                *failed = true;
                return Ok(());
            }
            ExprKind::DotAccess { field: inner, .. } => inner.symbol.copied(),
            _ => None,
        };

        let fields = match base {
            Some(symbol) => self.symbols.fields_of(symbol)?,
            None => None,
        };
        let Some(fields) = fields else {
            self.report(&field.location, SemanticError::DotAccessNonStruct);
            *failed = true;
            return Ok(());
        };

        match fields.lookup_global(&field.name)? {
            Some(symbol) => {
                field.symbol.fill(symbol)?;
                trace!("bound field {} at {} to {}", field.name, field.location, symbol);
            }
            None => {
                self.report(&field.location, SemanticError::InvalidStructField);
                *failed = true;
            }
        }
        Ok(())
    }
}

/// Type a declaration names, without resolving struct names
fn declared_type(ty: &TypeNode) -> Type {
    match ty {
        TypeNode::Int => Type::Int,
        TypeNode::Bool => Type::Bool,
        TypeNode::Void => Type::Void,
        TypeNode::Struct(id) => Type::Struct(id.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FormalDecl, VarDecl};
    use crate::error::Diagnostics;
    use pretty_assertions::assert_eq;

    fn at(line: usize, column: usize) -> SourceLocation {
        SourceLocation::at(line, column)
    }

    fn resolve(program: &mut Program) -> (SymbolArena, Diagnostics) {
        let mut sink = Diagnostics::new();
        let mut resolver = Resolver::new(&mut sink);
        resolver.resolve_program(program).unwrap();
        let symbols = resolver.into_symbols();
        (symbols, sink)
    }

    fn reported(sink: &Diagnostics) -> Vec<String> {
        sink.iter().map(|d| d.to_string()).collect()
    }

    fn main_with(decls: Vec<VarDecl>, stmts: Vec<Stmt>) -> Decl {
        Decl::func(
            TypeNode::Void,
            Ident::new("main", at(1, 6)),
            Vec::new(),
            Block::new(decls, stmts),
        )
    }

    fn binding(expr: &Expr) -> Option<crate::symbols::SymbolId> {
        match &expr.kind {
            ExprKind::Id(ident) => ident.symbol.copied(),
            ExprKind::DotAccess { field, .. } => field.symbol.copied(),
            _ => None,
        }
    }

    fn first_stmt_expr(program: &Program, func: usize) -> &Expr {
        let Decl::Fn(func) = &program.decls[func] else {
            panic!("not a function");
        };
        match &func.body.stmts[0] {
            Stmt::Assign(expr) | Stmt::Write(expr) | Stmt::Read(expr) | Stmt::Call(expr) => expr,
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn test_global_use_is_bound() {
        // int x; void main() { cout << x; }
        let mut program = Program::new(vec![
            Decl::var(TypeNode::Int, Ident::new("x", at(1, 5))),
            main_with(vec![], vec![Stmt::Write(Expr::id("x", at(2, 9)))]),
        ]);
        let (symbols, sink) = resolve(&mut program);

        assert!(sink.is_empty());
        let Decl::Var(global) = &program.decls[0] else {
            panic!("not a variable");
        };
        let declared = global.id.symbol.copied();
        assert!(declared.is_some());
        assert_eq!(binding(first_stmt_expr(&program, 1)), declared);
        assert_eq!(symbols.type_of(declared.unwrap()).unwrap(), Type::Int);
    }

    #[test]
    fn test_undeclared_identifier() {
        let mut program = Program::new(vec![main_with(
            vec![],
            vec![Stmt::Write(Expr::id("y", at(3, 13)))],
        )]);
        let (_, sink) = resolve(&mut program);

        assert_eq!(reported(&sink), vec!["3:13: error: Undeclared identifier"]);
        assert!(binding(first_stmt_expr(&program, 0)).is_none());
    }

    #[test]
    fn test_multiply_declared_keeps_first() {
        // void main() { int a; bool a; a = 1; }
        let mut program = Program::new(vec![main_with(
            vec![
                VarDecl::new(TypeNode::Int, Ident::new("a", at(2, 9))),
                VarDecl::new(TypeNode::Bool, Ident::new("a", at(3, 10))),
            ],
            vec![Stmt::assign(Expr::id("a", at(4, 5)), Expr::int_lit(1, at(4, 9)))],
        )]);
        let (symbols, sink) = resolve(&mut program);

        assert_eq!(reported(&sink), vec!["3:10: error: Multiply declared identifier"]);
        let ExprKind::Assign { lhs, .. } = &first_stmt_expr(&program, 0).kind else {
            panic!("not an assignment");
        };
        let bound = binding(lhs).unwrap();
        assert_eq!(symbols.type_of(bound).unwrap(), Type::Int);
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        // int x; void main() { bool x; cout << x; }
        let mut program = Program::new(vec![
            Decl::var(TypeNode::Int, Ident::new("x", at(1, 5))),
            main_with(
                vec![VarDecl::new(TypeNode::Bool, Ident::new("x", at(2, 10)))],
                vec![Stmt::Write(Expr::id("x", at(3, 13)))],
            ),
        ]);
        let (symbols, sink) = resolve(&mut program);

        assert!(sink.is_empty());
        let bound = binding(first_stmt_expr(&program, 1)).unwrap();
        assert_eq!(symbols.type_of(bound).unwrap(), Type::Bool);
    }

    #[test]
    fn test_void_variable() {
        let mut program = Program::new(vec![Decl::var(TypeNode::Void, Ident::new("v", at(1, 6)))]);
        let (symbols, sink) = resolve(&mut program);

        assert_eq!(reported(&sink), vec!["1:6: error: Non-function declared void"]);
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_void_and_duplicate_both_reported() {
        // int v; void v;
        let mut program = Program::new(vec![
            Decl::var(TypeNode::Int, Ident::new("v", at(1, 5))),
            Decl::var(TypeNode::Void, Ident::new("v", at(2, 6))),
        ]);
        let (_, sink) = resolve(&mut program);

        assert_eq!(
            reported(&sink),
            vec![
                "2:6: error: Non-function declared void",
                "2:6: error: Multiply declared identifier"
            ]
        );
    }

    fn point_struct() -> Decl {
        // struct Point { int x; bool y; };
        Decl::structure(
            Ident::new("Point", at(1, 8)),
            vec![
                VarDecl::new(TypeNode::Int, Ident::new("x", at(1, 20))),
                VarDecl::new(TypeNode::Bool, Ident::new("y", at(1, 28))),
            ],
        )
    }

    #[test]
    fn test_dot_access_binds_field() {
        // struct Point {...}; struct Point p; void main() { p.x = 1; }
        let mut program = Program::new(vec![
            point_struct(),
            Decl::var(TypeNode::structure("Point", at(2, 8)), Ident::new("p", at(2, 14))),
            main_with(
                vec![],
                vec![Stmt::assign(
                    Expr::dot(Expr::id("p", at(3, 5)), Ident::new("x", at(3, 7))),
                    Expr::int_lit(1, at(3, 11)),
                )],
            ),
        ]);
        let (symbols, sink) = resolve(&mut program);

        assert!(sink.is_empty());
        let ExprKind::Assign { lhs, .. } = &first_stmt_expr(&program, 2).kind else {
            panic!("not an assignment");
        };
        let field = binding(lhs).unwrap();
        assert_eq!(symbols.get(field).unwrap().name, "x");
        assert_eq!(symbols.type_of(field).unwrap(), Type::Int);

        let Decl::Var(var) = &program.decls[1] else {
            panic!("not a variable");
        };
        let TypeNode::Struct(type_id) = &var.ty else {
            panic!("not a struct type");
        };
        let Decl::Struct(def) = &program.decls[0] else {
            panic!("not a struct");
        };
        assert_eq!(type_id.symbol.copied(), def.id.symbol.copied());
    }

    #[test]
    fn test_dot_access_errors() {
        // int a; struct Point p; void main() { a.x = 1; p.z = 1; }
        let mut program = Program::new(vec![
            point_struct(),
            Decl::var(TypeNode::Int, Ident::new("a", at(2, 5))),
            Decl::var(TypeNode::structure("Point", at(3, 8)), Ident::new("p", at(3, 14))),
            main_with(
                vec![],
                vec![
                    Stmt::assign(
                        Expr::dot(Expr::id("a", at(4, 5)), Ident::new("x", at(4, 7))),
                        Expr::int_lit(1, at(4, 11)),
                    ),
                    Stmt::assign(
                        Expr::dot(Expr::id("p", at(5, 5)), Ident::new("z", at(5, 7))),
                        Expr::int_lit(1, at(5, 11)),
                    ),
                ],
            ),
        ]);
        let (_, sink) = resolve(&mut program);

        assert_eq!(
            reported(&sink),
            vec![
                "4:7: error: Dot-access of non-struct type",
                "5:7: error: Invalid struct field name"
            ]
        );
    }

    #[test]
    fn test_failed_dot_access_does_not_cascade() {
        // void main() { q.a.b = 1; }  with q undeclared
        let inner = Expr::dot(Expr::id("q", at(2, 5)), Ident::new("a", at(2, 7)));
        let outer = Expr::dot(inner, Ident::new("b", at(2, 9)));
        let mut program = Program::new(vec![main_with(
            vec![],
            vec![Stmt::assign(outer, Expr::int_lit(1, at(2, 13)))],
        )]);
        let (_, sink) = resolve(&mut program);

        assert_eq!(reported(&sink), vec!["2:5: error: Undeclared identifier"]);
    }

    #[test]
    fn test_nested_struct_access() {
        // struct Point {...}; struct Line { struct Point a; }; struct Line l;
        // void main() { l.a.y = true; }
        let mut program = Program::new(vec![
            point_struct(),
            Decl::structure(
                Ident::new("Line", at(2, 8)),
                vec![VarDecl::new(
                    TypeNode::structure("Point", at(2, 22)),
                    Ident::new("a", at(2, 28)),
                )],
            ),
            Decl::var(TypeNode::structure("Line", at(3, 8)), Ident::new("l", at(3, 13))),
            main_with(
                vec![],
                vec![Stmt::assign(
                    Expr::dot(
                        Expr::dot(Expr::id("l", at(4, 5)), Ident::new("a", at(4, 7))),
                        Ident::new("y", at(4, 9)),
                    ),
                    Expr::true_lit(at(4, 13)),
                )],
            ),
        ]);
        let (symbols, sink) = resolve(&mut program);

        assert!(sink.is_empty());
        let ExprKind::Assign { lhs, .. } = &first_stmt_expr(&program, 3).kind else {
            panic!("not an assignment");
        };
        assert_eq!(symbols.type_of(binding(lhs).unwrap()).unwrap(), Type::Bool);
    }

    #[test]
    fn test_invalid_struct_type_name() {
        // int Point; struct Point p; struct Nope q;
        let mut program = Program::new(vec![
            Decl::var(TypeNode::Int, Ident::new("Point", at(1, 5))),
            Decl::var(TypeNode::structure("Point", at(2, 8)), Ident::new("p", at(2, 14))),
            Decl::var(TypeNode::structure("Nope", at(3, 8)), Ident::new("q", at(3, 13))),
        ]);
        let (_, sink) = resolve(&mut program);

        assert_eq!(
            reported(&sink),
            vec![
                "2:8: error: Invalid name of struct type",
                "3:8: error: Invalid name of struct type"
            ]
        );
    }

    #[test]
    fn test_recursive_call_and_params() {
        // int fact(int n, bool b) { fact(n, b); }
        let mut program = Program::new(vec![Decl::func(
            TypeNode::Int,
            Ident::new("fact", at(1, 5)),
            vec![
                FormalDecl::new(TypeNode::Int, Ident::new("n", at(1, 14))),
                FormalDecl::new(TypeNode::Bool, Ident::new("b", at(1, 22))),
            ],
            Block::stmts(vec![Stmt::call(
                Ident::new("fact", at(2, 5)),
                vec![Expr::id("n", at(2, 10)), Expr::id("b", at(2, 13))],
            )]),
        )]);
        let (symbols, sink) = resolve(&mut program);

        assert!(sink.is_empty());
        let ExprKind::Call { callee, .. } = &first_stmt_expr(&program, 0).kind else {
            panic!("not a call");
        };
        let function = callee.symbol.copied().unwrap();
        assert_eq!(
            symbols.type_of(function).unwrap(),
            Type::function(vec![Type::Int, Type::Bool], Type::Int)
        );
    }

    #[test]
    fn test_formals_are_local_to_function() {
        // void f(int n) {} void main() { cout << n; }
        let mut program = Program::new(vec![
            Decl::func(
                TypeNode::Void,
                Ident::new("f", at(1, 6)),
                vec![FormalDecl::new(TypeNode::Int, Ident::new("n", at(1, 12)))],
                Block::default(),
            ),
            main_with(vec![], vec![Stmt::Write(Expr::id("n", at(2, 9)))]),
        ]);
        let (_, sink) = resolve(&mut program);

        assert_eq!(reported(&sink), vec!["2:9: error: Undeclared identifier"]);
    }

    #[test]
    fn test_void_formal_still_counts_as_param() {
        // void f(void v) {}
        let mut program = Program::new(vec![Decl::func(
            TypeNode::Void,
            Ident::new("f", at(1, 6)),
            vec![FormalDecl::new(TypeNode::Void, Ident::new("v", at(1, 13)))],
            Block::default(),
        )]);
        let (symbols, sink) = resolve(&mut program);

        assert_eq!(reported(&sink), vec!["1:13: error: Non-function declared void"]);
        let Decl::Fn(func) = &program.decls[0] else {
            panic!("not a function");
        };
        assert_eq!(
            symbols.type_of(func.id.symbol.copied().unwrap()).unwrap(),
            Type::function(vec![Type::Void], Type::Void)
        );
    }

    #[test]
    fn test_duplicate_struct_reported_once() {
        let mut program = Program::new(vec![point_struct(), point_struct()]);
        let (_, sink) = resolve(&mut program);

        assert_eq!(reported(&sink), vec!["1:8: error: Multiply declared identifier"]);
    }

    fn assigned(stmt: &Stmt) -> Option<crate::symbols::SymbolId> {
        match stmt {
            Stmt::Assign(Expr {
                kind: ExprKind::Assign { lhs, .. },
                ..
            }) => binding(lhs),
            _ => None,
        }
    }

    #[test]
    fn test_branch_locals_end_with_their_block() {
        // void main() {
        //     if (true) { int i; } else { bool i; }
        //     while (true) { int w; }
        //     cout << i;
        //     cout << w;
        // }
        let mut program = Program::new(vec![main_with(
            vec![],
            vec![
                Stmt::IfElse {
                    cond: Expr::true_lit(at(2, 9)),
                    then_body: Block::new(
                        vec![VarDecl::new(TypeNode::Int, Ident::new("i", at(2, 21)))],
                        Vec::new(),
                    ),
                    else_body: Block::new(
                        vec![VarDecl::new(TypeNode::Bool, Ident::new("i", at(2, 38)))],
                        Vec::new(),
                    ),
                },
                Stmt::While {
                    cond: Expr::true_lit(at(3, 12)),
                    body: Block::new(
                        vec![VarDecl::new(TypeNode::Int, Ident::new("w", at(3, 24)))],
                        Vec::new(),
                    ),
                },
                Stmt::Write(Expr::id("i", at(4, 13))),
                Stmt::Write(Expr::id("w", at(5, 13))),
            ],
        )]);
        let (_, sink) = resolve(&mut program);

        assert_eq!(
            reported(&sink),
            vec![
                "4:13: error: Undeclared identifier",
                "5:13: error: Undeclared identifier"
            ]
        );
    }

    #[test]
    fn test_each_branch_has_its_own_scope() {
        // if (true) { int i; i = 1; } else { bool i; i = true; }
        let mut program = Program::new(vec![main_with(
            vec![],
            vec![Stmt::IfElse {
                cond: Expr::true_lit(at(2, 9)),
                then_body: Block::new(
                    vec![VarDecl::new(TypeNode::Int, Ident::new("i", at(2, 21)))],
                    vec![Stmt::assign(Expr::id("i", at(2, 24)), Expr::int_lit(1, at(2, 28)))],
                ),
                else_body: Block::new(
                    vec![VarDecl::new(TypeNode::Bool, Ident::new("i", at(2, 45)))],
                    vec![Stmt::assign(Expr::id("i", at(2, 48)), Expr::true_lit(at(2, 52)))],
                ),
            }],
        )]);
        let (symbols, sink) = resolve(&mut program);

        assert!(sink.is_empty(), "{:?}", reported(&sink));
        let Decl::Fn(func) = &program.decls[0] else {
            panic!("not a function");
        };
        let Stmt::IfElse {
            then_body,
            else_body,
            ..
        } = &func.body.stmts[0]
        else {
            panic!("not an if-else");
        };
        let then_i = assigned(&then_body.stmts[0]).unwrap();
        let else_i = assigned(&else_body.stmts[0]).unwrap();
        assert_ne!(then_i, else_i);
        assert_eq!(symbols.type_of(then_i).unwrap(), Type::Int);
        assert_eq!(symbols.type_of(else_i).unwrap(), Type::Bool);
    }

    #[test]
    fn test_block_local_shadows_until_block_ends() {
        // void main() { int x; if (true) { bool x; x = true; } x = 1; }
        let mut program = Program::new(vec![main_with(
            vec![VarDecl::new(TypeNode::Int, Ident::new("x", at(1, 19)))],
            vec![
                Stmt::If {
                    cond: Expr::true_lit(at(2, 9)),
                    body: Block::new(
                        vec![VarDecl::new(TypeNode::Bool, Ident::new("x", at(2, 22)))],
                        vec![Stmt::assign(Expr::id("x", at(2, 25)), Expr::true_lit(at(2, 29)))],
                    ),
                },
                Stmt::assign(Expr::id("x", at(3, 5)), Expr::int_lit(1, at(3, 9))),
            ],
        )]);
        let (symbols, sink) = resolve(&mut program);

        assert!(sink.is_empty(), "{:?}", reported(&sink));
        let Decl::Fn(func) = &program.decls[0] else {
            panic!("not a function");
        };
        let outer = func.body.decls[0].id.symbol.copied().unwrap();
        let Stmt::If { body, .. } = &func.body.stmts[0] else {
            panic!("not an if");
        };
        let inner = assigned(&body.stmts[0]).unwrap();

        assert_ne!(inner, outer);
        assert_eq!(symbols.type_of(inner).unwrap(), Type::Bool);
        assert_eq!(assigned(&func.body.stmts[1]), Some(outer));
    }
}
