//! AST builder
//!
//! Allocates symbol ids and assembles resolved AST nodes without going
//! through the frontend. Used by tests, benchmarks and tooling that feed
//! hand-built programs into IR generation.

use crate::features::ast::domain::{
    BinaryExpr, Block, Expr, ExpressionStatement, FunctionDecl, IfStatement, Literal, Program,
    ReturnStatement, Statement, UnaryExpr, VariableDecl, VariableRef, WhileStatement,
};
use crate::shared::models::{
    ConstValue, FunctionSymbol, Op, Span, StaticType, SymbolId, VarSymbol,
};

/// Name given to the function that wraps top-level statements
pub const MAIN_FUNCTION: &str = "main";

#[derive(Debug, Default)]
pub struct AstBuilder {
    next_id: u32,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> SymbolId {
        let id = SymbolId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fresh variable symbol
    pub fn var(&mut self, name: &str, ty: StaticType) -> VarSymbol {
        let id = self.fresh_id();
        VarSymbol::new(id, name, ty)
    }

    /// Function declaration; `params` become the leading symbol vars and the
    /// locals declared in `body` follow them.
    pub fn function(
        &mut self,
        name: &str,
        params: Vec<VarSymbol>,
        body: Vec<Statement>,
    ) -> FunctionDecl {
        let mut sym = FunctionSymbol::new(self.fresh_id(), name);
        sym.num_params = params.len();
        sym.vars = params.clone();
        let body = Block::new(body);
        collect_locals(&body.stmts, &mut sym.vars);

        FunctionDecl {
            sym,
            params: params
                .into_iter()
                .map(|p| VariableDecl {
                    sym: p,
                    init: None,
                    span: Span::zero(),
                })
                .collect(),
            body,
            span: Span::zero(),
        }
    }

    /// Program whose top-level statements form the `main` function
    pub fn program(&mut self, body: Vec<Statement>) -> Program {
        let mut sym = FunctionSymbol::new(self.fresh_id(), MAIN_FUNCTION);
        let body = Block::new(body);
        collect_locals(&body.stmts, &mut sym.vars);
        Program { sym, body }
    }

    // ----- statements -----

    pub fn declare(sym: &VarSymbol, init: Option<Expr>) -> Statement {
        Statement::VariableDecl(VariableDecl {
            sym: sym.clone(),
            init,
            span: Span::zero(),
        })
    }

    pub fn assign(sym: &VarSymbol, value: Expr) -> Statement {
        let ty = sym.ty;
        Statement::Expression(ExpressionStatement {
            expr: Expr::Binary(BinaryExpr {
                op: Op::Assign,
                left: Box::new(Expr::Variable(VariableRef {
                    sym: sym.clone(),
                    ty,
                    is_left_value: true,
                    span: Span::zero(),
                })),
                right: Box::new(value),
                ty,
                span: Span::zero(),
            }),
            span: Span::zero(),
        })
    }

    pub fn expr_stmt(expr: Expr) -> Statement {
        Statement::Expression(ExpressionStatement {
            expr,
            span: Span::zero(),
        })
    }

    pub fn if_else(
        condition: Expr,
        then_branch: Vec<Statement>,
        else_branch: Option<Vec<Statement>>,
    ) -> Statement {
        Statement::If(IfStatement {
            condition,
            then_branch: Box::new(Statement::Block(Block::new(then_branch))),
            else_branch: else_branch.map(|stmts| Box::new(Statement::Block(Block::new(stmts)))),
            span: Span::zero(),
        })
    }

    pub fn while_loop(condition: Expr, body: Vec<Statement>) -> Statement {
        Statement::While(WhileStatement {
            condition,
            body: Box::new(Statement::Block(Block::new(body))),
            span: Span::zero(),
        })
    }

    pub fn ret(value: Option<Expr>) -> Statement {
        Statement::Return(ReturnStatement {
            value,
            span: Span::zero(),
        })
    }

    pub fn block(stmts: Vec<Statement>) -> Statement {
        Statement::Block(Block::new(stmts))
    }

    // ----- expressions -----

    pub fn literal(value: ConstValue) -> Expr {
        let ty = value.natural_type();
        Expr::Literal(Literal {
            value,
            ty,
            span: Span::zero(),
        })
    }

    pub fn int(value: i64) -> Expr {
        Self::literal(ConstValue::Integer(value))
    }

    pub fn boolean(value: bool) -> Expr {
        Self::literal(ConstValue::Boolean(value))
    }

    pub fn string(value: &str) -> Expr {
        Self::literal(ConstValue::String(value.to_string()))
    }

    pub fn read(sym: &VarSymbol) -> Expr {
        Self::read_at(sym, Span::zero())
    }

    pub fn read_at(sym: &VarSymbol, span: Span) -> Expr {
        Expr::Variable(VariableRef {
            sym: sym.clone(),
            ty: sym.ty,
            is_left_value: false,
            span,
        })
    }

    /// Binary expression; comparisons and logical operators are boolean,
    /// everything else takes the left operand's type.
    pub fn binary(op: Op, left: Expr, right: Expr) -> Expr {
        let ty = if op.is_comparison() || matches!(op, Op::And | Op::Or) {
            StaticType::Boolean
        } else {
            left.ty()
        };
        Expr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
            span: Span::zero(),
        })
    }

    pub fn unary(op: Op, operand: Expr, is_prefix: bool) -> Expr {
        let ty = if op == Op::Not {
            StaticType::Boolean
        } else {
            operand.ty()
        };
        Expr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            is_prefix,
            ty,
            span: Span::zero(),
        })
    }
}

/// Local variable declarations of a body, not descending into nested functions
fn collect_locals(stmts: &[Statement], vars: &mut Vec<VarSymbol>) {
    for stmt in stmts {
        match stmt {
            Statement::VariableDecl(decl) => {
                if !vars.iter().any(|v| v.id == decl.sym.id) {
                    vars.push(decl.sym.clone());
                }
            }
            Statement::Block(block) => collect_locals(&block.stmts, vars),
            Statement::If(if_stmt) => {
                collect_locals(std::slice::from_ref(if_stmt.then_branch.as_ref()), vars);
                if let Some(else_branch) = &if_stmt.else_branch {
                    collect_locals(std::slice::from_ref(else_branch.as_ref()), vars);
                }
            }
            Statement::While(while_stmt) => {
                collect_locals(std::slice::from_ref(while_stmt.body.as_ref()), vars)
            }
            Statement::Return(_) | Statement::Expression(_) | Statement::FunctionDecl(_) => {}
        }
    }
}
