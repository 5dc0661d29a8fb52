//! Typed, symbol-resolved AST
//!
//! Produced by the frontend (scanner, parser, resolver, type checker) and
//! consumed read-only by IR generation. Every variable reference already
//! carries its resolved symbol and static type.

use serde::{Deserialize, Serialize};

use crate::shared::models::{ConstValue, FunctionSymbol, Op, Span, StaticType, VarSymbol};

/// Whole program: top-level statements run as the body of `sym`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub sym: FunctionSymbol,
    pub body: Block,
}

impl Program {
    /// Function declarations directly in the program body
    pub fn top_level_functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.body.stmts.iter().filter_map(|stmt| match stmt {
            Statement::FunctionDecl(decl) => Some(decl),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub sym: FunctionSymbol,
    /// Formal parameter declarations, in order
    pub params: Vec<VariableDecl>,
    pub body: Block,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Statement>,
    #[serde(default)]
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Statement>) -> Self {
        Self {
            stmts,
            span: Span::zero(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Statement {
    Block(Block),
    If(IfStatement),
    While(WhileStatement),
    Return(ReturnStatement),
    VariableDecl(VariableDecl),
    Expression(ExpressionStatement),
    FunctionDecl(FunctionDecl),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Block(s) => s.span,
            Statement::If(s) => s.span,
            Statement::While(s) => s.span,
            Statement::Return(s) => s.span,
            Statement::VariableDecl(s) => s.span,
            Statement::Expression(s) => s.span,
            Statement::FunctionDecl(s) => s.span,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_branch: Box<Statement>,
    #[serde(default)]
    pub else_branch: Option<Box<Statement>>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Expr,
    pub body: Box<Statement>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnStatement {
    #[serde(default)]
    pub value: Option<Expr>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDecl {
    pub sym: VarSymbol,
    #[serde(default)]
    pub init: Option<Expr>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expr: Expr,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Literal(Literal),
    Variable(VariableRef),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Binary(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Literal(e) => e.span,
            Expr::Variable(e) => e.span,
        }
    }

    pub fn ty(&self) -> StaticType {
        match self {
            Expr::Binary(e) => e.ty,
            Expr::Unary(e) => e.ty,
            Expr::Literal(e) => e.ty,
            Expr::Variable(e) => e.ty,
        }
    }
}

/// Binary expression; assignment is `op == Op::Assign` with a left-value
/// variable reference as `left`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub op: Op,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub ty: StaticType,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: Op,
    pub operand: Box<Expr>,
    pub is_prefix: bool,
    pub ty: StaticType,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Literal {
    pub value: ConstValue,
    pub ty: StaticType,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableRef {
    pub sym: VarSymbol,
    pub ty: StaticType,
    /// Assignment target: generation yields the symbol, not a value
    #[serde(default)]
    pub is_left_value: bool,
    #[serde(default)]
    pub span: Span,
}
