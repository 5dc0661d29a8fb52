//! AST visitor port
//!
//! Dispatch contract: `visit_statement` / `visit_expression` look at the node
//! kind and call the matching handler, threading the context through.
//! Implementors only write the per-kind handlers.

use crate::features::ast::domain::{
    BinaryExpr, Block, Expr, ExpressionStatement, FunctionDecl, IfStatement, Literal,
    ReturnStatement, Statement, UnaryExpr, VariableDecl, VariableRef, WhileStatement,
};

pub trait AstVisitor {
    type Context;
    type StmtOutput;
    type ExprOutput;
    type Error;

    fn visit_statement(
        &mut self,
        stmt: &Statement,
        ctx: &mut Self::Context,
    ) -> Result<Self::StmtOutput, Self::Error> {
        match stmt {
            Statement::Block(block) => self.visit_block(block, ctx),
            Statement::If(if_stmt) => self.visit_if(if_stmt, ctx),
            Statement::While(while_stmt) => self.visit_while(while_stmt, ctx),
            Statement::Return(ret) => self.visit_return(ret, ctx),
            Statement::VariableDecl(decl) => self.visit_variable_decl(decl, ctx),
            Statement::Expression(expr_stmt) => self.visit_expression_statement(expr_stmt, ctx),
            Statement::FunctionDecl(decl) => self.visit_function_decl(decl, ctx),
        }
    }

    fn visit_expression(
        &mut self,
        expr: &Expr,
        ctx: &mut Self::Context,
    ) -> Result<Self::ExprOutput, Self::Error> {
        match expr {
            Expr::Binary(binary) => self.visit_binary(binary, ctx),
            Expr::Unary(unary) => self.visit_unary(unary, ctx),
            Expr::Literal(literal) => self.visit_literal(literal, ctx),
            Expr::Variable(var) => self.visit_variable(var, ctx),
        }
    }

    fn visit_block(
        &mut self,
        block: &Block,
        ctx: &mut Self::Context,
    ) -> Result<Self::StmtOutput, Self::Error>;

    fn visit_if(
        &mut self,
        if_stmt: &IfStatement,
        ctx: &mut Self::Context,
    ) -> Result<Self::StmtOutput, Self::Error>;

    fn visit_while(
        &mut self,
        while_stmt: &WhileStatement,
        ctx: &mut Self::Context,
    ) -> Result<Self::StmtOutput, Self::Error>;

    fn visit_return(
        &mut self,
        ret: &ReturnStatement,
        ctx: &mut Self::Context,
    ) -> Result<Self::StmtOutput, Self::Error>;

    fn visit_variable_decl(
        &mut self,
        decl: &VariableDecl,
        ctx: &mut Self::Context,
    ) -> Result<Self::StmtOutput, Self::Error>;

    fn visit_expression_statement(
        &mut self,
        expr_stmt: &ExpressionStatement,
        ctx: &mut Self::Context,
    ) -> Result<Self::StmtOutput, Self::Error>;

    fn visit_function_decl(
        &mut self,
        decl: &FunctionDecl,
        ctx: &mut Self::Context,
    ) -> Result<Self::StmtOutput, Self::Error>;

    fn visit_binary(
        &mut self,
        binary: &BinaryExpr,
        ctx: &mut Self::Context,
    ) -> Result<Self::ExprOutput, Self::Error>;

    fn visit_unary(
        &mut self,
        unary: &UnaryExpr,
        ctx: &mut Self::Context,
    ) -> Result<Self::ExprOutput, Self::Error>;

    fn visit_literal(
        &mut self,
        literal: &Literal,
        ctx: &mut Self::Context,
    ) -> Result<Self::ExprOutput, Self::Error>;

    fn visit_variable(
        &mut self,
        var: &VariableRef,
        ctx: &mut Self::Context,
    ) -> Result<Self::ExprOutput, Self::Error>;
}
