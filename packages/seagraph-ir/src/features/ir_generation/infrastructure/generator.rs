//! AST → sea-of-nodes IR generator
//!
//! Walks a resolved AST with `AstVisitor`, threading a control cursor
//! through statements. Each function gets its own `GenerationContext` and
//! Graph; finished graphs are collected in an `IRModule`.
//!
//! Control shapes:
//! ```text
//! if:     cursor → If(cond) ─┬→ Begin → body → End ─┐
//!                            └→ Begin → body → End ─┴→ Merge
//! while:  cursor → End → LoopBegin → If(cond) ─┬→ Begin → body → LoopEnd ⟲
//!                                              └→ Begin → LoopExit → Merge
//! ```
//! The If and both Begins exist and are linked before any branch body is
//! visited, so reads inside a branch resolve through the enclosing flow.

use std::collections::BTreeSet;

use tracing::{debug, info};

use super::errors::{GenerationError, GenerationResult};
use super::ssa_resolver::{read_variable, seal_loop, write_variable};
use crate::config::GeneratorConfig;
use crate::features::ast::{
    AstVisitor, BinaryExpr, Block, Expr, ExpressionStatement, FunctionDecl, IfStatement, Literal,
    Program, ReturnStatement, Statement, UnaryExpr, VariableDecl, VariableRef, WhileStatement,
};
use crate::features::ir_generation::domain::{ExprValue, FlowStep, GenerationContext};
use crate::features::ir_generation::ports::ModuleGenerator;
use crate::features::ir_graph::{ControlKind, DataKind, FunctionGraph, IRModule, NodeId};
use crate::shared::models::{FunctionSymbol, Op, SymbolId};

#[derive(Debug, Default)]
pub struct IRGenerator {
    config: GeneratorConfig,
    module: IRModule,
    /// Functions already generated on the worker pool
    pregenerated: BTreeSet<SymbolId>,
}

impl IRGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            module: IRModule::new(),
            pregenerated: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the whole program; top-level statements form `program.sym`
    pub fn generate_program(&mut self, program: &Program) -> GenerationResult<IRModule> {
        info!(
            program = %program.sym.name,
            config = %self.config.describe(),
            "generating IR"
        );

        if self.config.parallel_functions {
            self.pregenerate_functions(program)?;
        }
        self.build_function(&program.sym, &[], &program.body)?;

        self.pregenerated.clear();
        let module = std::mem::take(&mut self.module);
        info!(functions = module.len(), "IR module ready");
        Ok(module)
    }

    /// Generate one function (and the functions nested in it)
    pub fn generate_function(&mut self, decl: &FunctionDecl) -> GenerationResult<NodeId> {
        self.build_function(&decl.sym, &decl.params, &decl.body)
    }

    pub fn into_module(self) -> IRModule {
        self.module
    }

    /// Top-level functions on the rayon pool, one generator per function.
    /// Merged in declaration order so errors surface as they would
    /// sequentially.
    #[cfg(feature = "parallel")]
    fn pregenerate_functions(&mut self, program: &Program) -> GenerationResult<()> {
        use rayon::prelude::*;

        let decls: Vec<&FunctionDecl> = program.top_level_functions().collect();
        debug!(functions = decls.len(), "generating top-level functions in parallel");

        let config = self.config.clone();
        let results: Vec<GenerationResult<IRModule>> = decls
            .par_iter()
            .map(|decl| {
                let mut worker = IRGenerator::new(config.clone());
                worker.generate_function(decl)?;
                Ok(worker.into_module())
            })
            .collect();

        for (decl, result) in decls.iter().zip(results) {
            self.module
                .absorb(result?)
                .map_err(|rejected| GenerationError::DuplicateFunction {
                    name: rejected.name,
                })?;
            self.pregenerated.insert(decl.sym.id);
        }
        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    fn pregenerate_functions(&mut self, _program: &Program) -> GenerationResult<()> {
        Ok(())
    }

    /// Start → params → body, then the Function node wrapping Start
    fn build_function(
        &mut self,
        sym: &FunctionSymbol,
        params: &[VariableDecl],
        body: &Block,
    ) -> GenerationResult<NodeId> {
        let mut ctx = GenerationContext::new(sym.clone(), self.config.clone());
        let start = ctx.graph.insert_control(ControlKind::start())?;
        ctx.cursor = start;

        for param in params {
            self.visit_variable_decl(param, &mut ctx)?;
        }
        self.visit_block(body, &mut ctx)?;

        if ctx.has_unsealed_loops() {
            return Err(GenerationError::invariant(format!(
                "every loop in '{}' is sealed",
                sym.name
            )));
        }

        let param_nodes = sym
            .params()
            .iter()
            .map(|p| {
                ctx.graph.lookup_parameter(&p.name).ok_or_else(|| {
                    GenerationError::invariant(format!(
                        "parameter '{}' of '{}' has a Parameter node",
                        p.name, sym.name
                    ))
                })
            })
            .collect::<GenerationResult<Vec<_>>>()?;

        let function = ctx.graph.insert_control(ControlKind::Function {
            name: sym.name.clone(),
            params: param_nodes,
            next: Some(start),
        })?;

        let stats = ctx.graph.stats();
        info!(
            function = %sym.name,
            nodes = stats.nodes,
            data = stats.data_nodes,
            control = stats.control_nodes,
            phis = stats.phi_nodes,
            proxies = stats.var_proxies,
            "function generated"
        );

        self.module
            .insert(FunctionGraph {
                sym: sym.id,
                name: sym.name.clone(),
                graph: ctx.graph,
            })
            .map_err(|rejected| GenerationError::DuplicateFunction {
                name: rejected.name,
            })?;
        Ok(function)
    }

    /// Run `f` one nesting level deeper
    fn nested<T>(
        &mut self,
        ctx: &mut GenerationContext,
        f: impl FnOnce(&mut Self, &mut GenerationContext) -> GenerationResult<T>,
    ) -> GenerationResult<T> {
        let depth = ctx.enter();
        let limit = ctx.config.max_nesting_depth;
        if depth > limit {
            ctx.leave();
            return Err(GenerationError::NestingTooDeep { depth, limit });
        }
        let result = f(self, ctx);
        ctx.leave();
        result
    }

    /// Expression that must produce a data node
    fn value(&mut self, expr: &Expr, ctx: &mut GenerationContext) -> GenerationResult<NodeId> {
        match self.visit_expression(expr, ctx)? {
            ExprValue::Value(node) => Ok(node),
            ExprValue::Place(var) => Err(GenerationError::invariant(format!(
                "'{}' is read as a value, not as an assignment target",
                var.name
            ))),
        }
    }

    /// Close the flow a branch body left at the cursor with a `closing`
    /// terminal. `None` when the body already ended the flow.
    fn close_flow(
        &mut self,
        step: FlowStep,
        ctx: &mut GenerationContext,
        closing: ControlKind,
    ) -> GenerationResult<Option<NodeId>> {
        match step {
            FlowStep::Terminal(_) => Ok(None),
            FlowStep::Scope(head) => {
                ctx.cursor = head;
                self.close_flow(FlowStep::Continue, ctx, closing)
            }
            FlowStep::Continue => {
                let end = ctx.graph.insert_control(closing)?;
                ctx.splice(end)?;
                Ok(Some(end))
            }
        }
    }
}

impl ModuleGenerator for IRGenerator {
    fn generate(&self, program: &Program) -> GenerationResult<IRModule> {
        IRGenerator::new(self.config.clone()).generate_program(program)
    }
}

impl AstVisitor for IRGenerator {
    type Context = GenerationContext;
    type StmtOutput = FlowStep;
    type ExprOutput = ExprValue;
    type Error = GenerationError;

    fn visit_block(
        &mut self,
        block: &Block,
        ctx: &mut GenerationContext,
    ) -> GenerationResult<FlowStep> {
        self.nested(ctx, |this, ctx| {
            let entry = ctx.cursor;
            for (pos, stmt) in block.stmts.iter().enumerate() {
                match this.visit_statement(stmt, ctx)? {
                    FlowStep::Continue => {}
                    FlowStep::Scope(head) => ctx.cursor = head,
                    FlowStep::Terminal(node) => {
                        let skipped = block.stmts.len() - pos - 1;
                        if skipped > 0 {
                            debug!(
                                after = %node,
                                skipped,
                                line = block.stmts[pos + 1].span().start_line,
                                "unreachable statements skipped"
                            );
                        }
                        return Ok(FlowStep::Terminal(node));
                    }
                }
            }
            if ctx.cursor == entry {
                Ok(FlowStep::Continue)
            } else {
                Ok(FlowStep::Scope(ctx.cursor))
            }
        })
    }

    fn visit_if(
        &mut self,
        if_stmt: &IfStatement,
        ctx: &mut GenerationContext,
    ) -> GenerationResult<FlowStep> {
        self.nested(ctx, |this, ctx| {
            let condition = this.value(&if_stmt.condition, ctx)?;
            let true_begin = ctx.graph.insert_control(ControlKind::begin())?;
            let false_begin = ctx.graph.insert_control(ControlKind::begin())?;
            let branch = ctx.graph.insert_control(ControlKind::If {
                condition,
                true_branch: true_begin,
                false_branch: Some(false_begin),
            })?;
            ctx.splice(branch)?;

            let arms = [
                (true_begin, Some(if_stmt.then_branch.as_ref())),
                (false_begin, if_stmt.else_branch.as_deref()),
            ];
            let mut ends = Vec::with_capacity(arms.len());
            for (begin, body) in arms {
                ctx.cursor = begin;
                let step = match body {
                    Some(stmt) => this.visit_statement(stmt, ctx)?,
                    None => FlowStep::Continue,
                };
                if let Some(end) = this.close_flow(step, ctx, ControlKind::End)? {
                    ends.push(end);
                }
            }

            if ends.is_empty() {
                debug!(branch = %branch, "both branches return");
                return Ok(FlowStep::Terminal(branch));
            }
            let merge = ctx.graph.insert_control(ControlKind::merge(ends))?;
            Ok(FlowStep::Scope(merge))
        })
    }

    fn visit_while(
        &mut self,
        while_stmt: &WhileStatement,
        ctx: &mut GenerationContext,
    ) -> GenerationResult<FlowStep> {
        self.nested(ctx, |this, ctx| {
            let entry = ctx.graph.insert_control(ControlKind::End)?;
            ctx.splice(entry)?;
            let header = ctx.graph.insert_control(ControlKind::loop_begin(vec![entry]))?;
            ctx.open_loop(header);
            ctx.cursor = header;

            let condition = this.value(&while_stmt.condition, ctx)?;
            let body_begin = ctx.graph.insert_control(ControlKind::begin())?;
            let exit_begin = ctx.graph.insert_control(ControlKind::begin())?;
            let branch = ctx.graph.insert_control(ControlKind::If {
                condition,
                true_branch: body_begin,
                false_branch: Some(exit_begin),
            })?;
            ctx.splice(branch)?;

            ctx.cursor = body_begin;
            let step = this.visit_statement(&while_stmt.body, ctx)?;
            let back_edge = ControlKind::LoopEnd { loop_begin: header };
            if let Some(back) = this.close_flow(step, ctx, back_edge)? {
                ctx.graph.add_merge_end(header, back)?;
            }
            seal_loop(ctx, header)?;

            ctx.cursor = exit_begin;
            let exit = ctx
                .graph
                .insert_control(ControlKind::LoopExit { loop_begin: header })?;
            ctx.splice(exit)?;
            let merge = ctx.graph.insert_control(ControlKind::merge(vec![exit]))?;
            Ok(FlowStep::Scope(merge))
        })
    }

    fn visit_return(
        &mut self,
        ret: &ReturnStatement,
        ctx: &mut GenerationContext,
    ) -> GenerationResult<FlowStep> {
        let value = match &ret.value {
            Some(expr) => Some(self.value(expr, ctx)?),
            None => None,
        };
        let node = ctx.graph.insert_control(ControlKind::Return { value })?;
        ctx.splice(node)?;
        Ok(FlowStep::Terminal(node))
    }

    fn visit_variable_decl(
        &mut self,
        decl: &VariableDecl,
        ctx: &mut GenerationContext,
    ) -> GenerationResult<FlowStep> {
        if ctx.function.is_parameter(&decl.sym) {
            ctx.graph.insert_data(
                decl.sym.ty,
                DataKind::Parameter {
                    name: decl.sym.name.clone(),
                },
            )?;
            return Ok(FlowStep::Continue);
        }

        if let Some(init) = &decl.init {
            let value = self.value(init, ctx)?;
            write_variable(ctx, &decl.sym, value)?;
        }
        Ok(FlowStep::Continue)
    }

    fn visit_expression_statement(
        &mut self,
        expr_stmt: &ExpressionStatement,
        ctx: &mut GenerationContext,
    ) -> GenerationResult<FlowStep> {
        self.visit_expression(&expr_stmt.expr, ctx)?;
        Ok(FlowStep::Continue)
    }

    fn visit_function_decl(
        &mut self,
        decl: &FunctionDecl,
        _ctx: &mut GenerationContext,
    ) -> GenerationResult<FlowStep> {
        if self.pregenerated.contains(&decl.sym.id) {
            debug!(function = %decl.sym.name, "already generated");
        } else {
            self.generate_function(decl)?;
        }
        Ok(FlowStep::Continue)
    }

    fn visit_binary(
        &mut self,
        binary: &BinaryExpr,
        ctx: &mut GenerationContext,
    ) -> GenerationResult<ExprValue> {
        self.nested(ctx, |this, ctx| {
            if binary.op == Op::Assign {
                let target = match this.visit_expression(&binary.left, ctx)? {
                    ExprValue::Place(var) => var,
                    ExprValue::Value(_) => {
                        return Err(GenerationError::invariant(
                            "left side of an assignment is a variable reference",
                        ))
                    }
                };
                let value = this.value(&binary.right, ctx)?;
                write_variable(ctx, &target, value)?;
                return Ok(ExprValue::Value(value));
            }

            let left = this.value(&binary.left, ctx)?;
            let right = this.value(&binary.right, ctx)?;
            let node = ctx.graph.insert_data(
                binary.ty,
                DataKind::BinaryOp {
                    op: binary.op,
                    left,
                    right,
                },
            )?;
            Ok(ExprValue::Value(node))
        })
    }

    fn visit_unary(
        &mut self,
        unary: &UnaryExpr,
        ctx: &mut GenerationContext,
    ) -> GenerationResult<ExprValue> {
        self.nested(ctx, |this, ctx| {
            let operand = this.value(&unary.operand, ctx)?;
            let node = ctx.graph.insert_data(
                unary.ty,
                DataKind::UnaryOp {
                    op: unary.op,
                    operand,
                    is_prefix: unary.is_prefix,
                },
            )?;

            // ++/-- on a variable defines its next version
            if let (Op::Inc | Op::Dec, Expr::Variable(var)) = (unary.op, unary.operand.as_ref()) {
                write_variable(ctx, &var.sym, node)?;
                if !unary.is_prefix {
                    return Ok(ExprValue::Value(operand));
                }
            }
            Ok(ExprValue::Value(node))
        })
    }

    fn visit_literal(
        &mut self,
        literal: &Literal,
        ctx: &mut GenerationContext,
    ) -> GenerationResult<ExprValue> {
        let node = ctx.graph.insert_data(
            literal.ty,
            DataKind::Constant {
                value: literal.value.clone(),
            },
        )?;
        Ok(ExprValue::Value(node))
    }

    fn visit_variable(
        &mut self,
        var: &VariableRef,
        ctx: &mut GenerationContext,
    ) -> GenerationResult<ExprValue> {
        if var.is_left_value {
            return Ok(ExprValue::Place(var.sym.clone()));
        }
        read_variable(ctx, &var.sym, var.span).map(ExprValue::Value)
    }
}
