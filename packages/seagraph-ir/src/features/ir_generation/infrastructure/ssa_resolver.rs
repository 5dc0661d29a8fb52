//! On-the-fly SSA variable resolution
//!
//! Variable reads are resolved against the per-flow binding tables kept in
//! the Graph, inserting phis lazily at control-flow joins. No dominance
//! information is computed.
//!
//! ```text
//! read(var, flow):
//!     if var bound in flow:            return binding
//!     if flow is LoopBegin:            phi = new phi; bind; operands now (sealed) or at seal time
//!     if flow is Merge with one edge:  return read(var, flow of that edge)
//!     if flow is Merge:                phi(read(var, flow of e) for e in edges); bind; return phi
//!     if flow has a predecessor:       return read(var, enclosing flow of predecessor)
//!     otherwise:                       unresolved
//! ```
//!
//! The recursion above runs on an explicit task stack, so resolution depth
//! does not grow with the number of joins between a read and its definition.
//! Tasks are popped depth-first in edge order, which keeps node numbering
//! identical to the recursive formulation.
//!
//! Binding the loop phi before its operands are resolved is what terminates
//! the walk around back edges.

use tracing::debug;

use super::errors::{GenerationError, GenerationResult};
use crate::features::ir_generation::domain::{GenerationContext, PendingPhi};
use crate::features::ir_graph::{ControlKind, DataKind, NodeId, VarProxy};
use crate::shared::models::{Span, VarSymbol};

/// Pending unit of resolution work
#[derive(Debug, Clone, Copy)]
enum Task {
    /// Push the value of the variable visible in this flow
    Resolve(NodeId),
    /// Pop one value per merge edge and join them
    Join { merge: NodeId, arity: usize },
    /// Pop one value per loop edge and give them to an incomplete phi
    FillLoopPhi { phi: NodeId, arity: usize },
}

/// Value of `var` visible at the cursor
pub fn read_variable(
    ctx: &mut GenerationContext,
    var: &VarSymbol,
    span: Span,
) -> GenerationResult<NodeId> {
    if ctx.function.is_parameter(var) {
        return ctx.graph.lookup_parameter(&var.name).ok_or_else(|| {
            GenerationError::invariant(format!(
                "parameter '{}' has a Parameter node before it is read",
                var.name
            ))
        });
    }

    let head = ctx.graph.scope_head(ctx.cursor)?;
    run(ctx, var, span, vec![Task::Resolve(head)])
}

/// New version of `var`, visible in the flow enclosing the cursor
pub fn write_variable(
    ctx: &mut GenerationContext,
    var: &VarSymbol,
    value: NodeId,
) -> GenerationResult<VarProxy> {
    if ctx.function.is_parameter(var) {
        return Err(GenerationError::invariant(format!(
            "parameter '{}' is never reassigned",
            var.name
        )));
    }
    let head = ctx.graph.scope_head(ctx.cursor)?;
    bind(ctx, head, var, value)
}

/// Give every phi created while `loop_begin` was unsealed one operand per
/// incoming edge. Called once the back edge has been added.
pub fn seal_loop(ctx: &mut GenerationContext, loop_begin: NodeId) -> GenerationResult<()> {
    let pending = ctx.close_loop(loop_begin);
    let ends = ctx.graph.merge_ends(loop_begin)?.to_vec();
    debug!(
        loop_begin = %loop_begin,
        edges = ends.len(),
        pending = pending.len(),
        "sealing loop"
    );

    for PendingPhi { var, phi, span } in pending {
        let mut tasks = Vec::new();
        schedule_edges(
            ctx,
            &mut tasks,
            Task::FillLoopPhi {
                phi,
                arity: ends.len(),
            },
            &ends,
        )?;
        run(ctx, &var, span, tasks)?;
    }
    Ok(())
}

/// Drain `tasks`, returning the single value left on the value stack
fn run(
    ctx: &mut GenerationContext,
    var: &VarSymbol,
    span: Span,
    mut tasks: Vec<Task>,
) -> GenerationResult<NodeId> {
    let mut values: Vec<NodeId> = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Resolve(head) => {
                if let Some(value) = walk(ctx, var, head, span, &mut tasks)? {
                    values.push(value);
                }
            }
            Task::Join { merge, arity } => {
                let inputs = take_operands(&mut values, arity)?;
                let value = join(ctx, var, merge, inputs)?;
                values.push(value);
            }
            Task::FillLoopPhi { phi, arity } => {
                let inputs = take_operands(&mut values, arity)?;
                ctx.graph.complete_phi(phi, inputs)?;
                debug!(var = %var.name, phi = %phi, "loop phi inserted");
                values.push(phi);
            }
        }
    }

    match values.as_slice() {
        [value] => Ok(*value),
        _ => Err(GenerationError::invariant(format!(
            "resolving '{}' leaves exactly one value, found {}",
            var.name,
            values.len()
        ))),
    }
}

/// Follow bindings, predecessors and single-edge merges out of `head`.
/// Returns the value when one is found directly; otherwise schedules the
/// tasks that will produce it.
fn walk(
    ctx: &mut GenerationContext,
    var: &VarSymbol,
    mut head: NodeId,
    span: Span,
    tasks: &mut Vec<Task>,
) -> GenerationResult<Option<NodeId>> {
    loop {
        if let Some(proxy) = ctx.graph.flow_binding(head, var.id) {
            let node = ctx.graph.proxy_node(proxy).ok_or_else(|| {
                GenerationError::invariant(format!("visible proxy {} is bound to a node", proxy))
            })?;
            return Ok(Some(node));
        }

        let (kind, predecessor) = {
            let control = ctx.graph.control(head)?;
            (control.kind.clone(), control.predecessor)
        };

        match kind {
            ControlKind::LoopBegin { ends, .. } => {
                return loop_phi(ctx, var, head, &ends, span, tasks);
            }
            ControlKind::Merge { ends, .. } => match ends.as_slice() {
                [] => {
                    return Err(GenerationError::invariant(format!(
                        "merge {} has at least one incoming edge",
                        head
                    )))
                }
                [only] => head = ctx.graph.scope_head(*only)?,
                _ => {
                    let join = Task::Join {
                        merge: head,
                        arity: ends.len(),
                    };
                    schedule_edges(ctx, tasks, join, &ends)?;
                    return Ok(None);
                }
            },
            _ => match predecessor {
                Some(pred) => head = ctx.graph.scope_head(pred)?,
                None => {
                    return Err(GenerationError::UnresolvedVariable {
                        name: var.name.clone(),
                        span,
                    })
                }
            },
        }
    }
}

fn loop_phi(
    ctx: &mut GenerationContext,
    var: &VarSymbol,
    loop_begin: NodeId,
    ends: &[NodeId],
    span: Span,
    tasks: &mut Vec<Task>,
) -> GenerationResult<Option<NodeId>> {
    let phi = ctx.graph.insert_incomplete_phi(var.ty, loop_begin)?;
    bind(ctx, loop_begin, var, phi)?;

    if ctx.is_unsealed(loop_begin) {
        debug!(var = %var.name, loop_begin = %loop_begin, phi = %phi, "loop phi deferred");
        ctx.defer_phi(
            loop_begin,
            PendingPhi {
                var: var.clone(),
                phi,
                span,
            },
        );
        return Ok(Some(phi));
    }

    let fill = Task::FillLoopPhi {
        phi,
        arity: ends.len(),
    };
    schedule_edges(ctx, tasks, fill, ends)?;
    Ok(None)
}

/// Queue `completion` behind one resolution per edge. Edges are pushed in
/// reverse so they are resolved, and their values stacked, in edge order.
fn schedule_edges(
    ctx: &GenerationContext,
    tasks: &mut Vec<Task>,
    completion: Task,
    ends: &[NodeId],
) -> GenerationResult<()> {
    tasks.push(completion);
    for &end in ends.iter().rev() {
        tasks.push(Task::Resolve(ctx.graph.scope_head(end)?));
    }
    Ok(())
}

fn take_operands(values: &mut Vec<NodeId>, arity: usize) -> GenerationResult<Vec<NodeId>> {
    let split = values.len().checked_sub(arity).ok_or_else(|| {
        GenerationError::invariant(format!(
            "{} operands are resolved before their join, found {}",
            arity,
            values.len()
        ))
    })?;
    Ok(values.split_off(split))
}

fn join(
    ctx: &mut GenerationContext,
    var: &VarSymbol,
    merge: NodeId,
    inputs: Vec<NodeId>,
) -> GenerationResult<NodeId> {
    let value = if ctx.config.eliminate_trivial_phis && is_trivial(&inputs) {
        debug!(var = %var.name, merge = %merge, "trivial phi elided");
        inputs[0]
    } else {
        let phi = ctx
            .graph
            .insert_data(var.ty, DataKind::Phi { merge, inputs })?;
        debug!(var = %var.name, merge = %merge, phi = %phi, "phi inserted");
        phi
    };
    bind(ctx, merge, var, value)?;
    Ok(value)
}

fn bind(
    ctx: &mut GenerationContext,
    head: NodeId,
    var: &VarSymbol,
    value: NodeId,
) -> GenerationResult<VarProxy> {
    let proxy = ctx.graph.define_variable(var.id, value)?;
    ctx.graph.bind_in_flow(head, var.id, proxy);
    Ok(proxy)
}

fn is_trivial(inputs: &[NodeId]) -> bool {
    inputs.windows(2).all(|pair| pair[0] == pair[1])
}
