//! Graph Exporter
//!
//! Read-only views of a finished Graph:
//! - DOT text for human inspection (not a stable interchange format)
//! - a `petgraph` directed graph for structural checks
//!
//! Edges are emitted in node insertion order, so both views are a pure
//! function of the graph contents.

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::fmt::Write as _;

use crate::features::ir_graph::{ControlKind, DataKind, Graph, IRModule, Node, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Forward link of a single-successor node
    Next,
    /// Merge/LoopBegin → one of its incoming edges
    MergeInput,
    /// If → condition value
    Condition,
    /// If → true/false Begin
    Branch,
    /// Data consumer → operand
    Operand,
    /// Phi → owning merge
    PhiMerge,
    /// Return → returned value
    ReturnValue,
    /// LoopEnd/LoopExit → owning LoopBegin
    LoopOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

pub struct GraphExporter;

impl GraphExporter {
    /// Every exported edge, grouped by source node in insertion order
    pub fn edges(graph: &Graph) -> Vec<ExportEdge> {
        let mut edges = Vec::new();
        let mut push = |from, to, kind| edges.push(ExportEdge { from, to, kind });

        for node in graph.nodes() {
            match node {
                Node::Control(control) => {
                    let from = control.id;
                    if let Some(next) = control.kind.next() {
                        push(from, next, EdgeKind::Next);
                    }
                    match &control.kind {
                        ControlKind::Merge { ends, .. } | ControlKind::LoopBegin { ends, .. } => {
                            for &end in ends {
                                push(from, end, EdgeKind::MergeInput);
                            }
                        }
                        ControlKind::If {
                            condition,
                            true_branch,
                            false_branch,
                        } => {
                            push(from, *condition, EdgeKind::Condition);
                            push(from, *true_branch, EdgeKind::Branch);
                            if let Some(false_branch) = false_branch {
                                push(from, *false_branch, EdgeKind::Branch);
                            }
                        }
                        ControlKind::Return { value: Some(value) } => {
                            push(from, *value, EdgeKind::ReturnValue);
                        }
                        ControlKind::LoopEnd { loop_begin } | ControlKind::LoopExit { loop_begin } => {
                            push(from, *loop_begin, EdgeKind::LoopOwner);
                        }
                        _ => {}
                    }
                }
                Node::Data(data) => {
                    for input in data.inputs() {
                        push(data.id, input, EdgeKind::Operand);
                    }
                    if let DataKind::Phi { merge, .. } = &data.kind {
                        push(data.id, *merge, EdgeKind::PhiMerge);
                    }
                }
            }
        }
        edges
    }

    pub fn to_dot(graph: &Graph) -> String {
        Self::named_dot(None, graph)
    }

    /// One `digraph` per function, in symbol order
    pub fn module_to_dot(module: &IRModule) -> String {
        module
            .functions()
            .map(|function| Self::named_dot(Some(&function.name), &function.graph))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn named_dot(name: Option<&str>, graph: &Graph) -> String {
        let mut out = match name {
            Some(name) => format!("digraph {} {{\n", quote(name)),
            None => "digraph {\n".to_string(),
        };
        for edge in Self::edges(graph) {
            let (Ok(from), Ok(to)) = (graph.node(edge.from), graph.node(edge.to)) else {
                continue;
            };
            // Writing to a String cannot fail
            let _ = writeln!(out, "\t{} -> {}", quote(&from.label()), quote(&to.label()));
        }
        out.push_str("}\n");
        out
    }

    /// Same nodes and edges as a petgraph graph; node weights are graph ids
    pub fn to_petgraph(graph: &Graph) -> DiGraph<NodeId, EdgeKind> {
        let mut view = DiGraph::with_capacity(graph.len(), graph.len());
        let indices: Vec<NodeIndex> = graph.nodes().iter().map(|n| view.add_node(n.id())).collect();
        for edge in Self::edges(graph) {
            if let (Some(&from), Some(&to)) =
                (indices.get(edge.from.index()), indices.get(edge.to.index()))
            {
                view.add_edge(from, to, edge.kind);
            }
        }
        view
    }
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
