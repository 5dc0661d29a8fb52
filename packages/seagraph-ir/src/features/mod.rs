//! Feature modules
//!
//! - ast: resolved AST consumed by generation
//! - ir_graph: node type system, Graph, IRModule
//! - ir_generation: AST → Graph with on-the-fly SSA
//! - graph_export: DOT / petgraph views

pub mod ast;
pub mod graph_export;
pub mod ir_generation;
pub mod ir_graph;
