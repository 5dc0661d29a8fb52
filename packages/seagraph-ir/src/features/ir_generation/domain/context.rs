//! Per-function generation state
//!
//! Passed explicitly to every visit instead of living in generator-wide
//! stacks, so two functions never share mutable state.

use std::collections::BTreeMap;

use crate::config::GeneratorConfig;
use crate::features::ir_graph::{Graph, GraphResult, NodeId};
use crate::shared::models::{FunctionSymbol, Span, VarSymbol};

/// Outcome of visiting one statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    /// No control node was produced; the cursor stays
    Continue,
    /// A new flow head (Merge) was opened and linked; it becomes the cursor
    Scope(NodeId),
    /// The flow ended at this node; later statements are unreachable
    Terminal(NodeId),
}

/// Result of visiting an expression
#[derive(Debug, Clone, PartialEq)]
pub enum ExprValue {
    /// Data node holding the value
    Value(NodeId),
    /// Assignment target
    Place(VarSymbol),
}

/// Incomplete phi waiting for its loop header to be sealed
#[derive(Debug, Clone)]
pub struct PendingPhi {
    pub var: VarSymbol,
    pub phi: NodeId,
    /// Read that created the phi, for error reporting at seal time
    pub span: Span,
}

#[derive(Debug)]
pub struct GenerationContext {
    pub graph: Graph,
    pub function: FunctionSymbol,
    /// Control node new nodes attach after
    pub cursor: NodeId,
    pub config: GeneratorConfig,
    depth: usize,
    /// LoopBegin -> phis created before its back edge was known
    unsealed: BTreeMap<NodeId, Vec<PendingPhi>>,
}

impl GenerationContext {
    /// Fresh graph for `function`; the cursor is set once Start exists
    pub fn new(function: FunctionSymbol, config: GeneratorConfig) -> Self {
        Self {
            graph: Graph::new(config.dedup),
            function,
            cursor: NodeId(0),
            config,
            depth: 0,
            unsealed: BTreeMap::new(),
        }
    }

    /// `cursor.next = node`
    pub fn splice(&mut self, node: NodeId) -> GraphResult<()> {
        self.graph.link_next(self.cursor, node)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter one nesting level; returns the new depth
    pub fn enter(&mut self) -> usize {
        self.depth += 1;
        self.depth
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn open_loop(&mut self, loop_begin: NodeId) {
        self.unsealed.insert(loop_begin, Vec::new());
    }

    pub fn is_unsealed(&self, loop_begin: NodeId) -> bool {
        self.unsealed.contains_key(&loop_begin)
    }

    pub fn defer_phi(&mut self, loop_begin: NodeId, pending: PendingPhi) {
        self.unsealed.entry(loop_begin).or_default().push(pending);
    }

    /// Mark the loop sealed and hand back the phis still missing operands
    pub fn close_loop(&mut self, loop_begin: NodeId) -> Vec<PendingPhi> {
        self.unsealed.remove(&loop_begin).unwrap_or_default()
    }

    pub fn has_unsealed_loops(&self) -> bool {
        !self.unsealed.is_empty()
    }
}
