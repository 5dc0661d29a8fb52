//! Node type system
//!
//! Data nodes and control nodes share one index space inside a Graph. Every
//! cross reference (operands, uses, control edges, owning merge/loop) is a
//! `NodeId` into that graph, so back references never own anything.
//!
//! Kinds:
//! - Data: Parameter, Constant, BinaryOp, UnaryOp, Phi
//! - Control, single successor: Start, Begin, Function
//! - Control, merge (single successor + incoming edges): Merge, LoopBegin
//! - Control, terminal: End, Return, LoopEnd, LoopExit
//! - Control, branch: If

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::{ConstValue, Op, StaticType, SymbolId};

/// Insertion index of a node in its Graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum Node {
    Data(DataNode),
    Control(ControlNode),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Data(d) => d.id,
            Node::Control(c) => c.id,
        }
    }

    pub fn as_data(&self) -> Option<&DataNode> {
        match self {
            Node::Data(d) => Some(d),
            Node::Control(_) => None,
        }
    }

    pub fn as_control(&self) -> Option<&ControlNode> {
        match self {
            Node::Control(c) => Some(c),
            Node::Data(_) => None,
        }
    }

    /// Label used by the exporter: `<kind-or-name>_<index>`
    pub fn label(&self) -> String {
        match self {
            Node::Data(d) => d.label(),
            Node::Control(c) => c.label(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Data nodes
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct DataNode {
    pub id: NodeId,
    pub ty: StaticType,
    pub kind: DataKind,
    /// Consumers of this value, each listed once, in admission order
    pub uses: Vec<NodeId>,
    /// Variables this node is (one of) the definitions of
    pub var_syms: Vec<SymbolId>,
}

/// Shape of a data node; also the candidate handed to `Graph::insert_data`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum DataKind {
    Parameter {
        name: String,
    },
    Constant {
        value: ConstValue,
    },
    BinaryOp {
        op: Op,
        left: NodeId,
        right: NodeId,
    },
    UnaryOp {
        op: Op,
        operand: NodeId,
        is_prefix: bool,
    },
    /// One input per incoming edge of `merge`, in edge order
    Phi {
        merge: NodeId,
        inputs: Vec<NodeId>,
    },
}

impl DataKind {
    /// Operand references, in order (duplicates preserved)
    pub fn inputs(&self) -> Vec<NodeId> {
        match self {
            DataKind::Parameter { .. } | DataKind::Constant { .. } => Vec::new(),
            DataKind::BinaryOp { left, right, .. } => vec![*left, *right],
            DataKind::UnaryOp { operand, .. } => vec![*operand],
            DataKind::Phi { inputs, .. } => inputs.clone(),
        }
    }

    pub fn is_phi(&self) -> bool {
        matches!(self, DataKind::Phi { .. })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            DataKind::Parameter { .. } => "Parameter",
            DataKind::Constant { .. } => "Constant",
            DataKind::BinaryOp { .. } => "BinaryOp",
            DataKind::UnaryOp { .. } => "UnaryOp",
            DataKind::Phi { .. } => "Phi",
        }
    }
}

impl DataNode {
    pub fn inputs(&self) -> Vec<NodeId> {
        self.kind.inputs()
    }

    pub fn label(&self) -> String {
        match &self.kind {
            DataKind::Parameter { name } => format!("{}_{}", name, self.id),
            DataKind::Constant { value } => format!("C_{}_{}", value, self.id),
            DataKind::BinaryOp { op, .. } | DataKind::UnaryOp { op, .. } => {
                format!("{}_{}", op, self.id)
            }
            DataKind::Phi { .. } => format!("Phi_{}", self.id),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Control nodes
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ControlNode {
    pub id: NodeId,
    /// Set whenever another node links forward to this one
    pub predecessor: Option<NodeId>,
    pub kind: ControlKind,
}

/// `next: None` is a provisional forward edge that has not been linked yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ControlKind {
    Start {
        next: Option<NodeId>,
    },
    Begin {
        next: Option<NodeId>,
    },
    Function {
        name: String,
        params: Vec<NodeId>,
        next: Option<NodeId>,
    },
    Merge {
        ends: Vec<NodeId>,
        next: Option<NodeId>,
    },
    LoopBegin {
        ends: Vec<NodeId>,
        next: Option<NodeId>,
    },
    End,
    Return {
        value: Option<NodeId>,
    },
    LoopEnd {
        loop_begin: NodeId,
    },
    LoopExit {
        loop_begin: NodeId,
    },
    If {
        condition: NodeId,
        true_branch: NodeId,
        false_branch: Option<NodeId>,
    },
}

impl ControlKind {
    pub fn start() -> Self {
        ControlKind::Start { next: None }
    }

    pub fn begin() -> Self {
        ControlKind::Begin { next: None }
    }

    pub fn merge(ends: Vec<NodeId>) -> Self {
        ControlKind::Merge { ends, next: None }
    }

    pub fn loop_begin(ends: Vec<NodeId>) -> Self {
        ControlKind::LoopBegin { ends, next: None }
    }

    /// Forward edge of single-successor and merge nodes
    pub fn next(&self) -> Option<NodeId> {
        match self {
            ControlKind::Start { next }
            | ControlKind::Begin { next }
            | ControlKind::Function { next, .. }
            | ControlKind::Merge { next, .. }
            | ControlKind::LoopBegin { next, .. } => *next,
            _ => None,
        }
    }

    /// Slot for the forward edge, `None` for nodes that have no such edge
    pub(crate) fn next_slot(&mut self) -> Option<&mut Option<NodeId>> {
        match self {
            ControlKind::Start { next }
            | ControlKind::Begin { next }
            | ControlKind::Function { next, .. }
            | ControlKind::Merge { next, .. }
            | ControlKind::LoopBegin { next, .. } => Some(next),
            _ => None,
        }
    }

    pub fn is_single_successor(&self) -> bool {
        matches!(
            self,
            ControlKind::Start { .. }
                | ControlKind::Begin { .. }
                | ControlKind::Function { .. }
                | ControlKind::Merge { .. }
                | ControlKind::LoopBegin { .. }
        )
    }

    /// Merge family: Merge and LoopBegin
    pub fn is_merge(&self) -> bool {
        matches!(self, ControlKind::Merge { .. } | ControlKind::LoopBegin { .. })
    }

    /// Nodes that open a flow and own a variable-binding table
    pub fn is_scope_head(&self) -> bool {
        self.is_single_successor()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ControlKind::End
                | ControlKind::Return { .. }
                | ControlKind::LoopEnd { .. }
                | ControlKind::LoopExit { .. }
        )
    }

    /// Incoming edges of a merge-family node
    pub fn ends(&self) -> Option<&[NodeId]> {
        match self {
            ControlKind::Merge { ends, .. } | ControlKind::LoopBegin { ends, .. } => Some(ends),
            _ => None,
        }
    }

    /// Control successors in edge order
    pub fn successors(&self) -> Vec<NodeId> {
        match self {
            ControlKind::If {
                true_branch,
                false_branch,
                ..
            } => {
                let mut succs = vec![*true_branch];
                succs.extend(*false_branch);
                succs
            }
            other => other.next().into_iter().collect(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ControlKind::Start { .. } => "Start",
            ControlKind::Begin { .. } => "Begin",
            ControlKind::Function { .. } => "Function",
            ControlKind::Merge { .. } => "Merge",
            ControlKind::LoopBegin { .. } => "LoopBegin",
            ControlKind::End => "End",
            ControlKind::Return { .. } => "Return",
            ControlKind::LoopEnd { .. } => "LoopEnd",
            ControlKind::LoopExit { .. } => "LoopExit",
            ControlKind::If { .. } => "If",
        }
    }
}

impl ControlNode {
    pub fn label(&self) -> String {
        match &self.kind {
            ControlKind::Function { name, .. } => format!("{}_{}", name, self.id),
            other => format!("{}_{}", other.kind_name(), self.id),
        }
    }
}
