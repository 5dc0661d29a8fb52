//! Value-numbering index
//!
//! Finds the live representative structurally equal to a candidate data
//! node. Two strategies with the same answers:
//! - `LinearScan`: compares the candidate against every data node (O(n) per insert)
//! - `Hashed`: `ahash` table keyed by kind, operator/name/value and operand identities
//!
//! Operands are compared by identity. Every operand is itself the graph's
//! live representative, so identity is what recursive structural equality
//! reduces to.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::features::ir_graph::domain::node::{DataKind, Node, NodeId};
use crate::shared::models::{ConstValue, Op};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupStrategy {
    LinearScan,
    #[default]
    Hashed,
}

impl DedupStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinearScan => "linear_scan",
            Self::Hashed => "hashed",
        }
    }
}

/// Structural equality of two data node shapes
///
/// Parameter: same name. Constant: same value. BinaryOp: same operator and
/// operands. UnaryOp: same operator, prefix flag and operand. Phi: same owning
/// merge and the same operand in every position. Position `i` is the value
/// flowing in along the merge's edge `i`, so two phis with permuted operands
/// carry different values.
pub fn structurally_equal(a: &DataKind, b: &DataKind) -> bool {
    match (a, b) {
        (DataKind::Parameter { name: n1 }, DataKind::Parameter { name: n2 }) => n1 == n2,
        (DataKind::Constant { value: v1 }, DataKind::Constant { value: v2 }) => v1 == v2,
        (
            DataKind::BinaryOp {
                op: o1,
                left: l1,
                right: r1,
            },
            DataKind::BinaryOp {
                op: o2,
                left: l2,
                right: r2,
            },
        ) => o1 == o2 && l1 == l2 && r1 == r2,
        (
            DataKind::UnaryOp {
                op: o1,
                operand: d1,
                is_prefix: p1,
            },
            DataKind::UnaryOp {
                op: o2,
                operand: d2,
                is_prefix: p2,
            },
        ) => o1 == o2 && p1 == p2 && d1 == d2,
        (
            DataKind::Phi {
                merge: m1,
                inputs: i1,
            },
            DataKind::Phi {
                merge: m2,
                inputs: i2,
            },
        ) => m1 == m2 && i1 == i2,
        _ => false,
    }
}

/// Hash key with exactly the equality of `structurally_equal`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DedupKey {
    Parameter(String),
    Constant(ConstValue),
    BinaryOp(Op, NodeId, NodeId),
    UnaryOp(Op, bool, NodeId),
    Phi { merge: NodeId, inputs: Vec<NodeId> },
}

impl DedupKey {
    fn of(kind: &DataKind) -> Self {
        match kind {
            DataKind::Parameter { name } => DedupKey::Parameter(name.clone()),
            DataKind::Constant { value } => DedupKey::Constant(value.clone()),
            DataKind::BinaryOp { op, left, right } => DedupKey::BinaryOp(*op, *left, *right),
            DataKind::UnaryOp {
                op,
                operand,
                is_prefix,
            } => DedupKey::UnaryOp(*op, *is_prefix, *operand),
            DataKind::Phi { merge, inputs } => DedupKey::Phi {
                merge: *merge,
                inputs: inputs.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DedupIndex {
    strategy: DedupStrategy,
    table: AHashMap<DedupKey, NodeId>,
}

impl DedupIndex {
    pub fn new(strategy: DedupStrategy) -> Self {
        Self {
            strategy,
            table: AHashMap::new(),
        }
    }

    pub fn strategy(&self) -> DedupStrategy {
        self.strategy
    }

    /// Live node structurally equal to `candidate`, if any
    pub fn find(&self, candidate: &DataKind, nodes: &[Node]) -> Option<NodeId> {
        match self.strategy {
            DedupStrategy::LinearScan => nodes
                .iter()
                .filter_map(Node::as_data)
                .find(|existing| structurally_equal(&existing.kind, candidate))
                .map(|existing| existing.id),
            DedupStrategy::Hashed => self.table.get(&DedupKey::of(candidate)).copied(),
        }
    }

    /// Register a newly admitted node as the representative of its shape
    pub fn record(&mut self, kind: &DataKind, id: NodeId) {
        if self.strategy == DedupStrategy::Hashed {
            self.table.entry(DedupKey::of(kind)).or_insert(id);
        }
    }
}
