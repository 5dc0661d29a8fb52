//! Graph - append-only node store for one function
//!
//! Owns:
//! - every node (data and control) in insertion order; a node's index is its
//!   position and is assigned exactly once
//! - the value-numbering index for data nodes
//! - the global VarProxy table (append-only, single assignment)
//! - one variable-binding table per flow head (Start/Begin/Merge/LoopBegin)
//!
//! Use-def edges are registered only when a data node is admitted as a live
//! representative; a candidate that dedups to an existing node never touches
//! its operands.

use ahash::AHashMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::errors::{GraphError, GraphResult};
use super::node::{ControlKind, ControlNode, DataKind, DataNode, Node, NodeId};
use super::var_proxy::{VarBinding, VarProxy};
use crate::features::ir_graph::infrastructure::dedup::{DedupIndex, DedupStrategy};
use crate::shared::models::{StaticType, SymbolId};

#[derive(Debug, Clone, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,

    #[serde(skip)]
    dedup: DedupIndex,

    /// Global definition table, in definition order
    var_bindings: Vec<VarBinding>,

    #[serde(skip)]
    versions: AHashMap<SymbolId, u32>,

    /// Currently visible proxy per symbol, per flow head
    flow_bindings: BTreeMap<NodeId, BTreeMap<SymbolId, VarProxy>>,

    /// Loop-header phis whose operands are not known yet
    #[serde(skip)]
    incomplete_phis: BTreeSet<NodeId>,
}

/// Node counts, for logging and quick assertions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub data_nodes: usize,
    pub control_nodes: usize,
    pub phi_nodes: usize,
    pub var_proxies: usize,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(DedupStrategy::default())
    }
}

impl Graph {
    pub fn new(strategy: DedupStrategy) -> Self {
        Self {
            nodes: Vec::new(),
            dedup: DedupIndex::new(strategy),
            var_bindings: Vec::new(),
            versions: AHashMap::new(),
            flow_bindings: BTreeMap::new(),
            incomplete_phis: BTreeSet::new(),
        }
    }

    pub fn dedup_strategy(&self) -> DedupStrategy {
        self.dedup.strategy()
    }

    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Insertion
    // ═══════════════════════════════════════════════════════════════════════

    /// Value-numbered insertion
    ///
    /// Returns the existing representative when one is structurally equal to
    /// `kind`; otherwise admits a new node, registers it in each operand's
    /// `uses` and returns its id.
    pub fn insert_data(&mut self, ty: StaticType, kind: DataKind) -> GraphResult<NodeId> {
        self.check_data_operands(&kind)?;

        if let Some(existing) = self.dedup.find(&kind, &self.nodes) {
            tracing::trace!(node = %existing, kind = kind.kind_name(), "dedup hit");
            return Ok(existing);
        }

        let id = self.admit_data(ty, kind);
        tracing::trace!(node = %id, "data node admitted");
        Ok(id)
    }

    /// Phi at a loop header whose incoming edges are not all known yet
    ///
    /// Bypasses value numbering: the phi must exist before its operands do.
    /// Operands are filled in by `complete_phi` when the loop is sealed.
    pub fn insert_incomplete_phi(&mut self, ty: StaticType, merge: NodeId) -> GraphResult<NodeId> {
        self.merge_ends(merge)?;
        let id = self.next_id();
        self.nodes.push(Node::Data(DataNode {
            id,
            ty,
            kind: DataKind::Phi {
                merge,
                inputs: Vec::new(),
            },
            uses: Vec::new(),
            var_syms: Vec::new(),
        }));
        self.incomplete_phis.insert(id);
        Ok(id)
    }

    /// Fill in the operands of an incomplete phi and register its uses
    pub fn complete_phi(&mut self, phi: NodeId, operands: Vec<NodeId>) -> GraphResult<()> {
        if !self.incomplete_phis.contains(&phi) {
            return Err(GraphError::NotIncompletePhi(phi));
        }
        for &operand in &operands {
            self.data(operand)?;
        }

        let completed = match self.nodes.get_mut(phi.index()) {
            Some(Node::Data(DataNode {
                kind: kind @ DataKind::Phi { .. },
                ..
            })) => {
                if let DataKind::Phi { inputs, .. } = kind {
                    *inputs = operands.clone();
                }
                kind.clone()
            }
            _ => return Err(GraphError::NotIncompletePhi(phi)),
        };
        // The linear scan sees the completed phi; keep the hashed index in step
        self.dedup.record(&completed, phi);
        self.incomplete_phis.remove(&phi);
        self.register_uses(phi, &operands);
        Ok(())
    }

    pub fn is_incomplete_phi(&self, id: NodeId) -> bool {
        self.incomplete_phis.contains(&id)
    }

    fn admit_data(&mut self, ty: StaticType, kind: DataKind) -> NodeId {
        let id = self.next_id();
        let inputs = kind.inputs();
        self.dedup.record(&kind, id);
        self.nodes.push(Node::Data(DataNode {
            id,
            ty,
            kind,
            uses: Vec::new(),
            var_syms: Vec::new(),
        }));
        self.register_uses(id, &inputs);
        id
    }

    /// Each distinct operand lists the consumer once
    fn register_uses(&mut self, consumer: NodeId, operands: &[NodeId]) {
        for (pos, operand) in operands.iter().enumerate() {
            if operands[..pos].contains(operand) {
                continue;
            }
            if let Some(Node::Data(data)) = self.nodes.get_mut(operand.index()) {
                if !data.uses.contains(&consumer) {
                    data.uses.push(consumer);
                }
            }
        }
    }

    fn check_data_operands(&self, kind: &DataKind) -> GraphResult<()> {
        for operand in kind.inputs() {
            self.data(operand)?;
        }
        if let DataKind::Phi { merge, .. } = kind {
            self.merge_ends(*merge)?;
        }
        Ok(())
    }

    /// Unconditional insertion; control identity is never deduplicated
    ///
    /// Edges the node already carries (If branches, a linked `next`) set the
    /// back-reference of their targets.
    pub fn insert_control(&mut self, kind: ControlKind) -> GraphResult<NodeId> {
        let successors = kind.successors();
        for &succ in &successors {
            self.check_unlinked(succ)?;
        }
        if let ControlKind::If { condition, .. } = &kind {
            self.data(*condition)?;
        }
        if let ControlKind::Return { value: Some(value) } = &kind {
            self.data(*value)?;
        }

        let id = self.next_id();
        self.nodes.push(Node::Control(ControlNode {
            id,
            predecessor: None,
            kind,
        }));
        for succ in successors {
            self.set_predecessor(succ, id);
        }
        tracing::trace!(node = %id, "control node admitted");
        Ok(id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Control linkage
    // ═══════════════════════════════════════════════════════════════════════

    /// Establish `from.next = to` and `to.predecessor = from`
    ///
    /// `from` must be a single-successor node whose forward edge is still
    /// provisional; links are never retargeted.
    pub fn link_next(&mut self, from: NodeId, to: NodeId) -> GraphResult<()> {
        self.check_unlinked(to)?;
        let node = self.control_mut(from)?;
        let kind_name = node.kind.kind_name();
        let slot = node.kind.next_slot().ok_or(GraphError::NoForwardEdge {
            node: from,
            kind: kind_name,
        })?;
        if let Some(existing) = *slot {
            return Err(GraphError::AlreadyLinked { from, existing });
        }
        *slot = Some(to);
        self.set_predecessor(to, from);
        Ok(())
    }

    /// Append an incoming edge to a Merge/LoopBegin (loop back edges)
    pub fn add_merge_end(&mut self, merge: NodeId, end: NodeId) -> GraphResult<()> {
        self.control(end)?;
        match &mut self.control_mut(merge)?.kind {
            ControlKind::Merge { ends, .. } | ControlKind::LoopBegin { ends, .. } => {
                ends.push(end);
                Ok(())
            }
            _ => Err(GraphError::NotAMerge(merge)),
        }
    }

    fn check_unlinked(&self, target: NodeId) -> GraphResult<()> {
        match self.control(target)?.predecessor {
            Some(existing) => Err(GraphError::PredecessorAlreadySet {
                node: target,
                existing,
            }),
            None => Ok(()),
        }
    }

    fn set_predecessor(&mut self, target: NodeId, pred: NodeId) {
        if let Some(Node::Control(node)) = self.nodes.get_mut(target.index()) {
            node.predecessor = Some(pred);
        }
    }

    /// Nearest enclosing flow head: walks `predecessor` links from `node`
    /// until a Start/Begin/Function/Merge/LoopBegin is reached.
    pub fn scope_head(&self, node: NodeId) -> GraphResult<NodeId> {
        let mut current = node;
        loop {
            let control = self.control(current)?;
            if control.kind.is_scope_head() {
                return Ok(current);
            }
            current = control
                .predecessor
                .ok_or(GraphError::DetachedControl(node))?;
        }
    }

    /// Incoming edges of a merge-family node
    pub fn merge_ends(&self, merge: NodeId) -> GraphResult<&[NodeId]> {
        self.control(merge)?
            .kind
            .ends()
            .ok_or(GraphError::NotAMerge(merge))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Variables
    // ═══════════════════════════════════════════════════════════════════════

    /// New SSA version of `sym`, bound to `node` for good
    ///
    /// The caller records the proxy as visible in the right flow via
    /// `bind_in_flow`.
    pub fn define_variable(&mut self, sym: SymbolId, node: NodeId) -> GraphResult<VarProxy> {
        let data = self.data_mut(node)?;
        if !data.var_syms.contains(&sym) {
            data.var_syms.push(sym);
        }

        let counter = self.versions.entry(sym).or_insert(0);
        let proxy = VarProxy {
            sym,
            version: *counter,
        };
        *counter += 1;
        self.var_bindings.push(VarBinding { proxy, node });
        Ok(proxy)
    }

    /// Data node a proxy was bound to
    pub fn proxy_node(&self, proxy: VarProxy) -> Option<NodeId> {
        self.var_bindings
            .iter()
            .rev()
            .find(|binding| binding.proxy == proxy)
            .map(|binding| binding.node)
    }

    pub fn var_bindings(&self) -> &[VarBinding] {
        &self.var_bindings
    }

    /// Number of proxies created for `sym`
    pub fn version_count(&self, sym: SymbolId) -> u32 {
        self.versions.get(&sym).copied().unwrap_or(0)
    }

    /// Make `proxy` the visible binding of `sym` in the flow headed by `head`
    pub fn bind_in_flow(&mut self, head: NodeId, sym: SymbolId, proxy: VarProxy) {
        self.flow_bindings
            .entry(head)
            .or_default()
            .insert(sym, proxy);
    }

    /// Binding visible in `head`'s own table (no ancestor lookup)
    pub fn flow_binding(&self, head: NodeId, sym: SymbolId) -> Option<VarProxy> {
        self.flow_bindings
            .get(&head)
            .and_then(|table| table.get(&sym))
            .copied()
    }

    /// One Parameter node per formal argument
    pub fn lookup_parameter(&self, name: &str) -> Option<NodeId> {
        self.data_nodes()
            .find(|node| matches!(&node.kind, DataKind::Parameter { name: n } if n == name))
            .map(|node| node.id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.nodes.get(id.index()).ok_or(GraphError::UnknownNode(id))
    }

    pub fn data(&self, id: NodeId) -> GraphResult<&DataNode> {
        self.node(id)?.as_data().ok_or(GraphError::NotDataNode(id))
    }

    pub fn control(&self, id: NodeId) -> GraphResult<&ControlNode> {
        self.node(id)?
            .as_control()
            .ok_or(GraphError::NotControlNode(id))
    }

    fn data_mut(&mut self, id: NodeId) -> GraphResult<&mut DataNode> {
        match self.nodes.get_mut(id.index()) {
            Some(Node::Data(data)) => Ok(data),
            Some(Node::Control(_)) => Err(GraphError::NotDataNode(id)),
            None => Err(GraphError::UnknownNode(id)),
        }
    }

    fn control_mut(&mut self, id: NodeId) -> GraphResult<&mut ControlNode> {
        match self.nodes.get_mut(id.index()) {
            Some(Node::Control(control)) => Ok(control),
            Some(Node::Data(_)) => Err(GraphError::NotControlNode(id)),
            None => Err(GraphError::UnknownNode(id)),
        }
    }

    pub fn data_nodes(&self) -> impl Iterator<Item = &DataNode> {
        self.nodes.iter().filter_map(Node::as_data)
    }

    pub fn control_nodes(&self) -> impl Iterator<Item = &ControlNode> {
        self.nodes.iter().filter_map(Node::as_control)
    }

    pub fn phis(&self) -> impl Iterator<Item = &DataNode> {
        self.data_nodes().filter(|node| node.kind.is_phi())
    }

    pub fn stats(&self) -> GraphStats {
        let data_nodes = self.data_nodes().count();
        GraphStats {
            nodes: self.nodes.len(),
            data_nodes,
            control_nodes: self.nodes.len() - data_nodes,
            phi_nodes: self.phis().count(),
            var_proxies: self.var_bindings.len(),
        }
    }
}
