//! Graph invariant assertions
//!
//! Each helper panics with the offending node ids, so a failing property
//! test shrinks to something readable.

use std::collections::{BTreeMap, BTreeSet};

use seagraph_ir::features::ir_graph::{structurally_equal, ControlKind, DataKind, Graph, NodeId};

/// Every operand lists its consumer once, and every listed use is a real
/// consumer of that operand.
pub fn assert_use_def_symmetry(graph: &Graph) {
    for node in graph.data_nodes() {
        let distinct: BTreeSet<NodeId> = node.inputs().into_iter().collect();
        for operand in distinct {
            let uses = &graph.data(operand).expect("operand is a data node").uses;
            let count = uses.iter().filter(|&&u| u == node.id).count();
            assert_eq!(
                count, 1,
                "{} is listed {} times in the uses of its operand {}",
                node.id, count, operand
            );
        }

        for &consumer in &node.uses {
            let inputs = graph.data(consumer).expect("use is a data node").inputs();
            assert!(
                inputs.contains(&node.id),
                "{} lists {} as a use, but it is not an operand",
                node.id,
                consumer
            );
        }
    }
}

/// Forward edges and predecessor back-references agree
pub fn assert_control_linkage(graph: &Graph) {
    for node in graph.control_nodes() {
        for succ in node.kind.successors() {
            let target = graph.control(succ).expect("successor is a control node");
            assert_eq!(
                target.predecessor,
                Some(node.id),
                "{} links to {} but the back-reference disagrees",
                node.id,
                succ
            );
        }
        if let Some(pred) = node.predecessor {
            let source = graph.control(pred).expect("predecessor is a control node");
            assert!(
                source.kind.successors().contains(&node.id),
                "{} names {} as predecessor without a forward edge",
                node.id,
                pred
            );
        }
    }
}

/// Versions of each symbol are unique and dense, and each proxy is bound to
/// a data node that knows it defines that symbol.
pub fn assert_single_assignment(graph: &Graph) {
    let mut versions: BTreeMap<_, Vec<u32>> = BTreeMap::new();
    for binding in graph.var_bindings() {
        versions
            .entry(binding.proxy.sym)
            .or_default()
            .push(binding.proxy.version);

        let node = graph.data(binding.node).expect("proxy bound to a data node");
        assert!(
            node.var_syms.contains(&binding.proxy.sym),
            "{} is bound to {} which does not record the symbol",
            binding.proxy,
            binding.node
        );
    }
    for (sym, seen) in versions {
        let expected: Vec<u32> = (0..seen.len() as u32).collect();
        assert_eq!(seen, expected, "versions of {} are not 0..n in order", sym);
        assert_eq!(graph.version_count(sym) as usize, seen.len());
    }
}

/// No two value-numbered data nodes are structurally equal. Loop-header phis
/// are created before their operands exist and are exempt.
pub fn assert_no_structural_duplicates(graph: &Graph) {
    let numbered: Vec<_> = graph
        .data_nodes()
        .filter(|node| !is_loop_phi(graph, &node.kind))
        .collect();
    for (pos, a) in numbered.iter().enumerate() {
        for b in &numbered[pos + 1..] {
            assert!(
                !structurally_equal(&a.kind, &b.kind),
                "{} and {} are structurally equal",
                a.id,
                b.id
            );
        }
    }
}

/// Every phi has one input per incoming edge of its merge
pub fn assert_phi_arity(graph: &Graph) {
    for phi in graph.phis() {
        if let DataKind::Phi { merge, inputs } = &phi.kind {
            let ends = graph.merge_ends(*merge).expect("phi owned by a merge");
            assert_eq!(
                inputs.len(),
                ends.len(),
                "{} has {} inputs for {} edges",
                phi.id,
                inputs.len(),
                ends.len()
            );
            assert!(!graph.is_incomplete_phi(phi.id), "{} left incomplete", phi.id);
        }
    }
}

/// All structural invariants at once
pub fn assert_well_formed(graph: &Graph) {
    assert_use_def_symmetry(graph);
    assert_control_linkage(graph);
    assert_single_assignment(graph);
    assert_no_structural_duplicates(graph);
    assert_phi_arity(graph);
}

fn is_loop_phi(graph: &Graph, kind: &DataKind) -> bool {
    match kind {
        DataKind::Phi { merge, .. } => matches!(
            graph.control(*merge).map(|c| &c.kind),
            Ok(ControlKind::LoopBegin { .. })
        ),
        _ => false,
    }
}

/// Ids of the nodes with the given kind name, in insertion order
pub fn ids_of_kind(graph: &Graph, kind: &str) -> Vec<NodeId> {
    graph
        .nodes()
        .iter()
        .filter(|node| match node.as_data() {
            Some(data) => data.kind.kind_name() == kind,
            None => node
                .as_control()
                .map(|c| c.kind.kind_name() == kind)
                .unwrap_or(false),
        })
        .map(|node| node.id())
        .collect()
}
