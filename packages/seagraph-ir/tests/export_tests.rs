//! Graph export tests: DOT text and the petgraph view

mod common;

use common::*;
use petgraph::algo::is_cyclic_directed;
use petgraph::visit::EdgeRef;
use pretty_assertions::assert_eq;
use seagraph_ir::features::graph_export::EdgeKind;
use seagraph_ir::features::ir_graph::NodeId;
use seagraph_ir::GraphExporter;

#[test]
fn test_dot_is_deterministic() {
    let graph = generate_function(&scenario_counting_loop(), reference());
    let first = GraphExporter::to_dot(&graph);
    let second = GraphExporter::to_dot(&graph);
    assert_eq!(first, second);
    assert!(first.starts_with("digraph {\n"));
    assert!(first.ends_with("}\n"));
}

#[test]
fn test_dot_for_if_without_else() {
    let graph = generate_function(&scenario_if_without_else(), reference());
    let expected = "digraph {\n\
        \t\"Start_0\" -> \"If_5\"\n\
        \t\"Begin_3\" -> \"End_7\"\n\
        \t\"Begin_4\" -> \"End_8\"\n\
        \t\"If_5\" -> \"cond_1\"\n\
        \t\"If_5\" -> \"Begin_3\"\n\
        \t\"If_5\" -> \"Begin_4\"\n\
        \t\"Merge_9\" -> \"End_7\"\n\
        \t\"Merge_9\" -> \"End_8\"\n\
        \t\"Phi_10\" -> \"C_2_6\"\n\
        \t\"Phi_10\" -> \"C_1_2\"\n\
        \t\"Phi_10\" -> \"Merge_9\"\n\
        \t\"Return_11\" -> \"Phi_10\"\n\
        \t\"f_12\" -> \"Start_0\"\n\
        }\n";
    assert_eq!(GraphExporter::to_dot(&graph), expected);
}

#[test]
fn test_module_dot_names_each_function() {
    let module = generate_program(&scenario_many_functions(3), reference());
    let dot = GraphExporter::module_to_dot(&module);

    assert_eq!(dot.matches("digraph ").count(), 4);
    for name in ["\"f0\"", "\"f1\"", "\"f2\"", "\"main\""] {
        assert!(dot.contains(&format!("digraph {} {{", name)), "missing {name}");
    }
}

#[test]
fn test_petgraph_view_mirrors_edges() {
    let graph = generate_function(&scenario_if_else_double_read(), reference());
    let edges = GraphExporter::edges(&graph);
    let view = GraphExporter::to_petgraph(&graph);

    assert_eq!(view.node_count(), graph.len());
    assert_eq!(view.edge_count(), edges.len());
    for index in view.node_indices() {
        assert_eq!(view[index], NodeId(index.index() as u32));
    }

    let phi_edges: Vec<_> = view
        .edge_references()
        .filter(|edge| *edge.weight() == EdgeKind::PhiMerge)
        .map(|edge| (view[edge.source()], view[edge.target()]))
        .collect();
    assert_eq!(phi_edges, vec![(NodeId(11), NodeId(10))]);
}

#[test]
fn test_branchy_graph_is_acyclic_and_loops_are_not() {
    let branchy = generate_function(&scenario_if_without_else(), reference());
    assert!(!is_cyclic_directed(&GraphExporter::to_petgraph(&branchy)));

    // LoopBegin → LoopEnd → LoopBegin
    let looping = generate_function(&scenario_counting_loop(), reference());
    assert!(is_cyclic_directed(&GraphExporter::to_petgraph(&looping)));
}

#[test]
fn test_repeated_operand_keeps_both_edges() {
    let graph = generate_function(&scenario_if_else_double_read(), reference());
    let operand_edges = GraphExporter::edges(&graph)
        .into_iter()
        .filter(|edge| edge.from == NodeId(12) && edge.kind == EdgeKind::Operand)
        .count();
    assert_eq!(operand_edges, 2);
}
