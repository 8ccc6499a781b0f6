use docsynth_graph::{EdgeKind, NodeId, WorkflowGraph};

#[test]
fn fixed_graph_passes_validation() {
    let graph = WorkflowGraph::new().expect("valid graph");
    let edges = graph.edges();

    assert_eq!(edges.len(), 6);
    assert!(edges.contains(&(NodeId::RetrieveContext, NodeId::GenerateInitial, EdgeKind::Always)));
    assert!(edges.contains(&(NodeId::SelfRefine, NodeId::SelfRefine, EdgeKind::Conditional)));
    assert!(edges.contains(&(NodeId::SelfRefine, NodeId::Persist, EdgeKind::Conditional)));
    assert!(edges.contains(&(NodeId::Persist, NodeId::End, EdgeKind::Always)));
}

#[test]
fn refinement_is_the_only_cycle() {
    let graph = WorkflowGraph::new().unwrap();
    let self_loops: Vec<_> = graph
        .edges()
        .into_iter()
        .filter(|(from, to, _)| from == to)
        .collect();
    assert_eq!(self_loops.len(), 1);
    assert_eq!(self_loops[0].0, NodeId::SelfRefine);
}

#[test]
fn mermaid_lists_every_transition() {
    let mermaid = WorkflowGraph::new().unwrap().to_mermaid();

    assert!(mermaid.starts_with("graph TD\n"));
    assert!(mermaid.contains("__start__([start]) --> retrieve_context"));
    assert!(mermaid.contains("retrieve_context --> generate_initial"));
    assert!(mermaid.contains("generate_initial --> augment_with_tool"));
    assert!(mermaid.contains("augment_with_tool --> self_refine"));
    assert!(mermaid.contains("self_refine -.->|iteration < max| self_refine"));
    assert!(mermaid.contains("self_refine -.->|done| persist"));
    assert!(mermaid.contains("persist --> __end__([end])"));
}
