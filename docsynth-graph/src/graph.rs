use std::collections::HashMap;
use std::fmt::Write;

use docsynth_core::DocsynthError;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef, Reversed};

use crate::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Always,
    /// Taken by the refinement router.
    Conditional,
}

/// The fixed transition table as a directed graph.
pub struct WorkflowGraph {
    graph: DiGraph<NodeId, EdgeKind>,
    index: HashMap<NodeId, NodeIndex>,
}

impl WorkflowGraph {
    /// Builds the graph from [`NodeId::successors`] and checks that every node is
    /// reachable from the entry and can reach the end.
    pub fn new() -> Result<Self, DocsynthError> {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        for node in NodeId::ALL {
            index.insert(node, graph.add_node(node));
        }
        for node in NodeId::ALL {
            let successors = node.successors();
            let kind = if successors.len() > 1 {
                EdgeKind::Conditional
            } else {
                EdgeKind::Always
            };
            for next in successors {
                graph.add_edge(index[&node], index[next], kind);
            }
        }

        let workflow = Self { graph, index };
        workflow.validate()?;
        Ok(workflow)
    }

    fn validate(&self) -> Result<(), DocsynthError> {
        let entry = self.index[&NodeId::ENTRY];
        let end = self.index[&NodeId::End];

        let mut reachable = vec![false; self.graph.node_count()];
        let mut dfs = Dfs::new(&self.graph, entry);
        while let Some(idx) = dfs.next(&self.graph) {
            reachable[idx.index()] = true;
        }

        let reversed = Reversed(&self.graph);
        let mut finishes = vec![false; self.graph.node_count()];
        let mut dfs = Dfs::new(reversed, end);
        while let Some(idx) = dfs.next(reversed) {
            finishes[idx.index()] = true;
        }

        for (node, idx) in &self.index {
            if !reachable[idx.index()] {
                return Err(DocsynthError::InvalidConfig(format!(
                    "node '{node}' is unreachable from '{}'",
                    NodeId::ENTRY
                )));
            }
            if !finishes[idx.index()] {
                return Err(DocsynthError::InvalidConfig(format!(
                    "node '{node}' cannot reach '{}'",
                    NodeId::End
                )));
            }
        }
        Ok(())
    }

    pub fn edges(&self) -> Vec<(NodeId, NodeId, EdgeKind)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()],
                    self.graph[edge.target()],
                    *edge.weight(),
                )
            })
            .collect()
    }

    /// Mermaid flowchart of the workflow.
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");
        let _ = writeln!(out, "    __start__([start]) --> {}", NodeId::ENTRY);
        for (from, to, kind) in self.edges() {
            let target = mermaid_id(to);
            match (kind, to) {
                (EdgeKind::Conditional, NodeId::SelfRefine) => {
                    let _ = writeln!(out, "    {from} -.->|iteration < max| {target}");
                }
                (EdgeKind::Conditional, _) => {
                    let _ = writeln!(out, "    {from} -.->|done| {target}");
                }
                (EdgeKind::Always, _) => {
                    let _ = writeln!(out, "    {from} --> {target}");
                }
            }
        }
        out
    }
}

fn mermaid_id(node: NodeId) -> String {
    // `end` is a Mermaid keyword
    match node {
        NodeId::End => "__end__([end])".to_string(),
        other => other.to_string(),
    }
}
