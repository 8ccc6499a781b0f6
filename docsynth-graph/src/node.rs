use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{WorkflowConfig, WorkflowState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    RetrieveContext,
    GenerateInitial,
    AugmentWithTool,
    SelfRefine,
    Persist,
    End,
}

impl NodeId {
    pub const ENTRY: NodeId = NodeId::RetrieveContext;

    pub const ALL: [NodeId; 6] = [
        NodeId::RetrieveContext,
        NodeId::GenerateInitial,
        NodeId::AugmentWithTool,
        NodeId::SelfRefine,
        NodeId::Persist,
        NodeId::End,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeId::RetrieveContext => "retrieve_context",
            NodeId::GenerateInitial => "generate_initial",
            NodeId::AugmentWithTool => "augment_with_tool",
            NodeId::SelfRefine => "self_refine",
            NodeId::Persist => "persist",
            NodeId::End => "end",
        }
    }

    /// Every node this one may hand over to.
    pub fn successors(self) -> &'static [NodeId] {
        match self {
            NodeId::RetrieveContext => &[NodeId::GenerateInitial],
            NodeId::GenerateInitial => &[NodeId::AugmentWithTool],
            NodeId::AugmentWithTool => &[NodeId::SelfRefine],
            NodeId::SelfRefine => &[NodeId::SelfRefine, NodeId::Persist],
            NodeId::Persist => &[NodeId::End],
            NodeId::End => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self == NodeId::End
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the node that runs after `from`.
///
/// `refine_attempts` counts every SelfRefine execution so far, failed ones included.
pub fn route(
    from: NodeId,
    state: &WorkflowState,
    refine_attempts: u32,
    config: &WorkflowConfig,
) -> NodeId {
    match from {
        NodeId::RetrieveContext => NodeId::GenerateInitial,
        NodeId::GenerateInitial => NodeId::AugmentWithTool,
        NodeId::AugmentWithTool => NodeId::SelfRefine,
        NodeId::SelfRefine => {
            if state.iteration_count < config.max_iterations
                && refine_attempts < config.refine_attempt_limit()
            {
                NodeId::SelfRefine
            } else {
                NodeId::Persist
            }
        }
        NodeId::Persist | NodeId::End => NodeId::End,
    }
}
