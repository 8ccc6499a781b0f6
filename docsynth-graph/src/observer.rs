use docsynth_core::DocsynthError;

use crate::{NodeId, WorkflowState};

pub trait WorkflowObserver: Send + Sync {
    fn on_node_enter(&self, _node: NodeId, _state: &WorkflowState) {}
    fn on_node_exit(&self, _node: NodeId, _state: &WorkflowState) {}
    fn on_error(&self, _node: NodeId, _error: &DocsynthError) {}
}

/// Emits node transitions as `tracing` debug events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl WorkflowObserver for TracingObserver {
    fn on_node_enter(&self, node: NodeId, state: &WorkflowState) {
        tracing::debug!(
            node = %node,
            iteration = state.iteration_count,
            has_output = state.output_content.is_some(),
            "entering node"
        );
    }

    fn on_node_exit(&self, node: NodeId, state: &WorkflowState) {
        tracing::debug!(
            node = %node,
            iteration = state.iteration_count,
            has_output = state.output_content.is_some(),
            "leaving node"
        );
    }
}
