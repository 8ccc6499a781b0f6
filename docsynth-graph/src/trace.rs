use crate::NodeId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepStatus {
    NotStarted,
    Failed(String),
    Succeeded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    pub node: NodeId,
    pub status: StepStatus,
}

/// Node executions of one run, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunTrace {
    steps: Vec<TraceStep>,
}

impl RunTrace {
    pub(crate) fn record(&mut self, node: NodeId, status: StepStatus) {
        self.steps.push(TraceStep { node, status });
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn path(&self) -> Vec<NodeId> {
        self.steps.iter().map(|step| step.node).collect()
    }

    pub fn attempts(&self, node: NodeId) -> usize {
        self.steps.iter().filter(|step| step.node == node).count()
    }

    /// Status of the latest execution of `node`.
    pub fn status(&self, node: NodeId) -> StepStatus {
        self.steps
            .iter()
            .rev()
            .find(|step| step.node == node)
            .map(|step| step.status.clone())
            .unwrap_or(StepStatus::NotStarted)
    }
}

/// What a run produced. `(None, None)` means generation failed outright;
/// `(Some, None)` means a document exists but was not persisted.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub run_id: String,
    pub content: Option<String>,
    pub persisted_path: Option<String>,
    pub iteration_count: u32,
    pub trace: RunTrace,
}

impl RunOutcome {
    pub fn into_parts(self) -> (Option<String>, Option<String>) {
        (self.content, self.persisted_path)
    }
}
