mod config;
mod engine;
mod graph;
mod node;
mod observer;
mod sink;
mod state;
mod trace;

pub use config::{WorkflowConfig, WorkflowOptions};
pub use engine::{WorkflowEngine, WorkflowEngineBuilder};
pub use graph::{EdgeKind, WorkflowGraph};
pub use node::{route, NodeId};
pub use observer::{TracingObserver, WorkflowObserver};
pub use sink::{FileSink, DEFAULT_FILE_NAME, DEFAULT_OUTPUT_DIR, DOCUMENT_HEADING};
pub use state::WorkflowState;
pub use trace::{RunOutcome, RunTrace, StepStatus, TraceStep};
