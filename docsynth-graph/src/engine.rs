use std::sync::Arc;

use docsynth_agent::{RefinementStep, SamplingGenerator};
use docsynth_core::{
    with_deadline, ContextRetriever, DocsynthError, DocumentSink, Llm, Retrying, SearchTool,
};
use docsynth_prompt::{FewShotExample, GenerationPrompt, PromptArchive};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    route, NodeId, RunOutcome, RunTrace, StepStatus, TracingObserver, WorkflowConfig,
    WorkflowGraph, WorkflowObserver, WorkflowOptions, WorkflowState,
};

type StepResult = (WorkflowState, Result<(), DocsynthError>);

/// Per-run collaborators derived from the merged config.
struct RunContext<'a> {
    config: &'a WorkflowConfig,
    sampler: SamplingGenerator,
    refiner: RefinementStep,
}

/// Drives one document through retrieval, sampling, augmentation, refinement and
/// persistence. Node failures degrade the state instead of aborting the run.
pub struct WorkflowEngine {
    llm: Arc<dyn Llm>,
    retriever: Arc<dyn ContextRetriever>,
    search: Arc<dyn SearchTool>,
    sink: Arc<dyn DocumentSink>,
    prompt: GenerationPrompt,
    archive: Option<PromptArchive>,
    observer: Arc<dyn WorkflowObserver>,
    config: WorkflowConfig,
    graph: WorkflowGraph,
}

impl WorkflowEngine {
    pub fn builder(llm: Arc<dyn Llm>) -> WorkflowEngineBuilder {
        WorkflowEngineBuilder::new(llm)
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    /// Runs the workflow once. A non-blank `prior_output` replaces initial generation.
    pub async fn run(
        &self,
        input_text: impl Into<String>,
        prior_output: Option<String>,
    ) -> RunOutcome {
        self.execute(input_text.into(), prior_output, self.config.clone())
            .await
    }

    pub async fn run_with_options(
        &self,
        input_text: impl Into<String>,
        prior_output: Option<String>,
        options: &WorkflowOptions,
    ) -> Result<RunOutcome, DocsynthError> {
        let config = self.config.merge(options);
        config.validate()?;
        Ok(self.execute(input_text.into(), prior_output, config).await)
    }

    async fn execute(
        &self,
        input_text: String,
        prior_output: Option<String>,
        config: WorkflowConfig,
    ) -> RunOutcome {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("workflow_run", run_id = %run_id);
        self.drive(run_id.clone(), input_text, prior_output, &config)
            .instrument(span)
            .await
    }

    async fn drive(
        &self,
        run_id: String,
        input_text: String,
        mut prior_output: Option<String>,
        config: &WorkflowConfig,
    ) -> RunOutcome {
        // With retry on, the deadline bounds each attempt inside `Retrying`.
        let (llm, call_deadline): (Arc<dyn Llm>, _) = if config.retry_attempts > 1 {
            let retrying = Retrying::new(self.llm.clone(), config.retry_attempts)
                .with_attempt_deadline(config.backend_timeout);
            (Arc::new(retrying), None)
        } else {
            (self.llm.clone(), config.backend_timeout)
        };
        let ctx = RunContext {
            config,
            sampler: SamplingGenerator::new(llm.clone())
                .with_temperature_step(config.temperature_step)
                .with_deadline(call_deadline),
            refiner: RefinementStep::new(llm)
                .with_temperature(config.base_temperature)
                .with_deadline(call_deadline),
        };

        tracing::info!(
            input_chars = input_text.chars().count(),
            seeded = prior_output.is_some(),
            max_iterations = config.max_iterations,
            "workflow started"
        );

        let mut state = WorkflowState::new(input_text);
        let mut trace = RunTrace::default();
        let mut refine_attempts = 0u32;
        let mut node = NodeId::ENTRY;

        while !node.is_terminal() {
            self.observer.on_node_enter(node, &state);
            let (next_state, result) = match node {
                NodeId::RetrieveContext => self.retrieve_context(state, &ctx).await,
                NodeId::GenerateInitial => {
                    self.generate_initial(state, prior_output.take(), &ctx).await
                }
                NodeId::AugmentWithTool => self.augment(state, &ctx).await,
                NodeId::SelfRefine => {
                    refine_attempts += 1;
                    self.self_refine(state, &ctx).await
                }
                NodeId::Persist => self.persist(state, &ctx).await,
                NodeId::End => (state, Ok(())),
            };
            state = next_state;

            match result {
                Ok(()) => trace.record(node, StepStatus::Succeeded),
                Err(error) => {
                    tracing::warn!(node = %node, error = %error, "node failed");
                    self.observer.on_error(node, &error);
                    trace.record(node, StepStatus::Failed(error.to_string()));
                }
            }
            self.observer.on_node_exit(node, &state);

            node = route(node, &state, refine_attempts, config);
        }

        tracing::info!(
            iterations = state.iteration_count,
            produced = state.output_content.is_some(),
            persisted = state.persisted_path.is_some(),
            "workflow finished"
        );

        RunOutcome {
            run_id,
            content: state.output_content,
            persisted_path: state.persisted_path,
            iteration_count: state.iteration_count,
            trace,
        }
    }

    async fn retrieve_context(&self, mut state: WorkflowState, ctx: &RunContext<'_>) -> StepResult {
        let documents = vec![state.input_text.clone()];
        let answer = with_deadline(
            ctx.config.backend_timeout,
            self.retriever
                .query(&ctx.config.retrieval_question, &documents),
        )
        .await;

        match answer {
            Ok(answer) if answer.trim().is_empty() => {
                tracing::debug!("retrieval returned no context");
                (state, Ok(()))
            }
            Ok(answer) => {
                tracing::info!(context_chars = answer.len(), "context retrieved");
                state.retrieved_context = Some(answer);
                (state, Ok(()))
            }
            Err(error) => (state, Err(error)),
        }
    }

    async fn generate_initial(
        &self,
        mut state: WorkflowState,
        prior_output: Option<String>,
        ctx: &RunContext<'_>,
    ) -> StepResult {
        state.iteration_count = 0;

        if let Some(seed) = prior_output.filter(|seed| !seed.trim().is_empty()) {
            tracing::info!("continuing from prior output");
            state.output_content = Some(seed);
            return (state, Ok(()));
        }

        let prompt = match self
            .prompt
            .render(&state.input_text, state.retrieved_context.as_deref())
        {
            Ok(prompt) => prompt,
            Err(error) => {
                state.output_content = None;
                return (state, Err(error));
            }
        };

        if let Some(archive) = &self.archive {
            if let Err(error) = archive.save(&prompt).await {
                tracing::warn!(error = %error, "could not archive prompt");
            }
        }

        match ctx
            .sampler
            .sample(&prompt, ctx.config.base_temperature, ctx.config.sample_count)
            .await
        {
            Ok(report) => {
                tracing::info!(
                    candidates = report.all_candidates.len(),
                    selected = report.selected_index,
                    mean_similarity = report.mean_pairwise_similarity,
                    similarity_stddev = report.similarity_stddev,
                    "initial document selected"
                );
                state.output_content = Some(report.selected);
                (state, Ok(()))
            }
            Err(error) => {
                state.output_content = None;
                (state, Err(error))
            }
        }
    }

    async fn augment(&self, mut state: WorkflowState, ctx: &RunContext<'_>) -> StepResult {
        let Some(content) = state.output_content.take() else {
            return (state, Err(DocsynthError::EmptyContent));
        };

        let query = ctx.config.augmentation_query.as_str();
        let result = with_deadline(ctx.config.backend_timeout, async {
            self.search
                .search(query)
                .await
                .map_err(|err| DocsynthError::ToolCallFailed {
                    tool_name: self.search.name().to_string(),
                    reason: err.to_string(),
                })
        })
        .await;

        match result {
            Ok(extra) if !extra.trim().is_empty() => {
                state.output_content = Some(format!("{content}\n\n{}", extra.trim()));
                (state, Ok(()))
            }
            Ok(_) => {
                state.output_content = Some(content);
                (state, Ok(()))
            }
            Err(error) => {
                state.output_content = Some(content);
                (state, Err(error))
            }
        }
    }

    async fn self_refine(&self, mut state: WorkflowState, ctx: &RunContext<'_>) -> StepResult {
        let Some(current) = state.output_content.take() else {
            return (state, Err(DocsynthError::EmptyContent));
        };

        match ctx.refiner.refine(&state.input_text, &current).await {
            Ok(revised) if revised.trim().is_empty() => {
                tracing::warn!("refinement returned empty content");
                (state, Err(DocsynthError::EmptyContent))
            }
            Ok(revised) => {
                state.output_content = Some(revised);
                state.iteration_count += 1;
                tracing::info!(iteration = state.iteration_count, "refinement applied");
                (state, Ok(()))
            }
            Err(error) => (state, Err(error)),
        }
    }

    async fn persist(&self, mut state: WorkflowState, ctx: &RunContext<'_>) -> StepResult {
        let saved = match state.output_content.as_deref() {
            Some(content) => with_deadline(ctx.config.backend_timeout, self.sink.save(content)).await,
            None => Err(DocsynthError::EmptyContent),
        };

        match saved {
            Ok(path) => {
                state.persisted_path = Some(path);
                (state, Ok(()))
            }
            Err(error) => (state, Err(error)),
        }
    }
}

pub struct WorkflowEngineBuilder {
    llm: Arc<dyn Llm>,
    retriever: Option<Arc<dyn ContextRetriever>>,
    search: Option<Arc<dyn SearchTool>>,
    sink: Option<Arc<dyn DocumentSink>>,
    examples: Vec<FewShotExample>,
    archive: Option<PromptArchive>,
    observer: Option<Arc<dyn WorkflowObserver>>,
    config: WorkflowConfig,
}

impl WorkflowEngineBuilder {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self {
            llm,
            retriever: None,
            search: None,
            sink: None,
            examples: Vec::new(),
            archive: None,
            observer: None,
            config: WorkflowConfig::default(),
        }
    }

    pub fn retriever(mut self, retriever: Arc<dyn ContextRetriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn search_tool(mut self, search: Arc<dyn SearchTool>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn DocumentSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn examples(mut self, examples: Vec<FewShotExample>) -> Self {
        self.examples = examples;
        self
    }

    pub fn prompt_archive(mut self, archive: PromptArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn WorkflowObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<WorkflowEngine, DocsynthError> {
        self.config.validate()?;
        let missing = |what: &str| DocsynthError::InvalidConfig(format!("{what} is required"));

        Ok(WorkflowEngine {
            llm: self.llm,
            retriever: self.retriever.ok_or_else(|| missing("retriever"))?,
            search: self.search.ok_or_else(|| missing("search tool"))?,
            sink: self.sink.ok_or_else(|| missing("document sink"))?,
            prompt: GenerationPrompt::new().with_examples(self.examples),
            archive: self.archive,
            observer: self
                .observer
                .unwrap_or_else(|| Arc::new(TracingObserver)),
            config: self.config,
            graph: WorkflowGraph::new()?,
        })
    }
}
