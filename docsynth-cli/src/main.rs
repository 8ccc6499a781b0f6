mod cli;
mod wiring;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use docsynth_core::{ContextRetriever, SearchTool};
use docsynth_graph::{FileSink, StepStatus, WorkflowEngine, WorkflowGraph};
use docsynth_prompt::PromptArchive;
use docsynth_retrieval::extract_text;
use tracing::info;

use crate::cli::{Cli, Command, GenerateArgs, RetrieveArgs, SearchArgs};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate(args).await,
        Command::Graph => {
            print!("{}", WorkflowGraph::new()?.to_mermaid());
            Ok(())
        }
        Command::Search(args) => search(args).await,
        Command::Retrieve(args) => retrieve(args).await,
    }
}

async fn generate(args: GenerateArgs) -> Result<()> {
    let config = args.workflow_config();
    let llm = wiring::mistral_client(&args.llm)?;
    info!(model = %llm.model(), "using Mistral backend");

    let input_text = extract_text(&args.input)
        .await
        .with_context(|| format!("extracting {}", args.input.display()))?;
    let prior_output = match &args.prior {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading prior BRD {}", path.display()))?,
        ),
        None => None,
    };
    let examples = wiring::load_examples(&args.examples).await?;

    let mut builder = WorkflowEngine::builder(Arc::new(llm))
        .retriever(Arc::new(wiring::retriever(args.top_k)))
        .search_tool(wiring::search_tool(args.tavily_api_key.as_deref())?)
        .sink(Arc::new(
            FileSink::new(&args.output_dir).with_file_name(args.file_name.clone()),
        ))
        .examples(examples)
        .config(config);
    if let Some(dir) = &args.save_prompt {
        builder = builder.prompt_archive(PromptArchive::new(dir));
    }
    let engine = builder.build()?;

    let outcome = engine.run(input_text, prior_output).await;
    for step in outcome.trace.steps() {
        if let StepStatus::Failed(reason) = &step.status {
            tracing::warn!(node = %step.node, %reason, "step degraded");
        }
    }

    let (content, persisted_path) = outcome.into_parts();
    let Some(content) = content else {
        bail!("no document was generated; see the log for failing steps");
    };
    println!("{content}");
    match persisted_path {
        Some(path) => info!(%path, "BRD saved"),
        None => tracing::warn!("BRD was generated but could not be saved"),
    }
    Ok(())
}

async fn search(args: SearchArgs) -> Result<()> {
    let tool = wiring::search_tool(args.tavily_api_key.as_deref())?;
    let answer = tool
        .search(&args.query)
        .await
        .with_context(|| format!("{} search failed", tool.name()))?;
    println!("{answer}");
    Ok(())
}

async fn retrieve(args: RetrieveArgs) -> Result<()> {
    let text = extract_text(&args.input)
        .await
        .with_context(|| format!("extracting {}", args.input.display()))?;
    let answer = wiring::retriever(args.top_k)
        .query(&args.question, &[text])
        .await?;
    if answer.is_empty() {
        bail!("no relevant context found");
    }
    println!("{answer}");
    Ok(())
}
