use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use docsynth_graph::{WorkflowConfig, WorkflowOptions, DEFAULT_FILE_NAME, DEFAULT_OUTPUT_DIR};
use docsynth_prompt::brd::{DEFAULT_AUGMENTATION_QUERY, DEFAULT_RETRIEVAL_QUESTION};

#[derive(Debug, Parser)]
#[command(
    name = "docsynth",
    version,
    about = "Synthesize Business Requirements Documents from assessment reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full workflow on an assessment report
    Generate(GenerateArgs),
    /// Print the workflow as a Mermaid diagram
    Graph,
    /// Run the augmentation search on its own
    Search(SearchArgs),
    /// Ask the retriever a question about a document
    Retrieve(RetrieveArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Assessment report (.txt, .md, .html, .docx, or .pdf with the `pdf` feature)
    pub input: PathBuf,

    /// Existing BRD to refine instead of generating a new one
    #[arg(long)]
    pub prior: Option<PathBuf>,

    /// Few-shot example as ASSESSMENT_FILE=BRD_FILE; repeatable
    #[arg(long = "example", value_name = "ASSESSMENT=BRD", value_parser = parse_example_pair)]
    pub examples: Vec<(PathBuf, PathBuf)>,

    /// Archive the rendered generation prompt into this directory
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = "prompts")]
    pub save_prompt: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    pub file_name: String,

    #[arg(long)]
    pub max_iterations: Option<u32>,

    #[arg(long)]
    pub samples: Option<usize>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub temperature_step: Option<f32>,

    /// Deadline for each backend call, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[arg(long, default_value_t = 1)]
    pub retry_attempts: usize,

    #[arg(long, default_value_t = 5)]
    pub top_k: usize,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub tavily_api_key: Option<String>,
}

impl GenerateArgs {
    pub fn workflow_config(&self) -> WorkflowConfig {
        let options = WorkflowOptions {
            max_iterations: self.max_iterations,
            base_temperature: self.temperature,
            temperature_step: self.temperature_step,
            sample_count: self.samples,
            backend_timeout: self.timeout.map(Duration::from_secs),
            ..WorkflowOptions::default()
        };
        WorkflowConfig {
            retry_attempts: self.retry_attempts,
            ..WorkflowConfig::default()
        }
        .merge(&options)
    }
}

#[derive(Debug, Args)]
pub struct LlmArgs {
    #[arg(long, env = "MISTRAL_API_KEY", hide_env_values = true)]
    pub mistral_api_key: Option<String>,

    #[arg(long, env = "MISTRAL_MODEL")]
    pub model: Option<String>,

    /// Override the API host, e.g. for a proxy
    #[arg(long, env = "MISTRAL_BASE_URL")]
    pub base_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(default_value = DEFAULT_AUGMENTATION_QUERY)]
    pub query: String,

    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub tavily_api_key: Option<String>,
}

#[derive(Debug, Args)]
pub struct RetrieveArgs {
    pub input: PathBuf,

    #[arg(long, default_value = DEFAULT_RETRIEVAL_QUESTION)]
    pub question: String,

    #[arg(long, default_value_t = 5)]
    pub top_k: usize,
}

fn parse_example_pair(raw: &str) -> Result<(PathBuf, PathBuf), String> {
    let (input, output) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ASSESSMENT=BRD, got '{raw}'"))?;
    if input.trim().is_empty() || output.trim().is_empty() {
        return Err(format!("expected ASSESSMENT=BRD, got '{raw}'"));
    }
    Ok((PathBuf::from(input.trim()), PathBuf::from(output.trim())))
}
