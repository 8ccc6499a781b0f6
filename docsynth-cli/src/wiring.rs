use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use docsynth_core::{DocsynthError, SearchTool};
use docsynth_llm::MistralClient;
use docsynth_prompt::FewShotExample;
use docsynth_retrieval::{extract_text, DocumentRetriever, HashEmbedder, RetrieverConfig};
use docsynth_tools::{TavilySearch, UnavailableSearch};

use crate::cli::LlmArgs;

pub fn mistral_client(args: &LlmArgs) -> Result<MistralClient> {
    let api_key = args
        .mistral_api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| DocsynthError::InvalidConfig("MISTRAL_API_KEY is not set".to_string()))?;

    let client = match &args.base_url {
        Some(url) => MistralClient::with_base_url(api_key, url)?,
        None => MistralClient::new(api_key)?,
    };
    Ok(match &args.model {
        Some(model) => client.with_model(model.clone()),
        None => client,
    })
}

/// Tavily when a key is configured; otherwise augmentation is skipped at run time.
pub fn search_tool(api_key: Option<&str>) -> Result<Arc<dyn SearchTool>> {
    match api_key.filter(|key| !key.trim().is_empty()) {
        Some(key) => Ok(Arc::new(TavilySearch::new(key)?)),
        None => {
            tracing::warn!("TAVILY_API_KEY is not set; augmentation will be skipped");
            Ok(Arc::new(UnavailableSearch))
        }
    }
}

pub fn retriever(top_k: usize) -> DocumentRetriever<HashEmbedder> {
    DocumentRetriever::new(
        HashEmbedder::default(),
        RetrieverConfig {
            top_k,
            ..RetrieverConfig::default()
        },
    )
}

pub async fn load_examples(pairs: &[(PathBuf, PathBuf)]) -> Result<Vec<FewShotExample>> {
    let mut examples = Vec::with_capacity(pairs.len());
    for (input, output) in pairs {
        examples.push(FewShotExample {
            input: extract_text(input)
                .await
                .with_context(|| format!("reading example assessment {}", input.display()))?,
            output: tokio::fs::read_to_string(output)
                .await
                .with_context(|| format!("reading example BRD {}", output.display()))?,
        });
    }
    Ok(examples)
}
