use async_trait::async_trait;
use docsynth_core::{
    ContextRetriever, DocsynthError, Document, Embedding, EmbeddingError, SearchResult,
    VectorStore,
};

use crate::{InMemoryVectorStore, RetrievalError, TextSplitter};

#[derive(Clone, Debug)]
pub struct RetrieverConfig {
    pub top_k: usize,
    /// Chunks scoring below this cosine similarity are dropped.
    pub score_threshold: Option<f32>,
    pub splitter: TextSplitter,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            score_threshold: None,
            splitter: TextSplitter::default(),
        }
    }
}

/// Answers questions from the documents passed with each query.
///
/// Every query builds a fresh in-memory index, so nothing is shared between runs.
pub struct DocumentRetriever<E> {
    embedder: E,
    config: RetrieverConfig,
}

impl<E> DocumentRetriever<E>
where
    E: Embedding,
{
    pub fn new(embedder: E, config: RetrieverConfig) -> Self {
        Self { embedder, config }
    }

    pub async fn search(
        &self,
        question: &str,
        documents: &[String],
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        let store = InMemoryVectorStore::new();

        let mut chunks = Vec::new();
        for (doc_idx, document) in documents.iter().enumerate() {
            for (chunk_idx, chunk) in self.config.splitter.split(document).into_iter().enumerate() {
                chunks.push(Document::new(format!("doc{doc_idx}-chunk{chunk_idx}"), chunk));
            }
        }
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = chunks.iter().map(|doc| doc.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            ))
            .into());
        }
        for (doc, embedding) in chunks.iter_mut().zip(embeddings) {
            doc.embedding = Some(embedding);
        }
        store.add(chunks).await?;

        let query_embedding = self.embedder.embed(question).await?;
        let mut results = store.search(&query_embedding, self.config.top_k).await?;
        if let Some(threshold) = self.config.score_threshold {
            results.retain(|res| res.score >= threshold);
        }
        tracing::debug!(hits = results.len(), "context retrieval finished");
        Ok(results)
    }
}

#[async_trait]
impl<E> ContextRetriever for DocumentRetriever<E>
where
    E: Embedding,
{
    async fn query(&self, question: &str, documents: &[String]) -> Result<String, DocsynthError> {
        let results = self.search(question, documents).await?;
        Ok(results
            .into_iter()
            .map(|res| res.document.content)
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
