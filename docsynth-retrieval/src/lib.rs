mod clean;
mod error;
mod extract;
mod hash_embedder;
mod in_memory;
mod retriever;
mod splitter;

pub use clean::clean_text;
pub use error::{ExtractionError, RetrievalError, SplitterConfigError};
pub use extract::extract_text;
pub use hash_embedder::HashEmbedder;
pub use in_memory::InMemoryVectorStore;
pub use retriever::{DocumentRetriever, RetrieverConfig};
pub use splitter::TextSplitter;
