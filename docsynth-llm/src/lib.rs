mod mistral;

// OpenAI-compatible client (always available)
pub mod openai_compatible;

pub use docsynth_core::{Llm, LlmRequest, LlmResponse, Message, Role};
pub use mistral::{
    MistralClient, MISTRAL_BASE_URL, MISTRAL_DEFAULT_MODEL, MISTRAL_MAX_TEMPERATURE,
};
pub use openai_compatible::{
    ChatCompletionRequest, OpenAiCompatibleBuilder, OpenAiCompatibleClient,
};
