mod archive;
pub mod brd;
mod few_shot;
mod refinement;
mod template;

pub use archive::PromptArchive;
pub use few_shot::{FewShotExample, GenerationPrompt};
pub use refinement::refinement_prompt;
pub use template::PromptTemplate;
