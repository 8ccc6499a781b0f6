use std::collections::HashMap;

use docsynth_core::{DocsynthError, Value};
use serde::{Deserialize, Serialize};

use crate::brd::{
    EXAMPLES_PREFIX, EXAMPLE_PROMPT_TEMPLATE, MAIN_PROMPT_TEMPLATE, NO_CONTEXT, STANDARD_SECTIONS,
};
use crate::PromptTemplate;

/// One worked input/output pair shown to the model ahead of the real task.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FewShotExample {
    pub input: String,
    pub output: String,
}

/// Builds the user turn for initial document generation.
#[derive(Clone, Debug, Default)]
pub struct GenerationPrompt {
    examples: Vec<FewShotExample>,
}

impl GenerationPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_examples(mut self, examples: Vec<FewShotExample>) -> Self {
        self.examples = examples;
        self
    }

    pub fn examples(&self) -> &[FewShotExample] {
        &self.examples
    }

    pub fn render(
        &self,
        assessment: &str,
        rag_context: Option<&str>,
    ) -> Result<String, DocsynthError> {
        let context = rag_context
            .map(str::trim)
            .filter(|ctx| !ctx.is_empty())
            .unwrap_or(NO_CONTEXT);

        let mut vars = HashMap::new();
        vars.insert(
            "sections".to_string(),
            Value::from(STANDARD_SECTIONS.join("\n")),
        );
        vars.insert("assessment_report".to_string(), Value::from(assessment));
        vars.insert("rag_context".to_string(), Value::from(context));
        let main = PromptTemplate::new(MAIN_PROMPT_TEMPLATE).render(&vars)?;

        if self.examples.is_empty() {
            return Ok(main);
        }

        let example_template = PromptTemplate::new(EXAMPLE_PROMPT_TEMPLATE);
        let mut parts = vec![EXAMPLES_PREFIX.to_string()];
        for example in &self.examples {
            let mut vars = HashMap::new();
            vars.insert("input".to_string(), Value::from(example.input.as_str()));
            vars.insert("output".to_string(), Value::from(example.output.as_str()));
            parts.push(example_template.render(&vars)?);
        }
        parts.push(main);
        Ok(parts.join("\n\n"))
    }
}
