use std::collections::HashMap;

use docsynth_core::{DocsynthError, Value};

use crate::brd::REFINE_USER_TEMPLATE;
use crate::PromptTemplate;

/// User turn for one critique-and-rewrite pass.
pub fn refinement_prompt(assessment: &str, draft: &str) -> Result<String, DocsynthError> {
    let mut vars = HashMap::new();
    vars.insert("assessment".to_string(), Value::from(assessment));
    vars.insert("draft".to_string(), Value::from(draft));
    PromptTemplate::new(REFINE_USER_TEMPLATE).render(&vars)
}
