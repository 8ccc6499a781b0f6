use std::collections::HashMap;

use docsynth_core::{DocsynthError, Value};
use regex::Regex;

/// `{{name}}`-style template. Every placeholder must have a value at render time.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn variables(&self) -> Result<Vec<String>, DocsynthError> {
        let pattern = placeholder_pattern()?;
        let mut names: Vec<String> = Vec::new();
        for caps in pattern.captures_iter(&self.template) {
            let name = caps[1].to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    pub fn render(&self, vars: &HashMap<String, Value>) -> Result<String, DocsynthError> {
        let pattern = placeholder_pattern()?;
        if let Some(missing) = pattern
            .captures_iter(&self.template)
            .map(|caps| caps[1].to_string())
            .find(|key| !vars.contains_key(key))
        {
            return Err(DocsynthError::InvalidConfig(format!(
                "missing template variable '{missing}'"
            )));
        }

        let rendered = pattern.replace_all(&self.template, |caps: &regex::Captures| {
            match vars.get(&caps[1]) {
                Some(value) => value
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| value.to_string()),
                None => String::new(),
            }
        });
        Ok(rendered.into_owned())
    }
}

fn placeholder_pattern() -> Result<Regex, DocsynthError> {
    Regex::new(r"\{\{\s*(\w+)\s*\}\}").map_err(|e| DocsynthError::InvalidConfig(e.to_string()))
}
