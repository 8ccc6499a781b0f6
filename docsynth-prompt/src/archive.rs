use std::path::{Path, PathBuf};

use chrono::Local;
use docsynth_core::DocsynthError;

const PROMPT_FILE_PREFIX: &str = "prompt_";
const PROMPT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes rendered prompts to timestamped text files for later inspection.
#[derive(Clone, Debug)]
pub struct PromptArchive {
    dir: PathBuf,
}

impl PromptArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn save(&self, prompt: &str) -> Result<PathBuf, DocsynthError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| DocsynthError::Persistence(err.to_string()))?;

        let stamp = Local::now().format(PROMPT_TIMESTAMP_FORMAT);
        let path = self.dir.join(format!("{PROMPT_FILE_PREFIX}{stamp}.txt"));
        tokio::fs::write(&path, prompt)
            .await
            .map_err(|err| DocsynthError::Persistence(err.to_string()))?;

        tracing::debug!(path = %path.display(), "prompt archived");
        Ok(path)
    }
}
