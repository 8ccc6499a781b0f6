use std::path::{Path, PathBuf};

use async_trait::async_trait;
use docsynth_core::{DocsynthError, DocumentSink};

pub const DEFAULT_OUTPUT_DIR: &str = "generated_brds";
pub const DEFAULT_FILE_NAME: &str = "generated_brd.md";
pub const DOCUMENT_HEADING: &str = "# Generated Business Requirements Document";

/// Writes finished documents as Markdown files. Each save replaces the previous file.
#[derive(Clone, Debug)]
pub struct FileSink {
    dir: PathBuf,
    file_name: String,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

#[async_trait]
impl DocumentSink for FileSink {
    async fn save(&self, content: &str) -> Result<String, DocsynthError> {
        if content.trim().is_empty() {
            return Err(DocsynthError::EmptyContent);
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| DocsynthError::Persistence(err.to_string()))?;

        let path = self.path();
        let body = format!("{DOCUMENT_HEADING}\n\n{}\n", content.trim_end());
        tokio::fs::write(&path, body)
            .await
            .map_err(|err| DocsynthError::Persistence(err.to_string()))?;

        tracing::info!(path = %path.display(), "document saved");
        Ok(path.display().to_string())
    }
}
