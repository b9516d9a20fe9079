//! lopdf adapter
//!
//! Extracts text page by page through lopdf's content-stream decoding.
//! Line endings are normalized the same way the baseline normalizes
//! them, with one blank line closing each page.

use crate::adapter::ExtractorAdapter;
use crate::{Error, Result};
use async_trait::async_trait;
use lopdf::Document;
use std::path::Path;

const NAME: &str = "lopdf";

/// Adapter backed by the lopdf crate
pub struct LopdfAdapter;

impl LopdfAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LopdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn extraction_error(path: &Path, message: impl Into<String>) -> Error {
    Error::ExtractionFailed {
        framework: NAME.to_string(),
        file: path.to_path_buf(),
        message: message.into(),
    }
}

#[async_trait]
impl ExtractorAdapter for LopdfAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let document = Document::load(path).map_err(|e| extraction_error(path, e.to_string()))?;

        let mut pages = Vec::new();
        for &number in document.get_pages().keys() {
            let extracted = document
                .extract_text(&[number])
                .map_err(|e| extraction_error(path, format!("page {}: {}", number, e)))?;

            let mut text = String::new();
            for line in extracted.lines() {
                text.push_str(line.trim_end());
                text.push('\n');
            }
            // Blank line terminating the page.
            text.push('\n');
            pages.push(text);
        }

        tracing::debug!(file = %path.display(), pages = pages.len(), "lopdf extraction complete");
        Ok(pages)
    }
}
