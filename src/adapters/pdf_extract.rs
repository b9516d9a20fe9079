//! pdf-extract adapter
//!
//! The backend only offers whole-document plain text, so page boundaries
//! are recovered heuristically from the triple-newline gaps it leaves
//! between pages.

use crate::adapter::ExtractorAdapter;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::Path;

const NAME: &str = "pdf-extract";

/// Adapter backed by the pdf-extract crate
pub struct PdfExtractAdapter;

impl PdfExtractAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split whole-document text on triple-newline gaps.
///
/// Segments that are blank after trimming are dropped; each surviving
/// page is trimmed and re-terminated with a single blank line.
fn split_gap_pages(text: &str) -> Vec<String> {
    text.split("\n\n\n")
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| format!("{}\n\n", segment.trim()))
        .collect()
}

#[async_trait]
impl ExtractorAdapter for PdfExtractAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let text = pdf_extract::extract_text(path).map_err(|e| Error::ExtractionFailed {
            framework: NAME.to_string(),
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let pages = split_gap_pages(&text);
        tracing::debug!(file = %path.display(), pages = pages.len(), "pdf-extract extraction complete");
        Ok(pages)
    }
}
