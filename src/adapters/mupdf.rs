//! MuPDF adapter, the comparison baseline
//!
//! Walks the structured text page (blocks, then lines, then characters)
//! and normalizes trailing whitespace at each level, so the baseline text
//! never carries trailing blanks that would skew alignment scores for the
//! other backends.

use crate::adapter::ExtractorAdapter;
use crate::{Error, Result};
use async_trait::async_trait;
use mupdf::{Document, TextPageFlags};
use std::path::Path;

const NAME: &str = "mupdf";

/// Baseline adapter backed by the MuPDF library
pub struct MupdfAdapter;

impl MupdfAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MupdfAdapter {
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

/// Drop trailing whitespace from the accumulated page text.
///
/// Applied to the whole accumulator rather than the current line, so a
/// whitespace-only line collapses into the previous line terminator
/// instead of surviving as a blank line.
fn trim_end_in_place(text: &mut String) {
    let end = text.trim_end().len();
    text.truncate(end);
}

#[async_trait]
impl ExtractorAdapter for MupdfAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let path_str = path
            .to_str()
            .ok_or_else(|| extraction_error(path, "path is not valid UTF-8"))?;

        let document =
            Document::open(path_str).map_err(|e| extraction_error(path, e.to_string()))?;

        let mut pages = Vec::new();
        for page_result in document
            .pages()
            .map_err(|e| extraction_error(path, e.to_string()))?
        {
            let page = page_result.map_err(|e| extraction_error(path, e.to_string()))?;
            // Empty flags: no image blocks, no ligature/whitespace preservation.
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| extraction_error(path, e.to_string()))?;

            let mut text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    for ch in line.chars() {
                        text.push(ch.char().unwrap_or('\u{FFFD}'));
                    }
                    trim_end_in_place(&mut text);
                    text.push('\n');
                }
                trim_end_in_place(&mut text);
                text.push_str("\n\n");
            }
            pages.push(text);
        }

        tracing::debug!(file = %path.display(), pages = pages.len(), "mupdf extraction complete");
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testutil::{sample_pdf_bytes, write_pdf};

    #[test]
    fn test_trim_end_in_place() {
        let mut text = String::from("word  \t\n");
        trim_end_in_place(&mut text);
        assert_eq!(text, "word");

        let mut blank = String::from("   ");
        trim_end_in_place(&mut blank);
        assert_eq!(blank, "");
    }

    #[tokio::test]
    async fn test_extracts_one_string_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = sample_pdf_bytes(&["Hello World", "Second Page"]);
        let path = write_pdf(dir.path(), "sample.pdf", &bytes);

        let adapter = MupdfAdapter::new();
        let pages = adapter.extract_pages(&path).await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], "Hello World\n\n");
        assert!(pages[1].contains("Second Page"));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let adapter = MupdfAdapter::new();
        let err = adapter
            .extract_pages(Path::new("no_such_file.pdf"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("mupdf"));
    }
}
