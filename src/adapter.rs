//! Adapter trait implemented by every extraction backend

use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// Uniform interface over PDF text extraction backends.
///
/// Each adapter turns one document into an ordered list of per-page text
/// strings. Page strings may carry trailing whitespace or blank lines; the
/// runner joins them with blank-line separators before computing metrics,
/// so adapters only need to agree on page boundaries, not on exact
/// whitespace.
///
/// Timing is measured by the caller around [`extract_pages`], never inside
/// an adapter, so all backends are timed under the same rules.
///
/// [`extract_pages`]: ExtractorAdapter::extract_pages
#[async_trait]
pub trait ExtractorAdapter: Send + Sync {
    /// Stable identifier used as the key in reports and summaries
    fn name(&self) -> &str;

    /// Extract the document at `path` as one text string per page.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ExtractionFailed`] when the backend cannot
    /// open or extract the document. Adapters with softer failure contracts
    /// (the external server adapter) may instead return an empty page list.
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}
