use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::StoragePath;

use super::text_sanitizer::sanitize_extracted_text;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts report text page by page with `pdf_oxide`.
///
/// Parsing is CPU-bound and can stall on malformed files, so it runs on the
/// blocking pool under a deadline.
pub struct PdfAdapter {
    timeout: Duration,
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// pdf_oxide only opens files, so the bytes are spilled to a temp file that
/// lives for the duration of the parse.
fn extract_report(data: &[u8]) -> Result<Vec<String>, FileLoaderError> {
    let mut spill = tempfile::NamedTempFile::new()
        .and_then(|mut file| file.write_all(data).map(|_| file))
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("spilling PDF to disk: {e}")))?;
    spill
        .flush()
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("spilling PDF to disk: {e}")))?;

    let mut doc = PdfDocument::open(spill.path())
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;
    let page_count = doc.page_count().map_err(|e| {
        FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
    })?;

    let mut pages = Vec::with_capacity(page_count);
    for page_index in 0..page_count {
        match doc.extract_text(page_index) {
            Ok(raw) => {
                let text = sanitize_extracted_text(&raw);
                if !text.is_empty() {
                    pages.push(text);
                }
            }
            Err(e) => tracing::debug!(page = page_index, error = %e, "Skipping unreadable page"),
        }
    }

    Ok(pages)
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(path = %source, bytes = data.len()))]
    async fn extract_text(
        &self,
        data: &[u8],
        source: &StoragePath,
    ) -> Result<String, FileLoaderError> {
        let owned = data.to_vec();
        let task = tokio::task::spawn_blocking(move || extract_report(&owned));

        let pages = tokio::time::timeout(self.timeout, task)
            .await
            .map_err(|_| FileLoaderError::Timeout(self.timeout))?
            .map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("extraction task failed: {e}"))
            })??;

        tracing::info!(pages_with_text = pages.len(), "PDF text extraction complete");

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(source.to_string()));
        }
        Ok(pages.join("\n\n"))
    }
}
