use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::StoragePath;

use super::text_sanitizer::sanitize_extracted_text;

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        source: &StoragePath,
    ) -> Result<String, FileLoaderError> {
        let raw = std::str::from_utf8(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;

        let text = sanitize_extracted_text(raw);
        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(source.to_string()));
        }
        Ok(text)
    }
}
