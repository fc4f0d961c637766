use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ReportFormat, StoragePath};

/// Routes each document to the loader registered for its sniffed format.
pub struct CompositeFileLoader {
    adapters: HashMap<ReportFormat, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ReportFormat, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        source: &StoragePath,
    ) -> Result<String, FileLoaderError> {
        let format = ReportFormat::sniff(data);
        let adapter = self.adapters.get(&format).ok_or_else(|| {
            FileLoaderError::ExtractionFailed(format!(
                "no loader for {} documents",
                format.as_str()
            ))
        })?;

        tracing::debug!(format = format.as_str(), path = %source, "Extracting report text");
        adapter.extract_text(data, source).await
    }
}
