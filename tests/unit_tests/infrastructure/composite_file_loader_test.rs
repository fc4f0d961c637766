use std::sync::Arc;

use async_trait::async_trait;

use bloodwork::application::ports::{FileLoader, FileLoaderError};
use bloodwork::domain::{DocumentId, ReportFormat, StoragePath};
use bloodwork::infrastructure::text_processing::{
    CompositeFileLoader, FileLoaderFactory, PlainTextAdapter,
};

struct FixedLoader(&'static str);

#[async_trait]
impl FileLoader for FixedLoader {
    async fn extract_text(
        &self,
        _data: &[u8],
        _source: &StoragePath,
    ) -> Result<String, FileLoaderError> {
        Ok(self.0.to_string())
    }
}

fn source() -> StoragePath {
    StoragePath::for_document(&DocumentId::new())
}

#[tokio::test]
async fn given_pdf_bytes_when_loading_then_delegates_to_pdf_loader() {
    let loader = CompositeFileLoader::new(vec![
        (
            ReportFormat::Pdf,
            Arc::new(FixedLoader("from pdf")) as Arc<dyn FileLoader>,
        ),
        (
            ReportFormat::Text,
            Arc::new(FixedLoader("from text")) as Arc<dyn FileLoader>,
        ),
    ]);

    let text = loader
        .extract_text(b"%PDF-1.7 ...", &source())
        .await
        .unwrap();

    assert_eq!(text, "from pdf");
}

#[tokio::test]
async fn given_text_bytes_when_loading_then_delegates_to_text_loader() {
    let loader = CompositeFileLoader::new(vec![
        (
            ReportFormat::Pdf,
            Arc::new(FixedLoader("from pdf")) as Arc<dyn FileLoader>,
        ),
        (
            ReportFormat::Text,
            Arc::new(PlainTextAdapter) as Arc<dyn FileLoader>,
        ),
    ]);

    let text = loader
        .extract_text(b"Hello plain text", &source())
        .await
        .unwrap();

    assert_eq!(text, "Hello plain text");
}

#[tokio::test]
async fn given_unregistered_format_when_loading_then_returns_extraction_failed() {
    let loader = CompositeFileLoader::new(vec![(
        ReportFormat::Text,
        Arc::new(PlainTextAdapter) as Arc<dyn FileLoader>,
    )]);

    let result = loader.extract_text(b"%PDF-1.4", &source()).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_default_loader_when_loading_text_report_then_text_is_returned() {
    let loader = FileLoaderFactory::create();

    let text = loader
        .extract_text(b"Creatinine 80 umol/L", &source())
        .await
        .unwrap();

    assert_eq!(text, "Creatinine 80 umol/L");
}
