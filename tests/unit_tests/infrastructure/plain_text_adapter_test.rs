use bloodwork::application::ports::{FileLoader, FileLoaderError};
use bloodwork::domain::{DocumentId, StoragePath};
use bloodwork::infrastructure::text_processing::PlainTextAdapter;

fn source() -> StoragePath {
    StoragePath::for_document(&DocumentId::new())
}

#[tokio::test]
async fn given_utf8_report_when_extracting_then_returns_sanitized_text() {
    let data = "Glucose   5.4 mmol/L\n\n\n\nHbA1c 38".as_bytes();

    let text = PlainTextAdapter.extract_text(data, &source()).await.unwrap();

    assert_eq!(text, "Glucose 5.4 mmol/L\n\nHbA1c 38");
}

#[tokio::test]
async fn given_invalid_utf8_when_extracting_then_returns_extraction_failed() {
    let data = [0xff, 0xfe, 0xfd];

    let result = PlainTextAdapter.extract_text(&data, &source()).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_blank_document_when_extracting_then_returns_no_text_found() {
    let result = PlainTextAdapter.extract_text(b" \n\t ", &source()).await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(_))));
}
