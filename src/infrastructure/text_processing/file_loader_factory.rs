use std::sync::Arc;

use crate::application::ports::FileLoader;
use crate::domain::ReportFormat;

use super::composite_file_loader::CompositeFileLoader;
use super::pdf_adapter::PdfAdapter;
use super::plain_text_adapter::PlainTextAdapter;

pub struct FileLoaderFactory;

impl FileLoaderFactory {
    /// PDF uploads go through `pdf_oxide`; anything else is read as UTF-8 text.
    pub fn create() -> Arc<dyn FileLoader> {
        let pdf: Arc<dyn FileLoader> = Arc::new(PdfAdapter::new());
        let text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
        Arc::new(CompositeFileLoader::new(vec![
            (ReportFormat::Pdf, pdf),
            (ReportFormat::Text, text),
        ]))
    }
}
