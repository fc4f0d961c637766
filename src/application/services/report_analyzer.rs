use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{AnalysisError, Analyzer, BlobStore, FileLoader, LlmClient};
use crate::domain::{AnalysisQuery, StoragePath};

pub const REPORT_PLACEHOLDER: &str = "{report}";

/// Single-agent report analysis: read the staged report, extract its text
/// and ask the model the user's question with the report as context.
pub struct ReportAnalyzer {
    blob_store: Arc<dyn BlobStore>,
    file_loader: Arc<dyn FileLoader>,
    llm_client: Arc<dyn LlmClient>,
    system_prompt_template: String,
    max_report_chars: usize,
}

impl ReportAnalyzer {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        file_loader: Arc<dyn FileLoader>,
        llm_client: Arc<dyn LlmClient>,
        system_prompt_template: String,
        max_report_chars: usize,
    ) -> Self {
        Self {
            blob_store,
            file_loader,
            llm_client,
            system_prompt_template,
            max_report_chars,
        }
    }

    fn build_system_prompt(&self, report: &str) -> String {
        let report = truncate_chars(report, self.max_report_chars);
        if self.system_prompt_template.contains(REPORT_PLACEHOLDER) {
            self.system_prompt_template.replace(REPORT_PLACEHOLDER, report)
        } else {
            format!("{}\n\n{}", self.system_prompt_template, report)
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl Analyzer for ReportAnalyzer {
    #[tracing::instrument(skip(self, query), fields(path = %document))]
    async fn analyze(
        &self,
        query: &AnalysisQuery,
        document: &StoragePath,
    ) -> Result<String, AnalysisError> {
        let data = self.blob_store.fetch(document).await?;
        let report = self.file_loader.extract_text(&data, document).await?;
        tracing::debug!(report_chars = report.chars().count(), "Report text extracted");

        let system = self.build_system_prompt(&report);
        let analysis = self.llm_client.complete(&system, query.as_str()).await?;

        Ok(analysis)
    }
}
