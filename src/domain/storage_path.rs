use std::fmt;

use serde::{Deserialize, Serialize};

use super::document_id::DocumentId;

const REPORT_PREFIX: &str = "blood_test_report_";
const REPORT_EXTENSION: &str = "pdf";

/// Location of a staged document, relative to the blob store root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoragePath(String);

impl StoragePath {
    /// Every upload gets its own key; the client's filename never reaches the store.
    pub fn for_document(document_id: &DocumentId) -> Self {
        Self(format!(
            "{}{}.{}",
            REPORT_PREFIX,
            document_id.as_uuid(),
            REPORT_EXTENSION
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
