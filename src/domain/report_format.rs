const PDF_MAGIC: &[u8] = b"%PDF-";

/// How a staged report's bytes should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Pdf,
    Text,
}

impl ReportFormat {
    /// Uploads are named `.pdf` regardless of what the client sent, so the
    /// format comes from the content rather than the filename.
    pub fn sniff(data: &[u8]) -> Self {
        let start = data
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(data.len());
        if data[start..].starts_with(PDF_MAGIC) {
            Self::Pdf
        } else {
            Self::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "text",
        }
    }
}
