use std::sync::LazyLock;

use regex::Regex;

const MAX_LOGGED_CHARS: usize = 100;

static CREDENTIALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?P<key>bearer\s+|(?:api_key|password|secret|token)=)[^\s&"']+"#)
        .unwrap()
});

/// Renders a user's query for log output: trimmed, cut to a fixed number of
/// characters, with anything that looks like a credential masked.
pub fn redact_query(query: &str) -> String {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return "[EMPTY]".to_string();
    }

    let shown = match trimmed.char_indices().nth(MAX_LOGGED_CHARS) {
        Some((cut, _)) => format!(
            "{}... ({} chars total)",
            &trimmed[..cut],
            trimmed.chars().count()
        ),
        None => trimmed.to_string(),
    };

    CREDENTIALS
        .replace_all(&shown, "${key}[REDACTED]")
        .into_owned()
}
