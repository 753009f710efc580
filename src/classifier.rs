//! Short error-type labels for consolidated groups.

use crate::normalizer::StaticRegexSet;
use tracing::warn;

/// Label used when a message carries no text at all.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Fallback labels keep at most this many characters of the first line.
pub const FIRST_LINE_LIMIT: usize = 100;

// Ordered by specificity: named error classes win over bare status codes.
static ERROR_TYPE_PATTERNS: StaticRegexSet = StaticRegexSet::new(&[
    (r"(\w+Error):\s", "error_class"),
    (r"(\w+Exception):\s", "exception_class"),
    (r"(\w+Warning):\s", "warning_class"),
    (r"HTTP (\d{3})", "http_status"),
    (r"status[=:\s]+(\d{3})", "status_field"),
]);

/// Extract a short label describing what kind of error `message` is.
pub fn extract_error_type(message: &str) -> String {
    if message.is_empty() {
        return UNKNOWN_ERROR.to_string();
    }

    for index in 0..ERROR_TYPE_PATTERNS.len() {
        let regex = match ERROR_TYPE_PATTERNS.get(index) {
            Ok(regex) => regex,
            Err(e) => {
                warn!(error = %e, "Error type patterns unavailable, using first line");
                break;
            }
        };

        if let Some(label) = regex.captures(message).and_then(|caps| caps.get(1)) {
            return label.as_str().to_string();
        }
    }

    let first_line: String = message
        .split('\n')
        .next()
        .unwrap_or_default()
        .chars()
        .take(FIRST_LINE_LIMIT)
        .collect();

    if first_line.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        first_line
    }
}
