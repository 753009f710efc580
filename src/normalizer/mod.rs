//! Message normalization.
//!
//! Erases the high-entropy substrings (timestamps, numeric IDs, UUIDs, IDs
//! embedded in paths, IPv4 addresses, hex literals) that would otherwise make
//! recurring errors fingerprint differently, then collapses whitespace.

pub mod patterns;
pub mod regex_error;

pub use patterns::StaticRegexSet;
pub use regex_error::RegexError;

use regex::{Captures, NoExpand};
use tracing::warn;

static VOLATILE_PATTERNS: StaticRegexSet = StaticRegexSet::new(&[
    (r"\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}", "timestamp"),
    (
        r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
        "uuid",
    ),
    (r"\b\d{10,}\b", "long_id"),
    (r"/\d+(?:/\d+)*/", "path_id"),
    (r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}", "ipv4"),
    (r"0x[0-9a-fA-F]+", "hex"),
]);

enum Replacement {
    Placeholder(&'static str),
    PathSegments,
}

// UUIDs go before long IDs: a UUID's last group can be twelve digits.
const STEPS: &[(&str, Replacement)] = &[
    ("timestamp", Replacement::Placeholder("[TIMESTAMP]")),
    ("uuid", Replacement::Placeholder("[UUID]")),
    ("long_id", Replacement::Placeholder("[ID]")),
    ("path_id", Replacement::PathSegments),
    ("ipv4", Replacement::Placeholder("[IP]")),
    ("hex", Replacement::Placeholder("[HEX]")),
];

/// Map a raw error message to its canonical form.
///
/// Total: an empty message yields an empty string, and a pattern that
/// cannot be compiled is skipped rather than failing the caller.
///
/// Idempotent for space-separated tokens, but not for every input. A date
/// and time split by a tab or newline only reads as a timestamp once
/// whitespace has been collapsed, and a long number glued to a hex literal
/// (`12345678900x1`) only gains a word boundary once the literal becomes
/// `[HEX]`. Both resolve on a second pass.
pub fn normalize(message: &str) -> String {
    if message.is_empty() {
        return String::new();
    }

    let mut normalized = message.to_string();
    for (name, replacement) in STEPS {
        let regex = match VOLATILE_PATTERNS.get_by_name(name) {
            Ok(regex) => regex,
            Err(e) => {
                warn!(step = %name, error = %e, "Skipping normalization step");
                continue;
            }
        };

        normalized = match replacement {
            Replacement::Placeholder(placeholder) => regex
                .replace_all(&normalized, NoExpand(*placeholder))
                .into_owned(),
            Replacement::PathSegments => {
                // Matches that share a slash ("/1/a/2/") only surface on a later pass.
                while regex.is_match(&normalized) {
                    normalized = regex
                        .replace_all(&normalized, |caps: &Captures<'_>| {
                            let segments = caps[0].matches('/').count() - 1;
                            format!("{}/", "/[ID]".repeat(segments))
                        })
                        .into_owned();
                }
                normalized
            }
        };
    }

    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}
