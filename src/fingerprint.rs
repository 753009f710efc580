//! Stable content hashes for grouping errors.
//!
//! The key is `service:normalized[..prefix]`. Only the first
//! `message_hash_prefix_length` characters of the normalized message take
//! part, so two different faults that share a long common prefix (the same
//! stack-trace header, say) land in the same group. That precision loss is
//! accepted to keep hashes cheap and fingerprints compatible with existing
//! snapshots and filed issues.

use crate::normalizer::normalize;

pub const DEFAULT_MESSAGE_HASH_PREFIX_LENGTH: usize = 500;
pub const DEFAULT_FINGERPRINT_LENGTH: usize = 12;

/// Hex characters in an MD5 digest; upper bound for `fingerprint_length`.
pub const MAX_FINGERPRINT_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprinter {
    message_hash_prefix_length: usize,
    fingerprint_length: usize,
}

impl Fingerprinter {
    /// `fingerprint_length` is clamped to the digest width.
    pub fn new(message_hash_prefix_length: usize, fingerprint_length: usize) -> Self {
        Self {
            message_hash_prefix_length,
            fingerprint_length: fingerprint_length.min(MAX_FINGERPRINT_LENGTH),
        }
    }

    pub fn fingerprint(&self, service: &str, message: &str) -> String {
        let normalized = normalize(message);
        let prefix: String = normalized
            .chars()
            .take(self.message_hash_prefix_length)
            .collect();

        let key = format!("{service}:{prefix}");
        let mut digest = format!("{:x}", md5::compute(key.as_bytes()));
        digest.truncate(self.fingerprint_length);
        digest
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_HASH_PREFIX_LENGTH, DEFAULT_FINGERPRINT_LENGTH)
    }
}

/// Fingerprint with the default prefix window and length.
pub fn fingerprint(service: &str, message: &str) -> String {
    Fingerprinter::default().fingerprint(service, message)
}
