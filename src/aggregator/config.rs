use crate::domain::ConsolidatorError;
use crate::fingerprint::{
    DEFAULT_FINGERPRINT_LENGTH, DEFAULT_MESSAGE_HASH_PREFIX_LENGTH, MAX_FINGERPRINT_LENGTH,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_OCCURRENCES_FOR_SIGNIFICANCE: u64 = 3;
pub const DEFAULT_MAX_GROUPS_TO_RANK: usize = 10;
pub const DEFAULT_OCCURRENCE_SAMPLE_CAP: usize = 5;

/// Tunables for one consolidation run.
///
/// Keys are snake_case; the camelCase names used by the dashboard tooling
/// are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    #[serde(alias = "minOccurrencesForSignificance")]
    pub min_occurrences_for_significance: u64,
    #[serde(alias = "maxGroupsToRank")]
    pub max_groups_to_rank: usize,
    #[serde(alias = "occurrenceSampleCap")]
    pub occurrence_sample_cap: usize,
    #[serde(alias = "messageHashPrefixLength")]
    pub message_hash_prefix_length: usize,
    #[serde(alias = "fingerprintLength")]
    pub fingerprint_length: usize,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            min_occurrences_for_significance: DEFAULT_MIN_OCCURRENCES_FOR_SIGNIFICANCE,
            max_groups_to_rank: DEFAULT_MAX_GROUPS_TO_RANK,
            occurrence_sample_cap: DEFAULT_OCCURRENCE_SAMPLE_CAP,
            message_hash_prefix_length: DEFAULT_MESSAGE_HASH_PREFIX_LENGTH,
            fingerprint_length: DEFAULT_FINGERPRINT_LENGTH,
        }
    }
}

impl ConsolidationConfig {
    pub fn validate(&self) -> Result<(), ConsolidatorError> {
        if self.min_occurrences_for_significance == 0 {
            return Err(ConsolidatorError::InvalidConfig {
                field: "min_occurrences_for_significance",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.message_hash_prefix_length == 0 {
            return Err(ConsolidatorError::InvalidConfig {
                field: "message_hash_prefix_length",
                reason: "must be at least 1".to_string(),
            });
        }

        if !(1..=MAX_FINGERPRINT_LENGTH).contains(&self.fingerprint_length) {
            return Err(ConsolidatorError::InvalidConfig {
                field: "fingerprint_length",
                reason: format!(
                    "must be between 1 and {MAX_FINGERPRINT_LENGTH}, got {}",
                    self.fingerprint_length
                ),
            });
        }

        Ok(())
    }
}
