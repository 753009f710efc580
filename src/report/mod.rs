//! What downstream consumers (issue filing, dashboards) read from a run.

pub mod issue;
pub mod score;
pub mod summary;

pub use issue::{IssueDraft, Priority};
pub use score::{PriorityLevel, PriorityScore};
pub use summary::ConsolidationSummary;

use crate::aggregator::ErrorAggregator;
use crate::domain::ConsolidatedErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary plus the ranked issue drafts for one consolidation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedReport {
    pub generated_at: DateTime<Utc>,
    pub summary: ConsolidationSummary,
    pub issues: Vec<IssueDraft>,
}

impl RankedReport {
    pub fn build(groups: &ConsolidatedErrors, aggregator: &ErrorAggregator) -> Self {
        Self::build_at(groups, aggregator, Utc::now())
    }

    /// Build with scores computed as of `generated_at`.
    pub fn build_at(
        groups: &ConsolidatedErrors,
        aggregator: &ErrorAggregator,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let min_occurrences = aggregator.config().min_occurrences_for_significance;

        Self {
            generated_at,
            summary: ConsolidationSummary::from_groups(groups, min_occurrences),
            issues: aggregator
                .select_for_action(groups)
                .iter()
                .map(|ranked| IssueDraft::from_ranked(ranked, generated_at))
                .collect(),
        }
    }
}
