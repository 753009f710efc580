use crate::domain::ConsolidatedErrors;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Headline numbers for a consolidation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationSummary {
    pub total_errors: u64,
    pub total_groups: usize,
    pub significant_groups: usize,
    pub affected_services: usize,
    pub top_service: Option<String>,
    /// A group's full count is credited to every service it spans.
    pub errors_by_service: IndexMap<String, u64>,
}

impl ConsolidationSummary {
    pub fn from_groups(groups: &ConsolidatedErrors, min_occurrences: u64) -> Self {
        let mut errors_by_service: IndexMap<String, u64> = IndexMap::new();
        let mut significant_groups = 0;

        for (_, group) in groups {
            if group.is_significant(min_occurrences) {
                significant_groups += 1;
            }
            for service in &group.services {
                *errors_by_service.entry(service.clone()).or_default() += group.count;
            }
        }

        // Ties go to the service seen first.
        let top_service = errors_by_service
            .iter()
            .fold(None::<(&String, u64)>, |best, (service, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((service, count)),
            })
            .map(|(service, _)| service.clone());

        Self {
            total_errors: groups.total_errors(),
            total_groups: groups.len(),
            significant_groups,
            affected_services: errors_by_service.len(),
            top_service,
            errors_by_service,
        }
    }
}
