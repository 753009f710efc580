//! Significance filtering and ranking over a consolidated mapping.

use crate::domain::{ConsolidatedErrors, ErrorGroup};

/// A group picked for follow-up, borrowed from the mapping it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedGroup<'a> {
    pub fingerprint: &'a str,
    pub group: &'a ErrorGroup,
}

impl ConsolidatedErrors {
    /// Groups with `count >= min_occurrences`, in first-sighting order.
    pub fn significant(&self, min_occurrences: u64) -> ConsolidatedErrors {
        self.iter()
            .filter(|(_, group)| group.is_significant(min_occurrences))
            .map(|(fingerprint, group)| (fingerprint.clone(), group.clone()))
            .collect()
    }

    /// The `limit` largest groups by count. Ties keep first-sighting order.
    pub fn ranked(&self, limit: usize) -> Vec<RankedGroup<'_>> {
        rank(self.iter().map(to_ranked), limit)
    }

    /// Significance filter followed by ranking, without cloning groups.
    pub fn select_for_action(&self, min_occurrences: u64, limit: usize) -> Vec<RankedGroup<'_>> {
        rank(
            self.iter()
                .filter(|(_, group)| group.is_significant(min_occurrences))
                .map(to_ranked),
            limit,
        )
    }
}

fn to_ranked<'a>((fingerprint, group): (&'a String, &'a ErrorGroup)) -> RankedGroup<'a> {
    RankedGroup {
        fingerprint: fingerprint.as_str(),
        group,
    }
}

fn rank<'a>(candidates: impl Iterator<Item = RankedGroup<'a>>, limit: usize) -> Vec<RankedGroup<'a>> {
    let mut ranked: Vec<RankedGroup<'a>> = candidates.collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.group.count.cmp(&a.group.count));
    ranked.truncate(limit);
    ranked
}
