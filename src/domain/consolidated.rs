use super::error_group::ErrorGroup;
use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};

/// Fingerprint → group mapping produced by one aggregation pass.
///
/// Iteration follows first-sighting order, which is what ranking falls back
/// on when counts tie. Serializes as a JSON object keyed by fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsolidatedErrors {
    groups: IndexMap<String, ErrorGroup>,
}

impl ConsolidatedErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, fingerprint: &str) -> Option<&ErrorGroup> {
        self.groups.get(fingerprint)
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.groups.contains_key(fingerprint)
    }

    pub fn iter(&self) -> Iter<'_, String, ErrorGroup> {
        self.groups.iter()
    }

    pub fn fingerprints(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Get the group for `fingerprint`, inserting an empty one on first sighting.
    pub fn group_mut(&mut self, fingerprint: String) -> &mut ErrorGroup {
        self.groups.entry(fingerprint).or_default()
    }

    /// Merge a mapping built from records that followed this one's input.
    ///
    /// Fingerprints new to `self` are appended in `later`'s order, so merging
    /// contiguous partitions left to right reproduces a single-pass fold.
    pub fn merge(&mut self, later: ConsolidatedErrors, occurrence_cap: usize) {
        for (fingerprint, group) in later.groups {
            self.group_mut(fingerprint).absorb(group, occurrence_cap);
        }
    }

    /// Total occurrences across all groups.
    pub fn total_errors(&self) -> u64 {
        self.groups.values().map(|group| group.count).sum()
    }
}

impl FromIterator<(String, ErrorGroup)> for ConsolidatedErrors {
    fn from_iter<T: IntoIterator<Item = (String, ErrorGroup)>>(iter: T) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ConsolidatedErrors {
    type Item = (&'a String, &'a ErrorGroup);
    type IntoIter = Iter<'a, String, ErrorGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl IntoIterator for ConsolidatedErrors {
    type Item = (String, ErrorGroup);
    type IntoIter = indexmap::map::IntoIter<String, ErrorGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawErrorRecord;

    #[test]
    fn test_group_mut_inserts_default_once() {
        let mut groups = ConsolidatedErrors::new();

        groups
            .group_mut("abc".to_string())
            .record(&RawErrorRecord::new("svc", "x"), 5);
        groups
            .group_mut("abc".to_string())
            .record(&RawErrorRecord::new("svc", "x"), 5);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.get("abc").unwrap().count, 2);
    }

    #[test]
    fn test_iteration_follows_first_sighting() {
        let mut groups = ConsolidatedErrors::new();
        for fingerprint in ["zzz", "aaa", "mmm", "aaa"] {
            groups
                .group_mut(fingerprint.to_string())
                .record(&RawErrorRecord::default(), 5);
        }

        let order: Vec<&str> = groups.fingerprints().collect();
        assert_eq!(order, vec!["zzz", "aaa", "mmm"]);
        assert_eq!(groups.total_errors(), 4);
    }

    #[test]
    fn test_merge_appends_new_fingerprints_in_order() {
        let mut left = ConsolidatedErrors::new();
        left.group_mut("b".to_string())
            .record(&RawErrorRecord::new("svc", "b"), 5);

        let mut right = ConsolidatedErrors::new();
        right
            .group_mut("c".to_string())
            .record(&RawErrorRecord::new("svc", "c"), 5);
        right
            .group_mut("b".to_string())
            .record(&RawErrorRecord::new("svc", "b"), 5);

        left.merge(right, 5);

        let order: Vec<&str> = left.fingerprints().collect();
        assert_eq!(order, vec!["b", "c"]);
        assert_eq!(left.get("b").unwrap().count, 2);
    }

    #[test]
    fn test_serializes_as_object_keyed_by_fingerprint() {
        let mut groups = ConsolidatedErrors::new();
        groups
            .group_mut("0123456789ab".to_string())
            .record(&RawErrorRecord::new("svc", "boom"), 5);

        let json = serde_json::to_value(&groups).unwrap();
        assert_eq!(json["0123456789ab"]["count"], 1);

        let restored: ConsolidatedErrors = serde_json::from_value(json).unwrap();
        assert_eq!(restored, groups);
    }
}
