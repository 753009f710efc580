use super::raw_record::{HttpRequest, RawErrorRecord};
use crate::classifier::extract_error_type;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lightweight summary of one occurrence kept for context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceSummary {
    pub timestamp: String,
    pub service: String,
    #[serde(default)]
    pub revision: String,
    #[serde(default)]
    pub http_status: Option<u16>,
}

impl From<&RawErrorRecord> for OccurrenceSummary {
    fn from(record: &RawErrorRecord) -> Self {
        Self {
            timestamp: record.timestamp.clone(),
            service: record.service.clone(),
            revision: record.revision.clone().unwrap_or_default(),
            http_status: record.http_status(),
        }
    }
}

/// All occurrences that share one fingerprint.
///
/// Sample fields belong to the first record folded into the group and are
/// never overwritten. `occurrences` is first-come, first-kept up to the
/// configured cap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorGroup {
    pub count: u64,
    pub services: BTreeSet<String>,
    pub revisions: BTreeSet<String>,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub sample_message: String,
    pub sample_http: Option<HttpRequest>,
    pub error_type: String,
    pub occurrences: Vec<OccurrenceSummary>,
}

impl ErrorGroup {
    /// Fold one record into the group.
    pub fn record(&mut self, record: &RawErrorRecord, occurrence_cap: usize) {
        if self.count == 0 {
            self.sample_message = record.message.clone();
            self.sample_http = record.http_request.clone();
            self.error_type = extract_error_type(&record.message);
        }

        self.count += 1;
        self.services.insert(record.service.clone());
        if let Some(revision) = record.revision() {
            self.revisions.insert(revision.to_string());
        }

        if !record.timestamp.is_empty() {
            self.observe_bounds(&record.timestamp, &record.timestamp);
        }

        if self.occurrences.len() < occurrence_cap {
            self.occurrences.push(OccurrenceSummary::from(record));
        }
    }

    /// Absorb a group built from records that came after this one's.
    ///
    /// Counters and sets are additive; sample fields stay with `self`, and
    /// occurrences are topped up from `later` in its own order.
    pub fn absorb(&mut self, later: ErrorGroup, occurrence_cap: usize) {
        if self.count == 0 {
            self.sample_message = later.sample_message;
            self.sample_http = later.sample_http;
            self.error_type = later.error_type;
        }

        self.count += later.count;
        self.services.extend(later.services);
        self.revisions.extend(later.revisions);

        if let Some(first) = later.first_seen.as_deref() {
            self.observe_bounds(first, first);
        }
        if let Some(last) = later.last_seen.as_deref() {
            self.observe_bounds(last, last);
        }

        let room = occurrence_cap.saturating_sub(self.occurrences.len());
        self.occurrences
            .extend(later.occurrences.into_iter().take(room));
    }

    pub fn is_significant(&self, min_occurrences: u64) -> bool {
        self.count >= min_occurrences
    }

    // ISO-8601 strings with the same zero padding order lexicographically.
    fn observe_bounds(&mut self, low: &str, high: &str) {
        match self.first_seen.as_deref() {
            Some(current) if current <= low => {}
            _ => self.first_seen = Some(low.to_string()),
        }
        match self.last_seen.as_deref() {
            Some(current) if current >= high => {}
            _ => self.last_seen = Some(high.to_string()),
        }
    }
}
