use super::score::PriorityScore;
use crate::aggregator::RankedGroup;
use crate::domain::{HttpRequest, OccurrenceSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ISSUE_ID_PREFIX: &str = "ERROR-";
pub const MAX_TITLE_LENGTH: usize = 100;
const TITLE_SERVICE_LIMIT: usize = 3;

/// Follow-up urgency derived from how often a group occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_count(count: u64) -> Self {
        match count {
            50.. => Priority::High,
            10..=49 => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(&self) -> String {
        format!("priority-{}", self.as_str())
    }
}

/// Everything an issue-creation step needs to file one group.
///
/// `issue_id` embeds the fingerprint, so trackers can search for it to
/// avoid filing the same group twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDraft {
    pub issue_id: String,
    pub fingerprint: String,
    pub title: String,
    pub priority: Priority,
    /// Dashboard urgency as of the report time.
    pub score: PriorityScore,
    pub labels: Vec<String>,
    pub error_type: String,
    pub count: u64,
    pub services: Vec<String>,
    pub revisions: Vec<String>,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub sample_message: String,
    pub sample_http: Option<HttpRequest>,
    pub occurrences: Vec<OccurrenceSummary>,
}

impl IssueDraft {
    pub fn from_ranked(ranked: &RankedGroup<'_>, now: DateTime<Utc>) -> Self {
        let group = ranked.group;
        let issue_id = format!("{ISSUE_ID_PREFIX}{}", ranked.fingerprint);
        let services: Vec<String> = group.services.iter().cloned().collect();
        let priority = Priority::from_count(group.count);

        Self {
            title: issue_title(&issue_id, &group.error_type, &services),
            labels: vec![
                "bug".to_string(),
                "auto-generated".to_string(),
                priority.label(),
            ],
            issue_id,
            fingerprint: ranked.fingerprint.to_string(),
            priority,
            score: PriorityScore::for_group(group, now),
            error_type: group.error_type.clone(),
            count: group.count,
            services,
            revisions: group.revisions.iter().cloned().collect(),
            first_seen: group.first_seen.clone(),
            last_seen: group.last_seen.clone(),
            sample_message: group.sample_message.clone(),
            sample_http: group.sample_http.clone(),
            occurrences: group.occurrences.clone(),
        }
    }
}

fn issue_title(issue_id: &str, error_type: &str, services: &[String]) -> String {
    let mut service_list = services
        .iter()
        .take(TITLE_SERVICE_LIMIT)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if services.len() > TITLE_SERVICE_LIMIT {
        service_list.push_str(&format!(" +{}", services.len() - TITLE_SERVICE_LIMIT));
    }

    let title = format!("[{issue_id}] {error_type} in {service_list}");
    if title.chars().count() > MAX_TITLE_LENGTH {
        let mut truncated: String = title.chars().take(MAX_TITLE_LENGTH - 3).collect();
        truncated.push_str("...");
        truncated
    } else {
        title
    }
}
