//! Dashboard urgency: occurrence count plus severity and recency bonuses.

use crate::domain::ErrorGroup;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

const CRITICAL_MARKER: &str = "CRITICAL";
const CONNECTION_ERROR_TYPE: &str = "OperationalError";
const CONNECTION_MARKER: &str = "Connection";

const CRITICAL_BONUS: u64 = 300;
const CONNECTION_BONUS: u64 = 250;
const BASELINE_BONUS: u64 = 200;

const RECENT_HOURS: i64 = 24;
const RECENT_BONUS: u64 = 100;
const THIS_WEEK_HOURS: i64 = 168;
const THIS_WEEK_BONUS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityLevel {
    pub fn from_score(score: u64) -> Self {
        match score {
            500.. => PriorityLevel::Critical,
            300..=499 => PriorityLevel::High,
            150..=299 => PriorityLevel::Medium,
            _ => PriorityLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Critical => "critical",
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityScore {
    pub score: u64,
    pub level: PriorityLevel,
}

impl PriorityScore {
    /// Score `group` as of `now`.
    ///
    /// A missing or unparseable `last_seen` earns no recency bonus.
    pub fn for_group(group: &ErrorGroup, now: DateTime<Utc>) -> Self {
        let score = group.count + severity_bonus(group) + recency_bonus(group, now);
        Self {
            score,
            level: PriorityLevel::from_score(score),
        }
    }
}

fn severity_bonus(group: &ErrorGroup) -> u64 {
    if group.error_type == CRITICAL_MARKER || group.sample_message.contains(CRITICAL_MARKER) {
        CRITICAL_BONUS
    } else if group.error_type == CONNECTION_ERROR_TYPE
        || group.sample_message.contains(CONNECTION_MARKER)
    {
        CONNECTION_BONUS
    } else {
        BASELINE_BONUS
    }
}

fn recency_bonus(group: &ErrorGroup, now: DateTime<Utc>) -> u64 {
    let Some(last_seen) = group.last_seen.as_deref().and_then(parse_timestamp) else {
        return 0;
    };

    // Future timestamps count as recent.
    let seconds_ago = (now - last_seen).num_seconds();
    if seconds_ago < RECENT_HOURS * 3600 {
        RECENT_BONUS
    } else if seconds_ago < THIS_WEEK_HOURS * 3600 {
        THIS_WEEK_BONUS
    } else {
        0
    }
}

// RFC 3339 first; offset-less timestamps are read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
