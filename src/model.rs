//! Investigative data types
//!
//! Records, patterns and cases are owned by the data provider. The dashboard only
//! reads them and forwards identifiers back to provider actions.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single communication record between two parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub a_party: String,
    pub b_party: String,
    pub communication_type: String,
    /// RFC 3339 timestamp, e.g. `2025-08-17T20:03:00Z`.
    pub timestamp: String,
    pub duration_secs: u64,
    pub location: String,
    pub method: String,
}

impl Record {
    /// Whether `needle` (already lowercased) occurs in any searchable field.
    pub fn matches(&self, needle: &str) -> bool {
        [
            &self.id,
            &self.a_party,
            &self.b_party,
            &self.communication_type,
            &self.location,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }

    pub fn involves(&self, msisdn: &str) -> bool {
        self.a_party == msisdn || self.b_party == msisdn
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternStatus {
    New,
    Flagged,
    UnderInvestigation,
}

/// A suspicious pattern flagged against a subscriber (shown on the alerts tab).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: String,
    pub pattern_type: String,
    pub msisdn: String,
    pub count: Option<u32>,
    pub device_count: Option<u32>,
    pub severity: Level,
    pub description: String,
    pub status: PatternStatus,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    Active,
    Pending,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub title: String,
    pub status: CaseStatus,
    pub priority: Level,
    pub investigator: String,
    /// Creation date, `YYYY-MM-DD`.
    pub created: String,
    pub suspects: Vec<String>,
    /// Record ids attached to the case.
    pub evidence: Vec<String>,
}

/// Fields collected by the new-case form before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCaseFields {
    pub title: String,
    pub priority: Option<Level>,
    pub investigator: String,
    /// Comma or whitespace separated MSISDNs.
    pub suspects: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Headline statistics for the dashboard tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_records: u64,
    pub unique_users: u64,
    pub relationships_found: u64,
    pub suspicious_patterns: u64,
    pub active_investigations: u64,
    pub date_range: DateRange,
}

/// Aggregated view of one subscriber in the communication network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    pub msisdn: String,
    pub connections: usize,
    pub total_duration_secs: u64,
    pub last_activity: Option<String>,
    /// Description of the most severe pattern flagged against this subscriber.
    pub alert: Option<String>,
}

/// Restricts record listings to a set of application types. Empty means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub app_types: std::collections::BTreeSet<String>,
}

impl RecordFilter {
    pub fn accepts(&self, record: &Record) -> bool {
        self.app_types.is_empty() || self.app_types.contains(&record.communication_type)
    }
}

/// Display-ready fields for the record detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDetail {
    pub id: String,
    pub a_party: String,
    pub b_party: String,
    pub communication_type: String,
    pub timestamp: String,
    pub duration: String,
    pub location: String,
    pub method: String,
}

impl From<&Record> for RecordDetail {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            a_party: record.a_party.clone(),
            b_party: record.b_party.clone(),
            communication_type: record.communication_type.clone(),
            timestamp: format_local_datetime(&record.timestamp),
            duration: format_duration(record.duration_secs),
            location: record.location.clone(),
            method: record.method.clone(),
        }
    }
}

/// Format a call duration as `"{minutes}m {seconds}s"`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Format a span as hours and minutes, e.g. `"2h 45m"`.
pub fn format_hours_minutes(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

/// Render an RFC 3339 timestamp in local time. Unparseable input is returned as-is.
pub fn format_local_datetime(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}
