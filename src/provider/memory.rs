//! In-memory data provider
//!
//! Serves a built-in investigative dataset, or one loaded from a JSON file with the
//! same shape. Cases and flags created during a session live only in memory.

use super::DataProvider;
use super::csv_export;
use super::error::ProviderError;
use crate::model::{
    Case, CaseStatus, DateRange, Level, NewCaseFields, NodeSummary, Pattern, PatternStatus,
    Record, RecordFilter, Summary, format_local_datetime,
};
use chrono::Local;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tokio::sync::RwLock;

const MAX_TITLE_LEN: usize = 120;

/// Everything the provider serves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub patterns: Vec<Pattern>,
    pub cases: Vec<Case>,
}

#[derive(Debug)]
pub struct InMemoryProvider {
    dataset: RwLock<Dataset>,
}

impl InMemoryProvider {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: RwLock::new(dataset),
        }
    }

    /// Provider over the built-in sample investigation.
    pub fn sample() -> Self {
        Self::new(sample_dataset())
    }

    /// Loads a dataset from a JSON file.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn from_json_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = std::fs::read(path)?;
        let dataset: Dataset = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        info!(
            "Loaded dataset from {}: {} records, {} patterns, {} cases",
            path.display(),
            dataset.records.len(),
            dataset.patterns.len(),
            dataset.cases.len()
        );
        Ok(Self::new(dataset))
    }
}

#[async_trait::async_trait]
impl DataProvider for InMemoryProvider {
    async fn summary(&self) -> Result<Summary, ProviderError> {
        let data = self.dataset.read().await;
        let mut users = BTreeSet::new();
        let mut pairs = BTreeSet::new();
        for record in &data.records {
            users.insert(record.a_party.as_str());
            users.insert(record.b_party.as_str());
            let pair = if record.a_party <= record.b_party {
                (record.a_party.as_str(), record.b_party.as_str())
            } else {
                (record.b_party.as_str(), record.a_party.as_str())
            };
            pairs.insert(pair);
        }
        let dates: BTreeSet<&str> = data
            .records
            .iter()
            .filter_map(|r| r.timestamp.get(..10))
            .collect();

        Ok(Summary {
            total_records: data.records.len() as u64,
            unique_users: users.len() as u64,
            relationships_found: pairs.len() as u64,
            suspicious_patterns: data.patterns.len() as u64,
            active_investigations: data
                .cases
                .iter()
                .filter(|c| c.status == CaseStatus::Active)
                .count() as u64,
            date_range: DateRange {
                start: dates.first().map(|d| d.to_string()).unwrap_or_default(),
                end: dates.last().map(|d| d.to_string()).unwrap_or_default(),
            },
        })
    }

    async fn app_usage(&self) -> Result<Vec<(String, u64)>, ProviderError> {
        let data = self.dataset.read().await;
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for record in &data.records {
            *counts.entry(record.communication_type.as_str()).or_default() += 1;
        }
        let mut usage: Vec<(String, u64)> = counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect();
        // Largest first; the BTreeMap already ordered ties by label.
        usage.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(usage)
    }

    async fn get_record_by_id(&self, id: &str) -> Result<Option<Record>, ProviderError> {
        let data = self.dataset.read().await;
        Ok(data.records.iter().find(|r| r.id == id).cloned())
    }

    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<Record>, ProviderError> {
        let data = self.dataset.read().await;
        Ok(data
            .records
            .iter()
            .filter(|r| filter.accepts(r))
            .cloned()
            .collect())
    }

    async fn search(
        &self,
        query: &str,
        filter: &RecordFilter,
    ) -> Result<Vec<Record>, ProviderError> {
        let needle = query.trim().to_lowercase();
        let data = self.dataset.read().await;
        let results: Vec<Record> = data
            .records
            .iter()
            .filter(|r| filter.accepts(r) && r.matches(&needle))
            .cloned()
            .collect();
        debug!("search {:?} matched {} records", needle, results.len());
        Ok(results)
    }

    async fn export(&self, records: &[Record]) -> Result<Vec<u8>, ProviderError> {
        csv_export::write_records(records)
    }

    async fn list_cases(&self) -> Result<Vec<Case>, ProviderError> {
        Ok(self.dataset.read().await.cases.clone())
    }

    async fn get_case(&self, id: &str) -> Result<Option<Case>, ProviderError> {
        let data = self.dataset.read().await;
        Ok(data.cases.iter().find(|c| c.id == id).cloned())
    }

    async fn create_case(&self, fields: NewCaseFields) -> Result<Case, ProviderError> {
        let title = fields.title.trim();
        if title.is_empty() {
            return Err(ProviderError::validation("title", "a case title is required"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ProviderError::validation(
                "title",
                format!("must be at most {} characters", MAX_TITLE_LEN),
            ));
        }
        let priority = fields
            .priority
            .ok_or_else(|| ProviderError::validation("priority", "select a priority"))?;
        let investigator = fields.investigator.trim();
        if investigator.is_empty() {
            return Err(ProviderError::validation(
                "investigator",
                "an assigned investigator is required",
            ));
        }
        let suspects = parse_suspects(&fields.suspects)?;

        let mut data = self.dataset.write().await;
        let case = Case {
            id: next_id("CASE_", data.cases.iter().map(|c| c.id.as_str())),
            title: title.to_string(),
            status: CaseStatus::Active,
            priority,
            investigator: investigator.to_string(),
            created: Local::now().format("%Y-%m-%d").to_string(),
            suspects,
            evidence: Vec::new(),
        };
        info!("Created case {} ({})", case.id, case.title);
        data.cases.push(case.clone());
        Ok(case)
    }

    async fn add_record_to_case(&self, record_id: &str) -> Result<Case, ProviderError> {
        let mut data = self.dataset.write().await;
        if !data.records.iter().any(|r| r.id == record_id) {
            return Err(ProviderError::not_found("Record", record_id));
        }
        let case = data
            .cases
            .iter_mut()
            .find(|c| c.status == CaseStatus::Active)
            .ok_or_else(|| ProviderError::not_found("Case", "active"))?;
        if !case.evidence.iter().any(|e| e == record_id) {
            case.evidence.push(record_id.to_string());
        }
        Ok(case.clone())
    }

    async fn flag_record(&self, record_id: &str) -> Result<(), ProviderError> {
        let mut data = self.dataset.write().await;
        let record = data
            .records
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| ProviderError::not_found("Record", record_id))?;

        let description = format!("Record {} flagged by investigator", record.id);
        if data.patterns.iter().any(|p| p.description == description) {
            return Ok(());
        }
        let pattern = Pattern {
            id: next_id("SUSP_", data.patterns.iter().map(|p| p.id.as_str())),
            pattern_type: "MANUAL_FLAG".to_string(),
            msisdn: record.a_party,
            count: None,
            device_count: None,
            severity: Level::Medium,
            description,
            status: PatternStatus::Flagged,
        };
        data.patterns.push(pattern);
        Ok(())
    }

    async fn list_patterns(&self) -> Result<Vec<Pattern>, ProviderError> {
        Ok(self.dataset.read().await.patterns.clone())
    }

    async fn get_pattern(&self, id: &str) -> Result<Option<Pattern>, ProviderError> {
        let data = self.dataset.read().await;
        Ok(data.patterns.iter().find(|p| p.id == id).cloned())
    }

    async fn node_summary(&self, msisdn: &str) -> Result<Option<NodeSummary>, ProviderError> {
        let data = self.dataset.read().await;
        let involved: Vec<&Record> = data.records.iter().filter(|r| r.involves(msisdn)).collect();
        let alert = data
            .patterns
            .iter()
            .filter(|p| p.msisdn == msisdn)
            .max_by_key(|p| severity_rank(p.severity))
            .map(|p| p.description.clone());
        if involved.is_empty() && alert.is_none() {
            return Ok(None);
        }

        let counterparties: BTreeSet<&str> = involved
            .iter()
            .map(|r| {
                if r.a_party == msisdn {
                    r.b_party.as_str()
                } else {
                    r.a_party.as_str()
                }
            })
            .collect();
        Ok(Some(NodeSummary {
            msisdn: msisdn.to_string(),
            connections: counterparties.len(),
            total_duration_secs: involved.iter().map(|r| r.duration_secs).sum(),
            last_activity: involved
                .iter()
                .map(|r| r.timestamp.as_str())
                .max()
                .map(format_local_datetime),
            alert,
        }))
    }
}

/// One past the highest numbered id with `prefix`, so loaded datasets with gaps
/// never get a duplicate.
fn next_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let highest = existing
        .filter_map(|id| id.strip_prefix(prefix)?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:03}", prefix, highest + 1)
}

fn severity_rank(level: Level) -> u8 {
    match level {
        Level::Low => 0,
        Level::Medium => 1,
        Level::High => 2,
    }
}

fn parse_suspects(raw: &str) -> Result<Vec<String>, ProviderError> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            if (10..=15).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit()) {
                Ok(s.to_string())
            } else {
                Err(ProviderError::validation(
                    "suspects",
                    format!("{} is not a valid MSISDN", s),
                ))
            }
        })
        .collect()
}

fn record(
    id: &str,
    a_party: &str,
    b_party: &str,
    communication_type: &str,
    timestamp: &str,
    duration_secs: u64,
    location: &str,
) -> Record {
    Record {
        id: id.to_string(),
        a_party: a_party.to_string(),
        b_party: b_party.to_string(),
        communication_type: communication_type.to_string(),
        timestamp: timestamp.to_string(),
        duration_secs,
        location: location.to_string(),
        method: "DIRECT".to_string(),
    }
}

/// The built-in sample investigation.
pub fn sample_dataset() -> Dataset {
    let records = vec![
        record("REL_001", "918730941466", "917478483262", "Facebook", "2025-08-17T20:03:00Z", 433, "CELL_0030"),
        record("REL_002", "918563524436", "917280305443", "FTP", "2025-08-16T23:29:00Z", 1205, "CELL_0015"),
        record("REL_003", "917404149892", "917161136344", "SSH", "2025-08-08T09:44:00Z", 2085, "CELL_0025"),
        record("REL_004", "917280305443", "918389720476", "WhatsApp", "2025-08-21T01:12:00Z", 22, "CELL_0015"),
        record("REL_005", "918389720476", "919645196062", "WhatsApp", "2025-08-21T01:14:00Z", 18, "CELL_0042"),
        record("REL_006", "917280305443", "918730941466", "HTTPS/Skype", "2025-08-22T02:40:00Z", 964, "CELL_0015"),
        record("REL_007", "919645196062", "917404149892", "SMTP", "2025-08-12T11:05:00Z", 75, "CELL_0063"),
        record("REL_008", "918389720476", "917280305443", "WhatsApp", "2025-08-23T03:01:00Z", 27, "CELL_0042"),
        record("REL_009", "917161136344", "918563524436", "HTTP", "2025-07-30T16:20:00Z", 312, "CELL_0025"),
        record("REL_010", "917478483262", "919645196062", "IMAPS", "2025-08-02T08:55:00Z", 140, "CELL_0071"),
        record("REL_011", "917280305443", "917161136344", "Facebook", "2025-08-26T23:48:00Z", 1790, "CELL_0015"),
        record("REL_012", "918563524436", "918730941466", "SSH", "2025-08-05T13:37:00Z", 2640, "CELL_0030"),
    ];

    let patterns = vec![
        Pattern {
            id: "SUSP_001".to_string(),
            pattern_type: "HIGH_NIGHT_ACTIVITY".to_string(),
            msisdn: "917280305443".to_string(),
            count: Some(11),
            device_count: None,
            severity: Level::Medium,
            description: "High frequency late-night communications (10 PM - 6 AM)".to_string(),
            status: PatternStatus::UnderInvestigation,
        },
        Pattern {
            id: "SUSP_002".to_string(),
            pattern_type: "SHORT_DURATION_CALLS".to_string(),
            msisdn: "918389720476".to_string(),
            count: Some(25),
            device_count: None,
            severity: Level::High,
            description: "Multiple very short duration calls (< 30 seconds)".to_string(),
            status: PatternStatus::Flagged,
        },
        Pattern {
            id: "SUSP_003".to_string(),
            pattern_type: "MULTIPLE_DEVICES".to_string(),
            msisdn: "919645196062".to_string(),
            count: None,
            device_count: Some(4),
            severity: Level::High,
            description: "Same number used across multiple devices".to_string(),
            status: PatternStatus::New,
        },
    ];

    let cases = vec![
        Case {
            id: "CASE_001".to_string(),
            title: "Operation Digital Trail".to_string(),
            status: CaseStatus::Active,
            priority: Level::High,
            investigator: "Agent Smith".to_string(),
            created: "2025-08-20".to_string(),
            suspects: vec!["917280305443".to_string(), "918389720476".to_string()],
            evidence: vec!["REL_004".to_string(), "REL_008".to_string()],
        },
        Case {
            id: "CASE_002".to_string(),
            title: "Network Analysis - Group Alpha".to_string(),
            status: CaseStatus::Pending,
            priority: Level::Medium,
            investigator: "Agent Johnson".to_string(),
            created: "2025-08-25".to_string(),
            suspects: vec!["919645196062".to_string()],
            evidence: Vec::new(),
        },
    ];

    Dataset {
        records,
        patterns,
        cases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn new_case(title: &str, priority: Option<Level>, suspects: &str) -> NewCaseFields {
        NewCaseFields {
            title: title.to_string(),
            priority,
            investigator: "Agent Rao".to_string(),
            suspects: suspects.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_record_by_id() {
        let provider = InMemoryProvider::sample();
        let record = provider.get_record_by_id("REL_001").await.unwrap().unwrap();
        assert_eq!(record.duration_secs, 433);
        assert!(provider.get_record_by_id("REL_999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_respects_filter() {
        let provider = InMemoryProvider::sample();
        let all = provider
            .search("917280305443", &RecordFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 5);

        let mut filter = RecordFilter::default();
        filter.app_types.insert("WhatsApp".to_string());
        let whatsapp = provider.search("917280305443", &filter).await.unwrap();
        assert_eq!(
            whatsapp.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["REL_004", "REL_008"]
        );
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let provider = InMemoryProvider::sample();
        let results = provider
            .search("  ssh ", &RecordFilter::default())
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let provider = InMemoryProvider::sample();
        let summary = provider.summary().await.unwrap();
        assert_eq!(summary.total_records, 12);
        assert_eq!(summary.unique_users, 8);
        assert_eq!(summary.suspicious_patterns, 3);
        assert_eq!(summary.active_investigations, 1);
        assert_eq!(summary.date_range.start, "2025-07-30");
        assert_eq!(summary.date_range.end, "2025-08-26");
    }

    #[tokio::test]
    async fn test_app_usage_sorted_by_count() {
        let provider = InMemoryProvider::sample();
        let usage = provider.app_usage().await.unwrap();
        assert_eq!(usage[0], ("WhatsApp".to_string(), 3));
        assert_eq!(usage.iter().map(|(_, c)| c).sum::<u64>(), 12);
        assert!(usage.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[tokio::test]
    async fn test_create_case_validation() {
        let provider = InMemoryProvider::sample();

        let err = provider
            .create_case(new_case("  ", Some(Level::High), ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation { ref field, .. } if field == "title"));

        let err = provider
            .create_case(new_case("Op Nightjar", None, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation { ref field, .. } if field == "priority"));

        let err = provider
            .create_case(new_case("Op Nightjar", Some(Level::Low), "9172, 917280305443"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation { ref field, .. } if field == "suspects"));

        assert_eq!(provider.list_cases().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_case_assigns_next_id() {
        let provider = InMemoryProvider::sample();
        let case = provider
            .create_case(new_case(
                "Op Nightjar",
                Some(Level::High),
                "917280305443, 918389720476",
            ))
            .await
            .unwrap();
        assert_eq!(case.id, "CASE_003");
        assert_eq!(case.status, CaseStatus::Active);
        assert_eq!(case.suspects.len(), 2);
        assert_eq!(provider.get_case("CASE_003").await.unwrap(), Some(case));
    }

    #[tokio::test]
    // Ids continue after the highest existing one, even when earlier ids are missing.
    async fn test_new_ids_skip_past_gaps() {
        let mut dataset = sample_dataset();
        dataset.cases.retain(|c| c.id != "CASE_001");
        dataset.patterns.retain(|p| p.id != "SUSP_001");
        let provider = InMemoryProvider::new(dataset);

        let case = provider
            .create_case(new_case("Op Kestrel", Some(Level::Medium), ""))
            .await
            .unwrap();
        assert_eq!(case.id, "CASE_003");
        let cases = provider.list_cases().await.unwrap();
        assert_eq!(cases.iter().filter(|c| c.id == case.id).count(), 1);

        provider.flag_record("REL_002").await.unwrap();
        let patterns = provider.list_patterns().await.unwrap();
        assert_eq!(patterns.last().map(|p| p.id.as_str()), Some("SUSP_004"));
        assert_eq!(patterns.iter().filter(|p| p.id == "SUSP_003").count(), 1);
    }

    #[test]
    fn test_next_id_ignores_foreign_ids() {
        assert_eq!(next_id("CASE_", ["CASE_007", "OPS-1", "CASE_x"].into_iter()), "CASE_008");
        assert_eq!(next_id("CASE_", std::iter::empty()), "CASE_001");
    }

    #[tokio::test]
    async fn test_add_record_to_active_case() {
        let provider = InMemoryProvider::sample();
        let case = provider.add_record_to_case("REL_001").await.unwrap();
        assert_eq!(case.id, "CASE_001");
        assert!(case.evidence.contains(&"REL_001".to_string()));

        // Adding twice does not duplicate evidence.
        let case = provider.add_record_to_case("REL_001").await.unwrap();
        assert_eq!(case.evidence.iter().filter(|e| *e == "REL_001").count(), 1);

        assert!(matches!(
            provider.add_record_to_case("REL_999").await,
            Err(ProviderError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_flag_record_creates_pattern_once() {
        let provider = InMemoryProvider::sample();
        provider.flag_record("REL_003").await.unwrap();
        provider.flag_record("REL_003").await.unwrap();

        let patterns = provider.list_patterns().await.unwrap();
        assert_eq!(patterns.len(), 4);
        let flagged = provider.get_pattern("SUSP_004").await.unwrap().unwrap();
        assert_eq!(flagged.pattern_type, "MANUAL_FLAG");
        assert_eq!(flagged.msisdn, "917404149892");
    }

    #[tokio::test]
    async fn test_node_summary() {
        let provider = InMemoryProvider::sample();
        let node = provider.node_summary("917280305443").await.unwrap().unwrap();
        assert_eq!(node.connections, 4);
        assert_eq!(node.total_duration_secs, 1205 + 22 + 964 + 27 + 1790);
        assert_eq!(
            node.alert.as_deref(),
            Some("High frequency late-night communications (10 PM - 6 AM)")
        );
        assert!(node.last_activity.is_some());

        assert!(provider.node_summary("910000000000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_dataset_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, serde_json::to_vec(&sample_dataset()).unwrap()).unwrap();

        let provider = InMemoryProvider::from_json_file(&path).unwrap();
        assert_eq!(provider.list_cases().await.unwrap().len(), 2);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(InMemoryProvider::from_json_file(&path).is_err());
    }
}
