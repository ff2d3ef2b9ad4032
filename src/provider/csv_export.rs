//! CSV export of communication records.

use crate::model::Record;
use crate::provider::error::ProviderError;
use serde::{Deserialize, Serialize};

/// One exported row. Field names are the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Record ID")]
    pub id: String,
    #[serde(rename = "A-Party")]
    pub a_party: String,
    #[serde(rename = "B-Party")]
    pub b_party: String,
    #[serde(rename = "App Type")]
    pub app_type: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Duration")]
    pub duration_secs: u64,
    #[serde(rename = "Location")]
    pub location: String,
}

impl From<&Record> for ExportRow {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            a_party: record.a_party.clone(),
            b_party: record.b_party.clone(),
            app_type: record.communication_type.clone(),
            timestamp: record.timestamp.clone(),
            duration_secs: record.duration_secs,
            location: record.location.clone(),
        }
    }
}

/// Serialize records to CSV. The header row is written even when `records` is empty.
pub fn write_records(records: &[Record]) -> Result<Vec<u8>, ProviderError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(crate::consts::cli_consts::export::CSV_HEADER)?;
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }
    writer
        .into_inner()
        .map_err(|e| ProviderError::Io(e.into_error()))
}

/// Parse bytes produced by [`write_records`].
pub fn parse_export(bytes: &[u8]) -> Result<Vec<ExportRow>, ProviderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
