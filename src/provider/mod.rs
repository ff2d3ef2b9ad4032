use crate::model::{
    Case, NewCaseFields, NodeSummary, Pattern, Record, RecordFilter, Summary,
};
use crate::provider::error::ProviderError;

pub mod csv_export;
pub mod error;
pub mod memory;
pub use memory::InMemoryProvider;

#[cfg(test)]
use mockall::automock;

/// Source of investigative data for the dashboard.
///
/// Calls may be slow; the UI loop runs search and export on background tasks.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DataProvider: Send + Sync {
    /// Headline statistics for the dashboard tab.
    async fn summary(&self) -> Result<Summary, ProviderError>;

    /// Record counts per application type, in display order.
    async fn app_usage(&self) -> Result<Vec<(String, u64)>, ProviderError>;

    async fn get_record_by_id(&self, id: &str) -> Result<Option<Record>, ProviderError>;

    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<Record>, ProviderError>;

    /// Records matching `query` that also pass `filter`.
    async fn search(
        &self,
        query: &str,
        filter: &RecordFilter,
    ) -> Result<Vec<Record>, ProviderError>;

    /// Serialize records to CSV bytes, header row first.
    async fn export(&self, records: &[Record]) -> Result<Vec<u8>, ProviderError>;

    async fn list_cases(&self) -> Result<Vec<Case>, ProviderError>;

    async fn get_case(&self, id: &str) -> Result<Option<Case>, ProviderError>;

    /// Validate and create a case. Rejections are [`ProviderError::Validation`].
    async fn create_case(&self, fields: NewCaseFields) -> Result<Case, ProviderError>;

    /// Attach a record to the active case. Returns the case it was added to.
    async fn add_record_to_case(&self, record_id: &str) -> Result<Case, ProviderError>;

    async fn flag_record(&self, record_id: &str) -> Result<(), ProviderError>;

    async fn list_patterns(&self) -> Result<Vec<Pattern>, ProviderError>;

    async fn get_pattern(&self, id: &str) -> Result<Option<Pattern>, ProviderError>;

    /// Aggregate a subscriber's activity. `None` when the MSISDN never appears.
    async fn node_summary(&self, msisdn: &str) -> Result<Option<NodeSummary>, ProviderError>;
}
