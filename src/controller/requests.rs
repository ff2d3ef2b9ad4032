//! Provider calls that may outlive the view that issued them.
//!
//! The controller hands out a request carrying a [`RequestTicket`]; the caller runs
//! it (inline or on a background task) and passes the result back together with the
//! ticket. Results for superseded tickets are dropped.

use crate::model::{Record, RecordFilter};
use crate::provider::DataProvider;
use crate::provider::error::ProviderError;
use crate::view_state::Tab;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Identifies one in-flight provider request and the tab it was issued from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub(super) seq: u64,
    pub(super) tab: Tab,
}

/// Whether a completion was applied to the view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request replaced this one, or the user navigated away.
    Stale,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub ticket: RequestTicket,
    pub query: String,
    pub filter: RecordFilter,
}

impl SearchRequest {
    pub async fn run(&self, provider: &dyn DataProvider) -> Result<Vec<Record>, ProviderError> {
        provider.search(&self.query, &self.filter).await
    }

    /// Run on its own tokio task so a panicking provider cannot take the caller down.
    pub async fn run_detached(
        &self,
        provider: Arc<dyn DataProvider>,
    ) -> Result<Vec<Record>, ProviderError> {
        let request = self.clone();
        join_provider_task(tokio::spawn(async move {
            request.run(provider.as_ref()).await
        }))
        .await
    }
}

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub ticket: RequestTicket,
    /// Records currently on screen; `None` exports everything passing `filter`.
    pub records: Option<Vec<Record>>,
    pub filter: RecordFilter,
}

impl ExportRequest {
    pub async fn run(&self, provider: &dyn DataProvider) -> Result<Vec<u8>, ProviderError> {
        match &self.records {
            Some(records) => provider.export(records).await,
            None => {
                let records = provider.list_records(&self.filter).await?;
                provider.export(&records).await
            }
        }
    }

    /// Run on its own tokio task so a panicking provider cannot take the caller down.
    pub async fn run_detached(
        &self,
        provider: Arc<dyn DataProvider>,
    ) -> Result<Vec<u8>, ProviderError> {
        let request = self.clone();
        join_provider_task(tokio::spawn(async move {
            request.run(provider.as_ref()).await
        }))
        .await
    }
}

async fn join_provider_task<T>(
    handle: JoinHandle<Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    handle
        .await
        .map_err(|e| ProviderError::Unavailable(format!("provider task failed: {}", e)))?
}
