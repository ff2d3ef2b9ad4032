//! Dashboard controller
//!
//! Turns user intents into view-state transitions, data provider calls and render
//! requests. The controller owns no investigative data; it only remembers what is
//! currently on screen.

use crate::consts::cli_consts::export::EXPORT_FILENAME;
use crate::model::{Record, RecordDetail};
use crate::notifications::{NotificationId, NotificationQueue, Severity};
use crate::provider::DataProvider;
use crate::provider::error::ProviderError;
use crate::surface::RenderSurface;
use crate::view_state::{Modal, Tab, ViewState};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

mod actions;
pub mod error;
pub mod requests;

pub use error::DashboardError;
pub use requests::{Completion, ExportRequest, RequestTicket, SearchRequest};

pub struct Controller<S: RenderSurface> {
    view: ViewState,
    notifications: NotificationQueue,
    provider: Arc<dyn DataProvider>,
    surface: S,
    /// Whether the usage chart has been drawn since start-up.
    chart_rendered: bool,
    /// Records shown on the search tab; `None` until something was loaded.
    results: Option<Vec<Record>>,
    last_ticket: u64,
    pending_search: Option<RequestTicket>,
    pending_export: Option<RequestTicket>,
}

impl<S: RenderSurface> Controller<S> {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        surface: S,
        default_tab: Tab,
        display_duration: Duration,
    ) -> Self {
        Self {
            view: ViewState::new(default_tab),
            notifications: NotificationQueue::new(display_duration),
            provider,
            surface,
            chart_rendered: false,
            results: None,
            last_ticket: 0,
            pending_search: None,
            pending_export: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn provider(&self) -> Arc<dyn DataProvider> {
        Arc::clone(&self.provider)
    }

    pub fn results(&self) -> &[Record] {
        self.results.as_deref().unwrap_or_default()
    }

    pub fn is_search_pending(&self) -> bool {
        self.pending_search.is_some()
    }

    pub fn is_export_pending(&self) -> bool {
        self.pending_export.is_some()
    }

    /// Load headline statistics and run the side effects of the start-up tab.
    pub async fn initialize(&mut self) -> Result<(), DashboardError> {
        match self.provider.summary().await {
            Ok(summary) => self.surface.render_summary(&summary),
            Err(e) => return Err(self.report(e.into())),
        }
        let tab = self.view.active_tab();
        self.on_tab_activated(tab).await
    }

    /// Show a notification to the user.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let id = self.notifications.push(message, severity);
        if let Some(notification) = self.notifications.get(id) {
            debug!("notify {}", notification);
            self.surface.show_toast(notification);
        }
        id
    }

    /// Show `error` to the user and hand it back for the caller to return.
    fn report(&mut self, error: DashboardError) -> DashboardError {
        warn!("{}", error);
        self.notify(error.to_string(), error.severity());
        error
    }

    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        if self.notifications.dismiss(id).is_some() {
            self.surface.hide_toast(id);
            true
        } else {
            false
        }
    }

    /// Dismiss the oldest visible notification, if any.
    pub fn dismiss_oldest(&mut self) -> bool {
        let oldest = self.notifications.visible().next().map(|n| n.id);
        match oldest {
            Some(id) => self.dismiss_notification(id),
            None => false,
        }
    }

    /// Remove notifications whose display time has passed. Returns how many were removed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let expired = self.notifications.expire(now);
        for id in &expired {
            self.surface.hide_toast(*id);
        }
        expired.len()
    }

    pub async fn select_tab(&mut self, tab: Tab) -> Result<(), DashboardError> {
        self.view.select_tab(tab);
        self.on_tab_activated(tab).await
    }

    async fn on_tab_activated(&mut self, tab: Tab) -> Result<(), DashboardError> {
        match tab {
            Tab::Dashboard if !self.chart_rendered => match self.provider.app_usage().await {
                Ok(usage) => {
                    let (labels, values): (Vec<String>, Vec<u64>) = usage.into_iter().unzip();
                    self.surface.render_chart(&labels, &values);
                    self.chart_rendered = true;
                    Ok(())
                }
                Err(e) => Err(self.report(e.into())),
            },
            Tab::Search | Tab::Network if self.results.is_none() => self.refresh_results().await,
            Tab::Cases => self.refresh_cases().await,
            Tab::Alerts => self.refresh_alerts().await,
            _ => Ok(()),
        }
    }

    /// List every record passing the active filters into the search tab.
    pub async fn refresh_results(&mut self) -> Result<(), DashboardError> {
        let filter = self.view.record_filter();
        match self.provider.list_records(&filter).await {
            Ok(records) => {
                let header = format!("All Records ({} records)", records.len());
                self.surface.render_results(&header, &records);
                self.results = Some(records);
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    pub async fn open_record_detail(&mut self, record_id: &str) -> Result<(), DashboardError> {
        match self.provider.get_record_by_id(record_id).await {
            Ok(Some(record)) => {
                let detail = RecordDetail::from(&record);
                self.surface.render_detail(&detail);
                self.view.set_selected_record(detail);
                self.view.open_modal(Modal::RecordDetail);
                Ok(())
            }
            Ok(None) => Err(self.report(DashboardError::not_found("Record", record_id))),
            Err(e) => Err(self.report(e.into())),
        }
    }

    pub fn close_modal(&mut self, modal: Modal) {
        self.view.close_modal(modal);
    }

    fn issue_ticket(&mut self) -> RequestTicket {
        self.last_ticket += 1;
        RequestTicket {
            seq: self.last_ticket,
            tab: self.view.active_tab(),
        }
    }

    fn is_current(&self, pending: Option<RequestTicket>, ticket: RequestTicket) -> bool {
        pending == Some(ticket) && self.view.active_tab() == ticket.tab
    }

    /// Start a search. Any search still in flight is superseded.
    pub fn begin_search(&mut self, query: &str) -> Result<SearchRequest, DashboardError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(self.report(DashboardError::Validation {
                field: "query".to_string(),
                reason: "enter a search term".to_string(),
            }));
        }
        let ticket = self.issue_ticket();
        self.pending_search = Some(ticket);
        debug!("search {:?} issued as #{}", query, ticket.seq);
        Ok(SearchRequest {
            ticket,
            query: query.to_string(),
            filter: self.view.record_filter(),
        })
    }

    /// Apply the outcome of a search started with [`begin_search`](Self::begin_search).
    pub fn finish_search(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Record>, ProviderError>,
    ) -> Result<Completion, DashboardError> {
        if !self.is_current(self.pending_search, ticket) {
            debug!("dropping stale search result #{}", ticket.seq);
            return Ok(Completion::Stale);
        }
        self.pending_search = None;
        match result {
            Ok(records) => {
                let header = format!("Search Results ({} records found)", records.len());
                info!("{}", header);
                self.surface.render_results(&header, &records);
                self.results = Some(records);
                self.notify("Search completed successfully", Severity::Success);
                Ok(Completion::Applied)
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Run a search to completion against the provider.
    pub async fn submit_search(&mut self, query: &str) -> Result<Completion, DashboardError> {
        let request = self.begin_search(query)?;
        let result = request.run(self.provider.as_ref()).await;
        self.finish_search(request.ticket, result)
    }

    /// Switch to the search tab and search for `query`.
    pub async fn quick_search(&mut self, query: &str) -> Result<Completion, DashboardError> {
        if query.trim().is_empty() {
            return Ok(Completion::Stale);
        }
        self.view.select_tab(Tab::Search);
        self.submit_search(query).await
    }

    /// Flip a filter and tell the user. Returns the new active flag.
    pub fn toggle_filter(&mut self, filter_id: &str) -> bool {
        let active = self.view.toggle_filter(filter_id);
        let message = if active {
            format!("Applied {} filter", filter_id)
        } else {
            format!("Removed {} filter", filter_id)
        };
        self.notify(message, Severity::Info);
        active
    }

    pub fn begin_export(&mut self) -> ExportRequest {
        let ticket = self.issue_ticket();
        self.pending_export = Some(ticket);
        ExportRequest {
            ticket,
            records: self.results.clone(),
            filter: self.view.record_filter(),
        }
    }

    pub fn finish_export(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<u8>, ProviderError>,
    ) -> Result<Completion, DashboardError> {
        if !self.is_current(self.pending_export, ticket) {
            debug!("dropping stale export result #{}", ticket.seq);
            return Ok(Completion::Stale);
        }
        self.pending_export = None;
        let bytes = result.map_err(|e| self.report(e.into()))?;
        if let Err(e) = self.surface.trigger_download(EXPORT_FILENAME, &bytes) {
            return Err(self.report(DashboardError::Collaborator(format!(
                "Download of {} failed: {}",
                EXPORT_FILENAME, e
            ))));
        }
        info!("Exported {} bytes to {}", bytes.len(), EXPORT_FILENAME);
        self.notify("Results exported successfully", Severity::Success);
        Ok(Completion::Applied)
    }

    /// Export the records on screen as CSV and hand them to the surface for download.
    pub async fn export_results(&mut self) -> Result<Completion, DashboardError> {
        let request = self.begin_export();
        let result = request.run(self.provider.as_ref()).await;
        self.finish_export(request.ticket, result)
    }
}
