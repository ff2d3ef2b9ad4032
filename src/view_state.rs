//! View state
//!
//! Which tab is active, which modals are open, and the small amount of per-view
//! state (filters, network viewport, form errors) the dashboard keeps between renders.

use crate::consts::cli_consts::network;
use crate::model::{RecordDetail, RecordFilter};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Top-level views. Exactly one is active at a time.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Search,
    Network,
    Cases,
    Alerts,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Search,
        Tab::Network,
        Tab::Cases,
        Tab::Alerts,
    ];

    /// Position of the tab in the navigation bar.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Overlay dialogs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum Modal {
    RecordDetail,
    NewCase,
}

/// A field-level rejection of the new-case form, kept for re-display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

/// Zoom level and timeline window of the network tab.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NetworkView {
    pub zoom: i8,
    pub timeline_days: u16,
}

impl Default for NetworkView {
    fn default() -> Self {
        Self {
            zoom: 0,
            timeline_days: network::DEFAULT_TIMELINE_DAYS,
        }
    }
}

#[derive(Debug, Default)]
pub struct ViewState {
    active_tab: Tab,
    /// Open modals, bottom to top. Only the last one is interactable.
    modal_stack: Vec<Modal>,
    active_filters: BTreeSet<String>,
    network: NetworkView,
    case_form_error: Option<FieldError>,
    selected_record: Option<RecordDetail>,
}

impl ViewState {
    pub fn new(default_tab: Tab) -> Self {
        Self {
            active_tab: default_tab,
            ..Self::default()
        }
    }

    /// Make `tab` the active tab. Returns whether the active tab changed.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        let changed = self.active_tab != tab;
        if changed {
            debug!("tab {} -> {}", self.active_tab, tab);
        }
        self.active_tab = tab;
        changed
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Open `modal` on top of any already open. Re-opening an open modal raises it.
    pub fn open_modal(&mut self, modal: Modal) {
        self.modal_stack.retain(|m| *m != modal);
        self.modal_stack.push(modal);
        debug!("modal {} opened (stack depth {})", modal, self.modal_stack.len());
    }

    /// Close `modal` wherever it sits in the stack. Closing a closed modal is a no-op.
    pub fn close_modal(&mut self, modal: Modal) {
        let before = self.modal_stack.len();
        self.modal_stack.retain(|m| *m != modal);
        if self.modal_stack.len() == before {
            return;
        }
        debug!("modal {} closed", modal);
        match modal {
            Modal::NewCase => self.case_form_error = None,
            Modal::RecordDetail => self.selected_record = None,
        }
    }

    pub fn is_modal_open(&self, modal: Modal) -> bool {
        self.modal_stack.contains(&modal)
    }

    /// The modal that currently receives input, if any.
    pub fn top_modal(&self) -> Option<Modal> {
        self.modal_stack.last().copied()
    }

    /// Flip a filter. Returns the new active flag.
    pub fn toggle_filter(&mut self, filter_id: &str) -> bool {
        let active = if self.active_filters.remove(filter_id) {
            false
        } else {
            self.active_filters.insert(filter_id.to_string());
            true
        };
        debug!("filter {} active={}", filter_id, active);
        active
    }

    pub fn is_filter_active(&self, filter_id: &str) -> bool {
        self.active_filters.contains(filter_id)
    }

    pub fn active_filters(&self) -> impl Iterator<Item = &str> {
        self.active_filters.iter().map(String::as_str)
    }

    pub fn record_filter(&self) -> RecordFilter {
        RecordFilter {
            app_types: self.active_filters.clone(),
        }
    }

    pub fn network(&self) -> NetworkView {
        self.network
    }

    pub fn zoom_in(&mut self) -> i8 {
        self.network.zoom = (self.network.zoom + 1).min(network::MAX_ZOOM);
        self.network.zoom
    }

    pub fn zoom_out(&mut self) -> i8 {
        self.network.zoom = (self.network.zoom - 1).max(-network::MAX_ZOOM);
        self.network.zoom
    }

    pub fn reset_network_view(&mut self) {
        self.network = NetworkView::default();
    }

    /// Set the timeline window, clamped to the supported range. Returns the applied value.
    pub fn set_timeline_days(&mut self, days: u16) -> u16 {
        self.network.timeline_days = days.clamp(1, network::MAX_TIMELINE_DAYS);
        self.network.timeline_days
    }

    pub fn set_case_form_error(&mut self, error: FieldError) {
        self.case_form_error = Some(error);
    }

    pub fn case_form_error(&self) -> Option<&FieldError> {
        self.case_form_error.as_ref()
    }

    pub fn set_selected_record(&mut self, detail: RecordDetail) {
        self.selected_record = Some(detail);
    }

    pub fn selected_record(&self) -> Option<&RecordDetail> {
        self.selected_record.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Exactly one tab is active, whatever sequence of selections is made.
    fn test_single_active_tab() {
        let mut view = ViewState::new(Tab::Dashboard);
        assert_eq!(view.active_tab(), Tab::Dashboard);

        assert!(view.select_tab(Tab::Network));
        assert_eq!(view.active_tab(), Tab::Network);

        assert!(!view.select_tab(Tab::Network));
        assert_eq!(view.active_tab(), Tab::Network);

        assert!(view.select_tab(Tab::Dashboard));
        assert_eq!(view.active_tab(), Tab::Dashboard);
    }

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(Tab::Dashboard.next(), Tab::Search);
        assert_eq!(Tab::Alerts.next(), Tab::Dashboard);
        assert_eq!(Tab::Dashboard.previous(), Tab::Alerts);
        assert_eq!(Tab::Cases.index(), 3);
    }

    #[test]
    fn test_modals_closed_until_opened() {
        let mut view = ViewState::default();
        assert!(!view.is_modal_open(Modal::RecordDetail));
        assert!(!view.is_modal_open(Modal::NewCase));

        view.open_modal(Modal::RecordDetail);
        assert!(view.is_modal_open(Modal::RecordDetail));
        assert!(!view.is_modal_open(Modal::NewCase));

        view.close_modal(Modal::RecordDetail);
        assert!(!view.is_modal_open(Modal::RecordDetail));
    }

    #[test]
    fn test_double_close_is_idempotent() {
        let mut view = ViewState::default();
        view.open_modal(Modal::NewCase);
        view.open_modal(Modal::RecordDetail);

        view.close_modal(Modal::NewCase);
        let after_once = (
            view.is_modal_open(Modal::NewCase),
            view.is_modal_open(Modal::RecordDetail),
            view.top_modal(),
        );
        view.close_modal(Modal::NewCase);
        let after_twice = (
            view.is_modal_open(Modal::NewCase),
            view.is_modal_open(Modal::RecordDetail),
            view.top_modal(),
        );
        assert_eq!(after_once, after_twice);
    }

    #[test]
    // The most recently opened modal is on top; re-opening raises it.
    fn test_modal_stacking() {
        let mut view = ViewState::default();
        assert_eq!(view.top_modal(), None);

        view.open_modal(Modal::NewCase);
        view.open_modal(Modal::RecordDetail);
        assert_eq!(view.top_modal(), Some(Modal::RecordDetail));

        view.open_modal(Modal::NewCase);
        assert_eq!(view.top_modal(), Some(Modal::NewCase));

        view.close_modal(Modal::NewCase);
        assert_eq!(view.top_modal(), Some(Modal::RecordDetail));
    }

    #[test]
    fn test_closing_new_case_clears_form_error() {
        let mut view = ViewState::default();
        view.open_modal(Modal::NewCase);
        view.set_case_form_error(FieldError {
            field: "title".to_string(),
            reason: "required".to_string(),
        });
        assert!(view.case_form_error().is_some());

        view.close_modal(Modal::NewCase);
        assert!(view.case_form_error().is_none());
    }

    #[test]
    fn test_toggle_filter() {
        let mut view = ViewState::default();
        assert!(view.toggle_filter("SSH"));
        assert!(view.is_filter_active("SSH"));
        assert!(view.record_filter().app_types.contains("SSH"));

        assert!(!view.toggle_filter("SSH"));
        assert!(!view.is_filter_active("SSH"));
        assert!(view.record_filter().app_types.is_empty());
    }

    #[test]
    fn test_network_view_bounds() {
        let mut view = ViewState::default();
        for _ in 0..20 {
            view.zoom_in();
        }
        assert_eq!(view.network().zoom, network::MAX_ZOOM);

        assert_eq!(view.set_timeline_days(0), 1);
        assert_eq!(view.set_timeline_days(500), network::MAX_TIMELINE_DAYS);

        view.reset_network_view();
        assert_eq!(view.network(), NetworkView::default());
        assert_eq!(view.network().timeline_days, 30);
    }
}
