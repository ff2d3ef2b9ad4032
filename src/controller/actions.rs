//! Record, case, alert and network intents.

use super::{Controller, DashboardError};
use crate::model::NewCaseFields;
use crate::notifications::Severity;
use crate::provider::error::ProviderError;
use crate::surface::RenderSurface;
use crate::view_state::{FieldError, Modal, Tab};
use log::info;

impl<S: RenderSurface> Controller<S> {
    pub async fn refresh_cases(&mut self) -> Result<(), DashboardError> {
        match self.provider.list_cases().await {
            Ok(cases) => {
                self.surface.render_cases(&cases);
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    pub async fn refresh_alerts(&mut self) -> Result<(), DashboardError> {
        match self.provider.list_patterns().await {
            Ok(patterns) => {
                self.surface.render_alerts(&patterns);
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Attach a record to the active case and close the record modal.
    pub async fn add_record_to_case(&mut self, record_id: &str) -> Result<(), DashboardError> {
        match self.provider.add_record_to_case(record_id).await {
            Ok(case) => {
                info!("Record {} added to {}", record_id, case.id);
                self.notify(
                    format!("Record {} added to active case", record_id),
                    Severity::Success,
                );
                self.view.close_modal(Modal::RecordDetail);
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Flag a record as suspicious and close the record modal.
    pub async fn flag_record(&mut self, record_id: &str) -> Result<(), DashboardError> {
        match self.provider.flag_record(record_id).await {
            Ok(()) => {
                self.notify(
                    format!("Record {} flagged as suspicious", record_id),
                    Severity::Warning,
                );
                self.view.close_modal(Modal::RecordDetail);
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    pub fn open_new_case(&mut self) {
        self.view.open_modal(Modal::NewCase);
    }

    /// Submit the new-case form. Validation failures keep the form open with the
    /// offending field recorded for re-display.
    pub async fn submit_new_case(&mut self, fields: NewCaseFields) -> Result<(), DashboardError> {
        match self.provider.create_case(fields).await {
            Ok(case) => {
                info!("Case {} created", case.id);
                self.view.close_modal(Modal::NewCase);
                self.notify("New case created successfully", Severity::Success);
                if self.view.active_tab() == Tab::Cases {
                    self.refresh_cases().await?;
                }
                Ok(())
            }
            Err(ProviderError::Validation { field, reason }) => {
                self.view.set_case_form_error(FieldError {
                    field: field.clone(),
                    reason: reason.clone(),
                });
                Err(self.report(DashboardError::Validation { field, reason }))
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    pub async fn view_case(&mut self, case_id: &str) -> Result<(), DashboardError> {
        let title = self.case_title(case_id).await?;
        self.notify(format!("Opening case: {}", title), Severity::Info);
        Ok(())
    }

    pub async fn generate_report(&mut self, case_id: &str) -> Result<(), DashboardError> {
        let title = self.case_title(case_id).await?;
        self.notify(format!("Generating report for: {}", title), Severity::Success);
        Ok(())
    }

    async fn case_title(&mut self, case_id: &str) -> Result<String, DashboardError> {
        match self.provider.get_case(case_id).await {
            Ok(Some(case)) => Ok(case.title),
            Ok(None) => Err(self.report(DashboardError::not_found("Case", case_id))),
            Err(e) => Err(self.report(e.into())),
        }
    }

    pub async fn investigate_alert(&mut self, pattern_id: &str) -> Result<(), DashboardError> {
        let pattern_type = self.pattern_type(pattern_id).await?;
        self.notify(
            format!("Starting investigation for: {}", pattern_type),
            Severity::Warning,
        );
        Ok(())
    }

    pub async fn alert_details(&mut self, pattern_id: &str) -> Result<(), DashboardError> {
        let pattern_type = self.pattern_type(pattern_id).await?;
        self.notify(
            format!("Showing details for: {}", pattern_type),
            Severity::Info,
        );
        Ok(())
    }

    async fn pattern_type(&mut self, pattern_id: &str) -> Result<String, DashboardError> {
        match self.provider.get_pattern(pattern_id).await {
            Ok(Some(pattern)) => Ok(pattern.pattern_type),
            Ok(None) => Err(self.report(DashboardError::not_found("Alert", pattern_id))),
            Err(e) => Err(self.report(e.into())),
        }
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
        self.notify("Zoomed in", Severity::Info);
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
        self.notify("Zoomed out", Severity::Info);
    }

    pub fn reset_network_view(&mut self) {
        self.view.reset_network_view();
        self.notify("View reset to default", Severity::Info);
    }

    pub fn set_timeline(&mut self, days: u16) {
        let days = self.view.set_timeline_days(days);
        self.notify(format!("Filtering to last {} days", days), Severity::Info);
    }

    /// Show the aggregated activity of one subscriber in the network panel.
    pub async fn select_node(&mut self, msisdn: &str) -> Result<(), DashboardError> {
        match self.provider.node_summary(msisdn).await {
            Ok(Some(node)) => {
                self.surface.render_node(&node);
                Ok(())
            }
            Ok(None) => Err(self.report(DashboardError::not_found("Subscriber", msisdn))),
            Err(e) => Err(self.report(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::RecordingSurface;
    use super::*;
    use crate::model::Level;
    use crate::provider::{DataProvider, InMemoryProvider, MockDataProvider};
    use std::sync::Arc;
    use std::time::Duration;

    fn controller_with(provider: impl DataProvider + 'static) -> Controller<RecordingSurface> {
        Controller::new(
            Arc::new(provider),
            RecordingSurface::default(),
            Tab::Dashboard,
            Duration::from_millis(5_000),
        )
    }

    fn last_message(controller: &Controller<RecordingSurface>) -> (Severity, String) {
        let n = controller.notifications().visible().last().unwrap();
        (n.severity, n.message.clone())
    }

    fn valid_case() -> NewCaseFields {
        NewCaseFields {
            title: "Operation Nightjar".to_string(),
            priority: Some(Level::High),
            investigator: "Agent Rao".to_string(),
            suspects: "917280305443".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_record_to_case_closes_modal() {
        let mut controller = controller_with(InMemoryProvider::sample());
        controller.open_record_detail("REL_002").await.unwrap();

        controller.add_record_to_case("REL_002").await.unwrap();
        assert!(!controller.view().is_modal_open(Modal::RecordDetail));
        assert!(controller.view().selected_record().is_none());
        assert_eq!(
            last_message(&controller),
            (
                Severity::Success,
                "Record REL_002 added to active case".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_failed_record_action_keeps_modal_open() {
        let mut provider = MockDataProvider::new();
        provider.expect_get_record_by_id().returning(|_| {
            Ok(crate::provider::memory::sample_dataset()
                .records
                .into_iter()
                .next())
        });
        provider
            .expect_flag_record()
            .returning(|_| Err(ProviderError::Unavailable("read-only".to_string())));
        let mut controller = controller_with(provider);
        controller.open_record_detail("REL_001").await.unwrap();

        assert!(controller.flag_record("REL_001").await.is_err());
        assert!(controller.view().is_modal_open(Modal::RecordDetail));
        assert_eq!(last_message(&controller).0, Severity::Error);
    }

    #[tokio::test]
    async fn test_flag_record() {
        let mut controller = controller_with(InMemoryProvider::sample());
        controller.open_record_detail("REL_003").await.unwrap();
        controller.flag_record("REL_003").await.unwrap();

        assert!(!controller.view().is_modal_open(Modal::RecordDetail));
        assert_eq!(
            last_message(&controller),
            (
                Severity::Warning,
                "Record REL_003 flagged as suspicious".to_string()
            )
        );
    }

    #[tokio::test]
    // A rejected form stays open and remembers which field was wrong.
    async fn test_new_case_validation_keeps_modal_open() {
        let mut controller = controller_with(InMemoryProvider::sample());
        controller.open_new_case();

        let fields = NewCaseFields {
            title: String::new(),
            ..valid_case()
        };
        let err = controller.submit_new_case(fields).await.unwrap_err();

        assert!(matches!(err, DashboardError::Validation { ref field, .. } if field == "title"));
        assert!(controller.view().is_modal_open(Modal::NewCase));
        assert_eq!(controller.view().case_form_error().unwrap().field, "title");
        assert_eq!(last_message(&controller).0, Severity::Warning);
    }

    #[tokio::test]
    async fn test_new_case_success_closes_modal_and_refreshes_cases() {
        let mut controller = controller_with(InMemoryProvider::sample());
        controller.select_tab(Tab::Cases).await.unwrap();
        controller.open_new_case();

        controller
            .submit_new_case(NewCaseFields {
                priority: None,
                ..valid_case()
            })
            .await
            .unwrap_err();
        controller.submit_new_case(valid_case()).await.unwrap();

        assert!(!controller.view().is_modal_open(Modal::NewCase));
        assert!(controller.view().case_form_error().is_none());
        assert_eq!(controller.surface().cases, vec![2, 3]);
        assert_eq!(
            last_message(&controller),
            (Severity::Success, "New case created successfully".to_string())
        );
    }

    #[tokio::test]
    async fn test_case_actions() {
        let mut controller = controller_with(InMemoryProvider::sample());
        controller.view_case("CASE_001").await.unwrap();
        assert_eq!(
            last_message(&controller),
            (
                Severity::Info,
                "Opening case: Operation Digital Trail".to_string()
            )
        );

        controller.generate_report("CASE_002").await.unwrap();
        assert_eq!(
            last_message(&controller),
            (
                Severity::Success,
                "Generating report for: Network Analysis - Group Alpha".to_string()
            )
        );

        let err = controller.view_case("CASE_404").await.unwrap_err();
        assert_eq!(err, DashboardError::not_found("Case", "CASE_404"));
    }

    #[tokio::test]
    async fn test_alert_actions() {
        let mut controller = controller_with(InMemoryProvider::sample());
        controller.investigate_alert("SUSP_002").await.unwrap();
        assert_eq!(
            last_message(&controller),
            (
                Severity::Warning,
                "Starting investigation for: SHORT_DURATION_CALLS".to_string()
            )
        );

        controller.alert_details("SUSP_003").await.unwrap();
        assert_eq!(
            last_message(&controller),
            (
                Severity::Info,
                "Showing details for: MULTIPLE_DEVICES".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_alerts_tab_lists_patterns() {
        let mut controller = controller_with(InMemoryProvider::sample());
        controller.select_tab(Tab::Alerts).await.unwrap();
        assert_eq!(controller.surface().alerts, vec![3]);
    }

    #[test]
    fn test_network_controls() {
        let mut controller = controller_with(InMemoryProvider::sample());
        controller.zoom_in();
        controller.zoom_in();
        controller.zoom_out();
        assert_eq!(controller.view().network().zoom, 1);

        controller.set_timeline(14);
        assert_eq!(controller.view().network().timeline_days, 14);
        assert_eq!(
            last_message(&controller),
            (Severity::Info, "Filtering to last 14 days".to_string())
        );

        controller.reset_network_view();
        assert_eq!(controller.view().network().timeline_days, 30);
        assert_eq!(controller.view().network().zoom, 0);
        assert_eq!(
            last_message(&controller),
            (Severity::Info, "View reset to default".to_string())
        );
        assert_eq!(controller.notifications().len(), 5);
    }

    #[tokio::test]
    async fn test_select_node() {
        let mut controller = controller_with(InMemoryProvider::sample());
        controller.select_node("918389720476").await.unwrap();
        let node = controller.surface().nodes.last().unwrap();
        assert_eq!(node.msisdn, "918389720476");
        assert_eq!(
            node.alert.as_deref(),
            Some("Multiple very short duration calls (< 30 seconds)")
        );

        let err = controller.select_node("910000000000").await.unwrap_err();
        assert_eq!(err, DashboardError::not_found("Subscriber", "910000000000"));
        assert_eq!(last_message(&controller).0, Severity::Error);
    }
}
