//! Rendering surface
//!
//! The controller describes what should be shown; implementations decide how.
//! The terminal UI implements this in `ui::dashboard::state`.

use crate::model::{Case, NodeSummary, Pattern, Record, RecordDetail, Summary};
use crate::notifications::{Notification, NotificationId};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait RenderSurface {
    fn render_summary(&mut self, summary: &Summary);

    /// Draw the application usage chart, replacing any previous one.
    fn render_chart(&mut self, labels: &[String], values: &[u64]);

    fn render_detail(&mut self, detail: &RecordDetail);

    fn render_node(&mut self, node: &NodeSummary);

    fn render_results(&mut self, header: &str, records: &[Record]);

    fn render_cases(&mut self, cases: &[Case]);

    fn render_alerts(&mut self, patterns: &[Pattern]);

    fn show_toast(&mut self, notification: &Notification);

    fn hide_toast(&mut self, id: NotificationId);

    /// Hand exported bytes to the user under `filename`.
    fn trigger_download(&mut self, filename: &str, bytes: &[u8]) -> std::io::Result<()>;
}
