//! Dashboard screen model
//!
//! [`TerminalSurface`] is the terminal implementation of the rendering surface: it
//! keeps whatever the controller asked to show until the next frame is drawn.

use crate::model::{Case, NodeSummary, Pattern, Record, RecordDetail, Summary};
use crate::notifications::{Notification, NotificationId};
use crate::surface::RenderSurface;
use crate::ui::app::UIConfig;
use log::info;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Everything the terminal dashboard draws, as last requested by the controller.
#[derive(Debug)]
pub struct TerminalSurface {
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Directory exported files are written to.
    pub export_dir: PathBuf,
    /// Animation tick counter
    pub tick: usize,

    pub summary: Option<Summary>,
    /// Application usage chart as `(label, count)` bars.
    pub chart: Vec<(String, u64)>,
    pub detail: Option<RecordDetail>,
    pub node: Option<NodeSummary>,
    pub results_header: String,
    pub results: Vec<Record>,
    pub cases: Vec<Case>,
    pub alerts: Vec<Pattern>,
    /// Toasts currently on screen, oldest first.
    pub toasts: VecDeque<Notification>,
    /// Path of the most recent download.
    pub last_download: Option<PathBuf>,
}

impl TerminalSurface {
    pub fn new(start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            start_time,
            with_background_color: ui_config.with_background_color,
            export_dir: ui_config.export_dir,
            tick: 0,
            summary: None,
            chart: Vec::new(),
            detail: None,
            node: None,
            results_header: "Search Results".to_string(),
            results: Vec::new(),
            cases: Vec::new(),
            alerts: Vec::new(),
            toasts: VecDeque::new(),
            last_download: None,
        }
    }

    /// Distinct subscribers appearing in the loaded records, sorted.
    pub fn subscribers(&self) -> Vec<&str> {
        let mut parties: Vec<&str> = self
            .results
            .iter()
            .flat_map(|r| [r.a_party.as_str(), r.b_party.as_str()])
            .collect();
        parties.sort_unstable();
        parties.dedup();
        parties
    }

    /// Advance the animation counter.
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

impl RenderSurface for TerminalSurface {
    fn render_summary(&mut self, summary: &Summary) {
        self.summary = Some(summary.clone());
    }

    fn render_chart(&mut self, labels: &[String], values: &[u64]) {
        self.chart = labels.iter().cloned().zip(values.iter().copied()).collect();
    }

    fn render_detail(&mut self, detail: &RecordDetail) {
        self.detail = Some(detail.clone());
    }

    fn render_node(&mut self, node: &NodeSummary) {
        self.node = Some(node.clone());
    }

    fn render_results(&mut self, header: &str, records: &[Record]) {
        self.results_header = header.to_string();
        self.results = records.to_vec();
    }

    fn render_cases(&mut self, cases: &[Case]) {
        self.cases = cases.to_vec();
    }

    fn render_alerts(&mut self, patterns: &[Pattern]) {
        self.alerts = patterns.to_vec();
    }

    fn show_toast(&mut self, notification: &Notification) {
        self.toasts.push_back(notification.clone());
    }

    fn hide_toast(&mut self, id: NotificationId) {
        self.toasts.retain(|t| t.id != id);
    }

    fn trigger_download(&mut self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join(filename);
        fs::write(&path, bytes)?;
        info!("Wrote {} bytes to {}", bytes.len(), path.display());
        self.last_download = Some(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{NotificationQueue, Severity};
    use std::time::Duration;
    use tempfile::tempdir;

    fn surface(export_dir: PathBuf) -> TerminalSurface {
        TerminalSurface::new(
            Instant::now(),
            UIConfig::new(false, export_dir),
        )
    }

    #[test]
    fn test_download_writes_into_export_dir() {
        let dir = tempdir().unwrap();
        let export_dir = dir.path().join("exports");
        let mut surface = surface(export_dir.clone());

        surface.trigger_download("out.csv", b"a,b\n").unwrap();
        let written = export_dir.join("out.csv");
        assert_eq!(fs::read(&written).unwrap(), b"a,b\n");
        assert_eq!(surface.last_download, Some(written));
    }

    #[test]
    fn test_toasts_follow_show_and_hide() {
        let dir = tempdir().unwrap();
        let mut surface = surface(dir.path().to_path_buf());
        let mut queue = NotificationQueue::new(Duration::from_secs(5));
        let a = queue.push("a", Severity::Info);
        let b = queue.push("b", Severity::Error);

        surface.show_toast(queue.get(a).unwrap());
        surface.show_toast(queue.get(b).unwrap());
        surface.hide_toast(a);
        surface.hide_toast(a);

        let ids: Vec<_> = surface.toasts.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b]);
    }

    #[test]
    fn test_chart_is_replaced() {
        let dir = tempdir().unwrap();
        let mut surface = surface(dir.path().to_path_buf());
        surface.render_chart(&["SSH".to_string()], &[3]);
        surface.render_chart(&["FTP".to_string(), "HTTP".to_string()], &[1, 2]);
        assert_eq!(
            surface.chart,
            vec![("FTP".to_string(), 1), ("HTTP".to_string(), 2)]
        );
    }

    #[test]
    fn test_subscribers_are_distinct() {
        let dir = tempdir().unwrap();
        let mut surface = surface(dir.path().to_path_buf());
        let records = crate::provider::memory::sample_dataset().records;
        surface.render_results("All", &records);
        let subscribers = surface.subscribers();
        assert_eq!(subscribers.len(), 8);
        assert!(subscribers.windows(2).all(|w| w[0] < w[1]));
    }
}
