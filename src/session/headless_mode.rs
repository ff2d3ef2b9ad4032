//! Headless mode execution
//!
//! One-shot commands that run a single dashboard intent and print what the
//! dashboard would have shown.

use super::{SessionData, messages::SessionMessage};
use crate::consts::cli_consts::export::EXPORT_FILENAME;
use crate::controller::{Completion, Controller};
use crate::logging::{LogLevel, should_log};
use crate::model::{Case, NodeSummary, Pattern, Record, RecordDetail, Summary, format_duration};
use crate::notifications::{Notification, NotificationId, Severity};
use crate::surface::RenderSurface;
use crate::view_state::Tab;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Rendering surface that writes to a text stream instead of a terminal UI.
pub struct ConsoleSurface<W: Write> {
    out: W,
    /// Notifications below this level are not printed.
    threshold: LogLevel,
    /// Exact path for downloads; otherwise the file lands in `export_dir`.
    output: Option<PathBuf>,
    export_dir: PathBuf,
    last_download: Option<PathBuf>,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W, threshold: LogLevel, export_dir: PathBuf) -> Self {
        Self {
            out,
            threshold,
            output: None,
            export_dir,
            last_download: None,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    // Console output is best effort; a closed pipe must not abort the command.
    fn line(&mut self, text: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}", text.as_ref());
    }
}

fn record_line(record: &Record) -> String {
    format!(
        "{:<8} {:>13} -> {:<13} {:<12} {:<21} {:>9} {}",
        record.id,
        record.a_party,
        record.b_party,
        record.communication_type,
        record.timestamp,
        format_duration(record.duration_secs),
        record.location
    )
}

impl<W: Write> RenderSurface for ConsoleSurface<W> {
    fn render_summary(&mut self, summary: &Summary) {
        self.line("Investigation summary");
        self.line(format!("  Total records:         {}", summary.total_records));
        self.line(format!("  Unique users:          {}", summary.unique_users));
        self.line(format!("  Relationships found:   {}", summary.relationships_found));
        self.line(format!("  Suspicious patterns:   {}", summary.suspicious_patterns));
        self.line(format!(
            "  Active investigations: {}",
            summary.active_investigations
        ));
        self.line(format!(
            "  Data range:            {} to {}",
            summary.date_range.start, summary.date_range.end
        ));
    }

    fn render_chart(&mut self, labels: &[String], values: &[u64]) {
        self.line("Application usage");
        let widest = values.iter().copied().max().unwrap_or(0).max(1);
        for (label, value) in labels.iter().zip(values) {
            let bar = "#".repeat(((value * 30) / widest) as usize);
            self.line(format!("  {:<12} {:>5} {}", label, value, bar));
        }
    }

    fn render_detail(&mut self, detail: &RecordDetail) {
        self.line(format!(
            "{}: {} -> {} via {} at {} for {} ({}, {})",
            detail.id,
            detail.a_party,
            detail.b_party,
            detail.communication_type,
            detail.timestamp,
            detail.duration,
            detail.location,
            detail.method
        ));
    }

    fn render_node(&mut self, node: &NodeSummary) {
        self.line(format!(
            "{}: {} connections, {}s total",
            node.msisdn, node.connections, node.total_duration_secs
        ));
    }

    fn render_results(&mut self, header: &str, records: &[Record]) {
        self.line(header);
        for record in records {
            self.line(record_line(record));
        }
    }

    fn render_cases(&mut self, cases: &[Case]) {
        for case in cases {
            self.line(format!(
                "{} {} [{}] {}",
                case.id, case.title, case.status, case.priority
            ));
        }
    }

    fn render_alerts(&mut self, patterns: &[Pattern]) {
        for pattern in patterns {
            self.line(format!(
                "{} {} {} [{}]",
                pattern.id, pattern.pattern_type, pattern.msisdn, pattern.severity
            ));
        }
    }

    fn show_toast(&mut self, notification: &Notification) {
        if !should_log(notification.severity.into(), self.threshold) {
            return;
        }
        let message = match notification.severity {
            Severity::Info => SessionMessage::info(&notification.message),
            Severity::Success => SessionMessage::success(&notification.message),
            Severity::Warning => SessionMessage::warn(&notification.message),
            Severity::Error => SessionMessage::error(&notification.message),
        };
        self.line(message.render());
    }

    fn hide_toast(&mut self, _id: NotificationId) {}

    fn trigger_download(&mut self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        let path = match &self.output {
            Some(path) => path.clone(),
            None => self.export_dir.join(filename),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        self.line(format!("Wrote {} bytes to {}", bytes.len(), path.display()));
        self.last_download = Some(path);
        Ok(())
    }
}

type ConsoleController = Controller<ConsoleSurface<std::io::Stdout>>;

fn console_controller(session: SessionData, output: Option<PathBuf>) -> ConsoleController {
    let surface = ConsoleSurface::new(
        std::io::stdout(),
        LogLevel::Info,
        session.config.resolved_export_dir(),
    )
    .with_output(output);
    Controller::new(
        session.provider,
        surface,
        Tab::Dashboard,
        session.config.notification_display(),
    )
}

/// Switch on each requested application filter. Repeating a filter keeps it on.
fn apply_filters<S: RenderSurface>(controller: &mut Controller<S>, filters: &[String]) {
    for filter in filters {
        if !controller.view().is_filter_active(filter) {
            controller.toggle_filter(filter);
        }
    }
}

/// Print the headline statistics and application usage.
pub async fn run_summary(session: SessionData) -> Result<(), Box<dyn Error>> {
    let mut controller = console_controller(session, None);
    controller.initialize().await?;
    Ok(())
}

/// Search records, optionally restricted to application types, and print the matches.
pub async fn run_search(
    session: SessionData,
    query: &str,
    filters: &[String],
) -> Result<(), Box<dyn Error>> {
    let mut controller = console_controller(session, None);
    apply_filters(&mut controller, filters);
    controller.submit_search(query).await?;
    Ok(())
}

/// Export records as CSV: the matches of `query` when given, otherwise every record.
pub async fn run_export(
    session: SessionData,
    output: Option<PathBuf>,
    query: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let mut controller = console_controller(session, output);
    if let Some(query) = query {
        controller.submit_search(query).await?;
    }
    if controller.export_results().await? == Completion::Stale {
        return Err(format!("Export of {} was superseded", EXPORT_FILENAME).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::InMemoryProvider;
    use crate::provider::csv_export::parse_export;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::tempdir;

    fn controller(
        threshold: LogLevel,
        export_dir: PathBuf,
    ) -> Controller<ConsoleSurface<Vec<u8>>> {
        Controller::new(
            Arc::new(InMemoryProvider::sample()),
            ConsoleSurface::new(Vec::new(), threshold, export_dir),
            Tab::Dashboard,
            Duration::from_secs(5),
        )
    }

    fn printed(controller: &Controller<ConsoleSurface<Vec<u8>>>) -> String {
        String::from_utf8(controller.surface().out.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_summary_prints_statistics_and_chart() {
        let dir = tempdir().unwrap();
        let mut controller = controller(LogLevel::Info, dir.path().to_path_buf());
        controller.initialize().await.unwrap();

        let out = printed(&controller);
        assert!(out.contains("Total records:         12"));
        assert!(out.contains("Application usage"));
        assert!(out.contains("WhatsApp"));
    }

    #[tokio::test]
    async fn test_search_prints_matches() {
        let dir = tempdir().unwrap();
        let mut controller = controller(LogLevel::Info, dir.path().to_path_buf());
        controller.quick_search("ssh").await.unwrap();

        let out = printed(&controller);
        assert!(out.contains("Search Results (2 records found)"));
        assert!(out.contains("REL_003"));
        assert!(out.contains("REL_012"));
        assert!(out.contains("[SUCCESS]"));
    }

    #[tokio::test]
    async fn test_threshold_hides_info_notifications() {
        let dir = tempdir().unwrap();
        let mut controller = controller(LogLevel::Warn, dir.path().to_path_buf());
        controller.toggle_filter("SSH");
        assert!(controller.submit_search(" ").await.is_err());

        let out = printed(&controller);
        assert!(!out.contains("Applied SSH filter"));
        assert!(out.contains("[WARN]"));
    }

    #[tokio::test]
    async fn test_repeated_filter_stays_applied() {
        let dir = tempdir().unwrap();
        let mut controller = controller(LogLevel::Info, dir.path().to_path_buf());
        apply_filters(&mut controller, &["SSH".to_string(), "SSH".to_string()]);
        assert!(controller.view().is_filter_active("SSH"));

        controller.submit_search("9172").await.unwrap();
        assert_eq!(controller.results().len(), 1);
        assert!(
            controller
                .results()
                .iter()
                .all(|r| r.communication_type == "SSH")
        );
        assert!(!printed(&controller).contains("Removed SSH filter"));
    }

    #[tokio::test]
    async fn test_export_to_explicit_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("nested").join("whatsapp.csv");
        let mut controller = controller(LogLevel::Info, dir.path().to_path_buf());
        controller.surface_mut().output = Some(output.clone());

        controller.quick_search("whatsapp").await.unwrap();
        controller.export_results().await.unwrap();

        assert_eq!(controller.surface().last_download.as_ref(), Some(&output));
        let rows = parse_export(&fs::read(&output).unwrap()).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["REL_004", "REL_005", "REL_008"]);
    }

    #[tokio::test]
    async fn test_export_defaults_to_export_dir() {
        let dir = tempdir().unwrap();
        let mut controller = controller(LogLevel::Info, dir.path().to_path_buf());
        controller.export_results().await.unwrap();

        let written = dir.path().join(EXPORT_FILENAME);
        assert_eq!(controller.surface().last_download.as_ref(), Some(&written));
        assert_eq!(parse_export(&fs::read(written).unwrap()).unwrap().len(), 12);
    }
}
