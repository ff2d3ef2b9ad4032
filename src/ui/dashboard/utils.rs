//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::model::{CaseStatus, Level, PatternStatus};
use crate::notifications::Severity;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Color;

/// Get a ratatui color for a notification severity
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

pub fn level_color(level: Level) -> Color {
    match level {
        Level::Low => Color::Green,
        Level::Medium => Color::Yellow,
        Level::High => Color::LightRed,
    }
}

pub fn case_status_color(status: CaseStatus) -> Color {
    match status {
        CaseStatus::Active => Color::LightGreen,
        CaseStatus::Pending => Color::Yellow,
        CaseStatus::Closed => Color::DarkGray,
    }
}

pub fn pattern_status_color(status: PatternStatus) -> Color {
    match status {
        PatternStatus::New => Color::LightBlue,
        PatternStatus::Flagged => Color::LightRed,
        PatternStatus::UnderInvestigation => Color::Yellow,
    }
}

/// Format compact timestamp (`MM-DD HH:MM`) from an RFC 3339 timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DDTHH:MM:SSZ" format
    if let Some((date_part, time_part)) = timestamp.split_once('T') {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// A rectangle of the given percentage size centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
