//! Dashboard overview tab
//!
//! Headline statistics and the application usage chart

use super::super::state::TerminalSurface;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_overview(f: &mut Frame, area: ratatui::layout::Rect, state: &TerminalSurface) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    render_summary(f, chunks[0], state);
    render_usage_chart(f, chunks[1], state);
}

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<22}", label), Style::default().fg(Color::Gray)),
        Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_summary(f: &mut Frame, area: ratatui::layout::Rect, state: &TerminalSurface) {
    let lines = match &state.summary {
        Some(summary) => vec![
            stat_line("Total records", summary.total_records.to_string(), Color::Cyan),
            stat_line("Unique users", summary.unique_users.to_string(), Color::LightBlue),
            stat_line(
                "Relationships found",
                summary.relationships_found.to_string(),
                Color::LightGreen,
            ),
            stat_line(
                "Suspicious patterns",
                summary.suspicious_patterns.to_string(),
                Color::LightRed,
            ),
            stat_line(
                "Active investigations",
                summary.active_investigations.to_string(),
                Color::Yellow,
            ),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Data range: {} to {}",
                    summary.date_range.start, summary.date_range.end
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![Line::from("Loading summary...")],
    };

    let block = Block::default()
        .title("CASE OVERVIEW")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_usage_chart(f: &mut Frame, area: ratatui::layout::Rect, state: &TerminalSurface) {
    let block = Block::default()
        .title("APPLICATION USAGE")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    if state.chart.is_empty() {
        f.render_widget(Paragraph::new("No usage data").block(block), area);
        return;
    }

    let bars: Vec<(&str, u64)> = state
        .chart
        .iter()
        .map(|(label, value)| (label.as_str(), *value))
        .collect();
    let chart = BarChart::default()
        .block(block)
        .data(bars.as_slice())
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::LightBlue))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )
        .label_style(Style::default().fg(Color::Gray));
    f.render_widget(chart, area);
}
