//! Alerts tab
//!
//! Suspicious patterns flagged against subscribers

use super::super::state::TerminalSurface;
use super::super::utils::{level_color, pattern_status_color};
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

pub fn render_alerts(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &TerminalSurface,
    cursor: usize,
) {
    let header = Row::new(vec!["Alert", "Type", "MSISDN", "Severity", "Status", "Description"])
        .style(
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        );

    let rows: Vec<Row> = state
        .alerts
        .iter()
        .map(|pattern| {
            Row::new(vec![
                Cell::from(pattern.id.clone()),
                Cell::from(pattern.pattern_type.clone()),
                Cell::from(pattern.msisdn.clone()),
                Cell::from(Line::from(Span::styled(
                    pattern.severity.to_string(),
                    Style::default()
                        .fg(level_color(pattern.severity))
                        .add_modifier(Modifier::BOLD),
                ))),
                Cell::from(Line::from(Span::styled(
                    pattern.status.to_string(),
                    Style::default().fg(pattern_status_color(pattern.status)),
                ))),
                Cell::from(pattern.description.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Length(22),
            Constraint::Length(13),
            Constraint::Length(9),
            Constraint::Length(20),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("> ")
    .block(
        Block::default()
            .title(format!("SUSPICIOUS PATTERNS ({})", state.alerts.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightRed)),
    );

    let selected = (!state.alerts.is_empty()).then_some(cursor);
    let mut table_state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut table_state);
}
