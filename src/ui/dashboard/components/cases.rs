//! Cases tab

use super::super::state::TerminalSurface;
use super::super::utils::{case_status_color, level_color};
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

pub fn render_cases(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &TerminalSurface,
    cursor: usize,
) {
    let header = Row::new(vec![
        "Case", "Title", "Status", "Priority", "Investigator", "Created", "Suspects", "Evidence",
    ])
    .style(
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .cases
        .iter()
        .map(|case| {
            Row::new(vec![
                Cell::from(case.id.clone()),
                Cell::from(case.title.clone()),
                Cell::from(Line::from(Span::styled(
                    case.status.to_string(),
                    Style::default().fg(case_status_color(case.status)),
                ))),
                Cell::from(Line::from(Span::styled(
                    case.priority.to_string(),
                    Style::default().fg(level_color(case.priority)),
                ))),
                Cell::from(case.investigator.clone()),
                Cell::from(case.created.clone()),
                Cell::from(case.suspects.join(", ")),
                Cell::from(case.evidence.len().to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Fill(2),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(11),
            Constraint::Fill(1),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("> ")
    .block(
        Block::default()
            .title(format!("CASES ({})", state.cases.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    let selected = (!state.cases.is_empty()).then_some(cursor);
    let mut table_state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut table_state);
}
