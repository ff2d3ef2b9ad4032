//! Search tab
//!
//! Query box, application filter chips and the result table

use super::super::utils::format_compact_timestamp;
use crate::consts::cli_consts::search::FILTER_APP_TYPES;
use crate::model::format_duration;
use crate::ui::app::{App, InputMode};
use crate::view_state::Tab;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, TableState};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render_search(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(area);

    render_query(f, chunks[0], app);
    render_filters(f, chunks[1], app);
    render_results(f, chunks[2], app);
}

fn render_query(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let editing = app.input_mode() == InputMode::EditingQuery;
    let mut spans = vec![Span::raw(app.query().to_string())];
    if editing {
        spans.push(Span::styled("_", Style::default().fg(Color::LightYellow)));
    }
    if app.controller().is_search_pending() {
        let tick = app.controller().surface().tick;
        spans.push(Span::styled(
            format!("  {} searching", SPINNER[tick % SPINNER.len()]),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let border = if editing { Color::LightYellow } else { Color::Cyan };
    let block = Block::default()
        .title("SEARCH (MSISDN, record id, application, cell)")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_filters(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let view = app.controller().view();
    let spans: Vec<Span> = FILTER_APP_TYPES
        .iter()
        .enumerate()
        .flat_map(|(i, app_type)| {
            let mut style = if view.is_filter_active(app_type) {
                Style::default().fg(Color::Black).bg(Color::LightGreen)
            } else {
                Style::default().fg(Color::Gray)
            };
            if i == app.filter_cursor() {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            [Span::styled(format!(" {} ", app_type), style), Span::raw(" ")]
        })
        .collect();

    let block = Block::default()
        .title("FILTERS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_results(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let state = app.controller().surface();
    let header = Row::new(vec![
        "Record ID", "A-Party", "B-Party", "App", "Time", "Duration", "Location",
    ])
    .style(
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .results
        .iter()
        .map(|record| {
            Row::new(vec![
                record.id.clone(),
                record.a_party.clone(),
                record.b_party.clone(),
                record.communication_type.clone(),
                format_compact_timestamp(&record.timestamp),
                format_duration(record.duration_secs),
                record.location.clone(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Length(13),
            Constraint::Length(13),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("> ")
    .block(
        Block::default()
            .title(state.results_header.clone())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    let selected = (!state.results.is_empty()).then(|| app.cursor(Tab::Search));
    let mut table_state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut table_state);
}
