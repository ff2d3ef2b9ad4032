//! Network tab
//!
//! Subscribers seen in the loaded records, the links of the highlighted one and
//! the aggregated details of the last inspected node.

use crate::model::{Record, format_hours_minutes, format_local_datetime};
use crate::ui::app::App;
use chrono::{DateTime, TimeDelta};
use crate::view_state::Tab;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap,
};

pub fn render_network(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    render_subscribers(f, chunks[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_links(f, right[0], app);
    render_node(f, right[1], app);
}

fn render_subscribers(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let subscribers = app.controller().surface().subscribers();
    let items: Vec<ListItem> = subscribers
        .iter()
        .map(|msisdn| ListItem::new(msisdn.to_string()))
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
        .block(
            Block::default()
                .title(format!("SUBSCRIBERS ({})", subscribers.len()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    let selected = (!subscribers.is_empty()).then(|| app.cursor(Tab::Network));
    let mut list_state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut list_state);
}

/// Records no older than `days` before the newest loaded record.
fn within_timeline(records: &[Record], days: u16) -> Vec<&Record> {
    let parsed: Vec<_> = records
        .iter()
        .map(|r| (r, DateTime::parse_from_rfc3339(&r.timestamp).ok()))
        .collect();
    let Some(newest) = parsed.iter().filter_map(|(_, t)| *t).max() else {
        return records.iter().collect();
    };
    let cutoff = newest - TimeDelta::days(i64::from(days));
    parsed
        .into_iter()
        .filter(|(_, t)| t.is_none_or(|t| t >= cutoff))
        .map(|(r, _)| r)
        .collect()
}

/// Links of the highlighted subscriber; zoom widens or narrows how many are listed.
fn render_links(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let controller = app.controller();
    let state = controller.surface();
    let network = controller.view().network();
    let subscribers = state.subscribers();
    let focus = subscribers.get(app.cursor(Tab::Network)).copied();

    let mut lines = Vec::new();
    if let Some(focus) = focus {
        let links = within_timeline(&state.results, network.timeline_days)
            .into_iter()
            .filter(|r| r.involves(focus))
            .map(|r| {
                let (arrow, other) = if r.a_party == focus {
                    ("->", &r.b_party)
                } else {
                    ("<-", &r.a_party)
                };
                Line::from(vec![
                    Span::styled(format!("{} ", arrow), Style::default().fg(Color::DarkGray)),
                    Span::styled(other.clone(), Style::default().fg(Color::LightBlue)),
                    Span::raw(format!("  {} ", r.communication_type)),
                    Span::styled(r.id.clone(), Style::default().fg(Color::DarkGray)),
                ])
            });
        let limit = (8 + i32::from(network.zoom) * 2).max(1) as usize;
        lines.extend(links.take(limit));
    }
    if lines.is_empty() {
        lines.push(Line::from("No links in the loaded records"));
    }

    let title = format!(
        "LINKS  zoom {:+}  last {} days",
        network.zoom, network.timeline_days
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_node(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let lines = match &app.controller().surface().node {
        Some(node) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Subscriber: ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        node.msisdn.clone(),
                        Style::default()
                            .fg(Color::LightYellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(format!("Connections: {}", node.connections)),
                Line::from(format!(
                    "Total duration: {}",
                    format_hours_minutes(node.total_duration_secs)
                )),
                Line::from(format!(
                    "Last activity: {}",
                    node.last_activity
                        .as_deref()
                        .map(format_local_datetime)
                        .unwrap_or_else(|| "-".to_string())
                )),
            ];
            if let Some(alert) = &node.alert {
                lines.push(Line::from(Span::styled(
                    format!("Alert: {}", alert),
                    Style::default().fg(Color::LightRed),
                )));
            }
            lines
        }
        None => vec![Line::from("Press Enter on a subscriber to inspect it")],
    };

    let block = Block::default()
        .title("NODE DETAILS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
