//! Modal dialogs
//!
//! Record detail and the new-case form. Modals are drawn bottom to top so the
//! one receiving keys is always visible.

use super::super::utils::{centered_rect, level_color};
use crate::ui::app::{App, CaseField};
use crate::view_state::Modal;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

pub fn render_modals(f: &mut Frame, app: &App) {
    let view = app.controller().view();
    for modal in [Modal::RecordDetail, Modal::NewCase] {
        if view.is_modal_open(modal) && view.top_modal() != Some(modal) {
            render_modal(f, app, modal);
        }
    }
    if let Some(top) = view.top_modal() {
        render_modal(f, app, top);
    }
}

fn render_modal(f: &mut Frame, app: &App, modal: Modal) {
    match modal {
        Modal::RecordDetail => render_record_detail(f, app),
        Modal::NewCase => render_new_case(f, app),
    }
}

fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::LightYellow))
        .style(Style::default().bg(Color::Rgb(24, 28, 34)))
        .padding(Padding::uniform(1))
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn render_record_detail(f: &mut Frame, app: &App) {
    let Some(detail) = app.controller().view().selected_record() else {
        return;
    };
    let lines = vec![
        field_line("Record ID", detail.id.clone()),
        field_line("A-Party", detail.a_party.clone()),
        field_line("B-Party", detail.b_party.clone()),
        field_line("Application", detail.communication_type.clone()),
        field_line("Timestamp", detail.timestamp.clone()),
        field_line("Duration", detail.duration.clone()),
        field_line("Location", detail.location.clone()),
        field_line("Method", detail.method.clone()),
    ];

    let area = centered_rect(50, 50, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(modal_block("RECORD DETAILS"))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_new_case(f: &mut Frame, app: &App) {
    let form = app.case_form();
    let error = app.controller().view().case_form_error();

    let mut lines = Vec::new();
    for field in CaseField::ALL {
        let focused = form.focus == field;
        let (value, value_style) = match field {
            CaseField::Title => (form.fields.title.clone(), Style::default()),
            CaseField::Investigator => (form.fields.investigator.clone(), Style::default()),
            CaseField::Suspects => (form.fields.suspects.clone(), Style::default()),
            CaseField::Priority => match form.fields.priority {
                Some(level) => (
                    format!("< {} >", level),
                    Style::default().fg(level_color(level)),
                ),
                None => ("< select >".to_string(), Style::default().fg(Color::DarkGray)),
            },
        };
        let label_style = if focused {
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if focused && field != CaseField::Priority {
            "_"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", field.label()), label_style),
            Span::styled(value, value_style),
            Span::styled(cursor, Style::default().fg(Color::LightYellow)),
        ]));
        if let Some(error) = error.filter(|e| e.field.eq_ignore_ascii_case(field.label())) {
            lines.push(Line::from(Span::styled(
                format!("{:<14}{}", "", error.reason),
                Style::default().fg(Color::LightRed),
            )));
        }
        lines.push(Line::from(""));
    }

    let area = centered_rect(60, 55, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(modal_block("NEW CASE"))
            .wrap(Wrap { trim: false }),
        area,
    );
}
