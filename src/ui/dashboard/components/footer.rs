//! Dashboard footer component
//!
//! Renders the key bindings for the current context

use crate::ui::app::{App, InputMode};
use crate::view_state::{Modal, Tab};
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn key_hints(app: &App) -> &'static str {
    if app.input_mode() == InputMode::EditingQuery {
        return "[Enter] Search | [Esc] Cancel";
    }
    let view = app.controller().view();
    match view.top_modal() {
        Some(Modal::RecordDetail) => return "[A] Add to case | [F] Flag | [Esc] Close",
        Some(Modal::NewCase) => {
            return "[Tab] Next field | [←/→] Priority | [Enter] Create | [Esc] Cancel";
        }
        None => {}
    }
    match view.active_tab() {
        Tab::Dashboard => "[1-5] Tabs | [/] Search | [X] Dismiss | [Q] Quit",
        Tab::Search => {
            "[/] Query | [↑/↓] Select | [Enter] Details | [[/]] Filter | [Space] Toggle | [E] Export | [R] All | [Q] Quit"
        }
        Tab::Network => {
            "[↑/↓] Select | [Enter] Inspect | [+/-] Zoom | [←/→] Timeline | [R] Reset | [Q] Quit"
        }
        Tab::Cases => "[↑/↓] Select | [Enter] Open | [G] Report | [N] New case | [Q] Quit",
        Tab::Alerts => "[↑/↓] Select | [Enter] Details | [I] Investigate | [Q] Quit",
    }
}

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let footer = Paragraph::new(key_hints(app))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
