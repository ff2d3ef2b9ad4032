//! Dashboard main renderer

use super::components::{alerts, cases, footer, header, modal, network, overview, search, toasts};
use crate::ui::app::App;
use crate::view_state::Tab;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, app: &App) {
    let controller = app.controller();
    let state = controller.surface();
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    let active_tab = controller.view().active_tab();
    header::render_header(f, main_chunks[0], state, active_tab);

    match active_tab {
        Tab::Dashboard => overview::render_overview(f, main_chunks[1], state),
        Tab::Search => search::render_search(f, main_chunks[1], app),
        Tab::Network => network::render_network(f, main_chunks[1], app),
        Tab::Cases => cases::render_cases(f, main_chunks[1], state, app.cursor(Tab::Cases)),
        Tab::Alerts => alerts::render_alerts(f, main_chunks[1], state, app.cursor(Tab::Alerts)),
    }
    footer::render_footer(f, main_chunks[2], app);

    modal::render_modals(f, app);
    toasts::render_toasts(f, state);
}
