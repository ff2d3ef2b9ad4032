//! Dashboard header component
//!
//! Renders the title and the tab bar

use super::super::state::TerminalSurface;
use crate::view_state::Tab;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};

/// Render header with title, session time and tab navigation.
pub fn render_header(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &TerminalSurface,
    active_tab: Tab,
) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3)])
        .split(area);

    let elapsed = state.start_time.elapsed().as_secs();
    let title_text = format!(
        "IPDR INVESTIGATION DASHBOARD v{}  |  Session {:02}:{:02}:{:02}",
        env!("CARGO_PKG_VERSION"),
        elapsed / 3600,
        (elapsed % 3600) / 60,
        elapsed % 60
    );

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(active_tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|")
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(tabs, header_chunks[1]);
}
