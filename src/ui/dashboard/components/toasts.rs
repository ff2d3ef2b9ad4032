//! Notification toasts
//!
//! Drawn in the top-right corner over whatever else is on screen.

use super::super::state::TerminalSurface;
use super::super::utils::severity_color;
use crate::consts::cli_consts::MAX_VISIBLE_TOASTS;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

pub fn render_toasts(f: &mut Frame, state: &TerminalSurface) {
    let area = f.area();
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);

    // Newest on top; older ones beyond the limit wait for their turn.
    for (slot, toast) in state
        .toasts
        .iter()
        .rev()
        .take(MAX_VISIBLE_TOASTS)
        .enumerate()
    {
        let y = area.y + 1 + slot as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);
        let color = severity_color(toast.severity);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(format!(" {} ", toast.severity.icon())),
                Span::raw(format!("{} ", toast.timestamp)),
            ]))
            .title_bottom(Line::from(format!(" {} ", toast.id)).right_aligned())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));

        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(toast.message.clone())
                .style(Style::default().fg(color))
                .block(block)
                .wrap(Wrap { trim: true }),
            rect,
        );
    }
}
