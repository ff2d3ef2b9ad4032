//! TUI mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_starting},
};
use crate::controller::Controller;
use crate::ui::dashboard::TerminalSurface;
use crate::ui::{self, UIConfig};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::Instant;
use std::{error::Error, io};

/// Runs the interactive dashboard
///
/// This function handles:
/// 1. Terminal setup and cleanup
/// 2. Dashboard controller and UI initialization
/// 3. Restoring the terminal even when the UI loop fails
///
/// # Arguments
/// * `session` - Session data from setup
/// * `with_background` - Whether to enable background colors
pub async fn run_tui_mode(session: SessionData, with_background: bool) -> Result<(), Box<dyn Error>> {
    print_session_starting("TUI", &session.source);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Initialize the terminal with Crossterm backend
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let config = &session.config;
    let ui_config = UIConfig::new(
        with_background && config.with_background_color,
        config.resolved_export_dir(),
    );
    let surface = TerminalSurface::new(Instant::now(), ui_config);
    let controller = Controller::new(
        session.provider,
        surface,
        config.default_tab,
        config.notification_display(),
    );

    let result = ui::run(&mut terminal, ui::App::new(controller)).await;

    // Clean up the terminal after running the application
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle the result
    result?;
    print_session_exit_success();

    Ok(())
}
