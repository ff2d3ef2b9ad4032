//! Main application state and UI loop
//!
//! Contains the App struct and the key bindings that turn keystrokes into
//! dashboard intents.

use crate::consts::cli_consts::network::TIMELINE_STEP_DAYS;
use crate::consts::cli_consts::search::FILTER_APP_TYPES;
use crate::consts::cli_consts::{COMPLETION_QUEUE_SIZE, SPLASH_DURATION_MS, UI_TICK_MS};
use crate::controller::{Controller, RequestTicket};
use crate::model::{Level, NewCaseFields, Record};
use crate::provider::error::ProviderError;
use crate::ui::dashboard::{TerminalSurface, render_dashboard};
use crate::ui::splash::render_splash;
use crate::view_state::{Modal, Tab};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use log::{debug, warn};
use ratatui::{Frame, Terminal, backend::Backend};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub export_dir: PathBuf,
}

impl UIConfig {
    pub fn new(with_background_color: bool, export_dir: PathBuf) -> Self {
        Self {
            with_background_color,
            export_dir,
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The tabbed investigation dashboard.
    Dashboard,
}

/// Where keystrokes go.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the search box.
    EditingQuery,
}

/// Fields of the new-case form, in focus order.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CaseField {
    #[default]
    Title,
    Priority,
    Investigator,
    Suspects,
}

impl CaseField {
    pub const ALL: [CaseField; 4] = [
        CaseField::Title,
        CaseField::Priority,
        CaseField::Investigator,
        CaseField::Suspects,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CaseField::Title => "Title",
            CaseField::Priority => "Priority",
            CaseField::Investigator => "Investigator",
            CaseField::Suspects => "Suspects",
        }
    }

    fn step(self, forward: bool) -> CaseField {
        let len = Self::ALL.len();
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self::ALL[next]
    }
}

/// The new-case form being edited.
#[derive(Debug, Default)]
pub struct CaseForm {
    pub fields: NewCaseFields,
    pub focus: CaseField,
}

impl CaseForm {
    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            CaseField::Title => Some(&mut self.fields.title),
            CaseField::Investigator => Some(&mut self.fields.investigator),
            CaseField::Suspects => Some(&mut self.fields.suspects),
            CaseField::Priority => None,
        }
    }

    fn cycle_priority(&mut self, forward: bool) {
        const LEVELS: [Level; 3] = [Level::Low, Level::Medium, Level::High];
        self.fields.priority = Some(match self.fields.priority {
            None if forward => Level::Low,
            None => Level::High,
            Some(level) => {
                let index = LEVELS.iter().position(|l| *l == level).unwrap_or(0);
                if forward {
                    LEVELS[(index + 1) % LEVELS.len()]
                } else {
                    LEVELS[(index + LEVELS.len() - 1) % LEVELS.len()]
                }
            }
        });
    }
}

/// A provider call finished on a background task.
#[derive(Debug)]
enum Completed {
    Search(RequestTicket, Result<Vec<Record>, ProviderError>),
    Export(RequestTicket, Result<Vec<u8>, ProviderError>),
}

/// Application state
pub struct App {
    controller: Controller<TerminalSurface>,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    input_mode: InputMode,
    query: String,
    case_form: CaseForm,

    /// Selected row per tab, indexed by [`Tab::index`].
    cursors: [usize; Tab::ALL.len()],
    /// Highlighted filter chip on the search tab.
    filter_cursor: usize,

    completion_sender: mpsc::Sender<Completed>,
    /// Receives provider completions from background tasks.
    completion_receiver: mpsc::Receiver<Completed>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(controller: Controller<TerminalSurface>) -> Self {
        let (completion_sender, completion_receiver) = mpsc::channel(COMPLETION_QUEUE_SIZE);
        Self {
            controller,
            current_screen: Screen::Splash,
            input_mode: InputMode::Normal,
            query: String::new(),
            case_form: CaseForm::default(),
            cursors: [0; Tab::ALL.len()],
            filter_cursor: 0,
            completion_sender,
            completion_receiver,
        }
    }

    pub fn controller(&self) -> &Controller<TerminalSurface> {
        &self.controller
    }

    pub fn screen(&self) -> Screen {
        self.current_screen
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn case_form(&self) -> &CaseForm {
        &self.case_form
    }

    pub fn filter_cursor(&self) -> usize {
        self.filter_cursor
    }

    /// Selected row on `tab`, clamped to the rows currently shown.
    pub fn cursor(&self, tab: Tab) -> usize {
        let rows = self.row_count(tab);
        self.cursors[tab.index()].min(rows.saturating_sub(1))
    }

    fn row_count(&self, tab: Tab) -> usize {
        let surface = self.controller.surface();
        match tab {
            Tab::Dashboard => 0,
            Tab::Search => surface.results.len(),
            Tab::Network => surface.subscribers().len(),
            Tab::Cases => surface.cases.len(),
            Tab::Alerts => surface.alerts.len(),
        }
    }

    fn move_cursor(&mut self, down: bool) {
        let tab = self.controller.view().active_tab();
        let rows = self.row_count(tab);
        let current = self.cursor(tab);
        self.cursors[tab.index()] = if down {
            (current + 1).min(rows.saturating_sub(1))
        } else {
            current.saturating_sub(1)
        };
    }

    /// Leave the splash screen and load the dashboard.
    async fn enter_dashboard(&mut self) {
        self.current_screen = Screen::Dashboard;
        if let Err(e) = self.controller.initialize().await {
            warn!("Dashboard started without initial data: {}", e);
        }
    }

    /// Apply every provider completion that has arrived.
    fn drain_completions(&mut self) {
        while let Ok(completed) = self.completion_receiver.try_recv() {
            self.apply_completion(completed);
        }
    }

    fn apply_completion(&mut self, completed: Completed) {
        let outcome = match completed {
            Completed::Search(ticket, result) => {
                let outcome = self.controller.finish_search(ticket, result);
                self.cursors[Tab::Search.index()] = 0;
                outcome
            }
            Completed::Export(ticket, result) => self.controller.finish_export(ticket, result),
        };
        match outcome {
            Ok(completion) => debug!("completion {:?}", completion),
            Err(e) => debug!("completion failed: {}", e),
        }
    }

    /// Run the search in the query box on a background task.
    fn spawn_search(&mut self) {
        let Ok(request) = self.controller.begin_search(&self.query) else {
            return;
        };
        let provider = self.controller.provider();
        let sender = self.completion_sender.clone();
        tokio::spawn(async move {
            let result = request.run_detached(provider).await;
            let _ = sender.send(Completed::Search(request.ticket, result)).await;
        });
    }

    /// Export the records on screen on a background task.
    fn spawn_export(&mut self) {
        let request = self.controller.begin_export();
        let provider = self.controller.provider();
        let sender = self.completion_sender.clone();
        tokio::spawn(async move {
            let result = request.run_detached(provider).await;
            let _ = sender.send(Completed::Export(request.ticket, result)).await;
        });
    }

    /// Handle one key press. Returns `true` when the application should exit.
    pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.current_screen == Screen::Splash {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                return true;
            }
            // Any other key skips the splash screen
            self.enter_dashboard().await;
            return false;
        }

        if self.input_mode == InputMode::EditingQuery {
            self.handle_query_key(key);
            return false;
        }

        match self.controller.view().top_modal() {
            Some(Modal::NewCase) => {
                self.handle_case_form_key(key).await;
                return false;
            }
            Some(Modal::RecordDetail) => {
                self.handle_record_modal_key(key).await;
                return false;
            }
            None => {}
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Tab => {
                let next = self.controller.view().active_tab().next();
                self.select_tab(next).await;
            }
            KeyCode::BackTab => {
                let previous = self.controller.view().active_tab().previous();
                self.select_tab(previous).await;
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.select_tab(Tab::ALL[index]).await;
            }
            KeyCode::Char('x') => {
                self.controller.dismiss_oldest();
            }
            KeyCode::Char('/') => {
                self.select_tab(Tab::Search).await;
                self.input_mode = InputMode::EditingQuery;
            }
            KeyCode::Up => self.move_cursor(false),
            KeyCode::Down => self.move_cursor(true),
            _ => self.handle_tab_key(key).await,
        }
        false
    }

    async fn select_tab(&mut self, tab: Tab) {
        let _ = self.controller.select_tab(tab).await;
    }

    fn handle_query_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.spawn_search();
            }
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Char(c) => self.query.push(c),
            _ => {}
        }
    }

    async fn handle_case_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.controller.close_modal(Modal::NewCase),
            KeyCode::Tab | KeyCode::Down => self.case_form.focus = self.case_form.focus.step(true),
            KeyCode::BackTab | KeyCode::Up => {
                self.case_form.focus = self.case_form.focus.step(false)
            }
            KeyCode::Left if self.case_form.focus == CaseField::Priority => {
                self.case_form.cycle_priority(false)
            }
            KeyCode::Right if self.case_form.focus == CaseField::Priority => {
                self.case_form.cycle_priority(true)
            }
            KeyCode::Enter => {
                let fields = self.case_form.fields.clone();
                if self.controller.submit_new_case(fields).await.is_ok() {
                    self.case_form = CaseForm::default();
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.case_form.text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.case_form.text_mut() {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    async fn handle_record_modal_key(&mut self, key: KeyEvent) {
        let Some(record_id) = self.controller.view().selected_record().map(|r| r.id.clone())
        else {
            self.controller.close_modal(Modal::RecordDetail);
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.controller.close_modal(Modal::RecordDetail),
            KeyCode::Char('a') => {
                let _ = self.controller.add_record_to_case(&record_id).await;
            }
            KeyCode::Char('f') => {
                let _ = self.controller.flag_record(&record_id).await;
            }
            KeyCode::Char('x') => {
                self.controller.dismiss_oldest();
            }
            _ => {}
        }
    }

    /// Keys that only mean something on the active tab.
    async fn handle_tab_key(&mut self, key: KeyEvent) {
        let tab = self.controller.view().active_tab();
        let selected = self.selected_id(tab);
        match (tab, key.code, selected) {
            (Tab::Search, KeyCode::Enter, Some(id)) => {
                let _ = self.controller.open_record_detail(&id).await;
            }
            (Tab::Search, KeyCode::Char('e'), _) => self.spawn_export(),
            (Tab::Search, KeyCode::Char('r'), _) => {
                let _ = self.controller.refresh_results().await;
                self.cursors[Tab::Search.index()] = 0;
            }
            (Tab::Search, KeyCode::Char('['), _) => {
                self.filter_cursor = self.filter_cursor.saturating_sub(1);
            }
            (Tab::Search, KeyCode::Char(']'), _) => {
                self.filter_cursor = (self.filter_cursor + 1).min(FILTER_APP_TYPES.len() - 1);
            }
            (Tab::Search, KeyCode::Char(' '), _) => {
                self.controller.toggle_filter(FILTER_APP_TYPES[self.filter_cursor]);
            }
            (Tab::Network, KeyCode::Enter, Some(msisdn)) => {
                let _ = self.controller.select_node(&msisdn).await;
            }
            (Tab::Network, KeyCode::Char('+') | KeyCode::Char('='), _) => {
                self.controller.zoom_in()
            }
            (Tab::Network, KeyCode::Char('-'), _) => self.controller.zoom_out(),
            (Tab::Network, KeyCode::Char('r'), _) => self.controller.reset_network_view(),
            (Tab::Network, KeyCode::Left, _) => {
                let days = self.controller.view().network().timeline_days;
                self.controller
                    .set_timeline(days.saturating_sub(TIMELINE_STEP_DAYS));
            }
            (Tab::Network, KeyCode::Right, _) => {
                let days = self.controller.view().network().timeline_days;
                self.controller.set_timeline(days + TIMELINE_STEP_DAYS);
            }
            (Tab::Cases, KeyCode::Enter, Some(id)) => {
                let _ = self.controller.view_case(&id).await;
            }
            (Tab::Cases, KeyCode::Char('g'), Some(id)) => {
                let _ = self.controller.generate_report(&id).await;
            }
            (Tab::Cases, KeyCode::Char('n'), _) => {
                self.case_form = CaseForm::default();
                self.controller.open_new_case();
            }
            (Tab::Alerts, KeyCode::Enter, Some(id)) => {
                let _ = self.controller.alert_details(&id).await;
            }
            (Tab::Alerts, KeyCode::Char('i'), Some(id)) => {
                let _ = self.controller.investigate_alert(&id).await;
            }
            _ => {}
        }
    }

    /// Identifier of the row under the cursor on `tab`.
    fn selected_id(&self, tab: Tab) -> Option<String> {
        let cursor = self.cursor(tab);
        let surface = self.controller.surface();
        match tab {
            Tab::Dashboard => None,
            Tab::Search => surface.results.get(cursor).map(|r| r.id.clone()),
            Tab::Network => surface.subscribers().get(cursor).map(|s| s.to_string()),
            Tab::Cases => surface.cases.get(cursor).map(|c| c.id.clone()),
            Tab::Alerts => surface.alerts.get(cursor).map(|p| p.id.clone()),
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(SPLASH_DURATION_MS);

    // UI event loop
    loop {
        app.drain_completions();
        app.controller.tick(Instant::now());

        if app.current_screen == Screen::Dashboard {
            app.controller.surface_mut().update();
        }
        terminal.draw(|f| render(f, &app))?;

        // Handle splash-to-dashboard transition
        if app.current_screen == Screen::Splash && splash_start.elapsed() >= splash_duration {
            app.enter_dashboard().await;
            continue;
        }

        // Poll for key events
        if event::poll(Duration::from_millis(UI_TICK_MS))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if app.handle_key(key).await {
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, app),
    }
}
