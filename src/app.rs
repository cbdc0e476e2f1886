use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::features::tasks::{self, Command, NetEvent, TaskController};
use crate::shared::{Config, Theme, ThemeMode};
use crate::widgets::{InputState, SPINNER_CHARS};

/// Which panel receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Draft,
    Search,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Draft => Focus::Search,
            Focus::Search => Focus::List,
            Focus::List => Focus::Draft,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Draft => Focus::List,
            Focus::Search => Focus::Draft,
            Focus::List => Focus::Search,
        }
    }
}

/// Status message for user feedback
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub timestamp: std::time::Instant,
    pub message_type: StatusType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
}

/// Main application state
pub struct App {
    /// Flag to indicate if the app should quit
    pub should_quit: bool,
    /// Application configuration
    pub config: Config,
    /// Application theme
    pub theme: Theme,
    /// HTTP client for the todo-list service
    client: ApiClient,
    /// Task list state and remote-call mediation
    pub controller: TaskController,
    /// Panel that receives keystrokes
    pub focus: Focus,
    /// New-task input field
    pub draft_input: InputState,
    /// Search input field
    pub search_input: InputState,
    /// Selected row in the filtered list
    pub selected: usize,
    /// Current status message
    pub status_message: Option<StatusMessage>,
    /// Flag to indicate if UI needs redraw
    needs_redraw: bool,
    /// Spinner animation state for the reload indicator
    spinner_frame: usize,
    last_spinner_update: std::time::Instant,
    /// Completed remote calls flowing back to the UI loop
    net_tx: mpsc::UnboundedSender<NetEvent>,
    net_rx: mpsc::UnboundedReceiver<NetEvent>,
}

impl App {
    /// Create a new App instance and kick off the initial list load
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let theme = match config.theme_mode {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        };
        let client = ApiClient::new(config.server_url.clone());
        let mut controller = TaskController::new(config.api_version);

        let (net_tx, net_rx) = mpsc::unbounded_channel::<NetEvent>();

        let initial_load = controller.request_reload();

        let mut app = Self {
            should_quit: false,
            config,
            theme,
            client,
            controller,
            focus: Focus::Draft,
            draft_input: InputState::new(),
            search_input: InputState::new(),
            selected: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            last_spinner_update: std::time::Instant::now(),
            net_tx,
            net_rx,
        };

        app.dispatch(initial_load);

        Ok(app)
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        if !IsTty::is_tty(&io::stdout()) {
            eprintln!("This application requires a TTY terminal to run.");
            return Ok(());
        }

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        while !self.should_quit {
            // Update spinner animation while a reload is in flight
            if self.controller.is_reloading() {
                self.tick_spinner();
                self.needs_redraw = true;
            }

            // Apply completed remote calls
            while let Ok(event) = self.net_rx.try_recv() {
                self.apply_net_event(event);
            }

            // Auto-clear status messages after 2 seconds
            self.update_status_message(std::time::Duration::from_secs(2));

            // Only redraw if something changed
            if self.needs_redraw {
                terminal.draw(|f| crate::ui::draw(f, self))?;
                self.needs_redraw = false;
            }

            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key.code, key.modifiers);
                    self.needs_redraw = true;
                }
            }
        }

        self.cleanup()?;

        // Cleanup terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Run one command against the service on a background task
    fn dispatch(&self, command: Command) {
        let client = self.client.clone();
        let tx = self.net_tx.clone();
        tokio::spawn(async move {
            let event = tasks::execute(&client, command).await;
            let _ = tx.send(event);
        });
    }

    /// Apply a completed remote call and dispatch any follow-up it produces
    fn apply_net_event(&mut self, event: NetEvent) {
        // The controller clears its draft on a confirmed add; mirror that in
        // the input field, the same way the original UI cleared its text box.
        if matches!(
            event,
            NetEvent::AddFinished { result: Ok(()) }
        ) {
            self.draft_input.clear();
        }

        if let Some(follow_up) = self.controller.handle_event(event) {
            self.dispatch(follow_up);
        }

        self.clamp_selection();
        self.needs_redraw = true;
    }

    /// Handle keyboard input
    fn handle_key_event(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Help overlay swallows input until dismissed
        if self.config.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter) {
                self.config.toggle_help();
                let _ = self.config.save();
            }
            return;
        }

        match key {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Draft => self.handle_draft_key(key),
            Focus::Search => self.handle_search_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    /// Keys for the new-task field
    fn handle_draft_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                // Submitted as-is; the server owns validation.
                let command = self.controller.submit_draft();
                self.dispatch(command);
            }
            KeyCode::Esc => self.focus = Focus::List,
            _ => {
                if edit_input(&mut self.draft_input, key) {
                    self.controller.set_draft(self.draft_input.value());
                }
            }
        }
    }

    /// Keys for the search field
    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.focus = Focus::List,
            KeyCode::Esc => {
                self.search_input.clear();
                self.controller.set_query("");
                self.focus = Focus::List;
            }
            _ => {
                if edit_input(&mut self.search_input, key) {
                    self.controller.set_query(self.search_input.value());
                    self.clamp_selection();
                }
            }
        }
    }

    /// Keys for the task list
    fn handle_list_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection_up(),
            KeyCode::Enter | KeyCode::Char('d') => self.complete_selected(),
            KeyCode::Char('r') => {
                let command = self.controller.request_reload();
                self.dispatch(command);
            }
            KeyCode::Char('v') => self.toggle_api_version(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('n') | KeyCode::Char('i') => self.focus = Focus::Draft,
            KeyCode::Char('?') => {
                self.config.toggle_help();
                let _ = self.config.save();
            }
            _ => {}
        }
    }

    /// Mark the selected task done, which deletes it on the server
    fn complete_selected(&mut self) {
        let description = self
            .controller
            .filtered_view()
            .get(self.selected)
            .map(|task| task.description.clone());

        if let Some(description) = description {
            let command = self.controller.delete_task(&description);
            self.dispatch(command);
        }
    }

    /// Switch between the v1 and v2 API dialects and reload under the new one
    fn toggle_api_version(&mut self) {
        let version = self.controller.version().toggled();
        let command = self.controller.set_version(version);
        self.config.set_api_version(version);
        let _ = self.config.save(); // Save config after change
        self.dispatch(command);

        self.show_status(
            &format!("Switched to API {}", version.label()),
            StatusType::Info,
        );
    }

    /// Toggle theme mode
    fn toggle_theme(&mut self) {
        let new_theme_mode = match self.config.theme_mode {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };
        self.config.set_theme_mode(new_theme_mode);
        let _ = self.config.save(); // Save config after change

        self.theme = match self.config.theme_mode {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        };

        self.show_status(
            &format!("Changed theme to {}", self.config.theme_display()),
            StatusType::Success,
        );
    }

    /// Move selection down in the filtered list
    fn move_selection_down(&mut self) {
        let len = self.controller.filtered_view().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection up in the filtered list
    fn move_selection_up(&mut self) {
        let len = self.controller.filtered_view().len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Keep the selection inside the filtered list after it changes size
    fn clamp_selection(&mut self) {
        let len = self.controller.filtered_view().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Current spinner character for the reload indicator
    pub fn spinner_char(&self) -> char {
        SPINNER_CHARS[self.spinner_frame]
    }

    fn tick_spinner(&mut self) {
        if self.last_spinner_update.elapsed().as_millis() > 100 {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
            self.last_spinner_update = std::time::Instant::now();
        }
    }

    /// Show a status message to the user
    pub fn show_status(&mut self, text: &str, status_type: StatusType) {
        self.status_message = Some(StatusMessage {
            text: text.to_string(),
            timestamp: std::time::Instant::now(),
            message_type: status_type,
        });
        self.needs_redraw = true;
    }

    /// Clear status message if it's older than the specified duration
    fn update_status_message(&mut self, max_age: std::time::Duration) {
        if let Some(ref msg) = self.status_message {
            if msg.timestamp.elapsed() > max_age {
                self.status_message = None;
                self.needs_redraw = true;
            }
        }
    }

    /// Clean up resources before exiting
    fn cleanup(&mut self) -> Result<()> {
        self.config.save()?;
        Ok(())
    }
}

/// Apply an editing keystroke to an input field; true if it was consumed
fn edit_input(input: &mut InputState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}
