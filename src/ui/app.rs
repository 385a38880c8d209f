//! Kiosk application shell: terminal lifecycle, key dispatch, and the
//! submission task.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::{Ack, SubmissionError, SubmitBackend};
use crate::checkin::{fields, ConsentChoice, FlowController, InfoFields, Role, Screen};
use crate::ui::screens;
use crate::ui::text_input::TextInputState;

/// Application-level events delivered through the channel.
#[derive(Debug)]
pub enum AppEvent {
    /// The outstanding submission finished.
    SubmissionFinished(Result<Ack, SubmissionError>),
}

/// Which Info-screen field owns keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoFocus {
    FirstName,
    LastName,
    Dob,
    Email,
    Phone,
}

impl InfoFocus {
    fn next(self) -> Self {
        match self {
            InfoFocus::FirstName => InfoFocus::LastName,
            InfoFocus::LastName => InfoFocus::Dob,
            InfoFocus::Dob => InfoFocus::Email,
            InfoFocus::Email => InfoFocus::Phone,
            InfoFocus::Phone => InfoFocus::FirstName,
        }
    }

    fn prev(self) -> Self {
        match self {
            InfoFocus::FirstName => InfoFocus::Phone,
            InfoFocus::LastName => InfoFocus::FirstName,
            InfoFocus::Dob => InfoFocus::LastName,
            InfoFocus::Email => InfoFocus::Dob,
            InfoFocus::Phone => InfoFocus::Email,
        }
    }
}

/// Screen-local input text for the whole wizard.
///
/// Lives outside the flow controller on purpose: navigating backward and
/// forward must not wipe what the participant already typed.
#[derive(Debug, Default)]
pub struct WizardInputs {
    pub first_name: TextInputState,
    pub last_name: TextInputState,
    pub dob: TextInputState,
    pub email: TextInputState,
    pub phone: TextInputState,
    pub study_code: TextInputState,
}

impl WizardInputs {
    fn info_fields(&self) -> InfoFields {
        InfoFields {
            first_name: self.first_name.value().to_string(),
            last_name: self.last_name.value().to_string(),
            dob: self.dob.value().to_string(),
            email: self.email.value().to_string(),
            phone: self.phone.value().to_string(),
        }
    }

    fn clear(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
        self.dob.clear();
        self.email.clear();
        self.phone.clear();
        self.study_code.clear();
    }

    fn field_mut(&mut self, focus: InfoFocus) -> &mut TextInputState {
        match focus {
            InfoFocus::FirstName => &mut self.first_name,
            InfoFocus::LastName => &mut self.last_name,
            InfoFocus::Dob => &mut self.dob,
            InfoFocus::Email => &mut self.email,
            InfoFocus::Phone => &mut self.phone,
        }
    }
}

/// Main application state
pub struct App {
    flow: FlowController,
    inputs: WizardInputs,
    focus: InfoFocus,
    backend: Arc<dyn SubmitBackend>,
    session_id: Uuid,
    should_quit: bool,
    tick_count: u32,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(backend: Arc<dyn SubmitBackend>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let session_id = Uuid::new_v4();
        tracing::info!(session = %session_id, "new check-in session");

        Self {
            flow: FlowController::new(),
            inputs: WizardInputs::default(),
            focus: InfoFocus::FirstName,
            backend,
            session_id,
            should_quit: false,
            tick_count: 0,
            event_tx,
            event_rx,
        }
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                // Terminal input + tick
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    if event::poll(Duration::from_millis(0))? {
                        if let Event::Key(key) = event::read()? {
                            self.handle_key_event(key);
                        }
                    }
                    self.tick_count = self.tick_count.wrapping_add(1);
                }

                // App events from channel
                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Operator escape hatch; kiosk lockdown is the hosting shell's job.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        match self.flow.screen() {
            Screen::Welcome => {
                if key.code == KeyCode::Enter {
                    self.flow.begin();
                }
            }
            Screen::Privacy => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.flow.accept_privacy(),
                KeyCode::Char('n') | KeyCode::Char('N') => self.flow.decline_privacy(),
                KeyCode::Esc => self.flow.back(),
                _ => {}
            },
            Screen::Consent => {
                if self.flow.awaiting_contact_ack() {
                    if key.code == KeyCode::Enter {
                        self.flow.acknowledge_contact();
                    }
                    return;
                }
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => {
                        self.flow.choose_consent(ConsentChoice::Yes)
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') => {
                        self.flow.choose_consent(ConsentChoice::No)
                    }
                    KeyCode::Esc => self.flow.back(),
                    _ => {}
                }
            }
            Screen::Role => match key.code {
                KeyCode::Char('1') => {
                    self.flow.choose_role(Role::Participant);
                    self.focus = InfoFocus::FirstName;
                }
                KeyCode::Char('2') => {
                    self.flow.choose_role(Role::Guardian);
                    self.focus = InfoFocus::FirstName;
                }
                KeyCode::Esc => self.flow.back(),
                _ => {}
            },
            Screen::Info => self.handle_info_key(key),
            Screen::Study => self.handle_study_key(key),
            Screen::Done | Screen::NoCheckin => {
                if key.code == KeyCode::Enter {
                    self.restart_session();
                }
            }
        }
    }

    fn handle_info_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => {
                self.flow.submit_info(&self.inputs.info_fields());
            }
            KeyCode::Esc => self.flow.back(),
            KeyCode::Left => self.inputs.field_mut(self.focus).move_left(),
            KeyCode::Right => self.inputs.field_mut(self.focus).move_right(),
            KeyCode::Backspace => {
                let focus = self.focus;
                let field = self.inputs.field_mut(focus);
                field.delete_char();
                Self::remask(field, focus);
            }
            KeyCode::Char(c) => {
                let focus = self.focus;
                let field = self.inputs.field_mut(focus);
                field.insert_char(c);
                Self::remask(field, focus);
            }
            _ => {}
        }
    }

    /// Masked fields are reformatted after every edit.
    fn remask(field: &mut TextInputState, focus: InfoFocus) {
        match focus {
            InfoFocus::Dob => field.apply_format(fields::format_date_input),
            InfoFocus::Phone => field.apply_format(fields::format_phone_input),
            _ => {}
        }
    }

    fn handle_study_key(&mut self, key: KeyEvent) {
        if self.flow.is_submitting() {
            // Study is suspended until the outcome arrives.
            return;
        }
        match key.code {
            KeyCode::Enter => self.start_submission(),
            KeyCode::Esc => self.flow.back(),
            KeyCode::Backspace => self.inputs.study_code.delete_char(),
            KeyCode::Left => self.inputs.study_code.move_left(),
            KeyCode::Right => self.inputs.study_code.move_right(),
            KeyCode::Char(c) => self.inputs.study_code.insert_char(c),
            _ => {}
        }
    }

    /// Launch one submission attempt on its own task so rendering continues
    /// while the backend runs.
    fn start_submission(&mut self) {
        let code = self.inputs.study_code.value().to_string();
        if !self.flow.begin_submission(&code) {
            return;
        }

        let backend = self.backend.clone();
        let record = self.flow.record().clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = backend.submit(&record).await;
            let _ = event_tx.send(AppEvent::SubmissionFinished(result));
        });
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SubmissionFinished(result) => {
                self.flow.finish_submission(result);
            }
        }
    }

    /// Terminal screen dismissed: fresh record, fresh inputs, fresh session.
    fn restart_session(&mut self) {
        self.flow.restart();
        if self.flow.screen() == Screen::Welcome {
            self.inputs.clear();
            self.focus = InfoFocus::FirstName;
            self.session_id = Uuid::new_v4();
            tracing::info!(session = %self.session_id, "new check-in session");
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        screens::draw(f, &self.flow, &self.inputs, self.focus, self.tick_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    /// Drive the wizard from Welcome to the Info screen.
    fn to_info(app: &mut App) {
        app.handle_key_event(key(KeyCode::Enter)); // begin
        app.handle_key_event(key(KeyCode::Char('y'))); // privacy accept
        app.handle_key_event(key(KeyCode::Char('n'))); // consent: no contact
        app.handle_key_event(key(KeyCode::Char('1'))); // role: participant
        assert_eq!(app.flow.screen(), Screen::Info);
    }

    fn fill_info(app: &mut App) {
        type_str(app, "Jane");
        app.handle_key_event(key(KeyCode::Tab));
        type_str(app, "Doe");
        app.handle_key_event(key(KeyCode::Tab));
        type_str(app, "02031990");
        app.handle_key_event(key(KeyCode::Tab));
        type_str(app, "jane@x.org");
        app.handle_key_event(key(KeyCode::Tab));
        type_str(app, "5551234567");
    }

    #[tokio::test]
    async fn masked_fields_reformat_while_typing() {
        let mut app = App::new(Arc::new(MockBackend::new()));
        to_info(&mut app);
        app.handle_key_event(key(KeyCode::Tab));
        app.handle_key_event(key(KeyCode::Tab));
        type_str(&mut app, "02031990");
        assert_eq!(app.inputs.dob.value(), "02-03-1990");
        app.handle_key_event(key(KeyCode::Tab));
        app.handle_key_event(key(KeyCode::Tab));
        type_str(&mut app, "(555) 123-4567");
        assert_eq!(app.inputs.phone.value(), "555-123-4567");
    }

    #[tokio::test]
    async fn back_navigation_preserves_entered_text() {
        let mut app = App::new(Arc::new(MockBackend::new()));
        to_info(&mut app);
        fill_info(&mut app);

        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.flow.screen(), Screen::Role);
        app.handle_key_event(key(KeyCode::Char('1')));
        assert_eq!(app.flow.screen(), Screen::Info);

        assert_eq!(app.inputs.first_name.value(), "Jane");
        assert_eq!(app.inputs.last_name.value(), "Doe");
        assert_eq!(app.inputs.dob.value(), "02-03-1990");
        assert_eq!(app.inputs.email.value(), "jane@x.org");
        assert_eq!(app.inputs.phone.value(), "555-123-4567");
    }

    #[tokio::test]
    async fn full_wizard_reaches_done_and_resets() {
        let backend = Arc::new(MockBackend::new());
        backend.push_success("abc-123");
        let mut app = App::new(backend.clone());

        to_info(&mut app);
        fill_info(&mut app);
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.flow.screen(), Screen::Study);

        type_str(&mut app, "T-001");
        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.flow.is_submitting());

        let event = app.event_rx.recv().await.expect("submission outcome");
        app.handle_app_event(event);
        assert_eq!(app.flow.screen(), Screen::Done);
        assert_eq!(backend.calls(), 1);
        assert_eq!(
            backend.last_record().map(|r| r.dob),
            Some("1990-02-03".to_string())
        );

        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.flow.screen(), Screen::Welcome);
        assert!(app.inputs.first_name.is_empty());
        assert!(app.inputs.study_code.is_empty());
    }

    #[tokio::test]
    async fn empty_study_code_never_spawns_a_submission() {
        let backend = Arc::new(MockBackend::new());
        let mut app = App::new(backend.clone());
        to_info(&mut app);
        fill_info(&mut app);
        app.handle_key_event(key(KeyCode::Enter));

        app.handle_key_event(key(KeyCode::Enter)); // finish with empty code
        assert!(!app.flow.is_submitting());
        assert!(app.flow.error().is_some());
        assert_eq!(backend.calls(), 0);
    }
}
