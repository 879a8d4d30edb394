use crate::event::{AppEvent, Event, EventHandler};
use crate::session::ChatSession;
use crate::tutor::TutorClient;
use crate::ui;
use color_eyre::Result;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
};
use throbber_widgets_tui::ThrobberState;

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Chat state: transcript, draft input, request lifecycle.
    pub session: ChatSession,
    /// Client for the answer service.
    pub client: TutorClient,
    /// Event handler.
    pub events: EventHandler,
    /// How far the transcript is scrolled up from the bottom, in lines.
    /// Zero means stick to the newest message.
    pub scroll_offset: usize,
    /// Spinner shown while a request is outstanding.
    pub throbber_state: ThrobberState,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new() -> Self {
        Self::with_client(TutorClient::new())
    }

    pub fn with_client(client: TutorClient) -> Self {
        Self {
            running: true,
            session: ChatSession::new(),
            client,
            events: EventHandler::new(),
            scroll_offset: 0,
            throbber_state: ThrobberState::default(),
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| {
                    frame.render_widget(&mut self, frame.area());
                })?;
                // save power
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => {
                    // The throbber only animates while a request is outstanding;
                    // otherwise ticks don't warrant a redraw.
                    if self.session.is_awaiting() {
                        self.throbber_state.calc_next();
                        needs_redraw = true;
                    }
                }
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key_event) = event {
                        self.handle_key_events(key_event)?;
                    }
                    needs_redraw = true;
                }
                Event::App(app_event) => {
                    match app_event {
                        AppEvent::Input(ch) => self.session.push_input(ch),
                        AppEvent::Backspace => self.session.pop_input(),
                        AppEvent::Submit => self.submit_question(),
                        AppEvent::ScrollUp => self.scroll_up(),
                        AppEvent::ScrollDown => self.scroll_down(),
                        AppEvent::AnswerReceived(answer) => {
                            tracing::info!(chars = answer.len(), "answer received");
                            self.session.complete_submission(answer);
                            self.scroll_offset = 0;
                        }
                        AppEvent::AnswerFailed(message) => {
                            tracing::warn!(%message, "submission failed");
                            self.session.fail_submission(message);
                        }
                        AppEvent::Quit => self.quit(),
                    }
                    needs_redraw = true;
                }
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Esc => self.events.send(AppEvent::Quit),
            KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
                self.events.send(AppEvent::Quit)
            }
            KeyCode::Enter => self.events.send(AppEvent::Submit),
            KeyCode::Backspace => self.events.send(AppEvent::Backspace),
            KeyCode::PageUp | KeyCode::Up => self.events.send(AppEvent::ScrollUp),
            KeyCode::PageDown | KeyCode::Down => self.events.send(AppEvent::ScrollDown),
            KeyCode::Char(ch) => self.events.send(AppEvent::Input(ch)),
            _ => {}
        }
        Ok(())
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Accepts the current draft and dispatches the ask request. Rejected
    /// drafts (blank, or a request already outstanding) change nothing.
    pub fn submit_question(&mut self) {
        let Some(question) = self.session.begin_submission() else {
            return;
        };
        self.scroll_offset = 0;
        tracing::info!(%question, "submitting question");

        let client = self.client.clone();
        let sender = self.events.sender();
        tokio::spawn(async move {
            let event = match client.ask(&question).await {
                Ok(answer) => AppEvent::AnswerReceived(answer),
                Err(e) => {
                    tracing::warn!(error = %e, "ask request failed");
                    AppEvent::AnswerFailed(e.user_message())
                }
            };
            let _ = sender.send(Event::App(event));
        });
    }

    pub fn scroll_up(&mut self) {
        let max = ui::chat::transcript_line_count(&self.session);
        if self.scroll_offset < max {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
