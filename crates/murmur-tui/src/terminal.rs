//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Recorded timeline events are
//! replayed before live input is polled.

use std::{
    collections::VecDeque,
    io::{self, Stdout, stdout},
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use murmur_app::{App, AppEvent, Driver};
use murmur_core::{DecryptError, audio::EncryptedFile, lifecycle::SessionAction};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{KeyInput, media::HomeserverMedia, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm) and rendering (ratatui). There is no SDK
/// behind it: session steps are logged and acknowledged locally, and
/// encrypted attachments cannot be decrypted.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    incoming: VecDeque<AppEvent>,
    media: HomeserverMedia,
}

impl TerminalDriver {
    /// Create a new terminal driver replaying `incoming` before live input.
    pub fn new(homeserver_url: &str, incoming: Vec<AppEvent>) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self {
            terminal,
            event_stream,
            incoming: incoming.into(),
            media: HomeserverMedia::new(homeserver_url),
        })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        if let Some(event) = self.incoming.pop_front() {
            return Ok(Some(event));
        }

        let timeout = tokio::time::Duration::from_millis(100);

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        Ok(Self::convert_key(key_event.code).map(AppEvent::Key))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => Ok(Some(AppEvent::Resize(cols, rows))),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(None),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(timeout) => Ok(Some(AppEvent::Tick)),
        }
    }

    async fn perform(&mut self, action: SessionAction) -> Result<Option<AppEvent>, Self::Error> {
        tracing::info!(?action, "session step");
        Ok(match action {
            SessionAction::RequestLogout => Some(AppEvent::LogoutCompleted { result: Ok(()) }),
            _ => None,
        })
    }

    async fn decrypt_attachment(&mut self, file: &EncryptedFile) -> Result<Vec<u8>, DecryptError> {
        tracing::debug!(url = %file.url, "no decryption backend");
        Err(DecryptError::Unsupported)
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let media = &self.media;
        self.terminal.draw(|frame| {
            ui::render(frame, app, media);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        self.incoming.clear();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
