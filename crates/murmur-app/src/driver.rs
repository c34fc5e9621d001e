//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O and SDK access, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use murmur_core::{DecryptError, audio::EncryptedFile, lifecycle::SessionAction};

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal frontend and in tests.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, ratatui for rendering
/// - **Tests**: scripted events and recorded side effects
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns the next event or `None` if no events are ready.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Execute a session lifecycle step against the SDK.
    ///
    /// Returns a follow-up event when the step completes asynchronously
    /// (e.g. [`AppEvent::LogoutCompleted`] for
    /// [`SessionAction::RequestLogout`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the step cannot be carried out at all.
    fn perform(
        &mut self,
        action: SessionAction,
    ) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Fetch and decrypt an encrypted attachment.
    fn decrypt_attachment(
        &mut self,
        file: &EncryptedFile,
    ) -> impl Future<Output = Result<Vec<u8>, DecryptError>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop background work and clean up resources.
    fn stop(&mut self);
}
