//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Driver`]: Platform-specific I/O and SDK access

use murmur_core::{lifecycle::Credentials, summary::SummaryConfig};

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver and summary configuration.
    pub fn new(driver: D, summary_config: SummaryConfig) -> Self {
        Self { driver, app: App::new(summary_config) }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Logs in with `credentials`, if any
    /// 2. Polls for input events from the driver
    /// 3. Feeds them to the App
    /// 4. Executes the resulting actions through the driver
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self, credentials: Option<Credentials>) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let mut should_quit = false;
        if let Some(credentials) = credentials {
            let actions = self.app.login(credentials);
            should_quit = self.process_actions(actions).await?;
        }

        while !should_quit {
            should_quit = self.process_cycle().await?;
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let Some(event) = self.driver.poll_event().await? else {
            return Ok(false);
        };
        let actions = self.app.handle(event);
        self.process_actions(actions).await
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Session(step) => {
                        tracing::debug!(?step, "session step");
                        if let Some(event) = self.driver.perform(step).await? {
                            pending_actions.extend(self.app.handle(event));
                        }
                    },
                    AppAction::DecryptAttachment { room_id, event_id, file } => {
                        let result = self.driver.decrypt_attachment(&file).await;
                        let event = AppEvent::AttachmentDecrypted { room_id, event_id, result };
                        pending_actions.extend(self.app.handle(event));
                    },
                }
            }
        }
        Ok(false)
    }
}
