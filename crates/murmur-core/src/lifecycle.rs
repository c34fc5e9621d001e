//! Session lifecycle.
//!
//! Logging in, starting background services, logging out and tearing
//! everything down again. The messaging SDK does the actual work; this module
//! only decides what has to happen and in which order.
//!
//! Follows the same action-based pattern as the rest of the crate:
//! [`Session`] methods return [`SessionAction`]s for the host to execute.
//!
//! # Ordering
//!
//! - `WillStartClient` is dispatched before any service or the client starts,
//!   so sync listeners are attached before the first sync.
//! - The client always starts with [`PendingEventOrdering::Detached`]; the
//!   timeline relies on it.
//! - Logout always completes locally, even when the server rejects or never
//!   answers the request. The access token may then stay valid server-side.

use std::fmt;

use crate::{SessionError, UserId};

/// Credentials for an authenticated session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Base URL of the homeserver.
    pub homeserver_url: String,
    /// Base URL of the identity server.
    pub identity_server_url: String,
    /// Fully qualified user ID.
    pub user_id: UserId,
    /// Session access token.
    pub access_token: String,
    /// Guest sessions cannot log out server-side.
    pub guest: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("homeserver_url", &self.homeserver_url)
            .field("identity_server_url", &self.identity_server_url)
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .field("guest", &self.guest)
            .finish()
    }
}

/// Current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No session.
    LoggedOut,
    /// Session established and client running.
    LoggedIn {
        /// Logged in user.
        user_id: UserId,
        /// Whether this is a guest session.
        guest: bool,
    },
    /// Waiting for the server to invalidate the access token.
    LoggingOut {
        /// User being logged out.
        user_id: UserId,
    },
}

/// Background services that run while a session is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Desktop notifications for incoming events.
    Notifier,
    /// User activity tracking (read receipts, idle detection).
    UserActivity,
    /// Presence publishing.
    Presence,
}

/// Services in start order. Stopped in the same order.
pub const BACKGROUND_SERVICES: [Service; 3] =
    [Service::Notifier, Service::UserActivity, Service::Presence];

/// Application-wide notifications emitted during lifecycle transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A session was established.
    OnLoggedIn,
    /// The client is about to start syncing. Must be delivered synchronously.
    WillStartClient,
    /// The session ended.
    OnLoggedOut,
}

/// How the SDK orders events that are still being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingEventOrdering {
    /// Pending events are kept in a separate list.
    Detached,
}

/// Persisted keys that survive a logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Last used homeserver URL.
    HomeserverUrl,
    /// Last used identity server URL.
    IdentityServerUrl,
}

/// Instructions produced by [`Session`] for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Replace the SDK client with one built from these credentials.
    ReplaceClient(Credentials),
    /// Dispatch an application-wide notification.
    Dispatch(Dispatch),
    /// Start a background service.
    StartService(Service),
    /// Start the SDK client (begins syncing).
    StartClient {
        /// Ordering mode for pending events.
        pending_event_ordering: PendingEventOrdering,
    },
    /// Ask the server to invalidate the access token. The host reports the
    /// outcome through [`Session::logout_completed`].
    RequestLogout,
    /// Clear local storage except for the listed keys.
    ClearStorage {
        /// Keys to keep.
        preserve: Vec<StorageKey>,
    },
    /// Stop a background service.
    StopService(Service),
    /// Stop the SDK client.
    StopClient,
    /// Detach every listener from the SDK client.
    RemoveListeners,
    /// Drop the SDK client.
    UnsetClient,
}

/// Session lifecycle state machine.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Create a logged-out session.
    pub fn new() -> Self {
        Self { state: SessionState::LoggedOut }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Logged in user. `None` unless logged in.
    pub fn user_id(&self) -> Option<&UserId> {
        match &self.state {
            SessionState::LoggedIn { user_id, .. } => Some(user_id),
            SessionState::LoggedOut | SessionState::LoggingOut { .. } => None,
        }
    }

    /// Transition to logged in with the given credentials and start the
    /// client.
    ///
    /// Valid from any state: a new login replaces whatever client existed.
    pub fn set_logged_in(&mut self, credentials: Credentials) -> Vec<SessionAction> {
        tracing::info!(user_id = %credentials.user_id, guest = credentials.guest, "logged in");

        self.state = SessionState::LoggedIn {
            user_id: credentials.user_id.clone(),
            guest: credentials.guest,
        };

        let mut actions = vec![
            SessionAction::ReplaceClient(credentials),
            SessionAction::Dispatch(Dispatch::OnLoggedIn),
        ];
        actions.extend(Self::start_sequence());
        actions
    }

    /// Start the client and every background service.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidState`] unless logged in.
    pub fn start_client(&self) -> Result<Vec<SessionAction>, SessionError> {
        match self.state {
            SessionState::LoggedIn { .. } => Ok(Self::start_sequence()),
            SessionState::LoggedOut | SessionState::LoggingOut { .. } => {
                Err(self.invalid("start client"))
            },
        }
    }

    /// Log the current session out.
    ///
    /// Guest sessions skip the server round trip and finish immediately.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidState`] unless logged in.
    pub fn logout(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        match &self.state {
            SessionState::LoggedIn { guest: true, .. } => Ok(self.finish_logout()),
            SessionState::LoggedIn { user_id, guest: false } => {
                let user_id = user_id.clone();
                tracing::debug!(%user_id, "requesting server logout");
                self.state = SessionState::LoggingOut { user_id };
                Ok(vec![SessionAction::RequestLogout])
            },
            SessionState::LoggedOut | SessionState::LoggingOut { .. } => {
                Err(self.invalid("logout"))
            },
        }
    }

    /// Report the outcome of [`SessionAction::RequestLogout`].
    ///
    /// A failed request still logs out locally.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidState`] unless a logout is in progress.
    pub fn logout_completed(
        &mut self,
        result: Result<(), String>,
    ) -> Result<Vec<SessionAction>, SessionError> {
        if !matches!(self.state, SessionState::LoggingOut { .. }) {
            return Err(self.invalid("complete logout"));
        }
        if let Err(reason) = result {
            tracing::warn!(%reason, "server logout failed, discarding session anyway");
        }
        Ok(self.finish_logout())
    }

    fn start_sequence() -> Vec<SessionAction> {
        let mut actions = vec![SessionAction::Dispatch(Dispatch::WillStartClient)];
        actions.extend(BACKGROUND_SERVICES.map(SessionAction::StartService));
        actions.push(SessionAction::StartClient {
            pending_event_ordering: PendingEventOrdering::Detached,
        });
        actions
    }

    fn finish_logout(&mut self) -> Vec<SessionAction> {
        tracing::info!("logged out");
        self.state = SessionState::LoggedOut;

        let mut actions = vec![SessionAction::ClearStorage {
            preserve: vec![StorageKey::HomeserverUrl, StorageKey::IdentityServerUrl],
        }];
        actions.extend(BACKGROUND_SERVICES.map(SessionAction::StopService));
        actions.extend([
            SessionAction::StopClient,
            SessionAction::RemoveListeners,
            SessionAction::UnsetClient,
            SessionAction::Dispatch(Dispatch::OnLoggedOut),
        ]);
        actions
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState { state: self.state.clone(), operation }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
