//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use murmur_core::{EventId, audio::EncryptedFile, lifecycle::SessionAction};

use crate::RoomId;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Execute a session lifecycle step against the SDK.
    Session(SessionAction),

    /// Fetch and decrypt an encrypted attachment.
    DecryptAttachment {
        /// Room holding the attachment.
        room_id: RoomId,
        /// Event carrying the attachment.
        event_id: EventId,
        /// Key material and ciphertext location.
        file: EncryptedFile,
    },
}
