//! Application input events.
//!
//! This module defines [`AppEvent`], the comprehensive set of inputs that drive
//! the [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize) and system ticks.
//! - SDK notifications (timeline events, logout and decryption results).

use murmur_core::{
    DecryptError, EventId, MembershipEvent, UserId, audio::AudioContent, lifecycle::Credentials,
};

use crate::{KeyInput, Message, RoomId};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Credentials obtained; establish a session.
    Login(Credentials),

    /// Server answered a logout request.
    LogoutCompleted {
        /// `Err` carries the failure reason.
        result: Result<(), String>,
    },

    /// Membership change arrived in a room.
    MembershipReceived {
        /// Room the event belongs to.
        room_id: RoomId,
        /// The membership change.
        event: MembershipEvent,
    },

    /// Text message arrived in a room.
    MessageReceived {
        /// Room the event belongs to.
        room_id: RoomId,
        /// The message.
        message: Message,
    },

    /// Audio attachment arrived in a room.
    AudioReceived {
        /// Room the event belongs to.
        room_id: RoomId,
        /// Server-assigned event ID.
        event_id: EventId,
        /// Sender of the attachment.
        sender: UserId,
        /// Attachment content.
        content: AudioContent,
    },

    /// Attachment decryption finished.
    AttachmentDecrypted {
        /// Room holding the attachment.
        room_id: RoomId,
        /// Event carrying the attachment.
        event_id: EventId,
        /// Plaintext bytes or the failure.
        result: Result<Vec<u8>, DecryptError>,
    },
}
