//! Timeline fixtures
//!
//! With no SDK connected, the terminal client replays a recorded timeline.
//! A fixture file is a JSON array of entries tagged by `type`:
//!
//! ```json
//! [
//!   { "type": "membership", "room_id": "!r:hs",
//!     "event": { "event_id": "$1", "sender": "@a:hs", "membership": "join" } },
//!   { "type": "message", "room_id": "!r:hs", "event_id": "$2",
//!     "sender": "@a:hs", "body": "hello" }
//! ]
//! ```

use std::{fs, io, path::Path};

use murmur_app::{AppEvent, Message, RoomId};
use murmur_core::{
    EventId, Membership, MembershipEvent, UserId,
    audio::{AttachmentSource, AudioContent, EncryptedFile},
};
use serde::Deserialize;
use thiserror::Error;

/// Fixture loading errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture file could not be read.
    #[error("cannot read fixture: {0}")]
    Io(#[from] io::Error),

    /// Fixture file is not a valid timeline.
    #[error("invalid fixture: {0}")]
    Json(#[from] serde_json::Error),
}

/// One recorded timeline event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FixtureEntry {
    /// Membership change.
    Membership {
        /// Room the event belongs to.
        room_id: RoomId,
        /// The membership change.
        event: MembershipEvent,
    },
    /// Text message.
    Message {
        /// Room the event belongs to.
        room_id: RoomId,
        /// Server-assigned event ID.
        event_id: EventId,
        /// Author of the message.
        sender: UserId,
        /// Plain-text body.
        body: String,
    },
    /// Audio attachment.
    Audio {
        /// Room the event belongs to.
        room_id: RoomId,
        /// Server-assigned event ID.
        event_id: EventId,
        /// Sender of the attachment.
        sender: UserId,
        /// Attachment content.
        content: AudioContent,
    },
}

impl From<FixtureEntry> for AppEvent {
    fn from(entry: FixtureEntry) -> Self {
        match entry {
            FixtureEntry::Membership { room_id, event } => {
                AppEvent::MembershipReceived { room_id, event }
            },
            FixtureEntry::Message { room_id, event_id, sender, body } => {
                AppEvent::MessageReceived { room_id, message: Message { event_id, sender, body } }
            },
            FixtureEntry::Audio { room_id, event_id, sender, content } => {
                AppEvent::AudioReceived { room_id, event_id, sender, content }
            },
        }
    }
}

/// Parse a fixture document into app events.
pub fn parse(json: &str) -> Result<Vec<AppEvent>, FixtureError> {
    let entries: Vec<FixtureEntry> = serde_json::from_str(json)?;
    Ok(entries.into_iter().map(AppEvent::from).collect())
}

/// Load a fixture file into app events.
pub fn load(path: &Path) -> Result<Vec<AppEvent>, FixtureError> {
    let events = parse(&fs::read_to_string(path)?)?;
    tracing::info!(path = %path.display(), events = events.len(), "loaded timeline fixture");
    Ok(events)
}

/// Built-in timeline shown when no fixture is given.
pub fn demo_timeline() -> Vec<AppEvent> {
    const LOBBY: &str = "!lobby:murmur.local";
    const RANDOM: &str = "!random:murmur.local";

    let member = |room: &str, id: usize, who: &str, name: Option<&str>, membership| {
        let mut event = MembershipEvent::new(
            EventId::new(format!("$m{id}")),
            UserId::new(format!("@{who}:murmur.local")),
            membership,
        );
        if let Some(name) = name {
            event = event.with_profile_name(name);
        }
        AppEvent::MembershipReceived { room_id: room.into(), event }
    };
    let message = |room: &str, id: usize, who: &str, body: &str| AppEvent::MessageReceived {
        room_id: room.into(),
        message: Message {
            event_id: EventId::new(format!("$t{id}")),
            sender: UserId::new(format!("@{who}:murmur.local")),
            body: body.into(),
        },
    };

    vec![
        member(LOBBY, 1, "alice", Some("Alice"), Membership::Join),
        member(LOBBY, 2, "bob", Some("Bob"), Membership::Join),
        member(LOBBY, 3, "carol", Some("Carol"), Membership::Join),
        member(LOBBY, 4, "dave", None, Membership::Join),
        member(LOBBY, 5, "eve", Some("Eve"), Membership::Join),
        member(LOBBY, 6, "eve", Some("Eve"), Membership::Leave),
        message(LOBBY, 7, "alice", "morning all"),
        member(LOBBY, 8, "frank", Some("Frank"), Membership::Join),
        message(LOBBY, 9, "frank", "hi!"),
        AppEvent::AudioReceived {
            room_id: LOBBY.into(),
            event_id: EventId::new("$a10"),
            sender: UserId::new("@bob:murmur.local"),
            content: AudioContent {
                body: "standup.ogg".into(),
                mimetype: Some("audio/ogg".into()),
                source: AttachmentSource::Plain { url: "mxc://murmur.local/standup".into() },
            },
        },
        AppEvent::AudioReceived {
            room_id: LOBBY.into(),
            event_id: EventId::new("$a11"),
            sender: UserId::new("@carol:murmur.local"),
            content: AudioContent {
                body: "secret.ogg".into(),
                mimetype: Some("audio/ogg".into()),
                source: AttachmentSource::Encrypted {
                    file: EncryptedFile {
                        url: "mxc://murmur.local/secret".into(),
                        key: "k".into(),
                        iv: "iv".into(),
                        sha256: "h".into(),
                    },
                },
            },
        },
        member(RANDOM, 12, "alice", Some("Alice"), Membership::Join),
        member(RANDOM, 13, "bob", Some("Bob"), Membership::Join),
        message(RANDOM, 14, "bob", "anyone around?"),
        member(RANDOM, 15, "alice", Some("Alice"), Membership::Leave),
        member(RANDOM, 16, "bob", Some("Bob"), Membership::Leave),
        member(RANDOM, 17, "carol", Some("Carol"), Membership::Leave),
        member(RANDOM, 18, "dave", None, Membership::Leave),
    ]
}
