//! Membership events as seen by the timeline.
//!
//! The messaging SDK owns the raw room events. The frontend only needs the
//! handful of fields it displays, which are copied into a
//! [`MembershipEvent`] when the event reaches the timeline.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Fully qualified user identifier (e.g. `@alice:example.org`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw user identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable unique event identifier assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wrap a raw event identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Membership state carried by a membership-change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    /// Sender joined the room.
    Join,
    /// Sender left the room.
    Leave,
}

impl Membership {
    /// Wire representation (`join` or `leave`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
        }
    }
}

impl FromStr for Membership {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "join" => Ok(Self::Join),
            "leave" => Ok(Self::Leave),
            other => Err(CoreError::UnknownMembership(other.to_owned())),
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One membership change in a room timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipEvent {
    /// Server-assigned event ID. Used as the avatar display key.
    pub event_id: EventId,
    /// User whose membership changed.
    pub sender: UserId,
    /// Display name from the sender's current room profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
    /// `displayname` field of the event content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,
    /// New membership state.
    pub membership: Membership,
}

impl MembershipEvent {
    /// Create an event with no display name overrides.
    pub fn new(event_id: EventId, sender: UserId, membership: Membership) -> Self {
        Self { event_id, sender, profile_name: None, displayname: None, membership }
    }

    /// Attach the profile display name.
    #[must_use]
    pub fn with_profile_name(mut self, name: impl Into<String>) -> Self {
        self.profile_name = Some(name.into());
        self
    }

    /// Attach the content `displayname`.
    #[must_use]
    pub fn with_displayname(mut self, name: impl Into<String>) -> Self {
        self.displayname = Some(name.into());
        self
    }

    /// Name to show for the sender.
    ///
    /// Profile name wins over the content field, which wins over the raw
    /// user ID. Empty names are skipped.
    pub fn display_name(&self) -> &str {
        [self.profile_name.as_deref(), self.displayname.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or_else(|| self.sender.as_str())
    }
}
