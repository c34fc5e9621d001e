//! Observable application state types.
//!
//! This module defines the data structures that represent the application's
//! current view of each room: [`RoomState`] and its ordered
//! [`TimelineEntry`] list.
//!
//! These structures serve as the "View Model" for the application. Runs of
//! consecutive membership events are grouped as they arrive so the frontend
//! can hand each run to a
//! [`MemberEventListSummary`](murmur_core::summary::MemberEventListSummary)
//! without regrouping on every frame.

use murmur_core::{
    EventId, MembershipEvent, UserId,
    audio::{AudioAction, AudioBody},
    summary::SummaryState,
};

/// Room identifier (e.g. `!abc:example.org`).
pub type RoomId = String;

/// A text message in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Server-assigned event ID.
    pub event_id: EventId,
    /// Author of the message.
    pub sender: UserId,
    /// Plain-text body.
    pub body: String,
}

/// One entry in a room timeline.
#[derive(Debug, Clone)]
pub enum TimelineEntry {
    /// A text message.
    Message(Message),
    /// A run of consecutive membership events.
    Members {
        /// Events in arrival order. Never empty.
        events: Vec<MembershipEvent>,
        /// Expand/collapse state of the run's summary.
        state: SummaryState,
    },
    /// An audio attachment.
    Audio {
        /// Server-assigned event ID.
        event_id: EventId,
        /// Sender of the attachment.
        sender: UserId,
        /// Attachment state machine.
        body: AudioBody,
    },
}

/// Per-room state.
#[derive(Debug, Clone)]
pub struct RoomState {
    /// Room identifier.
    pub room_id: RoomId,
    /// Timeline in arrival order.
    pub timeline: Vec<TimelineEntry>,
    /// Room has unread events.
    pub unread: bool,
    /// Selected timeline entry. `None` if nothing is selected.
    pub selected: Option<usize>,
}

impl RoomState {
    /// Create empty room state.
    pub fn new(room_id: RoomId) -> Self {
        Self { room_id, timeline: Vec::new(), unread: false, selected: None }
    }

    /// Append a membership event, extending the trailing run if there is one.
    pub fn push_membership(&mut self, event: MembershipEvent) {
        if let Some(TimelineEntry::Members { events, .. }) = self.timeline.last_mut() {
            events.push(event);
        } else {
            self.timeline.push(TimelineEntry::Members {
                events: vec![event],
                state: SummaryState::default(),
            });
        }
    }

    /// Append a text message.
    pub fn push_message(&mut self, message: Message) {
        self.timeline.push(TimelineEntry::Message(message));
    }

    /// Append an audio attachment.
    pub fn push_audio(&mut self, event_id: EventId, sender: UserId, body: AudioBody) {
        self.timeline.push(TimelineEntry::Audio { event_id, sender, body });
    }

    /// Audio body for `event_id`, if the room has one.
    pub fn audio_mut(&mut self, event_id: &EventId) -> Option<&mut AudioBody> {
        self.timeline.iter_mut().find_map(|entry| match entry {
            TimelineEntry::Audio { event_id: id, body, .. } if id == event_id => Some(body),
            _ => None,
        })
    }

    /// Mount every audio body, collecting the decryptions they request.
    pub fn mount_audio(&mut self) -> Vec<(EventId, AudioAction)> {
        self.timeline
            .iter_mut()
            .filter_map(|entry| match entry {
                TimelineEntry::Audio { event_id, body, .. } => Some((event_id, body)),
                _ => None,
            })
            .flat_map(|(event_id, body)| {
                let actions = body.mount();
                actions.into_iter().map(|action| (event_id.clone(), action)).collect::<Vec<_>>()
            })
            .collect()
    }

    /// Move the selection one entry up (towards older entries).
    pub fn select_previous(&mut self) {
        self.selected = match self.selected {
            _ if self.timeline.is_empty() => None,
            None => Some(self.timeline.len() - 1),
            Some(index) => Some(index.saturating_sub(1)),
        };
    }

    /// Move the selection one entry down (towards newer entries).
    pub fn select_next(&mut self) {
        self.selected = match self.selected {
            _ if self.timeline.is_empty() => None,
            None => Some(self.timeline.len() - 1),
            Some(index) => Some((index + 1).min(self.timeline.len() - 1)),
        };
    }

    /// Selected timeline entry.
    pub fn selected_entry_mut(&mut self) -> Option<&mut TimelineEntry> {
        self.selected.and_then(|index| self.timeline.get_mut(index))
    }
}
