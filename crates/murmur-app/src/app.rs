//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the application completely decoupled from I/O and the messaging
//! SDK.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Drives the session lifecycle (login, logout, service start/stop).
//! - Tracks rooms, their timelines, unread badges and the active room.
//! - Owns the expand/collapse state of every membership summary.
//! - Mounts audio attachments of the visible room so they start decrypting.

use std::collections::HashMap;

use murmur_core::{
    EventId, MembershipEvent,
    audio::{AudioAction, AudioBody},
    lifecycle::{Credentials, Session, SessionAction, SessionState},
    summary::{MemberEventListSummary, SummaryConfig},
};

use crate::{AppAction, AppEvent, KeyInput, Message, RoomId, RoomState, TimelineEntry};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a terminal or SDK.
#[derive(Debug, Clone)]
pub struct App {
    /// Session lifecycle.
    session: Session,
    /// Per-room state (timeline, unread, selection).
    rooms: HashMap<RoomId, RoomState>,
    /// Currently active room. `None` if no room is selected.
    active_room: Option<RoomId>,
    /// Membership summary tunables.
    summary_config: SummaryConfig,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a logged-out App.
    pub fn new(summary_config: SummaryConfig) -> Self {
        Self {
            session: Session::new(),
            rooms: HashMap::new(),
            active_room: None,
            summary_config,
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(..) => vec![AppAction::Render],
            AppEvent::Login(credentials) => self.login(credentials),
            AppEvent::LogoutCompleted { result } => match self.session.logout_completed(result) {
                Ok(actions) => self.after_session_step(actions),
                Err(err) => {
                    tracing::warn!(%err, "unexpected logout completion");
                    vec![]
                },
            },
            AppEvent::MembershipReceived { room_id, event } => {
                self.push_membership(room_id, event);
                vec![AppAction::Render]
            },
            AppEvent::MessageReceived { room_id, message } => {
                self.push_message(room_id, message);
                vec![AppAction::Render]
            },
            AppEvent::AudioReceived { room_id, event_id, sender, content } => {
                self.deliver(room_id.clone(), |room| {
                    room.push_audio(event_id, sender, AudioBody::new(content));
                });
                let mut actions = self.mount_if_active(&room_id);
                actions.push(AppAction::Render);
                actions
            },
            AppEvent::AttachmentDecrypted { room_id, event_id, result } => {
                let changed = self
                    .rooms
                    .get_mut(&room_id)
                    .and_then(|room| room.audio_mut(&event_id))
                    .is_some_and(|body| body.attachment_decrypted(result));
                if changed { vec![AppAction::Render] } else { vec![] }
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc | KeyInput::Char('q') => self.quit(),
            KeyInput::Char('L') => self.logout(),
            KeyInput::Tab => self.next_room(),
            KeyInput::Up => {
                if let Some(room) = self.active_room_state_mut() {
                    room.select_previous();
                }
                vec![AppAction::Render]
            },
            KeyInput::Down => {
                if let Some(room) = self.active_room_state_mut() {
                    room.select_next();
                }
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.toggle_selected_summary(),
            KeyInput::Char(' ') => self.toggle_selected_audio(),
            KeyInput::Char(_) => vec![],
        }
    }

    /// Establish a session with `credentials`.
    pub fn login(&mut self, credentials: Credentials) -> Vec<AppAction> {
        self.status_message = Some(format!("Logged in as {}", credentials.user_id));
        let actions = self.session.set_logged_in(credentials);
        self.after_session_step(actions)
    }

    /// Log the current session out.
    pub fn logout(&mut self) -> Vec<AppAction> {
        match self.session.logout() {
            Ok(actions) => {
                self.status_message = Some("Logging out...".into());
                self.after_session_step(actions)
            },
            Err(err) => {
                self.status_message = Some(format!("Error: {err}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Translate session actions and drop room state once logged out.
    fn after_session_step(&mut self, actions: Vec<SessionAction>) -> Vec<AppAction> {
        if *self.session.state() == SessionState::LoggedOut {
            self.rooms.clear();
            self.active_room = None;
            self.status_message = Some("Logged out".into());
        }
        let mut actions: Vec<AppAction> = actions.into_iter().map(AppAction::Session).collect();
        actions.push(AppAction::Render);
        actions
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Set the active room, mounting its audio attachments.
    pub fn set_active_room(&mut self, room_id: &RoomId) -> Vec<AppAction> {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return vec![];
        };
        room.unread = false;
        self.active_room = Some(room_id.clone());

        let mut actions = self.mount_if_active(room_id);
        actions.push(AppAction::Render);
        actions
    }

    /// Activate the next room in sorted order, wrapping around.
    fn next_room(&mut self) -> Vec<AppAction> {
        let mut room_ids: Vec<&RoomId> = self.rooms.keys().collect();
        room_ids.sort_unstable();

        let next = match &self.active_room {
            Some(active) => room_ids
                .iter()
                .position(|id| *id == active)
                .and_then(|index| room_ids.get((index + 1) % room_ids.len())),
            None => room_ids.first(),
        };

        match next.map(|id| (*id).clone()) {
            Some(room_id) => self.set_active_room(&room_id),
            None => vec![],
        }
    }

    /// Expand or collapse the membership summary at `index` in `room_id`.
    ///
    /// Returns `false` if that entry is not a membership run long enough to
    /// be summarised. Short runs have no toggle, so their state stays put.
    pub fn toggle_summary(&mut self, room_id: &RoomId, index: usize) -> bool {
        let config = self.summary_config;
        match self.rooms.get_mut(room_id).and_then(|room| room.timeline.get_mut(index)) {
            Some(TimelineEntry::Members { events, state })
                if MemberEventListSummary::new(&events[..], &events[..], config)
                    .is_ok_and(|summary| summary.is_summarised()) =>
            {
                state.toggle();
                true
            },
            _ => false,
        }
    }

    fn toggle_selected_summary(&mut self) -> Vec<AppAction> {
        let selected = self
            .active_room_state()
            .and_then(|room| room.selected.map(|index| (room.room_id.clone(), index)));
        match selected {
            Some((room_id, index)) if self.toggle_summary(&room_id, index) => {
                vec![AppAction::Render]
            },
            _ => vec![],
        }
    }

    fn toggle_selected_audio(&mut self) -> Vec<AppAction> {
        match self.active_room_state_mut().and_then(RoomState::selected_entry_mut) {
            Some(TimelineEntry::Audio { body, .. }) => {
                body.toggle_playing();
                vec![AppAction::Render]
            },
            _ => vec![],
        }
    }

    fn push_membership(&mut self, room_id: RoomId, event: MembershipEvent) {
        tracing::debug!(
            %room_id,
            sender = %event.sender,
            membership = %event.membership,
            "membership"
        );
        self.deliver(room_id, |room| room.push_membership(event));
    }

    fn push_message(&mut self, room_id: RoomId, message: Message) {
        self.deliver(room_id, |room| room.push_message(message));
    }

    /// Apply `push` to the room, creating it on first sight. The first room
    /// seen becomes active; other rooms are marked unread.
    fn deliver(&mut self, room_id: RoomId, push: impl FnOnce(&mut RoomState)) {
        if self.active_room.is_none() {
            self.active_room = Some(room_id.clone());
        }
        let is_active = self.is_active(&room_id);
        let room = self.rooms.entry(room_id.clone()).or_insert_with(|| RoomState::new(room_id));
        push(room);
        room.unread |= !is_active;
    }

    fn is_active(&self, room_id: &RoomId) -> bool {
        self.active_room.as_ref() == Some(room_id)
    }

    /// Mount audio in `room_id` if it is the visible room.
    fn mount_if_active(&mut self, room_id: &RoomId) -> Vec<AppAction> {
        if !self.is_active(room_id) {
            return vec![];
        }
        let Some(room) = self.rooms.get_mut(room_id) else {
            return vec![];
        };
        room.mount_audio()
            .into_iter()
            .map(|(event_id, action): (EventId, AudioAction)| match action {
                AudioAction::DecryptAttachment(file) => {
                    AppAction::DecryptAttachment { room_id: room_id.clone(), event_id, file }
                },
            })
            .collect()
    }

    /// Current session state.
    pub fn session_state(&self) -> &SessionState {
        self.session.state()
    }

    /// Membership summary tunables.
    pub fn summary_config(&self) -> SummaryConfig {
        self.summary_config
    }

    /// All rooms seen in this session.
    pub fn rooms(&self) -> &HashMap<RoomId, RoomState> {
        &self.rooms
    }

    /// Currently selected room. `None` if no rooms are known.
    pub fn active_room(&self) -> Option<&RoomId> {
        self.active_room.as_ref()
    }

    /// State of the currently selected room. `None` if no rooms are known.
    pub fn active_room_state(&self) -> Option<&RoomState> {
        self.active_room.as_ref().and_then(|id| self.rooms.get(id))
    }

    fn active_room_state_mut(&mut self) -> Option<&mut RoomState> {
        self.active_room.as_ref().and_then(|id| self.rooms.get_mut(id))
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
