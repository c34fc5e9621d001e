//! Membership event list summaries.
//!
//! A run of consecutive membership events (joins and leaves) is noisy to
//! read one line at a time. [`MemberEventListSummary`] collapses a long run
//! into a single sentence with an avatar strip and an expand toggle, and
//! passes short runs through untouched.
//!
//! # Rendering model
//!
//! The summary is a pure function of its inputs: the events, the parallel
//! detail views, the [`SummaryConfig`] and the caller-owned
//! [`SummaryState`]. Rendering produces a [`SummaryView`] which the frontend
//! turns into widgets. Identical inputs always yield identical views.
//!
//! # Senders who joined and left
//!
//! A sender whose events disagree (at least one join and one leave) is
//! dropped from both name lists. The number of dropped events, halved, is
//! reported as "N user(s) joined and left". The count assumes the canonical
//! join/leave pair; when it is not a positive whole number it is omitted.

mod config;
mod names;

use std::collections::HashSet;

pub use config::{SummaryConfig, SummaryState};
pub use names::{joined_and_left_clause, render_name_list, render_summary};

use crate::{CoreError, EventId, Membership, MembershipEvent, UserId};

/// Avatar edge length in the summary strip.
pub const AVATAR_SIZE: u16 = 14;

/// Membership events split by outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    /// Join events from senders with no leave, in original order.
    pub join_events: Vec<&'a MembershipEvent>,
    /// Leave events from senders with no join, in original order.
    pub leave_events: Vec<&'a MembershipEvent>,
    /// Senders who joined and left again. `None` if there are none or the
    /// count is not a whole number.
    pub join_and_left: Option<usize>,
}

/// Split `events` into net joiners, net leavers and the joined-and-left count.
pub fn classify(events: &[MembershipEvent]) -> Classification<'_> {
    let mut joined: HashSet<&UserId> = HashSet::new();
    let mut left: HashSet<&UserId> = HashSet::new();
    for ev in events {
        match ev.membership {
            Membership::Join => joined.insert(&ev.sender),
            Membership::Leave => left.insert(&ev.sender),
        };
    }

    let filtered: Vec<&MembershipEvent> = events
        .iter()
        .filter(|ev| !(joined.contains(&ev.sender) && left.contains(&ev.sender)))
        .collect();

    let dropped = events.len() - filtered.len();
    let join_and_left = (dropped > 0 && dropped % 2 == 0).then_some(dropped / 2);

    let (join_events, leave_events) =
        filtered.into_iter().partition(|ev| ev.membership == Membership::Join);

    Classification { join_events, leave_events, join_and_left }
}

/// Label of the expand/collapse affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleLabel {
    /// Summary is collapsed; activating shows every event.
    Expand,
    /// Summary is expanded; activating hides the events again.
    Collapse,
}

impl ToggleLabel {
    /// Text shown to the user.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expand => "expand",
            Self::Collapse => "collapse",
        }
    }
}

impl std::fmt::Display for ToggleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to the avatar renderer for one summarised event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarSpec<'a> {
    /// Display key (the event ID).
    pub key: &'a EventId,
    /// Member whose avatar is drawn.
    pub member: &'a UserId,
    /// Resolved display name, for renderers that draw initials.
    pub name: &'a str,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

/// One-line summary shown above (or instead of) the detail views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryHeader<'a> {
    /// Avatars of the first summarised senders.
    pub avatars: Vec<AvatarSpec<'a>>,
    /// Summary sentence including the joined-and-left clause.
    pub text: String,
    /// Expand/collapse affordance.
    pub toggle: ToggleLabel,
}

/// Output of [`MemberEventListSummary::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView<'a, V> {
    /// Summary line. `None` when the run is too short to summarise.
    pub header: Option<SummaryHeader<'a>>,
    /// Detail views to show, in original order. Empty while collapsed.
    pub details: &'a [V],
}

/// Collapsible summary of a run of membership events.
///
/// `V` is the frontend's pre-rendered detail view for a single event; the
/// summary never looks inside it.
#[derive(Debug)]
pub struct MemberEventListSummary<'a, V> {
    events: &'a [MembershipEvent],
    details: &'a [V],
    config: SummaryConfig,
}

impl<'a, V> MemberEventListSummary<'a, V> {
    /// Create a summary over `events` and their parallel `details`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::DetailCountMismatch`] if the sequences differ in length
    /// - [`CoreError::InvalidConfig`] if `config` does not validate
    pub fn new(
        events: &'a [MembershipEvent],
        details: &'a [V],
        config: SummaryConfig,
    ) -> Result<Self, CoreError> {
        if events.len() != details.len() {
            return Err(CoreError::DetailCountMismatch {
                events: events.len(),
                details: details.len(),
            });
        }
        config.validate()?;
        Ok(Self { events, details, config })
    }

    /// Whether the run is long enough to be summarised.
    pub fn is_summarised(&self) -> bool {
        self.events.len() >= self.config.threshold
    }

    /// Classify the underlying events.
    pub fn classify(&self) -> Classification<'a> {
        classify(self.events)
    }

    /// Render the summary for the given display state.
    pub fn render(&self, state: SummaryState) -> SummaryView<'a, V> {
        if !self.is_summarised() {
            return SummaryView { header: None, details: self.details };
        }

        let Classification { join_events, leave_events, join_and_left } = self.classify();

        let avatars = join_events
            .iter()
            .chain(&leave_events)
            .copied()
            .take(self.config.avatars_max_length)
            .map(|ev| AvatarSpec {
                key: &ev.event_id,
                member: &ev.sender,
                name: ev.display_name(),
                width: AVATAR_SIZE,
                height: AVATAR_SIZE,
            })
            .collect();

        let mut text = render_summary(&join_events, &leave_events, self.config.summary_length);
        if let Some(clause) = joined_and_left_clause(join_and_left) {
            text.push_str(&clause);
        }

        let toggle = if state.expanded { ToggleLabel::Collapse } else { ToggleLabel::Expand };
        let details: &'a [V] = if state.expanded { self.details } else { &[] };

        SummaryView { header: Some(SummaryHeader { avatars, text, toggle }), details }
    }
}
