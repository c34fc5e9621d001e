//! Timeline pane
//!
//! Displays the active room's timeline. Runs of membership events go through
//! [`MemberEventListSummary`]: long runs collapse into one summary line with
//! avatar initials and an `[expand]` marker, short runs show one line per
//! event.

use std::ops::Range;

use murmur_app::{App, TimelineEntry};
use murmur_core::{
    Membership, MembershipEvent, UserId,
    audio::{AudioBody, AudioView, MediaResolver, PlaceholderImage},
    summary::{
        AvatarSpec, MemberEventListSummary, SummaryConfig, SummaryHeader, SummaryState, SummaryView,
    },
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;
const SELECTED_PREFIX: &str = "▶ ";
const UNSELECTED_PREFIX: &str = "  ";
const DETAIL_INDENT: &str = "    ";
const RUN_INDENT: &str = "  ";

const AVATAR_COLORS: [Color; 6] =
    [Color::Red, Color::Green, Color::Yellow, Color::Blue, Color::Magenta, Color::Cyan];

/// Render the timeline pane.
pub fn render(frame: &mut Frame, app: &App, media: &dyn MediaResolver, area: Rect) {
    let title = app.active_room().map_or_else(|| " No Room ".to_string(), |id| format!(" {id} "));
    let block = Block::default().borders(Borders::ALL).title(title);

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;

    let Some(room) = app.active_room_state() else {
        let waiting = ListItem::new(Line::from(Span::styled(
            "Waiting for room events",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(List::new(vec![waiting]).block(block), area);
        return;
    };

    let mut lines = Vec::new();
    let mut selected_lines = None;
    for (index, entry) in room.timeline.iter().enumerate() {
        let selected = room.selected == Some(index);
        let start = lines.len();
        lines.extend(entry_lines(entry, selected, app.summary_config(), media));
        if selected {
            selected_lines = Some(start..lines.len());
        }
    }

    let skip = scroll_offset(lines.len(), visible_height, selected_lines);
    let visible_items: Vec<_> =
        lines.into_iter().skip(skip).take(visible_height).map(ListItem::new).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

/// First line to show so that the selected lines are in view.
///
/// Without a selection the pane follows the newest entry.
pub fn scroll_offset(total: usize, visible: usize, selected: Option<Range<usize>>) -> usize {
    let bottom = total.saturating_sub(visible);
    match selected {
        // Keep the entry at the bottom edge, or its head if it is taller than the pane
        Some(range) if range.start < bottom => range.end.saturating_sub(visible).min(range.start),
        _ => bottom,
    }
}

/// Lines for one timeline entry.
pub fn entry_lines(
    entry: &TimelineEntry,
    selected: bool,
    config: SummaryConfig,
    media: &dyn MediaResolver,
) -> Vec<Line<'static>> {
    let prefix = Span::raw(if selected { SELECTED_PREFIX } else { UNSELECTED_PREFIX });

    match entry {
        TimelineEntry::Message(message) => vec![Line::from(vec![
            prefix,
            Span::styled(
                format!("<{}>", message.sender),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(message.body.clone()),
        ])],
        TimelineEntry::Members { events, state } => {
            membership_lines(events, *state, prefix, config)
        },
        TimelineEntry::Audio { sender, body, .. } => vec![audio_line(sender, body, prefix, media)],
    }
}

fn membership_lines(
    events: &[MembershipEvent],
    state: SummaryState,
    prefix: Span<'static>,
    config: SummaryConfig,
) -> Vec<Line<'static>> {
    let details: Vec<Line<'static>> = events.iter().map(detail_line).collect();

    let view = match MemberEventListSummary::new(events, &details, config) {
        Ok(summary) => summary.render(state),
        Err(err) => {
            tracing::warn!(%err, "cannot summarise membership run");
            SummaryView { header: None, details: &details }
        },
    };

    let mut lines = Vec::with_capacity(view.details.len() + 1);
    if let Some(header) = view.header {
        lines.push(header_line(&header, prefix));
        lines.extend(view.details.iter().cloned());
    } else if let Some((first, rest)) = view.details.split_first() {
        // Short runs are selectable through their first line
        let mut spans = vec![prefix, Span::raw(RUN_INDENT)];
        spans.extend(first.spans.iter().skip(1).cloned());
        lines.push(Line::from(spans));
        lines.extend(rest.iter().cloned());
    }
    lines
}

fn header_line(header: &SummaryHeader<'_>, prefix: Span<'static>) -> Line<'static> {
    let mut spans = vec![prefix];
    spans.extend(header.avatars.iter().map(avatar_span));
    if !header.avatars.is_empty() {
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(header.text.clone(), Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        format!(" [{}]", header.toggle),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    ));
    Line::from(spans)
}

/// Single-cell avatar: the first letter of the display name, coloured by user.
fn avatar_span(avatar: &AvatarSpec<'_>) -> Span<'static> {
    let initial = avatar
        .name
        .trim_start_matches(['@', '#', '!', '+'])
        .chars()
        .next()
        .map_or('?', |c| c.to_ascii_uppercase());
    Span::styled(
        initial.to_string(),
        Style::default().fg(avatar_color(avatar.member)).add_modifier(Modifier::BOLD),
    )
}

fn avatar_color(member: &UserId) -> Color {
    let hash = member.as_str().bytes().fold(0usize, |acc, b| acc.wrapping_add(usize::from(b)));
    AVATAR_COLORS[hash % AVATAR_COLORS.len()]
}

fn detail_line(event: &MembershipEvent) -> Line<'static> {
    let (arrow, verb, color) = match event.membership {
        Membership::Join => ("→", "joined the room", Color::Green),
        Membership::Leave => ("←", "left the room", Color::Red),
    };
    Line::from(vec![
        Span::raw(DETAIL_INDENT),
        Span::styled(format!("{arrow} "), Style::default().fg(color)),
        Span::raw(format!("{} {verb}", event.display_name())),
    ])
}

fn audio_line(
    sender: &UserId,
    body: &AudioBody,
    prefix: Span<'static>,
    media: &dyn MediaResolver,
) -> Line<'static> {
    let sender = Span::styled(
        format!("<{sender}>"),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    );
    let status = match body.view(media) {
        AudioView::Placeholder { alt, image: PlaceholderImage::Spinner } => {
            Span::styled(format!("… decrypting {alt}"), Style::default().fg(Color::DarkGray))
        },
        AudioView::Placeholder { alt, image: PlaceholderImage::Warning } => {
            Span::styled(format!("⚠ unable to decrypt {alt}"), Style::default().fg(Color::Yellow))
        },
        AudioView::Player { src: None, .. } => Span::styled(
            format!("♪ {} [unavailable]", body.content().body),
            Style::default().fg(Color::DarkGray),
        ),
        AudioView::Player { src: Some(_), playing, .. } => {
            let state = if playing { "playing" } else { "paused" };
            Span::styled(
                format!("♪ {} [{state}]", body.content().body),
                Style::default().fg(Color::Magenta),
            )
        },
    };
    Line::from(vec![prefix, sender, Span::raw(" "), status])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_newest_entry_without_selection() {
        assert_eq!(scroll_offset(40, 10, None), 30);
        assert_eq!(scroll_offset(5, 10, None), 0);
    }

    #[test]
    fn visible_selection_does_not_scroll() {
        assert_eq!(scroll_offset(40, 10, Some(35..36)), 30);
    }

    #[test]
    fn selection_above_view_scrolls_up_to_it() {
        assert_eq!(scroll_offset(40, 10, Some(0..1)), 0);
        assert_eq!(scroll_offset(40, 10, Some(12..13)), 3);
    }

    #[test]
    fn tall_selection_shows_its_head() {
        assert_eq!(scroll_offset(40, 10, Some(5..25)), 5);
    }
}
