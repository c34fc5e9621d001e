//! Rooms sidebar
//!
//! Displays the list of joined rooms with unread indicators.

use murmur_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const ACTIVE_PREFIX: &str = ">";
const INACTIVE_PREFIX: &str = " ";
const UNREAD_MARKER: &str = "*";
const EMPTY_MARKER: &str = "";
const ELLIPSIS: char = '…';
// Borders, prefix and unread marker
const CHROME_WIDTH: u16 = 4;

enum RoomDisplayState {
    Active,
    Unread,
    Normal,
}

/// Render the rooms sidebar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut room_ids: Vec<_> = app.rooms().keys().collect();
    room_ids.sort_unstable();

    let name_width = usize::from(area.width.saturating_sub(CHROME_WIDTH));

    let items: Vec<ListItem> = room_ids
        .into_iter()
        .map(|room_id| {
            let state = if app.active_room() == Some(room_id) {
                RoomDisplayState::Active
            } else if app.rooms().get(room_id).is_some_and(|r| r.unread) {
                RoomDisplayState::Unread
            } else {
                RoomDisplayState::Normal
            };

            let (prefix, suffix, style) = match state {
                RoomDisplayState::Active => (
                    ACTIVE_PREFIX,
                    EMPTY_MARKER,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                RoomDisplayState::Unread => {
                    (INACTIVE_PREFIX, UNREAD_MARKER, Style::default().fg(Color::Cyan))
                },
                RoomDisplayState::Normal => (INACTIVE_PREFIX, EMPTY_MARKER, Style::default()),
            };

            let unread_style = Style::default().fg(Color::Red);

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(shorten(room_id, name_width), style),
                Span::styled(suffix, unread_style),
            ]))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Rooms ");
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}

/// Truncate `name` to `width` characters, marking the cut with an ellipsis.
fn shorten(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut short: String = name.chars().take(width.saturating_sub(1)).collect();
    short.push(ELLIPSIS);
    short
}
