//! Status bar
//!
//! Displays session state, room information and key hints.

use murmur_core::lifecycle::SessionState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

const KEY_HINTS: &str = " | ↑↓ select  ⏎ expand  ␣ play  Tab room  L logout  q quit";

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let session_status = match app.session_state() {
        SessionState::LoggedOut => Span::styled("Logged out", Style::default().fg(Color::Red)),
        SessionState::LoggingOut { .. } => {
            Span::styled("Logging out...", Style::default().fg(Color::Yellow))
        },
        SessionState::LoggedIn { user_id, guest } => Span::styled(
            if *guest { format!("{user_id} (guest)") } else { user_id.to_string() },
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let room_info = app.active_room_state().map_or_else(String::new, |room| {
        format!(" | Room: {} | Entries: {}", room.room_id, room.timeline.len())
    });

    let message = app.status_message().map_or_else(String::new, |m| format!(" | {m}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        session_status,
        Span::styled(room_info, Style::default().fg(Color::DarkGray)),
        Span::styled(message, Style::default().fg(Color::Yellow)),
        Span::raw(KEY_HINTS),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
