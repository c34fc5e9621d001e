//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod rooms;
mod status;
pub mod timeline;

use murmur_core::audio::MediaResolver;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, media: &dyn MediaResolver) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [main_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, media, *main_area);
    status::render(frame, app, *status_area);
}

/// Render the main area (rooms sidebar + timeline).
fn render_main_area(frame: &mut Frame, app: &App, media: &dyn MediaResolver, area: Rect) {
    const ROOM_SIDEBAR_WIDTH: u16 = 20;
    const TIMELINE_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(ROOM_SIDEBAR_WIDTH), Constraint::Min(TIMELINE_MIN_WIDTH)])
        .split(area);

    let [rooms_area, timeline_area] = chunks.as_ref() else {
        return;
    };

    rooms::render(frame, app, *rooms_area);
    timeline::render(frame, app, media, *timeline_area);
}
