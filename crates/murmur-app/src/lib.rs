//! Application layer for murmur
//!
//! Pure state machines and a generic runtime for UI and session
//! orchestration, so the same code runs in the terminal frontend and in
//! tests.
//!
//! # Components
//!
//! - [`App`]: UI state machine (rooms, timelines, summaries, session)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::Runtime;
pub use state::{Message, RoomId, RoomState, TimelineEntry};
