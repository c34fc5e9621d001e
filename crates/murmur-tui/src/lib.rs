//! Terminal UI for murmur
//!
//! A thin shell over [`murmur_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`murmur_app::Runtime`]
//!
//! This crate only handles terminal rendering and timeline fixtures.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod fixture;
pub mod media;
pub mod terminal;
pub mod ui;

pub use murmur_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
