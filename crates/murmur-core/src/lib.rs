//! Core for murmur
//!
//! Sans-IO domain logic for the murmur chat frontend. Everything in this
//! crate is a pure function or an action-based state machine: callers feed
//! in inputs, receive values or actions back, and own all I/O.
//!
//! # Components
//!
//! - [`summary`]: collapsible summaries of membership event runs
//! - [`lifecycle`]: login/logout and background service orchestration
//! - [`audio`]: audio attachment bodies with lazy decryption
//! - [`MembershipEvent`]: the timeline's view of a membership change

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod audio;
mod error;
mod event;
pub mod lifecycle;
pub mod summary;

pub use error::{CoreError, DecryptError, SessionError};
pub use event::{EventId, Membership, MembershipEvent, UserId};
