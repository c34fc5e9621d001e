//! Error types for the murmur core.
//!
//! Each state machine gets its own error enum so callers can match on the
//! failure that is relevant to them. Presentation code never fails: the
//! summary formatter only rejects inputs that break its structural
//! invariants at construction time.

use thiserror::Error;

use crate::lifecycle::SessionState;

/// Errors raised when building core values from untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Membership string is neither `join` nor `leave`
    #[error("unknown membership state: {0:?}")]
    UnknownMembership(String),

    /// Events and detail views must be parallel sequences
    #[error("detail view count mismatch: {events} events but {details} detail views")]
    DetailCountMismatch {
        /// Number of membership events supplied
        events: usize,
        /// Number of detail views supplied
        details: usize,
    },

    /// Summary configuration is unusable
    #[error("invalid summary configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Errors raised by the session lifecycle state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Operation is not valid in the current session state
    #[error("invalid session transition: cannot {operation} from {state:?}")]
    InvalidState {
        /// Session state when the operation was attempted
        state: SessionState,
        /// Operation that was attempted
        operation: &'static str,
    },
}

/// Errors reported when an encrypted attachment cannot be decrypted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptError {
    /// The host has no decryption backend
    #[error("attachment decryption is not supported by this client")]
    Unsupported,

    /// Ciphertext did not verify or decrypt
    #[error("failed to decrypt attachment: {0}")]
    Decrypt(String),
}
