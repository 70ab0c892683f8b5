//! Core types for the passcode crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Secret baked into every client. All clients sharing it display the same
/// code within a slice, which is the whole point of the gate.
pub const DEFAULT_SECRET: &str = "GREENAI_CHAT_SECRET";

/// Codes roll over every 30 seconds.
pub const DEFAULT_PERIOD_MS: i64 = 30_000;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Configuration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Explicit generator/verifier configuration. Handed to the service at
/// construction time; there is no process-wide singleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasscodeConfig {
    /// Shared secret prefixed to the slice number before hashing.
    pub secret: String,
    /// Slice length in milliseconds.
    pub period_ms: i64,
}

impl Default for PasscodeConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            period_ms: DEFAULT_PERIOD_MS,
        }
    }
}

impl PasscodeConfig {
    /// Builder: set the secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = secret.into();
        self
    }

    /// Builder: set the slice period in milliseconds.
    pub fn with_period_ms(mut self, period_ms: i64) -> Self {
        self.period_ms = period_ms;
        self
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Generated code
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A generated passcode with display timing info.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPasscode {
    /// The 6-digit code string (e.g. "089378").
    pub code: String,
    /// The time slice the code was derived from.
    pub slice: i64,
    /// Slice length in milliseconds.
    pub period_ms: i64,
    /// Milliseconds until the code rolls over.
    pub remaining_ms: i64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Session ticket
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An accepted sign-in. Valid until `expires_at` regardless of how many
/// code rollovers happen in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTicket {
    pub username: String,
    /// Unix milliseconds past which the ticket no longer authorizes access.
    pub expires_at: i64,
}

impl SessionTicket {
    /// Whether the ticket is expired at the given instant.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Error type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Error kind for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PasscodeErrorKind {
    InvalidCredentials,
    NoSession,
    StorageError,
}

/// Crate-level error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasscodeError {
    pub kind: PasscodeErrorKind,
    pub message: String,
}

impl PasscodeError {
    pub fn new(kind: PasscodeErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
        }
    }
}

impl fmt::Display for PasscodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}

impl From<PasscodeError> for String {
    fn from(e: PasscodeError) -> String {
        e.to_string()
    }
}
