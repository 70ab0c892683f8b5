//! Sign-in sessions.
//!
//! A verified code buys a 24-hour ticket. The ticket is independent of the
//! 30-second code cadence: codes keep rolling over while the ticket stays
//! valid. The current ticket is persisted as JSON next to the rest of the
//! app data and reloaded at startup; an expired stored ticket is discarded.

use std::fs;
use std::path::Path;

use crate::passcode::core::current_unix_millis;
use crate::passcode::types::*;

/// Tickets last 24 hours from acceptance.
pub const SESSION_TTL_MS: i64 = 24 * 60 * 60 * 1_000;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Expiry helper
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Expiry timestamp for a ticket accepted now.
pub fn expiry_timestamp() -> i64 {
    expiry_timestamp_at(current_unix_millis())
}

/// Expiry timestamp for a ticket accepted at a specific instant.
pub fn expiry_timestamp_at(now_ms: i64) -> i64 {
    now_ms + SESSION_TTL_MS
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Session store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Holds the current ticket (at most one) and mirrors it to disk.
pub struct SessionStore {
    store_path: Option<String>,
    current: Option<SessionTicket>,
}

impl SessionStore {
    /// Create a store, loading any persisted ticket. Pass `None` for a
    /// memory-only store.
    pub fn new(store_path: Option<String>) -> Self {
        let mut store = SessionStore {
            store_path,
            current: None,
        };
        if let Err(e) = store.load() {
            log::warn!("Failed to load session store: {}", e);
        }
        store
    }

    fn load(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(ref store_path) = self.store_path else {
            return Ok(());
        };
        let path = Path::new(store_path);
        if !path.exists() {
            return Ok(());
        }
        let data = fs::read_to_string(path)?;
        let ticket: SessionTicket = serde_json::from_str(&data)?;
        if ticket.is_expired_at(current_unix_millis()) {
            // Stale sign-in from a previous run.
            let _ = fs::remove_file(path);
        } else {
            self.current = Some(ticket);
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(ref store_path) = self.store_path else {
            return Ok(());
        };
        match &self.current {
            Some(ticket) => {
                let data = serde_json::to_string_pretty(ticket)?;
                fs::write(store_path, data)?;
            }
            None => {
                let path = Path::new(store_path);
                if path.exists() {
                    fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }

    /// Accept a ticket and mirror it to disk.
    pub fn accept(&mut self, ticket: SessionTicket) -> Result<(), PasscodeError> {
        self.current = Some(ticket);
        self.persist()
            .map_err(|e| PasscodeError::new(PasscodeErrorKind::StorageError, e.to_string()))
    }

    /// The current ticket, if any. An expired ticket is cleared here, so the
    /// authenticated state lapses the first time anyone looks after expiry.
    pub fn current(&mut self) -> Option<SessionTicket> {
        if let Some(ref ticket) = self.current {
            if ticket.is_expired_at(current_unix_millis()) {
                self.current = None;
                if let Err(e) = self.persist() {
                    log::warn!("Failed to clear expired session: {}", e);
                }
            }
        }
        self.current.clone()
    }

    /// Explicit sign-out.
    pub fn clear(&mut self) {
        self.current = None;
        if let Err(e) = self.persist() {
            log::warn!("Failed to clear session store: {}", e);
        }
    }
}
