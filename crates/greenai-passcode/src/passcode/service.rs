//! High-level sign-in service — owns the config, the session store, and the
//! display ticker. Exposes the methods that `commands.rs` delegates to.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::passcode::core;
use crate::passcode::session::{self, SessionStore};
use crate::passcode::ticker::CodeTicker;
use crate::passcode::types::*;

/// Thread-safe service state managed by Tauri.
pub type PasscodeServiceState = Arc<Mutex<PasscodeService>>;

/// Central passcode service.
pub struct PasscodeService {
    config: PasscodeConfig,
    sessions: SessionStore,
    ticker: CodeTicker,
}

impl PasscodeService {
    /// Create a new service wrapped in `Arc<Mutex<_>>` for Tauri state.
    pub fn new(config: PasscodeConfig, session_path: Option<String>) -> PasscodeServiceState {
        Arc::new(Mutex::new(PasscodeService {
            config,
            sessions: SessionStore::new(session_path),
            ticker: CodeTicker::new(),
        }))
    }

    /// The active configuration.
    pub fn config(&self) -> &PasscodeConfig {
        &self.config
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Display
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// The code for the current slice, with rollover timing.
    pub fn current_code(&self) -> GeneratedPasscode {
        core::generate_code(&self.config)
    }

    /// Start the display ticker. The callback fires immediately and then
    /// once per period.
    pub fn start_ticker<F>(&mut self, on_tick: F)
    where
        F: FnMut(GeneratedPasscode) + Send + 'static,
    {
        self.ticker.start(self.config.clone(), on_tick);
    }

    /// Stop the display ticker.
    pub fn stop_ticker(&mut self) {
        self.ticker.stop();
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Sign-in flow
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Verify the submitted code and, on success, open a 24-hour session.
    ///
    /// A rejected submission carries no penalty; the caller may resubmit
    /// immediately.
    pub fn sign_in(&mut self, username: &str, code: &str) -> Result<SessionTicket, PasscodeError> {
        let username = username.trim();
        if username.is_empty() || !core::verify(&self.config, code) {
            return Err(PasscodeError::new(
                PasscodeErrorKind::InvalidCredentials,
                "Invalid username or code",
            ));
        }
        let ticket = SessionTicket {
            username: username.to_string(),
            expires_at: session::expiry_timestamp(),
        };
        self.sessions.accept(ticket.clone())?;
        log::info!("User {} signed in", ticket.username);
        Ok(ticket)
    }

    /// Drop the current session.
    pub fn sign_out(&mut self) {
        self.sessions.clear();
    }

    /// The current session, if one is active and unexpired.
    pub fn session(&mut self) -> Option<SessionTicket> {
        self.sessions.current()
    }
}
