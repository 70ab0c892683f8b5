//! Passcode crate: sub-modules.

pub mod types;
pub mod core;
pub mod session;
pub mod ticker;
pub mod service;
pub mod commands;

// Re-export top-level items for convenience.
pub use types::*;
pub use service::{PasscodeService, PasscodeServiceState};
pub use commands::*;
