//! Assistant module — chat state plus the backend adapter, composed by
//! [`service::AssistantService`] and exposed as Tauri commands.

pub mod types;
pub mod backends;
pub mod tabs;
pub mod topics;
pub mod service;
pub mod commands;

// ── Re-exports ───────────────────────────────────────────────────────────────

pub use types::*;
pub use service::AssistantService;
pub use commands::*;
