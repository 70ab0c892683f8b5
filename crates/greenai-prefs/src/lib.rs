//! # GreenAI Chat – Preferences
//!
//! Locally persisted user preferences and the premium membership lookup.

pub mod preferences;
pub mod membership;
pub mod commands;

pub use preferences::{
    FontSize, MessageDisplay, PreferencesUpdate, PrefsStore, PrefsStoreState, UserPreferences,
};
pub use commands::*;
