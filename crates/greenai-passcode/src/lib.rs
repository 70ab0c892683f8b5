//! # GreenAI Chat – Passcode
//!
//! Time-sliced sign-in codes for the chat client:
//!
//! - **Code generation** – deterministic 6-digit codes from a shared secret and
//!   a 30-second time slice
//! - **Verification** – strict string comparison against the current slice's code
//! - **Sessions** – 24-hour sign-in tickets persisted to app data
//! - **Refresh ticker** – cancellable periodic regeneration for display hosts
//! - **Tauri Commands** – command surface for the sign-in page
//!
//! The code and its verifier live in the same process and share the same
//! embedded secret, so this gates the page, it does not authenticate anyone.

pub mod passcode;
