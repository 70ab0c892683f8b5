//! # GreenAI Chat – Assistant
//!
//! The chat layer behind the page:
//!
//! - **Backends** – unified adapter over two remote text-completion services:
//!   the keyless worker relay and the OpenAI chat-completions API
//! - **Chat tabs** – per-tab message state with CRUD, recency-sorted
//!   summaries, transcript export, and history retention
//! - **Topic suggestions** – follow-up prompts drawn from each reply
//! - **Persistence** – tabs mirrored to a JSON file in app data
//! - **Tauri Commands** – command surface for the chat page

pub mod assistant;
