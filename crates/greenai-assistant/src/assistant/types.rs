// ── Types ─────────────────────────────────────────────────────────────────────
//
// Shared data structures used across the assistant sub-modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

// ── Serde default helpers ────────────────────────────────────────────────────

fn default_timeout_secs() -> u64 { 60 }
fn default_max_retries() -> u32 { 2 }
fn default_retry_delay_ms() -> u64 { 500 }

// ── Managed state type alias ─────────────────────────────────────────────────

pub type AssistantServiceState = Arc<Mutex<super::service::AssistantService>>;

/// Display name attached to assistant replies.
pub const ASSISTANT_USERNAME: &str = "AI Assistant";

/// Stored API keys go stale after one hour.
pub const API_KEY_TTL_MS: i64 = 3_600_000;

// ── Messages ─────────────────────────────────────────────────────────────────

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Ai => write!(f, "ai"),
        }
    }
}

/// A single chat message as the page renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub username: String,
}

impl ChatMessage {
    /// A message typed by the signed-in user.
    pub fn from_user(username: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            username: username.into(),
        }
    }

    /// A reply from the assistant.
    pub fn from_assistant(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender: Sender::Ai,
            timestamp: Utc::now(),
            username: ASSISTANT_USERNAME.to_string(),
        }
    }
}

// ── Tabs ─────────────────────────────────────────────────────────────────────

/// One chat tab and its message history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTab {
    pub id: String,
    pub name: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lightweight listing entry for the tab strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSummary {
    pub id: String,
    pub name: String,
    pub message_count: usize,
    pub last_message_preview: Option<String>,
    pub updated_at: DateTime<Utc>,
}

// ── Backends ─────────────────────────────────────────────────────────────────

/// The two remote text-completion services the client can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackendKind {
    Relay,
    OpenAi,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relay => write!(f, "Relay"),
            Self::OpenAi => write!(f, "OpenAI"),
        }
    }
}

/// Configuration for connecting to a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// API key (OpenAI only).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Endpoint override; each backend has a sensible default.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model override (OpenAI only).
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl BackendConfig {
    /// Config for the keyless relay.
    pub fn relay() -> Self {
        Self {
            kind: BackendKind::Relay,
            api_key: None,
            base_url: None,
            model: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }

    /// Config for OpenAI with the given key.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            kind: BackendKind::OpenAi,
            api_key: Some(api_key.into()),
            ..Self::relay()
        }
    }
}

/// An API key stored with its validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredApiKey {
    pub key: String,
    pub expires_at: i64,
}

impl StoredApiKey {
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }
}

// ── Send outcome ─────────────────────────────────────────────────────────────

/// Everything the page needs after one exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
    pub suggestions: Vec<String>,
    pub backend: BackendKind,
}

// ── Error type ───────────────────────────────────────────────────────────────

/// Error kind for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssistantErrorKind {
    MissingApiKey,
    RequestFailed,
    BadResponse,
    TabNotFound,
    StorageError,
}

/// Crate-level error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantError {
    pub kind: AssistantErrorKind,
    pub message: String,
}

impl AssistantError {
    pub fn new(kind: AssistantErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
        }
    }
}

impl fmt::Display for AssistantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}

impl From<AssistantError> for String {
    fn from(e: AssistantError) -> String {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Sender ───────────────────────────────────────────────────

    #[test]
    fn sender_wire_format() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Ai).unwrap(), "\"ai\"");
    }

    // ── ChatMessage ──────────────────────────────────────────────

    #[test]
    fn user_message_fields() {
        let msg = ChatMessage::from_user("alice", "hello");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.username, "alice");
        assert_eq!(msg.content, "hello");
        assert!(!msg.id.is_empty());
    }

    #[test]
    fn assistant_message_username() {
        let msg = ChatMessage::from_assistant("hi there");
        assert_eq!(msg.sender, Sender::Ai);
        assert_eq!(msg.username, ASSISTANT_USERNAME);
    }

    #[test]
    fn message_serde_camel_case() {
        let msg = ChatMessage::from_user("alice", "hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"sender\":\"user\""));
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content, "hello");
    }

    // ── BackendConfig ────────────────────────────────────────────

    #[test]
    fn relay_config_defaults() {
        let cfg = BackendConfig::relay();
        assert_eq!(cfg.kind, BackendKind::Relay);
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.timeout_secs, 60);
        assert_eq!(cfg.max_retries, 2);
    }

    #[test]
    fn openai_config_carries_key() {
        let cfg = BackendConfig::openai("sk-test");
        assert_eq!(cfg.kind, BackendKind::OpenAi);
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn backend_config_defaults_fill_on_deserialize() {
        let cfg: BackendConfig = serde_json::from_str(r#"{"kind":"relay"}"#).unwrap();
        assert_eq!(cfg.kind, BackendKind::Relay);
        assert_eq!(cfg.timeout_secs, 60);
        assert_eq!(cfg.retry_delay_ms, 500);
    }

    // ── StoredApiKey ─────────────────────────────────────────────

    #[test]
    fn stored_key_expiry_boundary() {
        let key = StoredApiKey {
            key: "k".into(),
            expires_at: 100,
        };
        assert!(!key.is_expired_at(99));
        assert!(key.is_expired_at(100));
    }

    // ── Error ────────────────────────────────────────────────────

    #[test]
    fn error_display_and_string() {
        let err = AssistantError::new(AssistantErrorKind::TabNotFound, "no such tab");
        assert!(err.to_string().contains("TabNotFound"));
        let s: String = err.into();
        assert!(s.contains("no such tab"));
    }
}
