// ── Backend adapters ──────────────────────────────────────────────────────────
//
// Each sub-module implements the `TextBackend` trait for one remote
// text-completion service. The trait keeps the chat service ignorant of
// which wire format produced a reply.

pub mod relay;
pub mod openai;

use async_trait::async_trait;

use crate::assistant::types::*;

// ── Backend trait ────────────────────────────────────────────────────────────

/// Unified interface over the remote completion services.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Backend identifier.
    fn kind(&self) -> BackendKind;

    /// Send one prompt, get one reply.
    async fn complete(&self, prompt: &str) -> Result<String, AssistantError>;

    /// Ping the service; returns round-trip latency in milliseconds.
    async fn health_check(&self) -> Result<u64, AssistantError>;
}

/// Create a backend instance from configuration.
pub fn create_backend(config: &BackendConfig) -> Result<Box<dyn TextBackend>, AssistantError> {
    match config.kind {
        BackendKind::Relay => Ok(Box::new(relay::RelayBackend::new(config)?)),
        BackendKind::OpenAi => Ok(Box::new(openai::OpenAiBackend::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_relay() {
        let backend = create_backend(&BackendConfig::relay()).unwrap();
        assert_eq!(backend.kind(), BackendKind::Relay);
    }

    #[test]
    fn factory_builds_openai_with_key() {
        let backend = create_backend(&BackendConfig::openai("sk-test")).unwrap();
        assert_eq!(backend.kind(), BackendKind::OpenAi);
    }

    #[test]
    fn factory_rejects_openai_without_key() {
        let mut cfg = BackendConfig::relay();
        cfg.kind = BackendKind::OpenAi;
        let err = create_backend(&cfg).unwrap_err();
        assert_eq!(err.kind, AssistantErrorKind::MissingApiKey);
    }
}
