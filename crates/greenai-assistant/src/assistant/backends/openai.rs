// ── OpenAI Backend ────────────────────────────────────────────────────────────

use async_trait::async_trait;
use log::warn;
use reqwest::Client;

use super::TextBackend;
use crate::assistant::types::*;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
/// Shown when the API returns a choice with no content.
const EMPTY_REPLY_FALLBACK: &str = "I'm sorry, I couldn't generate a response.";

pub struct OpenAiBackend {
    client: Client,
    base_url: String,
    model: String,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl OpenAiBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, AssistantError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AssistantError::new(AssistantErrorKind::MissingApiKey, "OpenAI requires an API key")
        })?;
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| OPENAI_API_BASE.to_string());
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Authorization",
            format!("Bearer {}", api_key).parse().map_err(|e| {
                AssistantError::new(AssistantErrorKind::MissingApiKey, format!("{}", e))
            })?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AssistantError::new(
                    AssistantErrorKind::RequestFailed,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            model,
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    fn build_payload(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
        })
    }

    fn parse_response(body: &serde_json::Value) -> Result<String, AssistantError> {
        let choice = body["choices"].get(0).ok_or_else(|| {
            AssistantError::new(
                AssistantErrorKind::BadResponse,
                "No choices in OpenAI response",
            )
        })?;
        let content = choice["message"]["content"].as_str().unwrap_or("");
        if content.is_empty() {
            Ok(EMPTY_REPLY_FALLBACK.to_string())
        } else {
            Ok(content.to_string())
        }
    }
}

#[async_trait]
impl TextBackend for OpenAiBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::OpenAi
    }

    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_payload(prompt);

        let mut last_err =
            AssistantError::new(AssistantErrorKind::RequestFailed, "OpenAI request failed");

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!("OpenAI retry attempt {}/{}", attempt, self.max_retries);
                tokio::time::sleep(std::time::Duration::from_millis(
                    self.retry_delay_ms * attempt as u64,
                ))
                .await;
            }

            match self.client.post(&url).json(&body).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let resp_body: serde_json::Value = resp.json().await.map_err(|e| {
                            AssistantError::new(
                                AssistantErrorKind::BadResponse,
                                format!("Failed to parse OpenAI response: {}", e),
                            )
                        })?;
                        return Self::parse_response(&resp_body);
                    }
                    let err_body = resp.text().await.unwrap_or_default();
                    last_err = AssistantError::new(
                        AssistantErrorKind::RequestFailed,
                        format!("OpenAI API error {}: {}", status, err_body),
                    );
                    if status.as_u16() == 429 || status.is_server_error() {
                        warn!("{}", last_err);
                        continue;
                    }
                    return Err(last_err);
                }
                Err(e) => {
                    last_err = AssistantError::new(
                        AssistantErrorKind::RequestFailed,
                        format!("OpenAI request failed: {}", e),
                    );
                    warn!("{}", last_err);
                }
            }
        }
        Err(last_err)
    }

    async fn health_check(&self) -> Result<u64, AssistantError> {
        let url = format!("{}/models", self.base_url);
        let start = std::time::Instant::now();
        self.client.get(&url).send().await.map_err(|e| {
            AssistantError::new(
                AssistantErrorKind::RequestFailed,
                format!("Health check failed: {}", e),
            )
        })?;
        Ok(start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> OpenAiBackend {
        OpenAiBackend::new(&BackendConfig::openai("sk-test")).unwrap()
    }

    // ── Construction ─────────────────────────────────────────────

    #[test]
    fn requires_api_key() {
        let mut cfg = BackendConfig::relay();
        cfg.kind = BackendKind::OpenAi;
        let err = OpenAiBackend::new(&cfg).unwrap_err();
        assert_eq!(err.kind, AssistantErrorKind::MissingApiKey);
    }

    #[test]
    fn defaults_to_mini_model() {
        assert_eq!(backend().model, DEFAULT_MODEL);
        assert_eq!(backend().base_url, OPENAI_API_BASE);
    }

    #[test]
    fn model_override() {
        let mut cfg = BackendConfig::openai("sk-test");
        cfg.model = Some("gpt-4o".into());
        let b = OpenAiBackend::new(&cfg).unwrap();
        assert_eq!(b.model, "gpt-4o");
    }

    // ── Payload ──────────────────────────────────────────────────

    #[test]
    fn payload_has_system_and_user_messages() {
        let payload = backend().build_payload("hello");
        assert_eq!(payload["model"], DEFAULT_MODEL);
        let messages = payload["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], SYSTEM_PROMPT);
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "hello");
    }

    // ── Response parsing ─────────────────────────────────────────

    #[test]
    fn parses_first_choice() {
        let body = serde_json::json!({
            "choices": [ { "message": { "role": "assistant", "content": "hi!" } } ]
        });
        assert_eq!(OpenAiBackend::parse_response(&body).unwrap(), "hi!");
    }

    #[test]
    fn empty_content_falls_back_to_apology() {
        let body = serde_json::json!({
            "choices": [ { "message": { "role": "assistant", "content": null } } ]
        });
        assert_eq!(
            OpenAiBackend::parse_response(&body).unwrap(),
            EMPTY_REPLY_FALLBACK
        );
    }

    #[test]
    fn no_choices_is_an_error() {
        let body = serde_json::json!({ "choices": [] });
        let err = OpenAiBackend::parse_response(&body).unwrap_err();
        assert_eq!(err.kind, AssistantErrorKind::BadResponse);
    }
}
