// ── Relay Backend ─────────────────────────────────────────────────────────────
//
// Keyless worker relay. The prompt travels as a `message` query parameter
// on a GET; the reply is a JSON array whose second element carries the
// chat answer under `response.response`.

use async_trait::async_trait;
use log::warn;
use reqwest::Client;

use super::TextBackend;
use crate::assistant::types::*;

const RELAY_ENDPOINT: &str = "https://chat.bhaskarvilles.workers.dev/";

pub struct RelayBackend {
    client: Client,
    base_url: String,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl RelayBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, AssistantError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| RELAY_ENDPOINT.to_string());

        let client = Client::builder()
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
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    /// Pull the chat answer out of the relay's task array.
    fn parse_response(body: &serde_json::Value) -> Result<String, AssistantError> {
        body.get(1)
            .and_then(|task| task["response"]["response"].as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                AssistantError::new(
                    AssistantErrorKind::BadResponse,
                    "Relay reply is missing the chat task",
                )
            })
    }
}

#[async_trait]
impl TextBackend for RelayBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Relay
    }

    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        let mut last_err =
            AssistantError::new(AssistantErrorKind::RequestFailed, "Relay request failed");

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!("Relay retry attempt {}/{}", attempt, self.max_retries);
                tokio::time::sleep(std::time::Duration::from_millis(
                    self.retry_delay_ms * attempt as u64,
                ))
                .await;
            }

            let request = self
                .client
                .get(&self.base_url)
                .query(&[("message", prompt)])
                .header("Content-Type", "application/json");

            match request.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let body: serde_json::Value = resp.json().await.map_err(|e| {
                            AssistantError::new(
                                AssistantErrorKind::BadResponse,
                                format!("Failed to parse relay reply: {}", e),
                            )
                        })?;
                        return Self::parse_response(&body);
                    }
                    let err_body = resp.text().await.unwrap_or_default();
                    last_err = AssistantError::new(
                        AssistantErrorKind::RequestFailed,
                        format!("Relay error {}: {}", status, err_body),
                    );
                    if status.as_u16() == 429 || status.is_server_error() {
                        continue;
                    }
                    return Err(last_err);
                }
                Err(e) => {
                    last_err = AssistantError::new(
                        AssistantErrorKind::RequestFailed,
                        format!("Relay request failed: {}", e),
                    );
                    warn!("{}", last_err);
                }
            }
        }
        Err(last_err)
    }

    async fn health_check(&self) -> Result<u64, AssistantError> {
        let start = std::time::Instant::now();
        self.client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| {
                AssistantError::new(
                    AssistantErrorKind::RequestFailed,
                    format!("Health check failed: {}", e),
                )
            })?;
        Ok(start.elapsed().as_millis() as u64)
    }
}
