// ── Assistant Service ─────────────────────────────────────────────────────────
//
// Central orchestrator: owns the tab store, the backend configs, and the
// stored API key. Wrapped in `Arc<tokio::sync::Mutex<AssistantService>>` as
// Tauri managed state.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::assistant::backends::{self, TextBackend};
use crate::assistant::tabs::TabStore;
use crate::assistant::topics;
use crate::assistant::types::*;

pub struct AssistantService {
    tabs: TabStore,
    relay_config: BackendConfig,
    openai_config: BackendConfig,
    api_key: Option<StoredApiKey>,
    preferred: Option<BackendKind>,
    store_path: Option<String>,
    persist_chats: bool,
}

impl AssistantService {
    /// Create a new service wrapped in `Arc<Mutex<_>>` for Tauri state.
    /// Persisted tabs are loaded from `store_path` when present.
    pub fn new(store_path: Option<String>) -> AssistantServiceState {
        let mut openai_config = BackendConfig::relay();
        openai_config.kind = BackendKind::OpenAi;
        openai_config.api_key = None;

        let mut service = AssistantService {
            tabs: TabStore::new(),
            relay_config: BackendConfig::relay(),
            openai_config,
            api_key: None,
            preferred: None,
            store_path,
            persist_chats: true,
        };
        if let Err(e) = service.load() {
            log::warn!("Failed to load chat store: {}", e);
        }
        Arc::new(Mutex::new(service))
    }

    fn load(&mut self) -> Result<(), AssistantError> {
        let Some(ref store_path) = self.store_path else {
            return Ok(());
        };
        let path = Path::new(store_path);
        if !path.exists() {
            return Ok(());
        }
        let data = fs::read_to_string(path)
            .map_err(|e| AssistantError::new(AssistantErrorKind::StorageError, e.to_string()))?;
        self.tabs = TabStore::from_json(&data)?;
        Ok(())
    }

    fn save(&self) {
        if !self.persist_chats {
            return;
        }
        let Some(ref store_path) = self.store_path else {
            return;
        };
        match self.tabs.to_json() {
            Ok(json) => {
                if let Err(e) = fs::write(store_path, json) {
                    log::warn!("Failed to persist chats: {}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize chats: {}", e),
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Backend selection
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Replace the stored config for whichever backend `config.kind` names.
    pub fn configure_backend(&mut self, config: BackendConfig) {
        match config.kind {
            BackendKind::Relay => self.relay_config = config,
            BackendKind::OpenAi => self.openai_config = config,
        }
    }

    /// Store an API key; it authorizes OpenAI for the next hour.
    pub fn set_api_key(&mut self, key: String) -> StoredApiKey {
        let stored = StoredApiKey {
            key,
            expires_at: now_ms() + API_KEY_TTL_MS,
        };
        self.api_key = Some(stored.clone());
        log::info!("API key stored; OpenAI backend active until {}", stored.expires_at);
        stored
    }

    pub fn clear_api_key(&mut self) {
        self.api_key = None;
    }

    /// Pin a backend. `None` restores automatic selection.
    pub fn set_preferred_backend(&mut self, preferred: Option<BackendKind>) {
        self.preferred = preferred;
    }

    /// The stored key, if still inside its validity window. Expired keys are
    /// discarded here, so OpenAI silently hands back to the relay.
    fn active_api_key(&mut self) -> Option<String> {
        if let Some(ref stored) = self.api_key {
            if stored.is_expired_at(now_ms()) {
                log::info!("Stored API key expired; falling back to relay");
                self.api_key = None;
            }
        }
        self.api_key.as_ref().map(|k| k.key.clone())
    }

    /// Which backend the next message will use: OpenAI when a usable key is
    /// present (unless the relay is pinned), otherwise the relay.
    pub fn active_backend(&mut self) -> BackendKind {
        let has_key = self.active_api_key().is_some();
        match self.preferred {
            Some(BackendKind::Relay) => BackendKind::Relay,
            Some(BackendKind::OpenAi) | None if has_key => BackendKind::OpenAi,
            _ => BackendKind::Relay,
        }
    }

    fn backend_for(&self, kind: BackendKind) -> Result<Box<dyn TextBackend>, AssistantError> {
        match kind {
            BackendKind::Relay => backends::create_backend(&self.relay_config),
            BackendKind::OpenAi => {
                let mut config = self.openai_config.clone();
                config.api_key = self.api_key.as_ref().map(|k| k.key.clone());
                backends::create_backend(&config)
            }
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Messaging
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// One exchange: append the user message, ask the active backend,
    /// append the reply, and derive follow-up suggestions.
    ///
    /// On backend failure the user message stays in the tab and the error
    /// is returned for the page to surface.
    pub async fn send_message(
        &mut self,
        tab_id: &str,
        username: &str,
        text: &str,
    ) -> Result<SendOutcome, AssistantError> {
        let kind = self.active_backend();
        let backend = self.backend_for(kind)?;

        let user_message = self.tabs.add_user_message(tab_id, username, text)?;
        self.save();

        match backend.complete(text).await {
            Ok(reply) => {
                let assistant_message = self.tabs.add_assistant_message(tab_id, &reply)?;
                let suggestions = topics::suggest_followups(&reply);
                self.save();
                Ok(SendOutcome {
                    user_message,
                    assistant_message,
                    suggestions,
                    backend: kind,
                })
            }
            Err(e) => {
                log::error!("Error getting AI response: {}", e);
                Err(e)
            }
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Tabs
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn create_tab(&mut self, name: Option<String>) -> ChatTab {
        let tab = self.tabs.create(name);
        self.save();
        tab
    }

    pub fn list_tabs(&self) -> Vec<TabSummary> {
        self.tabs.list_summaries()
    }

    pub fn rename_tab(&mut self, id: &str, name: &str) -> Result<(), AssistantError> {
        self.tabs.rename(id, name)?;
        self.save();
        Ok(())
    }

    pub fn delete_tab(&mut self, id: &str) -> bool {
        let deleted = self.tabs.delete(id);
        if deleted {
            self.save();
        }
        deleted
    }

    pub fn tab_messages(&self, id: &str) -> Result<Vec<ChatMessage>, AssistantError> {
        self.tabs.messages(id)
    }

    pub fn clear_tab(&mut self, id: &str) -> Result<(), AssistantError> {
        self.tabs.clear_messages(id)?;
        self.save();
        Ok(())
    }

    pub fn export_tab(&self, id: &str) -> Result<String, AssistantError> {
        self.tabs.export_transcript(id)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Housekeeping
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Toggle chat persistence. Turning it off leaves the file as-is; new
    /// mutations simply stop being mirrored.
    pub fn set_persist_chats(&mut self, persist: bool) {
        self.persist_chats = persist;
    }

    /// Apply the retention window. Returns how many messages were dropped.
    pub fn prune_history(&mut self, max_days: u32) -> usize {
        let removed = self.tabs.prune_older_than(max_days);
        if removed > 0 {
            log::info!("Pruned {} messages past the {}-day window", removed, max_days);
            self.save();
        }
        removed
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
