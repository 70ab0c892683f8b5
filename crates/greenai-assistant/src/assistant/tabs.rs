// ── Tab Management ────────────────────────────────────────────────────────────
//
// In-memory store for chat tabs and their message histories. Serializable
// as a whole so the service can mirror it to disk.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::assistant::types::*;

/// Name given to freshly created tabs.
pub const DEFAULT_TAB_NAME: &str = "New Chat";

/// In-memory chat tab store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabStore {
    tabs: HashMap<String, ChatTab>,
}

impl TabStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Tab CRUD ─────────────────────────────────────────────────────────────

    /// Create a tab; a missing name falls back to "New Chat".
    pub fn create(&mut self, name: Option<String>) -> ChatTab {
        let now = Utc::now();
        let tab = ChatTab {
            id: uuid::Uuid::new_v4().to_string(),
            name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TAB_NAME.to_string()),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.tabs.insert(tab.id.clone(), tab.clone());
        tab
    }

    pub fn get(&self, id: &str) -> Result<&ChatTab, AssistantError> {
        self.tabs.get(id).ok_or_else(|| {
            AssistantError::new(
                AssistantErrorKind::TabNotFound,
                format!("Tab not found: {}", id),
            )
        })
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut ChatTab, AssistantError> {
        self.tabs.get_mut(id).ok_or_else(|| {
            AssistantError::new(
                AssistantErrorKind::TabNotFound,
                format!("Tab not found: {}", id),
            )
        })
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<(), AssistantError> {
        let tab = self.get_mut(id)?;
        tab.name = name.to_string();
        tab.updated_at = Utc::now();
        Ok(())
    }

    /// Remove a tab. Returns `true` if it existed.
    pub fn delete(&mut self, id: &str) -> bool {
        self.tabs.remove(id).is_some()
    }

    pub fn count(&self) -> usize {
        self.tabs.len()
    }

    /// Tab strip entries, most recently touched first.
    pub fn list_summaries(&self) -> Vec<TabSummary> {
        let mut summaries: Vec<_> = self
            .tabs
            .values()
            .map(|t| TabSummary {
                id: t.id.clone(),
                name: t.name.clone(),
                message_count: t.messages.len(),
                last_message_preview: t
                    .messages
                    .last()
                    .map(|m| m.content.chars().take(120).collect()),
                updated_at: t.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries
    }

    // ── Messages ─────────────────────────────────────────────────────────────

    pub fn add_message(&mut self, tab_id: &str, message: ChatMessage) -> Result<(), AssistantError> {
        let tab = self.get_mut(tab_id)?;
        tab.messages.push(message);
        tab.updated_at = Utc::now();
        Ok(())
    }

    pub fn add_user_message(
        &mut self,
        tab_id: &str,
        username: &str,
        text: &str,
    ) -> Result<ChatMessage, AssistantError> {
        let msg = ChatMessage::from_user(username, text);
        self.add_message(tab_id, msg.clone())?;
        Ok(msg)
    }

    pub fn add_assistant_message(
        &mut self,
        tab_id: &str,
        text: &str,
    ) -> Result<ChatMessage, AssistantError> {
        let msg = ChatMessage::from_assistant(text);
        self.add_message(tab_id, msg.clone())?;
        Ok(msg)
    }

    pub fn messages(&self, tab_id: &str) -> Result<Vec<ChatMessage>, AssistantError> {
        Ok(self.get(tab_id)?.messages.clone())
    }

    pub fn clear_messages(&mut self, tab_id: &str) -> Result<(), AssistantError> {
        let tab = self.get_mut(tab_id)?;
        tab.messages.clear();
        tab.updated_at = Utc::now();
        Ok(())
    }

    // ── Export ───────────────────────────────────────────────────────────────

    /// Plain-text transcript: one "username (timestamp): content" block per
    /// message, blank-line separated.
    pub fn export_transcript(&self, tab_id: &str) -> Result<String, AssistantError> {
        let tab = self.get(tab_id)?;
        Ok(tab
            .messages
            .iter()
            .map(|m| format!("{} ({}): {}", m.username, m.timestamp.to_rfc3339(), m.content))
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    // ── Retention ────────────────────────────────────────────────────────────

    /// Drop messages older than `max_days`. Returns how many were removed.
    pub fn prune_older_than(&mut self, max_days: u32) -> usize {
        let cutoff = Utc::now() - Duration::days(max_days as i64);
        let mut removed = 0;
        for tab in self.tabs.values_mut() {
            let before = tab.messages.len();
            tab.messages.retain(|m| m.timestamp >= cutoff);
            let dropped = before - tab.messages.len();
            if dropped > 0 {
                tab.updated_at = Utc::now();
                removed += dropped;
            }
        }
        removed
    }

    // ── Serialization ────────────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, AssistantError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AssistantError::new(AssistantErrorKind::StorageError, e.to_string()))
    }

    pub fn from_json(data: &str) -> Result<Self, AssistantError> {
        serde_json::from_str(data)
            .map_err(|e| AssistantError::new(AssistantErrorKind::StorageError, e.to_string()))
    }
}
