use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

fn default_true() -> bool {
    true
}
fn default_max_history_days() -> u32 {
    30
}

/// Font size the page renders messages at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Medium,
    Large,
}

/// How messages are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageDisplay {
    Bubbles,
    Flat,
}

/// Everything the settings panel edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub font_size: FontSize,
    pub message_display: MessageDisplay,
    /// Mirror chats to disk between runs.
    #[serde(default = "default_true")]
    pub persistent_chats: bool,
    /// Keep message history at all.
    #[serde(default = "default_true")]
    pub chat_history: bool,
    /// Retention window applied to stored history.
    #[serde(default = "default_max_history_days")]
    pub max_history_days: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            font_size: FontSize::Medium,
            message_display: MessageDisplay::Bubbles,
            persistent_chats: true,
            chat_history: true,
            max_history_days: 30,
        }
    }
}

/// Partial update from the settings form; unset fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub font_size: Option<FontSize>,
    pub message_display: Option<MessageDisplay>,
    pub persistent_chats: Option<bool>,
    pub chat_history: Option<bool>,
    pub max_history_days: Option<u32>,
}

impl PreferencesUpdate {
    /// Merge into existing preferences.
    pub fn apply(&self, prefs: &mut UserPreferences) {
        if let Some(v) = self.font_size {
            prefs.font_size = v;
        }
        if let Some(v) = self.message_display {
            prefs.message_display = v;
        }
        if let Some(v) = self.persistent_chats {
            prefs.persistent_chats = v;
        }
        if let Some(v) = self.chat_history {
            prefs.chat_history = v;
        }
        if let Some(v) = self.max_history_days {
            prefs.max_history_days = v;
        }
    }
}

pub type PrefsStoreState = Arc<Mutex<PrefsStore>>;

/// File-backed preferences store. Loads at construction, persists on every
/// change. A missing or unreadable file just means defaults.
pub struct PrefsStore {
    store_path: Option<String>,
    prefs: UserPreferences,
}

impl PrefsStore {
    pub fn new(store_path: Option<String>) -> PrefsStoreState {
        let mut store = PrefsStore {
            store_path,
            prefs: UserPreferences::default(),
        };
        if let Err(e) = store.load() {
            log::warn!("Failed to load preferences: {}", e);
        }
        Arc::new(Mutex::new(store))
    }

    fn load(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(ref store_path) = self.store_path else {
            return Ok(());
        };
        let path = Path::new(store_path);
        if !path.exists() {
            return Ok(());
        }
        let data = fs::read_to_string(path)?;
        self.prefs = serde_json::from_str(&data)?;
        Ok(())
    }

    fn persist(&self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(ref store_path) = self.store_path else {
            return Ok(());
        };
        let data = serde_json::to_string_pretty(&self.prefs)?;
        fs::write(store_path, data)?;
        Ok(())
    }

    pub async fn get(&self) -> UserPreferences {
        self.prefs.clone()
    }

    pub async fn set(&mut self, prefs: UserPreferences) -> Result<(), String> {
        self.prefs = prefs;
        self.persist().map_err(|e| e.to_string())
    }

    pub async fn update(&mut self, update: PreferencesUpdate) -> Result<UserPreferences, String> {
        update.apply(&mut self.prefs);
        self.persist().map_err(|e| e.to_string())?;
        Ok(self.prefs.clone())
    }
}
