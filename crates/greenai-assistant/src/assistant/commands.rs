//! Tauri command bindings for the assistant crate.
//!
//! Thin wrappers that take `State<AssistantServiceState>`, lock the mutex,
//! and delegate to the service.  Every command returns `Result<T, String>`.

use crate::assistant::types::*;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Tabs
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tauri::command]
pub async fn assistant_create_tab(
    state: tauri::State<'_, AssistantServiceState>,
    name: Option<String>,
) -> Result<ChatTab, String> {
    let mut svc = state.lock().await;
    Ok(svc.create_tab(name))
}

#[tauri::command]
pub async fn assistant_list_tabs(
    state: tauri::State<'_, AssistantServiceState>,
) -> Result<Vec<TabSummary>, String> {
    let svc = state.lock().await;
    Ok(svc.list_tabs())
}

#[tauri::command]
pub async fn assistant_rename_tab(
    state: tauri::State<'_, AssistantServiceState>,
    id: String,
    name: String,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.rename_tab(&id, &name).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn assistant_delete_tab(
    state: tauri::State<'_, AssistantServiceState>,
    id: String,
) -> Result<bool, String> {
    let mut svc = state.lock().await;
    Ok(svc.delete_tab(&id))
}

#[tauri::command]
pub async fn assistant_get_messages(
    state: tauri::State<'_, AssistantServiceState>,
    id: String,
) -> Result<Vec<ChatMessage>, String> {
    let svc = state.lock().await;
    svc.tab_messages(&id).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn assistant_clear_tab(
    state: tauri::State<'_, AssistantServiceState>,
    id: String,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.clear_tab(&id).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn assistant_export_tab(
    state: tauri::State<'_, AssistantServiceState>,
    id: String,
) -> Result<String, String> {
    let svc = state.lock().await;
    svc.export_tab(&id).map_err(|e| e.to_string())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Messaging
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tauri::command]
pub async fn assistant_send_message(
    state: tauri::State<'_, AssistantServiceState>,
    tab_id: String,
    username: String,
    text: String,
) -> Result<SendOutcome, String> {
    let mut svc = state.lock().await;
    svc.send_message(&tab_id, &username, &text)
        .await
        .map_err(|e| e.to_string())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Backend management
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tauri::command]
pub async fn assistant_set_api_key(
    state: tauri::State<'_, AssistantServiceState>,
    key: String,
) -> Result<StoredApiKey, String> {
    let mut svc = state.lock().await;
    Ok(svc.set_api_key(key))
}

#[tauri::command]
pub async fn assistant_clear_api_key(
    state: tauri::State<'_, AssistantServiceState>,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.clear_api_key();
    Ok(())
}

#[tauri::command]
pub async fn assistant_set_backend(
    state: tauri::State<'_, AssistantServiceState>,
    preferred: Option<BackendKind>,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.set_preferred_backend(preferred);
    Ok(())
}

#[tauri::command]
pub async fn assistant_active_backend(
    state: tauri::State<'_, AssistantServiceState>,
) -> Result<BackendKind, String> {
    let mut svc = state.lock().await;
    Ok(svc.active_backend())
}

#[tauri::command]
pub async fn assistant_prune_history(
    state: tauri::State<'_, AssistantServiceState>,
    max_days: u32,
) -> Result<usize, String> {
    let mut svc = state.lock().await;
    Ok(svc.prune_history(max_days))
}
