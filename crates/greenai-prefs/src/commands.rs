//! Tauri command bindings for the preferences crate.

use crate::membership;
use crate::preferences::*;

#[tauri::command]
pub async fn prefs_get(
    state: tauri::State<'_, PrefsStoreState>,
) -> Result<UserPreferences, String> {
    let store = state.lock().await;
    Ok(store.get().await)
}

#[tauri::command]
pub async fn prefs_set(
    state: tauri::State<'_, PrefsStoreState>,
    prefs: UserPreferences,
) -> Result<(), String> {
    let mut store = state.lock().await;
    store.set(prefs).await
}

#[tauri::command]
pub async fn prefs_update(
    state: tauri::State<'_, PrefsStoreState>,
    update: PreferencesUpdate,
) -> Result<UserPreferences, String> {
    let mut store = state.lock().await;
    store.update(update).await
}

#[tauri::command]
pub async fn prefs_check_membership(username: String) -> Result<bool, String> {
    Ok(membership::check_membership(&username).await)
}
