//! Tauri command bindings for the passcode crate.
//!
//! Thin wrappers that take `State<PasscodeServiceState>`, lock the mutex,
//! and delegate to the service.  Every command returns `Result<T, String>`.

use crate::passcode::service::PasscodeServiceState;
use crate::passcode::types::*;

#[tauri::command]
pub async fn passcode_current_code(
    state: tauri::State<'_, PasscodeServiceState>,
) -> Result<GeneratedPasscode, String> {
    let svc = state.lock().await;
    Ok(svc.current_code())
}

#[tauri::command]
pub async fn passcode_sign_in(
    state: tauri::State<'_, PasscodeServiceState>,
    username: String,
    code: String,
) -> Result<SessionTicket, String> {
    let mut svc = state.lock().await;
    svc.sign_in(&username, &code).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn passcode_sign_out(
    state: tauri::State<'_, PasscodeServiceState>,
) -> Result<(), String> {
    let mut svc = state.lock().await;
    svc.sign_out();
    Ok(())
}

#[tauri::command]
pub async fn passcode_session(
    state: tauri::State<'_, PasscodeServiceState>,
) -> Result<Option<SessionTicket>, String> {
    let mut svc = state.lock().await;
    Ok(svc.session())
}
