use greenai_assistant::assistant::commands as assistant;
use greenai_assistant::assistant::service::AssistantService;
use greenai_passcode::passcode::commands as passcode;
use greenai_passcode::passcode::{PasscodeConfig, PasscodeService};
use greenai_prefs::commands as prefs;
use greenai_prefs::preferences::PrefsStore;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  tauri::Builder::default()
    .setup(|app| {
      if cfg!(debug_assertions) {
        app.handle().plugin(
          tauri_plugin_log::Builder::default()
            .level(log::LevelFilter::Info)
            .build(),
        )?;
      }

      let app_dir = app.path().app_data_dir()?;
      std::fs::create_dir_all(&app_dir)?;

      // Preferences come up first; they shape the chat service below.
      let prefs_path = app_dir.join("preferences.json");
      let prefs_store = PrefsStore::new(Some(prefs_path.to_string_lossy().to_string()));
      let preferences =
        tauri::async_runtime::block_on(async { prefs_store.lock().await.get().await });
      app.manage(prefs_store);

      // Chat tabs, with stored history trimmed to the retention settings.
      let chats_path = app_dir.join("chats.json");
      let assistant_service =
        AssistantService::new(Some(chats_path.to_string_lossy().to_string()));
      tauri::async_runtime::block_on(async {
        let mut svc = assistant_service.lock().await;
        svc.set_persist_chats(preferences.persistent_chats);
        if preferences.chat_history {
          svc.prune_history(preferences.max_history_days);
        } else {
          // History off wipes whatever was stored.
          svc.prune_history(0);
        }
      });
      app.manage(assistant_service);

      // Sign-in codes and the 24-hour session ticket.
      let session_path = app_dir.join("session.json");
      let passcode_service = PasscodeService::new(
        PasscodeConfig::default(),
        Some(session_path.to_string_lossy().to_string()),
      );
      app.manage(passcode_service);

      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
        passcode::passcode_current_code,
        passcode::passcode_sign_in,
        passcode::passcode_sign_out,
        passcode::passcode_session,
        assistant::assistant_create_tab,
        assistant::assistant_list_tabs,
        assistant::assistant_rename_tab,
        assistant::assistant_delete_tab,
        assistant::assistant_get_messages,
        assistant::assistant_clear_tab,
        assistant::assistant_export_tab,
        assistant::assistant_send_message,
        assistant::assistant_set_api_key,
        assistant::assistant_clear_api_key,
        assistant::assistant_set_backend,
        assistant::assistant_active_backend,
        assistant::assistant_prune_history,
        prefs::prefs_get,
        prefs::prefs_set,
        prefs::prefs_update,
        prefs::prefs_check_membership
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
