use greenai_prefs::membership;
use greenai_prefs::{FontSize, MessageDisplay, PreferencesUpdate, PrefsStore, UserPreferences};
use tempfile::tempdir;

#[tokio::test]
async fn test_defaults_without_store() {
    let store = PrefsStore::new(None);
    let prefs = store.lock().await.get().await;
    assert_eq!(prefs, UserPreferences::default());
}

#[tokio::test]
async fn test_update_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let path_str = path.to_string_lossy().to_string();

    {
        let store = PrefsStore::new(Some(path_str.clone()));
        let mut guard = store.lock().await;
        guard
            .update(PreferencesUpdate {
                font_size: Some(FontSize::Large),
                message_display: Some(MessageDisplay::Flat),
                max_history_days: Some(7),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let store = PrefsStore::new(Some(path_str));
    let prefs = store.lock().await.get().await;
    assert_eq!(prefs.font_size, FontSize::Large);
    assert_eq!(prefs.message_display, MessageDisplay::Flat);
    assert_eq!(prefs.max_history_days, 7);
    // untouched fields keep their defaults
    assert!(prefs.persistent_chats);
}

#[tokio::test]
async fn test_set_replaces_everything() {
    let store = PrefsStore::new(None);
    let mut guard = store.lock().await;

    let mut prefs = UserPreferences::default();
    prefs.chat_history = false;
    guard.set(prefs.clone()).await.unwrap();
    assert_eq!(guard.get().await, prefs);
}

#[tokio::test]
async fn test_membership_lookup() {
    assert!(membership::check_membership("abcdef").await);
    assert!(!membership::check_membership("abcde").await);
}
