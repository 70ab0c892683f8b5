use greenai_assistant::assistant::service::AssistantService;
use greenai_assistant::assistant::types::{AssistantErrorKind, BackendKind};
use tempfile::tempdir;

#[tokio::test]
async fn test_tab_lifecycle() {
    let service = AssistantService::new(None);
    let mut svc = service.lock().await;

    let tab = svc.create_tab(None);
    assert_eq!(tab.name, "New Chat");

    svc.rename_tab(&tab.id, "Weekend plans").unwrap();
    let tabs = svc.list_tabs();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].name, "Weekend plans");

    assert!(svc.delete_tab(&tab.id));
    assert!(svc.list_tabs().is_empty());
}

#[tokio::test]
async fn test_chats_survive_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chats.json");
    let path_str = path.to_string_lossy().to_string();

    let tab_id = {
        let service = AssistantService::new(Some(path_str.clone()));
        let mut svc = service.lock().await;
        let tab = svc.create_tab(Some("Rust questions".into()));
        tab.id
    };

    let service = AssistantService::new(Some(path_str));
    let svc = service.lock().await;
    let tabs = svc.list_tabs();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].id, tab_id);
    assert_eq!(tabs[0].name, "Rust questions");
}

#[tokio::test]
async fn test_backend_selection_follows_key() {
    let service = AssistantService::new(None);
    let mut svc = service.lock().await;

    assert_eq!(svc.active_backend(), BackendKind::Relay);
    svc.set_api_key("sk-test".into());
    assert_eq!(svc.active_backend(), BackendKind::OpenAi);
    svc.clear_api_key();
    assert_eq!(svc.active_backend(), BackendKind::Relay);
}

#[tokio::test]
async fn test_missing_tab_is_reported() {
    let service = AssistantService::new(None);
    let svc = service.lock().await;

    let err = svc.tab_messages("no-such-tab").unwrap_err();
    assert_eq!(err.kind, AssistantErrorKind::TabNotFound);
}

#[tokio::test]
async fn test_export_empty_tab() {
    let service = AssistantService::new(None);
    let mut svc = service.lock().await;

    let tab = svc.create_tab(None);
    assert_eq!(svc.export_tab(&tab.id).unwrap(), "");
}
