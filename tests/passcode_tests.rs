use greenai_passcode::passcode::core;
use greenai_passcode::passcode::session::SESSION_TTL_MS;
use greenai_passcode::passcode::{PasscodeConfig, PasscodeService};
use tempfile::tempdir;

fn race_free_config() -> PasscodeConfig {
    // Hour-long slices so generate-then-verify cannot straddle a rollover.
    PasscodeConfig::default().with_period_ms(3_600_000)
}

#[tokio::test]
async fn test_sign_in_flow() {
    let service = PasscodeService::new(race_free_config(), None);
    let mut svc = service.lock().await;

    assert_eq!(svc.session(), None);
    let code = svc.current_code().code;
    let ticket = svc.sign_in("alice", &code).unwrap();
    assert_eq!(ticket.username, "alice");
    assert_eq!(svc.session(), Some(ticket));

    svc.sign_out();
    assert_eq!(svc.session(), None);
}

#[tokio::test]
async fn test_rejected_code_leaves_no_session() {
    let service = PasscodeService::new(race_free_config(), None);
    let mut svc = service.lock().await;

    assert!(svc.sign_in("alice", "000001").is_err());
    assert_eq!(svc.session(), None);
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    let path_str = path.to_string_lossy().to_string();

    let ticket = {
        let service = PasscodeService::new(race_free_config(), Some(path_str.clone()));
        let mut svc = service.lock().await;
        let code = svc.current_code().code;
        svc.sign_in("alice", &code).unwrap()
    };

    let service = PasscodeService::new(race_free_config(), Some(path_str));
    let mut svc = service.lock().await;
    assert_eq!(svc.session(), Some(ticket));
}

#[tokio::test]
async fn test_sign_out_clears_persisted_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    let path_str = path.to_string_lossy().to_string();

    {
        let service = PasscodeService::new(race_free_config(), Some(path_str.clone()));
        let mut svc = service.lock().await;
        let code = svc.current_code().code;
        svc.sign_in("alice", &code).unwrap();
        svc.sign_out();
    }

    let service = PasscodeService::new(race_free_config(), Some(path_str));
    let mut svc = service.lock().await;
    assert_eq!(svc.session(), None);
}

#[tokio::test]
async fn test_ticket_lasts_24_hours() {
    let service = PasscodeService::new(race_free_config(), None);
    let mut svc = service.lock().await;

    let before = core::current_unix_millis();
    let code = svc.current_code().code;
    let ticket = svc.sign_in("alice", &code).unwrap();
    let ttl = ticket.expires_at - before;
    assert!(ttl >= SESSION_TTL_MS && ttl < SESSION_TTL_MS + 1_000);
}

#[tokio::test]
async fn test_display_code_matches_verifier() {
    let service = PasscodeService::new(race_free_config(), None);
    let svc = service.lock().await;

    // The code shown on the page is the one the form accepts.
    let shown = svc.current_code();
    assert_eq!(shown.code.len(), 6);
    assert!(core::verify(svc.config(), &shown.code));
}
