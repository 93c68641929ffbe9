mod common;

use common::{client_error, user, FakeBackend};
use curio::error::CurioError;
use curio::session::Session;
use tokio::sync::oneshot;

#[tokio::test]
async fn test_probe_populates_identity() {
    let api = FakeBackend::new();
    api.users.borrow_mut().push_back(Ok(user("alice")));
    let session = Session::new();

    assert_eq!(session.probe(&api).await, Some("alice".to_string()));
    assert_eq!(session.identity_untracked(), Some("alice".to_string()));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_probe_failure_means_anonymous() {
    let api = FakeBackend::new();
    api.users
        .borrow_mut()
        .push_back(Err(client_error(401, "Not authenticated")));
    let session = Session::new();
    session.set_identity(Some("stale".to_string()));

    assert_eq!(session.probe(&api).await, None);
    assert_eq!(session.identity_untracked(), None);

    // Network failures take the same path
    api.users
        .borrow_mut()
        .push_back(Err(CurioError::Network("offline".to_string())));
    assert_eq!(session.probe(&api).await, None);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_then_probe_sets_identity() {
    let api = FakeBackend::new();
    api.logins.borrow_mut().push_back(Ok(()));
    api.users.borrow_mut().push_back(Ok(user("alice")));
    let session = Session::new();

    let name = session.login(&api, "alice", "secret").await.unwrap();
    assert_eq!(name, "alice");
    assert_eq!(session.identity_untracked(), Some("alice".to_string()));
    assert_eq!(api.calls(), vec!["POST /login alice", "GET /users/me"]);
}

#[tokio::test]
async fn test_failed_login_leaves_identity_absent() {
    let api = FakeBackend::new();
    api.logins
        .borrow_mut()
        .push_back(Err(client_error(401, "Incorrect username or password")));
    let session = Session::new();

    let err = session.login(&api, "alice", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Incorrect username or password");
    assert_eq!(session.identity_untracked(), None);
    // No identity probe after a rejected login
    assert_eq!(api.count("GET /users/me"), 0);
}

#[tokio::test]
async fn test_logout_clears_identity_on_success() {
    let api = FakeBackend::new();
    api.logouts.borrow_mut().push_back(Ok(()));
    let session = Session::new();
    session.set_identity(Some("alice".to_string()));

    session.logout(&api).await.unwrap();
    assert_eq!(session.identity_untracked(), None);
}

#[tokio::test]
async fn test_failed_logout_keeps_identity() {
    let api = FakeBackend::new();
    api.logouts
        .borrow_mut()
        .push_back(Err(CurioError::Network("offline".to_string())));
    let session = Session::new();
    session.set_identity(Some("alice".to_string()));

    let err = session.logout(&api).await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(session.identity_untracked(), Some("alice".to_string()));
}

#[tokio::test]
async fn test_late_startup_probe_does_not_undo_login() {
    let api = FakeBackend::new();
    // The startup probe is answered 401 but held back until after login
    api.users
        .borrow_mut()
        .push_back(Err(client_error(401, "Not authenticated")));
    api.logins.borrow_mut().push_back(Ok(()));
    api.users.borrow_mut().push_back(Ok(user("alice")));
    let (release, gate) = oneshot::channel();
    *api.users_gate.borrow_mut() = Some(gate);
    let session = Session::new();

    let (probed, logged_in) = tokio::join!(session.probe(&api), async {
        let result = session.login(&api, "alice", "secret").await;
        let _ = release.send(());
        result
    });

    assert_eq!(logged_in.unwrap(), "alice");
    assert_eq!(probed, Some("alice".to_string()));
    assert_eq!(session.identity_untracked(), Some("alice".to_string()));
}

#[tokio::test]
async fn test_blank_credentials_issue_no_request() {
    let api = FakeBackend::new();
    let session = Session::new();

    let err = session.login(&api, "  ", "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "Please enter a username and password");
    let err = session.register(&api, "alice", "").await.unwrap_err();
    assert_eq!(err.to_string(), "Please choose a username and password");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_register_success_does_not_sign_in() {
    let api = FakeBackend::new();
    api.registrations.borrow_mut().push_back(Ok(()));
    let session = Session::new();

    session.register(&api, "alice", "secret").await.unwrap();
    assert_eq!(api.calls(), vec!["POST /register alice"]);
    assert_eq!(session.identity_untracked(), None);
}

#[tokio::test]
async fn test_register_surfaces_server_detail() {
    let api = FakeBackend::new();
    api.registrations
        .borrow_mut()
        .push_back(Err(client_error(400, "Username already registered")));
    let session = Session::new();

    let err = session.register(&api, "alice", "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "Username already registered");
    assert!(!session.is_authenticated());
}
