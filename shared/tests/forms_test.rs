//! Login and registration submission against the mock backend.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{DashboardMode, MockBackend, PASSWORD, USERNAME};
use shared::{AuthForms, DashboardError, LoginForm, RegisterForm, Route};

fn register_form(username: &str, password: &str, confirm: &str) -> RegisterForm {
    RegisterForm {
        username: username.to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
    }
}

fn login_form(username: &str, password: &str) -> LoginForm {
    LoginForm {
        username: username.to_string(),
        password: password.to_string(),
        remember: false,
    }
}

fn failure_message(err: DashboardError) -> String {
    match err {
        DashboardError::RequestFailed(msg) | DashboardError::ValidationFailed(msg) => msg,
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_register_never_reaches_backend() {
    let backend = MockBackend::start(DashboardMode::RequireSession).await;
    let forms = AuthForms::new(backend.client());

    let err = forms
        .submit_register(&register_form("alice", "secret1", "secret2"))
        .await
        .unwrap_err();
    assert_eq!(failure_message(err), "Passwords do not match");

    let err = forms
        .submit_register(&register_form("alice", "12345", "12345"))
        .await
        .unwrap_err();
    assert_eq!(failure_message(err), "Password must be at least 6 characters");

    assert_eq!(backend.state.register_hits(), 0);
    assert!(!forms.is_pending());
}

#[tokio::test]
async fn test_register_success_navigates_to_login() {
    let backend = MockBackend::start(DashboardMode::RequireSession).await;
    let forms = AuthForms::new(backend.client());

    let next = forms
        .submit_register(&register_form("bob", "hunter22", "hunter22"))
        .await
        .unwrap();
    assert_eq!(next, Route::Login);
    assert_eq!(backend.state.register_hits(), 1);
}

#[tokio::test]
async fn test_register_shows_server_message() {
    let backend = MockBackend::start(DashboardMode::RequireSession).await;
    let forms = AuthForms::new(backend.client());

    let err = forms
        .submit_register(&register_form("taken", "secret1", "secret1"))
        .await
        .unwrap_err();
    assert_eq!(failure_message(err), "Username already exists");
    assert!(!forms.is_pending());
}

#[tokio::test]
async fn test_register_falls_back_to_generic_message() {
    let backend = MockBackend::start(DashboardMode::RequireSession).await;
    let forms = AuthForms::new(backend.client());

    let err = forms
        .submit_register(&register_form("broken", "secret1", "secret1"))
        .await
        .unwrap_err();
    assert_eq!(failure_message(err), "Registration failed");
}

#[tokio::test]
async fn test_login_establishes_session() {
    let backend = MockBackend::start(DashboardMode::RequireSession).await;
    let client = backend.client();
    let forms = AuthForms::new(client.clone());

    assert!(client.fetch_snapshot().await.unwrap_err().is_auth_required());

    let next = forms.submit_login(&login_form(USERNAME, PASSWORD)).await.unwrap();
    assert_eq!(next, Route::Dashboard);

    client.check_session().await.unwrap();
    let snapshot = client.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.buy_signals.len(), 2);
    assert_eq!(snapshot.open_positions[0].profit_pct, Some(2.0));
}

#[tokio::test]
async fn test_bad_login_shows_server_message() {
    let backend = MockBackend::start(DashboardMode::RequireSession).await;
    let client = backend.client();
    let forms = AuthForms::new(client.clone());

    let err = forms
        .submit_login(&login_form(USERNAME, "wrong-password"))
        .await
        .unwrap_err();
    assert_eq!(failure_message(err), "Invalid username or password");
    assert!(client.check_session().await.unwrap_err().is_auth_required());
}

#[tokio::test]
async fn test_second_submit_rejected_while_pending() {
    let backend = MockBackend::start(DashboardMode::RequireSession).await;
    backend.state.set_login_delay(Duration::from_millis(200));
    let forms = Arc::new(AuthForms::new(backend.client()));
    let form = login_form(USERNAME, PASSWORD);

    let first = {
        let forms = forms.clone();
        let form = form.clone();
        tokio::spawn(async move { forms.submit_login(&form).await })
    };

    // Wait for the first submission to take the slot.
    tokio::time::timeout(Duration::from_secs(5), async {
        while !forms.is_pending() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("first submission never started");

    let second = forms.submit_login(&form).await;
    assert!(matches!(second, Err(DashboardError::SubmissionInFlight)));

    assert_eq!(first.await.unwrap().unwrap(), Route::Dashboard);
    assert_eq!(backend.state.login_hits(), 1);
    assert!(!forms.is_pending());

    // The slot is free again once the first one settles.
    assert_eq!(forms.submit_login(&form).await.unwrap(), Route::Dashboard);
    assert_eq!(backend.state.login_hits(), 2);
}

#[tokio::test]
async fn test_ok_status_with_unsuccessful_body_is_a_failure() {
    let backend = MockBackend::start(DashboardMode::RequireSession).await;
    let forms = AuthForms::new(backend.client());

    let err = forms
        .submit_register(&register_form("closed", "secret1", "secret1"))
        .await
        .unwrap_err();
    assert_eq!(failure_message(err), "Registration is closed");
    assert_eq!(backend.state.register_hits(), 1);
}
