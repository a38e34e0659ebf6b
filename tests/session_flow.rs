mod common;

use common::{build_state, logged_in_state, mint_token};
use mockito::{Matcher, Server};
use phishguard::client::ApiError;
use phishguard::config::StoreConfig;
use phishguard::models::Session;
use phishguard::navigation::{GuardDecision, Route};
use phishguard::store::file_store::FileStoreConfig;
use phishguard::store::{create_store, TokenStore};
use phishguard::views::email_checker::{self, AnalysisInput};
use phishguard::views::login::{self, LoginForm};
use phishguard::views::{history, profile, ViewError};
use serde_json::json;

#[tokio::test]
async fn test_login_lands_on_dashboard() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/token/")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access": "a1", "refresh": "r1"}"#)
        .create_async()
        .await;

    let state = build_state(server.url());
    let navigation = login::submit(
        &state,
        &LoginForm {
            email: "alice@example.org".to_string(),
            password: "hunter2".to_string(),
        },
    )
    .await
    .unwrap();
    m.assert_async().await;

    assert_eq!(navigation.route, Route::Dashboard);
    assert_eq!(
        state.session.current().await.unwrap(),
        Session::new("a1", "r1")
    );
}

#[tokio::test]
async fn test_login_reply_without_access_token_fails() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/token/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let state = build_state(server.url());
    let mut events = state.session.subscribe();
    let err = login::submit(
        &state,
        &LoginForm {
            email: "alice@example.org".to_string(),
            password: "hunter2".to_string(),
        },
    )
    .await
    .unwrap_err();
    m.assert_async().await;

    assert!(matches!(
        err,
        ViewError::Request {
            source: ApiError::Decode(_),
            ..
        }
    ));
    assert!(state.session.current().await.unwrap().is_empty());
    assert!(events.try_recv().is_err());
    assert_ne!(state.navigator.current_route(), Route::Dashboard);
}

#[tokio::test]
async fn test_wrong_password_is_not_a_session_expiry() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/token/")
        .with_status(401)
        .with_body(r#"{"detail": "No active account found with the given credentials"}"#)
        .create_async()
        .await;

    let state = build_state(server.url());
    let err = login::submit(
        &state,
        &LoginForm {
            email: "alice@example.org".to_string(),
            password: "wrong".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "No active account found with the given credentials"
    );
    assert_eq!(state.navigator.current_route(), Route::Login);
}

#[tokio::test]
async fn test_bearer_matches_stored_token() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/dashboard/stats/")
        .match_header("authorization", "Bearer a1")
        .with_status(200)
        .with_body(r#"{"totalEmails": 3, "phishingDetected": 1, "safeEmails": 2, "accuracy": 90.0}"#)
        .create_async()
        .await;

    let state = logged_in_state(server.url(), Session::new("a1", "r1")).await;
    let stats = phishguard::views::dashboard::load(&state).await.unwrap();
    m.assert_async().await;
    assert_eq!(stats.total_emails, 3);
    assert_eq!(state.navigator.current_route(), Route::Dashboard);
}

#[tokio::test]
async fn test_unauthorized_anywhere_returns_to_login() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/email/history/")
        .with_status(401)
        .with_body(r#"{"detail": "Token is invalid or expired"}"#)
        .create_async()
        .await;

    let state = logged_in_state(server.url(), Session::new("stale", "r1")).await;
    let err = history::load(&state).await.unwrap_err();
    m.assert_async().await;

    assert!(matches!(err, ViewError::SessionExpired));
    assert!(state.session.current().await.unwrap().is_empty());
    assert_eq!(state.navigator.current_route(), Route::Login);
    assert_eq!(state.navigator.reloads(), 1);

    // Nothing protected renders afterwards.
    assert!(matches!(
        history::load(&state).await,
        Err(ViewError::Redirected(Route::Login))
    ));
}

#[tokio::test]
async fn test_empty_analysis_makes_no_call() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/email/analyze/")
        .expect(0)
        .create_async()
        .await;

    let state = logged_in_state(server.url(), Session::new("a1", "r1")).await;
    let err = email_checker::analyze(&state, AnalysisInput::default())
        .await
        .unwrap_err();
    m.assert_async().await;
    assert!(err.is_validation());
    assert!(state.session.is_authenticated().await);
}

#[tokio::test]
async fn test_analysis_error_message_from_backend() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/email/analyze/")
        .with_status(500)
        .with_body(r#"{"error": "model unavailable"}"#)
        .create_async()
        .await;

    let state = logged_in_state(server.url(), Session::new("a1", "r1")).await;
    let err = email_checker::analyze(
        &state,
        AnalysisInput {
            text: Some("Click here to claim".to_string()),
            file: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "model unavailable");
    assert_eq!(state.navigator.current_route(), Route::EmailChecker);
}

#[tokio::test]
async fn test_guard_needs_a_token() {
    let state = build_state("http://127.0.0.1:9".to_string());
    let guard = state.navigator.guard();
    for route in Route::MENU {
        assert_eq!(guard.check(route).await, GuardDecision::Redirect(Route::Login));
    }

    state
        .session
        .establish(Session::new("a1", "r1"))
        .await
        .unwrap();
    for route in Route::MENU {
        assert_eq!(guard.check(route).await, GuardDecision::Render(route));
    }
}

#[tokio::test]
async fn test_protected_view_without_session_sends_nothing() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let state = build_state(server.url());
    assert!(matches!(
        phishguard::views::dashboard::load(&state).await,
        Err(ViewError::Redirected(Route::Login))
    ));
    m.assert_async().await;
}

#[tokio::test]
async fn test_logout_clears_both_tokens() {
    let state = logged_in_state("http://127.0.0.1:9".to_string(), Session::new("a1", "r1")).await;
    state.navigator.navigate(Route::Profile).await;

    let route = login::logout(&state).await.unwrap();
    assert_eq!(route, Route::Login);
    assert!(state.session.current().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_is_prefilled_from_token() {
    let token = mint_token(json!({"email": "alice@example.org", "user_id": 7}));
    let state = logged_in_state("http://127.0.0.1:9".to_string(), Session::new(token, "r1")).await;
    let form = profile::show(&state).await.unwrap();
    assert_eq!(form.email, "alice@example.org");
}

#[tokio::test]
async fn test_file_store_survives_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = StoreConfig::File(FileStoreConfig {
        path: dir.path().join("session.json"),
    });

    let first = create_store(&config);
    first.set(&Session::new("a1", "r1")).await.unwrap();

    let second = create_store(&config);
    assert_eq!(second.get().await.unwrap(), Session::new("a1", "r1"));

    second.clear().await.unwrap();
    assert!(first.get().await.unwrap().is_empty());
}
