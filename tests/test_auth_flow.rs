mod helpers;

use drift::bootstrap;
use drift::config::Config;
use drift::domain::entities::{SignInRequest, SignUpRequest, UserRole};
use drift::domain::ports::session_repository::SessionRepository;
use drift::domain::ports::user_repository::UserRepository;
use drift::infrastructure::http::middleware::{ApiError, AppState};
use helpers::*;
use std::sync::Arc;
use tokio_test::assert_ok;

fn app_state(test_db: &TestDb, config: &Config) -> AppState {
    bootstrap::build_app_state_with_clock(test_db.db().clone(), config, Arc::new(FixedClock(NOW)))
}

fn signup_request(username: &str, password: &str, passcode: Option<&str>) -> SignUpRequest {
    SignUpRequest {
        username: username.to_string(),
        password: password.to_string(),
        passcode: passcode.map(str::to_string),
    }
}

fn signin_request(username: &str, password: &str) -> SignInRequest {
    SignInRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_first_user_becomes_admin() {
    let test_db = setup_test_db().await;
    let state = app_state(&test_db, &test_config());

    let first = assert_ok!(
        state
            .auth_service
            .signup(&signup_request("alice", TEST_PASSWORD, None))
            .await
    );
    let second = assert_ok!(
        state
            .auth_service
            .signup(&signup_request("bob", TEST_PASSWORD, None))
            .await
    );

    assert_eq!(first.role, UserRole::Admin);
    assert_eq!(second.role, UserRole::User);
    assert_ne!(first.password_hash, TEST_PASSWORD);

    test_db.teardown().await;
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let test_db = setup_test_db().await;
    let state = app_state(&test_db, &test_config());

    state
        .auth_service
        .signup(&signup_request("alice", TEST_PASSWORD, None))
        .await
        .unwrap();

    let result = state
        .auth_service
        .signup(&signup_request("alice", "another-password", None))
        .await;
    assert!(matches!(result, Err(ApiError::Conflict(_))));

    test_db.teardown().await;
}

#[tokio::test]
async fn test_signup_validation() {
    let test_db = setup_test_db().await;
    let state = app_state(&test_db, &test_config());

    for request in [
        signup_request("", TEST_PASSWORD, None),
        signup_request("white space", TEST_PASSWORD, None),
        signup_request("alice", "short", None),
    ] {
        let result = state.auth_service.signup(&request).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    test_db.teardown().await;
}

#[tokio::test]
async fn test_signup_requires_configured_passcode() {
    let test_db = setup_test_db().await;
    let config = Config {
        registration_password: Some("let-me-in".to_string()),
        ..test_config()
    };
    let state = app_state(&test_db, &config);

    assert!(state.auth_service.requires_passcode());

    let missing = state
        .auth_service
        .signup(&signup_request("alice", TEST_PASSWORD, None))
        .await;
    assert!(matches!(missing, Err(ApiError::Forbidden(_))));

    let wrong = state
        .auth_service
        .signup(&signup_request("alice", TEST_PASSWORD, Some("guess")))
        .await;
    assert!(matches!(wrong, Err(ApiError::Forbidden(_))));

    assert_ok!(
        state
            .auth_service
            .signup(&signup_request("alice", TEST_PASSWORD, Some("let-me-in")))
            .await
    );

    test_db.teardown().await;
}

#[tokio::test]
async fn test_signin_failures_are_indistinguishable() {
    let test_db = setup_test_db().await;
    let state = app_state(&test_db, &test_config());
    create_test_user(test_db.db(), "alice").await;

    let wrong_password = state
        .auth_service
        .signin(&signin_request("alice", "not-the-password"))
        .await;
    let unknown_user = state
        .auth_service
        .signin(&signin_request("mallory", TEST_PASSWORD))
        .await;

    assert!(matches!(wrong_password, Err(ApiError::Unauthorized)));
    assert!(matches!(unknown_user, Err(ApiError::Unauthorized)));

    test_db.teardown().await;
}

#[tokio::test]
async fn test_signin_and_signout_round_trip() {
    let test_db = setup_test_db().await;
    let state = app_state(&test_db, &test_config());
    let alice = create_test_user(test_db.db(), "alice").await;

    let (user, session) = assert_ok!(
        state
            .auth_service
            .signin(&signin_request("alice", TEST_PASSWORD))
            .await
    );
    assert_eq!(user.id, alice.id);
    assert_eq!(session.user_id, alice.id);
    assert_eq!(session.created_at, "2024-06-01T12:00:00Z");
    assert_eq!(session.expires_at, "2024-07-01T12:00:00Z");

    let stored = test_db.db().get_session_by_token(&session.token).await.unwrap();
    assert!(stored.is_some());

    assert_ok!(state.auth_service.signout(Some(&session.token)).await);
    let stored = test_db.db().get_session_by_token(&session.token).await.unwrap();
    assert!(stored.is_none());

    // Signing out without a session is not an error
    assert_ok!(state.auth_service.signout(None).await);

    test_db.teardown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_signups_create_one_admin() {
    let test_db = setup_test_db().await;
    let state = app_state(&test_db, &test_config());

    let handles: Vec<_> = ["alice", "bob", "carol", "dave"]
        .into_iter()
        .map(|username| {
            let auth_service = state.auth_service.clone();
            tokio::spawn(async move {
                auth_service
                    .signup(&signup_request(username, TEST_PASSWORD, None))
                    .await
            })
        })
        .collect();

    let mut users = Vec::new();
    for handle in handles {
        users.push(handle.await.unwrap().unwrap());
    }

    let admins = users.iter().filter(|u| u.role == UserRole::Admin).count();
    assert_eq!(admins, 1);

    // Returned roles match what was stored
    for user in &users {
        let stored = test_db.db().get_user_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.role, user.role);
    }

    test_db.teardown().await;
}
