mod helpers;

use drift::application::services::ApiTokenService;
use drift::bootstrap;
use drift::domain::entities::{CreateApiTokenRequest, Session};
use drift::domain::ports::session_repository::SessionRepository;
use drift::domain::ports::token_store::TokenStore;
use drift::infrastructure::http::middleware::ApiError;
use drift::infrastructure::workers::{ExpirySweeper, SweepReport};
use helpers::*;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn token_service(test_db: &TestDb, clock: FixedClock) -> ApiTokenService {
    ApiTokenService::new(Arc::new(test_db.db().clone()), Arc::new(clock))
}

fn create_request(name: &str, expires_in_days: Option<i64>) -> CreateApiTokenRequest {
    CreateApiTokenRequest {
        name: name.to_string(),
        expires_in_days,
    }
}

#[tokio::test]
async fn test_issue_token_is_usable_for_lookup() {
    let test_db = setup_test_db().await;
    let service = token_service(&test_db, FixedClock(NOW));
    let alice = create_test_user(test_db.db(), "alice").await;

    let issued = assert_ok!(
        service
            .issue_token(&alice.id, &create_request("  laptop  ", Some(30)))
            .await
    );

    assert_eq!(issued.name, "laptop");
    assert_eq!(issued.token.len(), 64);
    assert_eq!(issued.created_at, "2024-06-01T12:00:00Z");
    assert_eq!(issued.expires_at.as_deref(), Some("2024-07-01T12:00:00Z"));

    let record = test_db
        .db()
        .find_token(&issued.token)
        .await
        .unwrap()
        .expect("Issued token should be stored");
    assert_eq!(record.user_id, alice.id);
    assert_eq!(record.expires_at, issued.expires_at);

    test_db.teardown().await;
}

#[tokio::test]
async fn test_list_tokens_redacts_and_orders_newest_first() {
    let test_db = setup_test_db().await;
    let alice = create_test_user(test_db.db(), "alice").await;
    let bob = create_test_user(test_db.db(), "bob").await;

    let earlier = token_service(&test_db, FixedClock(NOW - time::Duration::days(1)));
    let later = token_service(&test_db, FixedClock(NOW));

    let first = earlier
        .issue_token(&alice.id, &create_request("first", None))
        .await
        .unwrap();
    let second = later
        .issue_token(&alice.id, &create_request("second", None))
        .await
        .unwrap();
    later
        .issue_token(&bob.id, &create_request("bob's", None))
        .await
        .unwrap();

    let listed = later.list_tokens(&alice.id).await.unwrap();
    let names: Vec<&str> = listed.tokens.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["second", "first"]);

    assert_eq!(listed.tokens[0].token_hint, &second.token[60..]);
    assert_eq!(listed.tokens[1].token_hint, &first.token[60..]);
    assert!(listed.tokens[1].expires_at.is_none());

    // The full token never appears in the listing
    let json = serde_json::to_string(&listed).unwrap();
    assert!(!json.contains(&first.token));
    assert!(!json.contains(&second.token));

    test_db.teardown().await;
}

#[tokio::test]
async fn test_revoke_token_only_for_owner() {
    let test_db = setup_test_db().await;
    let service = token_service(&test_db, FixedClock(NOW));
    let alice = create_test_user(test_db.db(), "alice").await;
    let bob = create_test_user(test_db.db(), "bob").await;

    let issued = service
        .issue_token(&alice.id, &create_request("ci", None))
        .await
        .unwrap();

    // Another user cannot revoke it
    let result = service.revoke_token(&bob.id, &issued.id).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
    assert!(test_db.db().find_token(&issued.token).await.unwrap().is_some());

    assert_ok!(service.revoke_token(&alice.id, &issued.id).await);
    assert!(test_db.db().find_token(&issued.token).await.unwrap().is_none());

    // Revoking twice is a not-found
    let result = service.revoke_token(&alice.id, &issued.id).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));

    test_db.teardown().await;
}

#[tokio::test]
async fn test_issue_token_validation() {
    let test_db = setup_test_db().await;
    let service = token_service(&test_db, FixedClock(NOW));
    let alice = create_test_user(test_db.db(), "alice").await;

    for request in [
        create_request("", None),
        create_request("   ", None),
        create_request(&"n".repeat(101), None),
        create_request("ok", Some(0)),
        create_request("ok", Some(-5)),
        create_request("ok", Some(3651)),
    ] {
        let result = service.issue_token(&alice.id, &request).await;
        assert!(
            matches!(result, Err(ApiError::BadRequest(_))),
            "request {:?} should be rejected",
            request
        );
    }

    assert_ok!(
        service
            .issue_token(&alice.id, &create_request(&"n".repeat(100), Some(3650)))
            .await
    );

    let listed = service.list_tokens(&alice.id).await.unwrap();
    assert_eq!(listed.tokens.len(), 1);

    test_db.teardown().await;
}

#[tokio::test]
async fn test_sweeper_removes_expired_tokens_and_sessions() {
    let test_db = setup_test_db().await;
    let state = bootstrap::build_app_state_with_clock(
        test_db.db().clone(),
        &test_config(),
        Arc::new(FixedClock(NOW)),
    );
    let alice = create_test_user(test_db.db(), "alice").await;

    // Issued 10 days ago with a 1 day lifetime
    let old_issuer = token_service(&test_db, FixedClock(NOW - time::Duration::days(10)));
    let expired = old_issuer
        .issue_token(&alice.id, &create_request("old", Some(1)))
        .await
        .unwrap();
    let permanent = old_issuer
        .issue_token(&alice.id, &create_request("forever", None))
        .await
        .unwrap();
    let current = state
        .api_token_service
        .issue_token(&alice.id, &create_request("fresh", Some(1)))
        .await
        .unwrap();

    let stale = Session::new(
        alice.id.clone(),
        "stale-session".to_string(),
        1,
        NOW - time::Duration::hours(5),
    )
    .unwrap();
    test_db.db().create_session(&stale).await.unwrap();
    let live = state.session_service.start_session(&alice.id).await.unwrap();

    let sweeper = ExpirySweeper::new(
        state.session_service.clone(),
        state.api_token_service.clone(),
        Arc::new(FixedClock(NOW)),
        Duration::from_secs(60),
    );

    let report = sweeper.sweep_once().await;
    assert_eq!(
        report,
        SweepReport {
            sessions: 1,
            tokens: 1
        }
    );

    let db = test_db.db();
    assert!(db.find_token(&expired.token).await.unwrap().is_none());
    assert!(db.find_token(&permanent.token).await.unwrap().is_some());
    assert!(db.find_token(&current.token).await.unwrap().is_some());
    assert!(db.get_session_by_token("stale-session").await.unwrap().is_none());
    assert!(db.get_session_by_token(&live.token).await.unwrap().is_some());

    // Nothing left to remove
    assert_eq!(sweeper.sweep_once().await, SweepReport::default());

    // Unknown ids are still a not-found after the sweep
    assert_err!(state.api_token_service.revoke_token(&alice.id, &expired.id).await);

    test_db.teardown().await;
}
