//! Integration tests running the client against the in-process mock backend.

use std::sync::Arc;

use serde_json::json;

use crts_backend_mock::{AppState, MAX_FAILED_ATTEMPTS, ServerHandle};
use crts_client::{
    AccountClient, AuthCode, ClientConfig, ClientError, DocumentStore, HttpClient, RestStore,
};

async fn start_backend() -> (Arc<AppState>, ServerHandle) {
    let state = Arc::new(AppState::new());
    let handle = crts_backend_mock::serve(state.clone())
        .await
        .expect("mock backend should bind");
    (state, handle)
}

fn config_for(handle: &ServerHandle) -> ClientConfig {
    ClientConfig::new(handle.base_url()).with_timeout(5)
}

#[tokio::test]
async fn sign_up_then_sign_in_round_trips() {
    let (_state, handle) = start_backend().await;
    let accounts = AccountClient::new(&config_for(&handle));

    let created = accounts.sign_up("ana@example.com", "hunter22").await.unwrap();
    assert!(!created.uid.is_empty());
    assert!(!created.token.is_empty());

    let grant = accounts.sign_in("ana@example.com", "hunter22").await.unwrap();
    assert_eq!(grant.uid, created.uid);
}

#[tokio::test]
async fn sign_up_rejects_bad_requests_with_vocabulary() {
    let (_state, handle) = start_backend().await;
    let accounts = AccountClient::new(&config_for(&handle));

    let err = accounts.sign_up("not-an-email", "hunter22").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(AuthCode::InvalidEmail)));

    let err = accounts.sign_up("bob@example.com", "abc").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(AuthCode::WeakPassword)));

    accounts.sign_up("bob@example.com", "hunter22").await.unwrap();
    let err = accounts.sign_up("bob@example.com", "hunter22").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(AuthCode::EmailExists)));
}

#[tokio::test]
async fn sign_in_rejects_unknown_wrong_and_disabled() {
    let (state, handle) = start_backend().await;
    let accounts = AccountClient::new(&config_for(&handle));

    let err = accounts.sign_in("ghost@example.com", "whatever").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(AuthCode::NotFound)));

    state.seed_account("carol@example.com", "hunter22", false);
    let err = accounts.sign_in("carol@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(AuthCode::WrongPassword)));

    state.seed_account("dan@example.com", "hunter22", true);
    let err = accounts.sign_in("dan@example.com", "hunter22").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(AuthCode::Disabled)));
}

#[tokio::test]
async fn repeated_failures_lock_the_account() {
    let (state, handle) = start_backend().await;
    let accounts = AccountClient::new(&config_for(&handle));
    state.seed_account("eve@example.com", "hunter22", false);

    for _ in 0..MAX_FAILED_ATTEMPTS {
        let err = accounts.sign_in("eve@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthCode::WrongPassword)));
    }

    // Even the right password is refused once locked.
    let err = accounts.sign_in("eve@example.com", "hunter22").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(AuthCode::TooManyAttempts)));
}

#[tokio::test]
async fn auth_errors_surface_friendly_messages() {
    let (_state, handle) = start_backend().await;
    let accounts = AccountClient::new(&config_for(&handle));

    let err = accounts.sign_in("ghost@example.com", "whatever").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "No account found with this email. Please sign up."
    );
}

#[tokio::test]
async fn store_requires_a_bearer_token() {
    let (_state, handle) = start_backend().await;
    let store = RestStore::new(&config_for(&handle));

    let err = store.get("complaints", "c1").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn store_can_share_an_existing_http_client() {
    let (_state, handle) = start_backend().await;
    let config = config_for(&handle);
    let accounts = AccountClient::new(&config);
    let grant = accounts
        .sign_up("pool@example.com", "hunter22")
        .await
        .expect("sign_up should succeed");

    // One connection pool serves both the account calls and the store.
    let store = RestStore::with_http(HttpClient::new(&config).with_token(grant.token));
    let id = store
        .add("complaints", json!({"title": "Shared pool", "created_at": "2025-04-01 08:00:00"}))
        .await
        .unwrap();
    let doc = store.get("complaints", &id).await.unwrap().unwrap();
    assert_eq!(doc.data["title"], "Shared pool");
}

async fn signed_in_store(handle: &ServerHandle) -> RestStore {
    let config = config_for(handle);
    let accounts = AccountClient::new(&config);
    let grant = accounts
        .sign_up("worker@example.com", "hunter22")
        .await
        .expect("sign_up should succeed");
    RestStore::new(&config.with_token(grant.token))
}

#[tokio::test]
async fn documents_round_trip_over_rest() {
    let (_state, handle) = start_backend().await;
    let store = signed_in_store(&handle).await;

    store
        .put("users", "u1", json!({"name": "Ana", "role": "staff"}))
        .await
        .unwrap();
    let doc = store.get("users", "u1").await.unwrap().unwrap();
    assert_eq!(doc.data["name"], "Ana");

    store.update("users", "u1", json!({"role": "admin"})).await.unwrap();
    let doc = store.get("users", "u1").await.unwrap().unwrap();
    assert_eq!(doc.data["role"], "admin");
    assert_eq!(doc.data["name"], "Ana");
}

#[tokio::test]
async fn absent_documents_answer_none_and_not_found() {
    let (_state, handle) = start_backend().await;
    let store = signed_in_store(&handle).await;

    assert!(store.get("users", "missing").await.unwrap().is_none());

    let err = store
        .update("users", "missing", json!({"role": "admin"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn queries_order_documents_by_field() {
    let (_state, handle) = start_backend().await;
    let store = signed_in_store(&handle).await;

    store
        .add("complaints", json!({"title": "second", "created_at": "2025-03-02 10:00:00"}))
        .await
        .unwrap();
    store
        .add("complaints", json!({"title": "first", "created_at": "2025-03-01 10:00:00"}))
        .await
        .unwrap();

    let newest_first = store.query_all("complaints", "created_at", true).await.unwrap();
    assert_eq!(newest_first.len(), 2);
    assert_eq!(newest_first[0].data["title"], "second");
    assert_eq!(newest_first[1].data["title"], "first");
}

#[tokio::test]
async fn children_round_trip_over_rest() {
    let (_state, handle) = start_backend().await;
    let store = signed_in_store(&handle).await;

    let id = store
        .add("complaints", json!({"title": "Wifi down", "created_at": "2025-03-01 10:00:00"}))
        .await
        .unwrap();
    store
        .add_child(
            "complaints",
            &id,
            "updates",
            json!({"status": "IN_PROGRESS", "updated_at": "2025-03-01 11:00:00"}),
        )
        .await
        .unwrap();
    store
        .add_child(
            "complaints",
            &id,
            "updates",
            json!({"status": "RESOLVED", "updated_at": "2025-03-02 09:00:00"}),
        )
        .await
        .unwrap();

    let newest_first = store
        .query_children("complaints", &id, "updates", "updated_at", true)
        .await
        .unwrap();
    assert_eq!(newest_first.len(), 2);
    assert_eq!(newest_first[0].data["status"], "RESOLVED");

    // Another complaint's history stays empty.
    let other = store
        .query_children("complaints", "other", "updates", "updated_at", true)
        .await
        .unwrap();
    assert!(other.is_empty());
}
