//! Mock backend routes
//!
//! Same REST surface as the hosted backend: `/auth/*` for accounts,
//! `/store/*` for documents. Auth failures answer 400 with the vocabulary
//! word in the envelope `code`; store routes require a bearer token.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crts_client::{ClientError, Document, DocumentStore};
use shared::auth::{Credentials, TokenGrant};
use shared::response::ApiResponse;
use shared::validation::{MIN_PASSWORD_LEN, looks_like_email};

use crate::state::{AccountRecord, AppState, MAX_FAILED_ATTEMPTS};

type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

fn ok<T>(data: T) -> Reply<T> {
    (StatusCode::OK, Json(ApiResponse::ok(data)))
}

fn fail<T>(status: StatusCode, code: &str, message: &str) -> Reply<T> {
    (status, Json(ApiResponse::error(code, message)))
}

fn new_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

// ========== Account routes ==========

async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Reply<TokenGrant> {
    if !looks_like_email(&credentials.email) {
        return fail(StatusCode::BAD_REQUEST, "INVALID_EMAIL", "Malformed email");
    }
    if credentials.password.len() < MIN_PASSWORD_LEN {
        return fail(StatusCode::BAD_REQUEST, "WEAK_PASSWORD", "Password too short");
    }
    if state.accounts.contains_key(&credentials.email) {
        return fail(StatusCode::BAD_REQUEST, "EMAIL_EXISTS", "Email already registered");
    }

    let uid = uuid::Uuid::new_v4().simple().to_string();
    state.accounts.insert(
        credentials.email.clone(),
        AccountRecord {
            uid: uid.clone(),
            password: credentials.password,
            disabled: false,
            failed_attempts: 0,
        },
    );

    let token = new_token();
    state.tokens.insert(token.clone(), uid.clone());
    tracing::info!(email = %credentials.email, "Account created");
    ok(TokenGrant { uid, token })
}

async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Reply<TokenGrant> {
    let Some(mut account) = state.accounts.get_mut(&credentials.email) else {
        return fail(StatusCode::BAD_REQUEST, "NOT_FOUND", "No such account");
    };

    if account.disabled {
        return fail(StatusCode::BAD_REQUEST, "DISABLED", "Account disabled");
    }
    if account.failed_attempts >= MAX_FAILED_ATTEMPTS {
        return fail(StatusCode::BAD_REQUEST, "TOO_MANY_ATTEMPTS", "Account locked");
    }
    if account.password != credentials.password {
        account.failed_attempts += 1;
        return fail(StatusCode::BAD_REQUEST, "WRONG_PASSWORD", "Wrong password");
    }

    account.failed_attempts = 0;
    let token = new_token();
    state.tokens.insert(token.clone(), account.uid.clone());
    ok(TokenGrant {
        uid: account.uid.clone(),
        token,
    })
}

// ========== Store routes ==========

fn authorize<T>(state: &AppState, headers: &HeaderMap) -> Result<(), Reply<T>> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    let Some(token) = value.strip_prefix("Bearer ") else {
        return Err(fail(
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "Missing bearer token",
        ));
    };
    if !state.tokens.contains_key(token) {
        return Err(fail(
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "Unknown token",
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct OrderParams {
    #[serde(default = "default_order_by")]
    order_by: String,
    #[serde(default)]
    desc: bool,
}

fn default_order_by() -> String {
    "created_at".to_string()
}

#[derive(Debug, Serialize)]
struct AddedId {
    id: String,
}

fn internal<T>(e: ClientError) -> Reply<T> {
    fail(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", &e.to_string())
}

async fn add_document(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(data): Json<Value>,
) -> Reply<AddedId> {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    match state.store.add(&collection, data).await {
        Ok(id) => ok(AddedId { id }),
        Err(e) => internal(e),
    }
}

async fn query_collection(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<OrderParams>,
    headers: HeaderMap,
) -> Reply<Vec<Document>> {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    match state
        .store
        .query_all(&collection, &params.order_by, params.desc)
        .await
    {
        Ok(documents) => ok(documents),
        Err(e) => internal(e),
    }
}

async fn get_document(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply<Document> {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    match state.store.get(&collection, &id).await {
        Ok(Some(document)) => ok(document),
        Ok(None) => fail(StatusCode::NOT_FOUND, "NOT_FOUND", "No such document"),
        Err(e) => internal(e),
    }
}

async fn put_document(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(data): Json<Value>,
) -> Reply<()> {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    match state.store.put(&collection, &id, data).await {
        Ok(()) => ok(()),
        Err(e) => internal(e),
    }
}

async fn patch_document(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(data): Json<Value>,
) -> Reply<()> {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    match state.store.update(&collection, &id, data).await {
        Ok(()) => ok(()),
        Err(ClientError::NotFound(path)) => fail(StatusCode::NOT_FOUND, "NOT_FOUND", &path),
        Err(e) => internal(e),
    }
}

async fn add_child(
    State(state): State<Arc<AppState>>,
    Path((collection, id, child)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(data): Json<Value>,
) -> Reply<AddedId> {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    match state.store.add_child(&collection, &id, &child, data).await {
        Ok(id) => ok(AddedId { id }),
        Err(e) => internal(e),
    }
}

async fn query_children(
    State(state): State<Arc<AppState>>,
    Path((collection, id, child)): Path<(String, String, String)>,
    Query(params): Query<OrderParams>,
    headers: HeaderMap,
) -> Reply<Vec<Document>> {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    match state
        .store
        .query_children(&collection, &id, &child, &params.order_by, params.desc)
        .await
    {
        Ok(documents) => ok(documents),
        Err(e) => internal(e),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    use tower::limit::ConcurrencyLimitLayer;
    use tower_http::trace::TraceLayer;

    let concurrency_limit = ConcurrencyLimitLayer::new(100);

    Router::new()
        .route("/auth/sign_up", post(sign_up))
        .route("/auth/sign_in", post(sign_in))
        .route(
            "/store/{collection}",
            post(add_document).get(query_collection),
        )
        .route(
            "/store/{collection}/{id}",
            get(get_document).put(put_document).patch(patch_document),
        )
        .route(
            "/store/{collection}/{id}/{child}",
            post(add_child).get(query_children),
        )
        .layer(TraceLayer::new_for_http())
        .layer(concurrency_limit)
        .with_state(state)
}
