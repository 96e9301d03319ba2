//! HTTP API server

use axum::{
    response::Redirect,
    routing::{any, get, MethodRouter},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::database::DatabaseActor;

pub mod doc;
pub mod handlers;
pub mod response;
pub mod state;

pub use response::{ApiError, ConversationView, Detail, Envelope, UserView};
pub use state::AppState;

/// Normalise a mount prefix to `""` or `/segment[/segment...]`
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Temporary redirect that keeps the request method, used for paths
/// missing their trailing slash
fn redirect_to(target: String) -> MethodRouter<AppState> {
    any(move || {
        let target = target.clone();
        async move { Redirect::temporary(&target) }
    })
}

/// Build the API router mounted under `prefix`
///
/// The OpenAPI document is served at `<prefix>/openapi.json`.
pub fn create_router(state: AppState, prefix: &str) -> Router {
    let base = normalize_prefix(prefix);
    let api_doc = Arc::new(doc::api_doc(&base));

    let mut router = Router::new()
        .route(&format!("{}/", base), get(handlers::health))
        .route(
            &format!("{}/users/", base),
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            &format!("{}/conversations/", base),
            get(handlers::list_conversations).post(handlers::create_conversation),
        )
        .route(
            &format!("{}/users", base),
            redirect_to(format!("{}/users/", base)),
        )
        .route(
            &format!("{}/conversations", base),
            redirect_to(format!("{}/conversations/", base)),
        )
        .route(
            &format!("{}/openapi.json", base),
            get(move || {
                let api_doc = api_doc.clone();
                async move { Json(api_doc.as_ref().clone()) }
            }),
        );

    // health also answers without the trailing slash
    if !base.is_empty() {
        router = router.route(&base, get(handlers::health));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Convenience helper when the caller already holds a database actor
pub fn create_database_router(db: Arc<dyn DatabaseActor>, prefix: &str) -> Router {
    create_router(AppState::new(db), prefix)
}
