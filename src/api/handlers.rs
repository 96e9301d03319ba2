//! API handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::api::response::{
    ApiError, ConversationView, Detail, Envelope, ErrorDetail, Operation, UserView,
};
use crate::api::AppState;
use crate::types::{RecordId, DEFAULT_PRIVILEGE};

/// Why a handler could not complete
///
/// Both kinds render the same way; they are kept apart for logging.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Database(#[from] crate::Error),
}

impl From<JsonRejection> for HandlerError {
    fn from(rejection: JsonRejection) -> Self {
        HandlerError::InvalidPayload(rejection.body_text())
    }
}

fn fail(operation: Operation, err: HandlerError) -> ApiError {
    match &err {
        HandlerError::InvalidPayload(reason) => {
            tracing::warn!(%operation, %reason, "Rejected request payload");
        }
        HandlerError::Database(source) => {
            tracing::error!(%operation, error = %source, "Database actor failed");
        }
    }
    ApiError::operation_failed(operation, err)
}

/// Health check
#[utoipa::path(
    get,
    path = "/",
    tag = "Default",
    responses((status = 200, description = "Router is mounted", body = Envelope))
)]
pub async fn health() -> Json<Envelope> {
    Json(Envelope::new(Detail::Text("OK".to_string())))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default = "default_privilege")]
    #[schema(default = "user")]
    pub privilege: String,
}

fn default_privilege() -> String {
    DEFAULT_PRIVILEGE.to_string()
}

/// Create a new user
///
/// Expected input: `{"email": "user@example.com", "password": "password", "privilege": "user"}`
#[utoipa::path(
    post,
    path = "/users/",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created successfully", body = Envelope),
        (status = 500, description = "Failed to create user", body = ErrorDetail)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    const OP: Operation = Operation::CreateUser;

    let Json(request) = payload.map_err(|e| fail(OP, e.into()))?;

    let user = state
        .db
        .create_user(&request.email, &request.password, &request.privilege)
        .await
        .map_err(|e| fail(OP, e.into()))?;

    tracing::info!(user_id = user.id, "User created");

    Ok(Json(Envelope::with_message(
        Detail::User(UserView::from(user)),
        "User created successfully",
    )))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateConversationRequest {
    pub title: String,
    pub description: String,
    pub creator_id: RecordId,
}

/// Create a new conversation
///
/// Expected input: `{"title": "Title", "description": "Description", "creator_id": 1}`
#[utoipa::path(
    post,
    path = "/conversations/",
    tag = "Conversations",
    request_body = CreateConversationRequest,
    responses(
        (status = 200, description = "Conversation created successfully", body = Envelope),
        (status = 500, description = "Failed to create conversation", body = ErrorDetail)
    )
)]
pub async fn create_conversation(
    State(state): State<AppState>,
    payload: Result<Json<CreateConversationRequest>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    const OP: Operation = Operation::CreateConversation;

    let Json(request) = payload.map_err(|e| fail(OP, e.into()))?;

    let conversation = state
        .db
        .create_conversation(&request.title, &request.description, request.creator_id)
        .await
        .map_err(|e| fail(OP, e.into()))?;

    tracing::info!(
        conversation_id = conversation.id,
        creator_id = conversation.creator_id,
        "Conversation created"
    );

    Ok(Json(Envelope::with_message(
        Detail::Conversation(ConversationView::from(conversation)),
        "Conversation created successfully",
    )))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users/",
    tag = "Users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = Envelope),
        (status = 500, description = "Failed to list users", body = ErrorDetail)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Envelope>, ApiError> {
    let users = state
        .db
        .read_users()
        .await
        .map_err(|e| fail(Operation::ListUsers, e.into()))?;

    Ok(Json(Envelope::with_message(
        Detail::Users(users.into_iter().map(UserView::from).collect()),
        "Users retrieved successfully",
    )))
}

/// List all conversations
#[utoipa::path(
    get,
    path = "/conversations/",
    tag = "Conversations",
    responses(
        (status = 200, description = "Conversations retrieved successfully", body = Envelope),
        (status = 500, description = "Failed to list conversations", body = ErrorDetail)
    )
)]
pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<Envelope>, ApiError> {
    let conversations = state
        .db
        .read_conversations()
        .await
        .map_err(|e| fail(Operation::ListConversations, e.into()))?;

    Ok(Json(Envelope::with_message(
        Detail::Conversations(
            conversations
                .into_iter()
                .map(ConversationView::from)
                .collect(),
        ),
        "Conversations retrieved successfully",
    )))
}
