//! Response envelope and error rendering

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::types::{Conversation, RecordId, User};

/// Public view of a user; never carries the password
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct UserView {
    pub id: RecordId,
    pub email: String,
    pub privilege: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            privilege: user.privilege,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ConversationView {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub creator_id: RecordId,
}

impl From<Conversation> for ConversationView {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id,
            title: conversation.title,
            description: conversation.description,
            creator_id: conversation.creator_id,
        }
    }
}

/// Payload of an [`Envelope`], serialized without a tag
///
/// Reading an envelope back picks the first variant that fits, so an empty
/// list always comes back as [`Detail::Users`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(untagged)]
pub enum Detail {
    Text(String),
    User(UserView),
    Conversation(ConversationView),
    Users(Vec<UserView>),
    Conversations(Vec<ConversationView>),
}

/// Uniform wrapper returned by every successful handler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Envelope {
    pub detail: Detail,
    pub error: Option<String>,
    pub message: Option<String>,
    #[serde(default = "default_status_code")]
    pub status_code: u16,
}

fn default_status_code() -> u16 {
    StatusCode::OK.as_u16()
}

impl Envelope {
    pub fn new(detail: Detail) -> Self {
        Self {
            detail,
            error: None,
            message: None,
            status_code: default_status_code(),
        }
    }

    pub fn with_message(detail: Detail, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(detail)
        }
    }
}

/// Handler operations, named the way failure messages read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateUser,
    ListUsers,
    CreateConversation,
    ListConversations,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateUser => "create user",
            Operation::ListUsers => "list users",
            Operation::CreateConversation => "create conversation",
            Operation::ListConversations => "list conversations",
        };
        f.write_str(name)
    }
}

/// Body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Failure surfaced to the client as [`ErrorDetail`]
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Every handler failure is reported as a server error
    pub fn operation_failed(operation: Operation, err: impl fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: format!("Failed to {}: {}", operation, err),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorDetail {
            detail: self.detail,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_envelope_shape() {
        let value = serde_json::to_value(Envelope::new(Detail::Text("OK".into()))).unwrap();
        assert_eq!(
            value,
            json!({"detail": "OK", "error": null, "message": null, "status_code": 200})
        );
    }

    #[test]
    fn test_detail_serializes_untagged() {
        let envelope = Envelope::with_message(
            Detail::Users(vec![UserView {
                id: 3,
                email: "a@b.com".into(),
                privilege: "user".into(),
            }]),
            "Users retrieved successfully",
        );
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["detail"][0]["email"], "a@b.com");
        assert_eq!(value["message"], "Users retrieved successfully");
    }

    #[test]
    fn test_detail_deserializes_conversation() {
        let envelope: Envelope = serde_json::from_value(json!({
            "detail": {"id": 1, "title": "t", "description": "d", "creator_id": 9},
            "message": "Conversation created successfully"
        }))
        .unwrap();

        assert_eq!(envelope.status_code, 200);
        assert!(matches!(
            envelope.detail,
            Detail::Conversation(ConversationView { creator_id: 9, .. })
        ));
    }

    #[test]
    fn test_empty_list_reads_back_as_users() {
        let envelope: Envelope = serde_json::from_value(json!({
            "detail": [],
            "message": "Conversations retrieved successfully"
        }))
        .unwrap();

        assert_eq!(envelope.detail, Detail::Users(vec![]));
    }

    #[test]
    fn test_user_view_drops_password() {
        let view = UserView::from(User {
            id: 1,
            email: "a@b.com".into(),
            password: "secret".into(),
            privilege: "admin".into(),
            created: chrono::Utc::now(),
        });
        let value = serde_json::to_value(view).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["privilege"], "admin");
    }

    #[test]
    fn test_operation_failed_message() {
        let err = ApiError::operation_failed(Operation::ListConversations, "boom");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), "Failed to list conversations: boom");
    }
}
