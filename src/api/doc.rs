//! OpenAPI documentation for the route table.
//!
//! Paths are declared relative to the mount prefix; [`api_doc`] records the
//! prefix as the document's server so clients resolve them correctly. The
//! tag list carries the descriptions a host application shows when it groups
//! the endpoints.

use utoipa::openapi::server::Server;
use utoipa::OpenApi;

use crate::api::handlers::{CreateConversationRequest, CreateUserRequest};
use crate::api::response::{ConversationView, Detail, Envelope, ErrorDetail, UserView};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LitePolis router example",
        description = "User and conversation endpoints backed by a database actor."
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::create_user,
        crate::api::handlers::list_users,
        crate::api::handlers::create_conversation,
        crate::api::handlers::list_conversations,
    ),
    components(schemas(
        Envelope,
        Detail,
        UserView,
        ConversationView,
        ErrorDetail,
        CreateUserRequest,
        CreateConversationRequest
    )),
    tags(
        (name = "Default"),
        (name = "Users", description = "Operations related to users"),
        (name = "Conversations", description = "Operations related to conversations")
    )
)]
pub struct ApiDoc;

/// Build the document for a router mounted under `base`
pub fn api_doc(base: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if !base.is_empty() {
        doc.servers = Some(vec![Server::new(base)]);
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_carry_descriptions() {
        let doc = api_doc("");
        let tags = doc.tags.expect("tags declared");

        let description = |name: &str| {
            tags.iter()
                .find(|t| t.name == name)
                .and_then(|t| t.description.clone())
        };
        assert_eq!(
            description("Users").as_deref(),
            Some("Operations related to users")
        );
        assert_eq!(
            description("Conversations").as_deref(),
            Some("Operations related to conversations")
        );
        assert!(doc.servers.is_none());
    }

    #[test]
    fn test_prefix_becomes_server() {
        let doc = api_doc("/api/example");
        let servers = doc.servers.expect("server recorded");
        assert_eq!(servers[0].url, "/api/example");
    }

    #[test]
    fn test_all_routes_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/users/", "/conversations/"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
