//! The token introspection endpoint (§4.3, §4.6, RFC 7662), POST-only.
//!
//! The source this engine is modeled on never showed an introspection
//! implementation (spec §9 Open Question); this follows RFC 7662 strictly:
//! any failure to authenticate the caller, find the token, or match it to
//! the caller's client collapses to `{active: false}` rather than a
//! distinguishing error, so a client can never learn anything about a
//! token it doesn't own by probing this endpoint.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::models::Token;
use crate::request::Request;
use crate::response::{IntrospectionContent, Response};
use crate::storage::Storage;
use crate::types::HttpMethod;
use crate::utils::scope::list_to_scope;
use crate::utils::time::now;

use super::{authenticate_client, check_method, check_transport};

/// `IntrospectionEndpoint.create_token_introspection_response` (§4.3, §4.6).
pub struct IntrospectionEndpoint {
    storage: Arc<dyn Storage>,
    config: Config,
}

impl IntrospectionEndpoint {
    pub fn new(storage: Arc<dyn Storage>, config: Config) -> Self {
        Self { storage, config }
    }

    pub async fn create_token_introspection_response(&self, req: &Request) -> Response {
        match self.handle(req).await {
            Ok(content) => Response::introspection(content),
            Err(err) => Response::error(&err),
        }
    }

    async fn handle(&self, req: &Request) -> Result<IntrospectionContent, Error> {
        check_transport(req, &self.config)?;
        check_method(req, HttpMethod::Post)?;

        let token_param = req.post_param("token");
        if token_param.is_empty() {
            return Err(Error::InvalidRequest("Missing token parameter.".into()));
        }

        let client = match authenticate_client(&self.storage, req).await {
            Ok(client) => client,
            Err(_) => return Ok(IntrospectionContent::inactive()),
        };

        let stored = self
            .storage
            .get_token_for_introspection(token_param, &client.client_id)
            .await?;

        Ok(match stored {
            Some(token) if token.is_access_token_active(now()) => {
                tracing::info!(client_id = %client.client_id, "token introspected as active");
                active_content(&token)
            }
            _ => {
                tracing::info!(client_id = %client.client_id, "token introspected as inactive");
                IntrospectionContent::inactive()
            }
        })
    }
}

fn active_content(token: &Token) -> IntrospectionContent {
    IntrospectionContent {
        active: true,
        scope: Some(list_to_scope(&token.scope)),
        client_id: Some(token.client_id.clone()),
        username: token.user_id.clone(),
        token_type: Some(token.token_type.to_string()),
        exp: Some(token.issued_at + token.expires_in),
        iat: Some(token.issued_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;
    use crate::storage::memory::MemoryStorage;
    use crate::types::{GrantType, ResponseType};
    use crate::utils::basic_auth::encode_basic_auth;
    use std::collections::HashSet;

    fn client(id: &str) -> Client {
        Client {
            client_id: id.into(),
            client_secret: Some("s3cr3t".into()),
            redirect_uris: HashSet::new(),
            grant_types: HashSet::from([GrantType::ClientCredentials]),
            response_types: HashSet::from([ResponseType::Code]),
            scopes: HashSet::new(),
        }
    }

    fn request_for(client_id: &str, token: &str) -> Request {
        let mut req = Request::new(HttpMethod::Post, "https://example.com/introspect");
        req.headers.insert(
            "Authorization".to_string(),
            encode_basic_auth(client_id, "s3cr3t"),
        );
        req.post.insert("token".into(), token.into());
        req
    }

    #[tokio::test]
    async fn active_token_reports_its_metadata() {
        let memory = MemoryStorage::new();
        memory.put_client(client("client-1")).await;
        let token = memory
            .create_token("client-1", &["read".to_string()], Some("user-1"))
            .await
            .unwrap();
        let endpoint = IntrospectionEndpoint::new(Arc::new(memory), Config::insecure_for_testing());

        let req = request_for("client-1", &token.access_token);
        let response = endpoint.create_token_introspection_response(&req).await;
        assert_eq!(response.status_code, 200);
        match response.content {
            crate::response::ResponseContent::Introspection(c) => {
                assert!(c.active);
                assert_eq!(c.client_id.as_deref(), Some("client-1"));
                assert_eq!(c.username.as_deref(), Some("user-1"));
            }
            _ => panic!("expected an introspection response"),
        }
    }

    #[tokio::test]
    async fn unknown_token_is_inactive() {
        let memory = MemoryStorage::new();
        memory.put_client(client("client-1")).await;
        let endpoint = IntrospectionEndpoint::new(Arc::new(memory), Config::insecure_for_testing());

        let req = request_for("client-1", "not-a-real-token");
        let response = endpoint.create_token_introspection_response(&req).await;
        assert_eq!(response.status_code, 200);
        match response.content {
            crate::response::ResponseContent::Introspection(c) => assert!(!c.active),
            _ => panic!("expected an introspection response"),
        }
    }

    #[tokio::test]
    async fn cross_client_token_is_inactive() {
        let memory = MemoryStorage::new();
        memory.put_client(client("client-1")).await;
        memory.put_client(client("client-2")).await;
        let token = memory
            .create_token("client-1", &["read".to_string()], Some("user-1"))
            .await
            .unwrap();
        let endpoint = IntrospectionEndpoint::new(Arc::new(memory), Config::insecure_for_testing());

        let req = request_for("client-2", &token.access_token);
        let response = endpoint.create_token_introspection_response(&req).await;
        match response.content {
            crate::response::ResponseContent::Introspection(c) => assert!(!c.active),
            _ => panic!("expected an introspection response"),
        }
    }

    #[tokio::test]
    async fn unauthenticated_request_is_inactive_not_an_error() {
        let memory = MemoryStorage::new();
        memory.put_client(client("client-1")).await;
        let token = memory
            .create_token("client-1", &["read".to_string()], Some("user-1"))
            .await
            .unwrap();
        let endpoint = IntrospectionEndpoint::new(Arc::new(memory), Config::insecure_for_testing());

        let mut req = Request::new(HttpMethod::Post, "https://example.com/introspect");
        req.post.insert("token".into(), token.access_token.clone());
        let response = endpoint.create_token_introspection_response(&req).await;
        assert_eq!(response.status_code, 200);
        match response.content {
            crate::response::ResponseContent::Introspection(c) => assert!(!c.active),
            _ => panic!("expected an introspection response"),
        }
    }

    #[tokio::test]
    async fn missing_token_parameter_is_rejected() {
        let memory = MemoryStorage::new();
        memory.put_client(client("client-1")).await;
        let endpoint = IntrospectionEndpoint::new(Arc::new(memory), Config::insecure_for_testing());

        let mut req = Request::new(HttpMethod::Post, "https://example.com/introspect");
        req.headers.insert(
            "Authorization".to_string(),
            encode_basic_auth("client-1", "s3cr3t"),
        );
        let response = endpoint.create_token_introspection_response(&req).await;
        assert_eq!(response.status_code, 400);
    }
}
