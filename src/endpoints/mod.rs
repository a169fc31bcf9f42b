//! The three public entry points (§4.3): shared pre-checks, then dispatch
//! to a [`crate::grants`] handler.
//!
//! Grounded on `ptn1411-auth-server/src/handlers/oauth.rs`'s dispatch shape
//! (one handler function per wire operation, client lookup then capability
//! then business logic) and `examples/original_source/.../integrations/fastapi/utils.py`,
//! which confirms the three-entry-point split and that request/response
//! translation is the host's job, not the engine's.

pub mod authorization;
pub mod introspection;
pub mod token;

pub use authorization::AuthorizationEndpoint;
pub use introspection::IntrospectionEndpoint;
pub use token::TokenEndpoint;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::models::Client;
use crate::request::Request;
use crate::storage::Storage;
use crate::types::HttpMethod;
use crate::utils::basic_auth::{decode_basic_auth, Credentials};

/// §4.3 step 1: the request must have arrived over `https`, unless the
/// host has opted into `Config::insecure_transport` (test/local-dev only).
pub(crate) fn check_transport(req: &Request, config: &Config) -> Result<(), Error> {
    if config.insecure_transport || req.is_secure_transport() {
        Ok(())
    } else {
        Err(Error::InvalidRequest("insecure transport".into()))
    }
}

/// §4.3 step 2.
pub(crate) fn check_method(req: &Request, expected: HttpMethod) -> Result<(), Error> {
    if req.method == expected {
        Ok(())
    } else {
        Err(Error::MethodNotAllowed)
    }
}

/// Pull whatever client credentials the request carries: HTTP Basic (RFC
/// 6749 §2.3.1), client_id/client_secret in the form body, or just a bare
/// client_id for a public client that has no secret to present.
fn extract_credentials(req: &Request) -> Credentials {
    if let Some(header) = req.header("authorization") {
        if let Some((client_id, client_secret)) = decode_basic_auth(header) {
            return Credentials::Basic {
                client_id,
                client_secret,
            };
        }
    }

    let client_id = req.post_param("client_id");
    let client_secret = req.post_param("client_secret");
    if !client_id.is_empty() && !client_secret.is_empty() {
        return Credentials::Basic {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        };
    }
    if !client_id.is_empty() {
        return Credentials::ClientIdOnly {
            client_id: client_id.to_string(),
        };
    }
    Credentials::None
}

/// §4.3 step 4: authenticate the client presenting the request (token and
/// introspection endpoints only — the authorization endpoint looks up a
/// client without a secret, directly through [`Storage::get_client`]).
pub(crate) async fn authenticate_client(
    storage: &Arc<dyn Storage>,
    req: &Request,
) -> Result<Client, Error> {
    let result = match extract_credentials(req) {
        Credentials::Basic {
            client_id,
            client_secret,
        } => storage
            .get_client(&client_id, Some(&client_secret))
            .await?
            .ok_or_else(|| Error::InvalidClient(String::new())),
        Credentials::ClientIdOnly { client_id } => storage
            .get_client(&client_id, None)
            .await?
            .ok_or_else(|| Error::InvalidRequest("Invalid client_id parameter value.".into())),
        Credentials::None => Err(Error::InvalidRequest(String::new())),
    };
    if let Err(ref err) = result {
        tracing::warn!(error = err.error_code(), "client authentication failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;
    use crate::storage::memory::MemoryStorage;
    use crate::types::{GrantType, ResponseType};
    use crate::utils::basic_auth::encode_basic_auth;
    use std::collections::HashSet;

    fn client() -> Client {
        Client {
            client_id: "client-1".into(),
            client_secret: Some("s3cr3t".into()),
            redirect_uris: HashSet::new(),
            grant_types: HashSet::from([GrantType::ClientCredentials]),
            response_types: HashSet::from([ResponseType::Code]),
            scopes: HashSet::new(),
        }
    }

    #[tokio::test]
    async fn authenticate_client_accepts_basic_auth() {
        let memory = MemoryStorage::new();
        memory.put_client(client()).await;
        let storage: Arc<dyn Storage> = Arc::new(memory);

        let mut req = Request::new(HttpMethod::Post, "https://example.com");
        req.headers.insert(
            "Authorization".to_string(),
            encode_basic_auth("client-1", "s3cr3t"),
        );
        assert!(authenticate_client(&storage, &req).await.is_ok());
    }

    #[tokio::test]
    async fn authenticate_client_rejects_wrong_secret() {
        let memory = MemoryStorage::new();
        memory.put_client(client()).await;
        let storage: Arc<dyn Storage> = Arc::new(memory);

        let mut req = Request::new(HttpMethod::Post, "https://example.com");
        req.headers.insert(
            "Authorization".to_string(),
            encode_basic_auth("client-1", "wrong"),
        );
        let err = authenticate_client(&storage, &req).await.unwrap_err();
        assert_eq!(err, Error::InvalidClient(String::new()));
    }

    #[tokio::test]
    async fn authenticate_client_rejects_no_credentials() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let req = Request::new(HttpMethod::Post, "https://example.com");
        let err = authenticate_client(&storage, &req).await.unwrap_err();
        assert_eq!(err, Error::InvalidRequest(String::new()));
    }

    #[test]
    fn check_transport_rejects_plain_http() {
        let req = Request::new(HttpMethod::Get, "http://example.com");
        let err = check_transport(&req, &Config::default()).unwrap_err();
        assert_eq!(err, Error::InvalidRequest("insecure transport".into()));
    }

    #[test]
    fn check_transport_allows_insecure_override() {
        let req = Request::new(HttpMethod::Get, "http://example.com");
        assert!(check_transport(&req, &Config::insecure_for_testing()).is_ok());
    }

    #[test]
    fn check_method_rejects_mismatch() {
        let req = Request::new(HttpMethod::Get, "https://example.com");
        let err = check_method(&req, HttpMethod::Post).unwrap_err();
        assert_eq!(err, Error::MethodNotAllowed);
    }
}
