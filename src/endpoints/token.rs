//! The token endpoint (§4.3, §4.5): the token leg for all four non-implicit
//! grants, POST-only.
//!
//! Grounded on `ptn1411-auth-server/src/handlers/oauth.rs`'s `token_handler`
//! for the "authenticate client, check capability, branch on grant_type"
//! shape.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::grants::{authorization_code, client_credentials, password, refresh_token};
use crate::models::Token;
use crate::request::Request;
use crate::response::{Response, TokenContent};
use crate::storage::Storage;
use crate::types::{GrantType, HttpMethod};
use crate::utils::scope::{list_to_scope, scope_to_list};

use super::{authenticate_client, check_method, check_transport};

/// `TokenEndpoint.create_token_response` (§4.3, §4.5).
pub struct TokenEndpoint {
    storage: Arc<dyn Storage>,
    config: Config,
}

impl TokenEndpoint {
    pub fn new(storage: Arc<dyn Storage>, config: Config) -> Self {
        Self { storage, config }
    }

    pub async fn create_token_response(&self, req: &Request) -> Response {
        match self.handle(req).await {
            Ok(token) => {
                tracing::info!(client_id = %token.client_id, "token issued");
                Response::token(token_content(&token))
            }
            Err(err) => {
                tracing::warn!(error = err.error_code(), "token request rejected");
                Response::error(&err)
            }
        }
    }

    async fn handle(&self, req: &Request) -> Result<Token, Error> {
        check_transport(req, &self.config)?;
        check_method(req, HttpMethod::Post)?;

        let grant_type_raw = req.post_param("grant_type");
        if grant_type_raw.is_empty() {
            return Err(Error::InvalidRequest(
                "Request is missing grant type.".into(),
            ));
        }
        let grant_type = GrantType::parse(grant_type_raw).ok_or(Error::UnsupportedGrantType)?;

        let client = authenticate_client(&self.storage, req).await?;

        if !client.allows_grant_type(grant_type) {
            return Err(Error::UnauthorizedClient(String::new()));
        }

        match grant_type {
            GrantType::AuthorizationCode => {
                let code = req.post_param("code");
                if code.is_empty() {
                    return Err(Error::InvalidRequest("Missing code parameter.".into()));
                }
                let redirect_uri = req.post_param("redirect_uri");
                let code_verifier = req.post_param("code_verifier");
                let code_verifier = (!code_verifier.is_empty()).then_some(code_verifier);
                authorization_code::exchange_code(
                    &self.storage,
                    &client,
                    code,
                    redirect_uri,
                    code_verifier,
                )
                .await
            }
            GrantType::Password => {
                let username = req.post_param("username");
                let password_param = req.post_param("password");
                let scope = scope_to_list(req.post_param("scope"));
                if !client.allows_scopes(&scope) {
                    return Err(Error::InvalidScope);
                }
                password::grant(&self.storage, &client, username, password_param, &scope).await
            }
            GrantType::ClientCredentials => {
                let scope = scope_to_list(req.post_param("scope"));
                if !client.allows_scopes(&scope) {
                    return Err(Error::InvalidScope);
                }
                client_credentials::grant(&self.storage, &client, &scope).await
            }
            GrantType::RefreshToken => {
                let token = req.post_param("refresh_token");
                if token.is_empty() {
                    return Err(Error::InvalidRequest(
                        "Missing refresh token parameter.".into(),
                    ));
                }
                refresh_token::grant(&self.storage, &client, token).await
            }
        }
    }
}

fn token_content(token: &Token) -> TokenContent {
    TokenContent {
        access_token: token.access_token.clone(),
        refresh_token: token.refresh_token.clone(),
        token_type: token.token_type.to_string(),
        expires_in: token.expires_in,
        refresh_token_expires_in: token
            .refresh_token
            .as_ref()
            .map(|_| token.refresh_token_expires_in),
        scope: list_to_scope(&token.scope),
    }
}
