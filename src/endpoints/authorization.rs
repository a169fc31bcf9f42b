//! The authorization endpoint (§4.3, §4.4): `response_type=code` (the
//! authorization-code grant's front leg) and `response_type=token` (the
//! implicit grant), both GET-only.
//!
//! Grounded on `ptn1411-auth-server/src/handlers/oauth.rs`'s
//! `authorize_handler`/`authorize_callback_handler` pair for the "resolve
//! client, resolve redirect_uri, then branch on response_type" shape.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::grants::{authorization_code, implicit};
use crate::request::Request;
use crate::response::{
    build_code_redirect_uri, build_error_redirect_uri, build_token_redirect_uri,
    AuthorizationCodeContent, Response, ResponseContent, TokenContent,
};
use crate::storage::Storage;
use crate::types::{HttpMethod, ResponseType};
use crate::utils::scope::{list_to_scope, scope_to_list};

use super::{check_method, check_transport};

/// `AuthorizationEndpoint.create_authorization_code_response` (§4.3, §4.4).
pub struct AuthorizationEndpoint {
    storage: Arc<dyn Storage>,
    config: Config,
}

/// Distinguishes how a failure partway through [`AuthorizationEndpoint::handle`]
/// should be surfaced. RFC 6749 §4.1.2.1: once a `redirect_uri` is known to
/// be one of the client's registered URIs, errors are reported *to* it; a
/// request that never got that far (unknown client, unresolved redirect
/// URI) is answered directly instead, since redirecting there would be an
/// open redirect to an untrusted location. An unauthenticated resource
/// owner is its own case — the host hasn't even reached an authorization
/// decision yet, so the engine answers directly with 401 rather than
/// redirecting an error the client didn't ask for.
enum Outcome {
    Direct(Error),
    Unauthenticated(Error),
    Redirect {
        redirect_uri: String,
        state: String,
        err: Error,
    },
}

impl AuthorizationEndpoint {
    pub fn new(storage: Arc<dyn Storage>, config: Config) -> Self {
        Self { storage, config }
    }

    pub async fn create_authorization_code_response(&self, req: &Request) -> Response {
        match self.handle(req).await {
            Ok(response) => response,
            Err(Outcome::Direct(err)) => {
                tracing::warn!(error = err.error_code(), "authorization request rejected");
                Response::error(&err)
            }
            Err(Outcome::Unauthenticated(err)) => {
                tracing::warn!("authorization request from an unauthenticated user");
                let mut response = Response::error(&err);
                response.status_code = 401;
                response
            }
            Err(Outcome::Redirect {
                redirect_uri,
                state,
                err,
            }) => {
                tracing::warn!(error = err.error_code(), "authorization request redirected with an error");
                Response::redirect(
                    build_error_redirect_uri(&redirect_uri, &err, &state),
                    ResponseContent::Error((&err).into()),
                )
            }
        }
    }

    async fn handle(&self, req: &Request) -> Result<Response, Outcome> {
        check_transport(req, &self.config).map_err(Outcome::Direct)?;
        check_method(req, HttpMethod::Get).map_err(Outcome::Direct)?;

        let client_id = req.query_param("client_id");
        if client_id.is_empty() {
            return Err(Outcome::Direct(Error::InvalidRequest(
                "Missing client_id parameter.".into(),
            )));
        }
        let client = self
            .storage
            .get_client(client_id, None)
            .await
            .map_err(|e| Outcome::Direct(e.into()))?
            .ok_or_else(|| {
                Outcome::Direct(Error::InvalidRequest(
                    "Invalid client_id parameter value.".into(),
                ))
            })?;

        let response_type_raw = req.query_param("response_type");
        if response_type_raw.is_empty() {
            return Err(Outcome::Direct(Error::InvalidRequest(
                "Missing response_type parameter.".into(),
            )));
        }
        let response_type = ResponseType::parse(response_type_raw)
            .ok_or(Outcome::Direct(Error::UnsupportedResponseType))?;
        if !client.allows_response_type(response_type) {
            return Err(Outcome::Direct(Error::UnsupportedResponseType));
        }

        let scope = scope_to_list(req.query_param("scope"));
        if !client.allows_scopes(&scope) {
            return Err(Outcome::Direct(Error::InvalidScope));
        }

        let redirect_uri = req.query_param("redirect_uri");
        if redirect_uri.is_empty() {
            return Err(Outcome::Direct(Error::InvalidRequest(
                "Mismatching redirect URI.".into(),
            )));
        }
        if !client.has_redirect_uri(redirect_uri) {
            return Err(Outcome::Direct(Error::InvalidRequest(
                "Invalid redirect URI.".into(),
            )));
        }

        let state = req.query_param("state").to_string();

        let Some(user) = &req.user else {
            return Err(Outcome::Unauthenticated(Error::InvalidClient(
                String::new(),
            )));
        };

        match response_type {
            ResponseType::Code => {
                let code_challenge = req.query_param("code_challenge");
                let code_challenge_method = req.query_param("code_challenge_method");
                let code = authorization_code::issue_code(
                    &self.storage,
                    &client,
                    redirect_uri,
                    &scope,
                    &user.0,
                    code_challenge,
                    code_challenge_method,
                )
                .await
                .map_err(|err| Outcome::Redirect {
                    redirect_uri: redirect_uri.to_string(),
                    state: state.clone(),
                    err,
                })?;

                let granted_scope = list_to_scope(&code.scope);
                tracing::info!(client_id = %client.client_id, "authorization code issued");
                let location =
                    build_code_redirect_uri(redirect_uri, &code.code, &granted_scope, &state);
                Ok(Response::redirect(
                    location,
                    ResponseContent::AuthorizationCode(AuthorizationCodeContent {
                        code: code.code,
                        scope: granted_scope,
                    }),
                ))
            }
            ResponseType::Token => {
                let token = implicit::issue_token(&self.storage, &client, &scope, &user.0)
                    .await
                    .map_err(|err| Outcome::Redirect {
                        redirect_uri: redirect_uri.to_string(),
                        state: state.clone(),
                        err,
                    })?;

                let granted_scope = list_to_scope(&token.scope);
                tracing::info!(client_id = %client.client_id, "implicit token issued");
                let location = build_token_redirect_uri(
                    redirect_uri,
                    &token.access_token,
                    token.expires_in,
                    &granted_scope,
                    &state,
                );
                Ok(Response::redirect(
                    location,
                    ResponseContent::Token(TokenContent {
                        access_token: token.access_token,
                        refresh_token: None,
                        token_type: token.token_type.to_string(),
                        expires_in: token.expires_in,
                        refresh_token_expires_in: None,
                        scope: granted_scope,
                    }),
                ))
            }
        }
    }
}
