//! The authorization-code grant: the front leg at the authorization
//! endpoint (§4.4 ResponseTypeCode handler, minting a code bound to a PKCE
//! challenge) and the back leg at the token endpoint (§4.5 AuthorizationCode
//! grant, redeeming that code for a token).
//!
//! Grounded on `ptn1411-auth-server/src/services/oauth.rs`'s
//! `create_authorization_code`/`exchange_code_for_tokens` pair for the
//! "validate, mint or redeem, store" shape and check ordering.

use std::sync::Arc;

use crate::error::Error;
use crate::models::{AuthorizationCode, Client, Token};
use crate::storage::Storage;
use crate::types::ChallengeMethod;
use crate::utils::pkce::{validate_code_challenge, validate_code_verifier, verify_pkce};
use crate::utils::time::now;

/// Front leg: validate the PKCE parameters and mint a fresh code. Client
/// authentication, capability, scope, `redirect_uri`, and the authenticated
/// user were already checked by the authorization endpoint (§4.3, §4.4).
pub async fn issue_code(
    storage: &Arc<dyn Storage>,
    client: &Client,
    redirect_uri: &str,
    scope: &[String],
    user_id: &str,
    code_challenge: &str,
    code_challenge_method: &str,
) -> Result<AuthorizationCode, Error> {
    if code_challenge.is_empty() {
        return Err(Error::InvalidRequest("Code challenge required.".into()));
    }
    let method = ChallengeMethod::parse(code_challenge_method).ok_or_else(|| {
        Error::InvalidRequest("Transform algorithm not supported.".into())
    })?;
    // RFC 7636 §4.2: an S256 challenge is always a 43-character base64url
    // SHA-256 digest; a challenge of any other shape could never be the
    // output of a verifier this grant would later accept, so reject it at
    // issuance rather than minting a code nothing can ever redeem.
    if method == ChallengeMethod::S256 && !validate_code_challenge(code_challenge) {
        return Err(Error::InvalidRequest(
            "Transform algorithm not supported.".into(),
        ));
    }

    storage
        .create_authorization_code(
            &client.client_id,
            redirect_uri,
            scope,
            user_id,
            Some(code_challenge),
            Some(method),
        )
        .await
        .map_err(Error::from)
}

/// Back leg: redeem a code for a token (§4.5 AuthorizationCode grant,
/// steps 1-6). The code is deleted before the token is minted so that a
/// concurrent redemption attempt can never see it twice (§5 Atomicity) —
/// that ordering is enforced by the storage adapter, not here, but this
/// function is what relies on it.
pub async fn exchange_code(
    storage: &Arc<dyn Storage>,
    client: &Client,
    code: &str,
    redirect_uri: &str,
    code_verifier: Option<&str>,
) -> Result<Token, Error> {
    if code.is_empty() {
        return Err(Error::InvalidGrant(String::new()));
    }

    let stored = storage
        .get_authorization_code(code, &client.client_id)
        .await?
        .ok_or_else(|| Error::InvalidGrant(String::new()))?;

    if redirect_uri.is_empty() {
        return Err(Error::InvalidRequest("Mismatching redirect URI.".into()));
    }
    if stored.redirect_uri != redirect_uri {
        return Err(Error::InvalidRequest("Invalid redirect URI.".into()));
    }

    if let Some(challenge) = &stored.code_challenge {
        let verifier = code_verifier
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::InvalidRequest("Code verifier required.".into()))?;
        // RFC 7636 §4.1: a verifier outside the 43-128 unreserved-character
        // shape can never have produced `challenge`, so reject it the same
        // way a hash mismatch is rejected rather than hashing it anyway.
        if !validate_code_verifier(verifier) {
            return Err(Error::MismatchingState(
                "CSRF Warning! State not equal in request and response.".into(),
            ));
        }
        let method = stored
            .code_challenge_method
            .unwrap_or(ChallengeMethod::Plain)
            .as_str();
        if !verify_pkce(verifier, challenge, method) {
            return Err(Error::MismatchingState(
                "CSRF Warning! State not equal in request and response.".into(),
            ));
        }
    }

    if stored.is_expired(now()) {
        return Err(Error::InvalidGrant(String::new()));
    }

    storage
        .delete_authorization_code(code, &client.client_id)
        .await?;

    storage
        .create_token(&client.client_id, &stored.scope, Some(&stored.user_id))
        .await
        .map_err(Error::from)
}
