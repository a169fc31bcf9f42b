//! The closed error taxonomy emitted by the OAuth 2.0 engine (RFC 6749 §5.2,
//! §7.2), plus the wrapper for storage-adapter failures.

use thiserror::Error;

/// Every error the engine can produce. Each variant names exactly one
/// `error` value from RFC 6749's vocabulary. Insecure transport (§4.3 step
/// 1) is reported as `InvalidRequest("insecure transport")` rather than a
/// dedicated variant, matching the RFC's `invalid_request` wire value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid_request: {0}")]
    InvalidRequest(String),

    #[error("invalid_client: {0}")]
    InvalidClient(String),

    #[error("invalid_grant: {0}")]
    InvalidGrant(String),

    #[error("unauthorized_client: {0}")]
    UnauthorizedClient(String),

    #[error("unsupported_grant_type")]
    UnsupportedGrantType,

    #[error("unsupported_response_type")]
    UnsupportedResponseType,

    #[error("invalid_scope")]
    InvalidScope,

    #[error("access_denied: {0}")]
    AccessDenied(String),

    #[error("server_error: {0}")]
    ServerError(String),

    #[error("temporarily_unavailable")]
    TemporarilyUnavailable,

    #[error("mismatching_state: {0}")]
    MismatchingState(String),

    #[error("method_not_allowed")]
    MethodNotAllowed,
}

impl Error {
    /// The wire-level `error` value, as it appears in an `ErrorContent`
    /// response body.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidRequest(_) => "invalid_request",
            Error::InvalidClient(_) => "invalid_client",
            Error::InvalidGrant(_) => "invalid_grant",
            Error::UnauthorizedClient(_) => "unauthorized_client",
            Error::UnsupportedGrantType => "unsupported_grant_type",
            Error::UnsupportedResponseType => "unsupported_response_type",
            Error::InvalidScope => "invalid_scope",
            Error::AccessDenied(_) => "access_denied",
            Error::ServerError(_) => "server_error",
            Error::TemporarilyUnavailable => "temporarily_unavailable",
            Error::MismatchingState(_) => "mismatching_state",
            Error::MethodNotAllowed => "method_not_allowed",
        }
    }

    /// The `error_description` to surface in the response body. Empty for
    /// variants where RFC 6749 prescribes no particular description text.
    pub fn description(&self) -> String {
        match self {
            Error::InvalidRequest(msg)
            | Error::InvalidClient(msg)
            | Error::InvalidGrant(msg)
            | Error::UnauthorizedClient(msg)
            | Error::AccessDenied(msg)
            | Error::ServerError(msg)
            | Error::MismatchingState(msg) => msg.clone(),
            Error::UnsupportedGrantType
            | Error::UnsupportedResponseType
            | Error::InvalidScope
            | Error::TemporarilyUnavailable
            | Error::MethodNotAllowed => String::new(),
        }
    }

    /// The HTTP status code a transport adapter should use for this error.
    ///
    /// `InvalidClient` defaults to 400 here: at the token and introspection
    /// endpoints a bad client secret is a 400 per §4.3. The one place the
    /// RFC wants 401 for the same error code — an unauthenticated resource
    /// owner at the authorization endpoint (§4.4) — is a different failure
    /// entirely and is handled by the endpoint overriding the status on its
    /// way out, not by this mapping.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MethodNotAllowed => 405,
            Error::ServerError(_) => 500,
            Error::TemporarilyUnavailable => 503,
            _ => 400,
        }
    }
}

/// Raised when a [`crate::storage::Storage`] operation fails. Kept distinct
/// from [`Error`] so a host can tell "the protocol rejected this request"
/// apart from "the backing store is unavailable" — the latter always maps
/// to [`Error::ServerError`] at the engine boundary, never to a
/// client-facing protocol error.
#[derive(Debug, Error)]
#[error("storage error: {0}")]
pub struct StorageError(pub String);

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::ServerError(err.0)
    }
}
