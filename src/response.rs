//! The normalized response the engine produces. Serialization to bytes and
//! writing an HTTP status line remain the transport adapter's job; this
//! module only defines the shape.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Error;

/// The body of an error response, RFC 6749 §5.2.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorContent {
    pub error: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error_description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error_uri: String,
}

impl From<&Error> for ErrorContent {
    fn from(err: &Error) -> Self {
        Self {
            error: err.error_code().to_string(),
            error_description: err.description(),
            error_uri: String::new(),
        }
    }
}

/// The body of a successful authorization-code grant front leg.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthorizationCodeContent {
    pub code: String,
    pub scope: String,
}

/// The body of a successful token response, RFC 6749 §5.1.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TokenContent {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_in: Option<i64>,
    pub scope: String,
}

/// The body of a token introspection response, RFC 7662 §2.2.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IntrospectionContent {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl IntrospectionContent {
    /// The response the contract requires for any token the engine cannot
    /// vouch for: unknown, expired, revoked, or owned by another client.
    pub fn inactive() -> Self {
        Self {
            active: false,
            scope: None,
            client_id: None,
            username: None,
            token_type: None,
            exp: None,
            iat: None,
        }
    }
}

/// The tagged union of everything an endpoint can return in a response
/// body. Exactly one variant is ever populated, mirroring the
/// `Optional[Union[...]]` content field of the dynamically-typed response
/// this engine's content model was adapted from — here the compiler
/// enforces the "exactly one" part.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ResponseContent {
    Error(ErrorContent),
    AuthorizationCode(AuthorizationCodeContent),
    Token(TokenContent),
    Introspection(IntrospectionContent),
}

/// A transport-agnostic OAuth 2.0 response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub content: ResponseContent,
}

impl Response {
    fn default_headers() -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Cache-Control".to_string(), "no-store".to_string());
        headers.insert("Pragma".to_string(), "no-cache".to_string());
        headers
    }

    pub fn error(err: &Error) -> Self {
        Self {
            status_code: err.status_code(),
            headers: Self::default_headers(),
            content: ResponseContent::Error(err.into()),
        }
    }

    pub fn authorization_code(content: AuthorizationCodeContent) -> Self {
        Self {
            status_code: 200,
            headers: Self::default_headers(),
            content: ResponseContent::AuthorizationCode(content),
        }
    }

    pub fn token(content: TokenContent) -> Self {
        Self {
            status_code: 200,
            headers: Self::default_headers(),
            content: ResponseContent::Token(content),
        }
    }

    pub fn introspection(content: IntrospectionContent) -> Self {
        Self {
            status_code: 200,
            headers: Self::default_headers(),
            content: ResponseContent::Introspection(content),
        }
    }

    /// A 302 to `location` (built by [`build_code_redirect_uri`],
    /// [`build_token_redirect_uri`], or [`build_error_redirect_uri`]).
    /// `content` mirrors what's encoded in the redirect so a host that
    /// wants to log or test the outcome doesn't have to re-parse its own
    /// query string or fragment.
    pub fn redirect(location: String, content: ResponseContent) -> Self {
        let mut headers = Self::default_headers();
        headers.insert("Location".to_string(), location);
        Self {
            status_code: 302,
            headers,
            content,
        }
    }
}

/// Build the `redirect_uri` a 302 response should target for a successful
/// authorization-code grant, appending `code`/`scope`/`state` as a query
/// string.
pub fn build_code_redirect_uri(redirect_uri: &str, code: &str, scope: &str, state: &str) -> String {
    let separator = if redirect_uri.contains('?') { '&' } else { '?' };
    let mut uri = format!("{redirect_uri}{separator}code={}", urlencode(code));
    if !state.is_empty() {
        uri.push_str(&format!("&state={}", urlencode(state)));
    }
    if !scope.is_empty() {
        uri.push_str(&format!("&scope={}", urlencode(scope)));
    }
    uri
}

/// Build the `redirect_uri` fragment an implicit-grant 302 response should
/// target.
pub fn build_token_redirect_uri(
    redirect_uri: &str,
    access_token: &str,
    expires_in: i64,
    scope: &str,
    state: &str,
) -> String {
    let mut fragment = format!(
        "access_token={}&token_type=Bearer&expires_in={expires_in}",
        urlencode(access_token)
    );
    if !scope.is_empty() {
        fragment.push_str(&format!("&scope={}", urlencode(scope)));
    }
    if !state.is_empty() {
        fragment.push_str(&format!("&state={}", urlencode(state)));
    }
    format!("{redirect_uri}#{fragment}")
}

/// Build the `redirect_uri` an authorization-endpoint error response
/// should target, echoing `state` when present.
pub fn build_error_redirect_uri(redirect_uri: &str, err: &Error, state: &str) -> String {
    let separator = if redirect_uri.contains('?') { '&' } else { '?' };
    let mut uri = format!(
        "{redirect_uri}{separator}error={}",
        urlencode(err.error_code())
    );
    let description = err.description();
    if !description.is_empty() {
        uri.push_str(&format!("&error_description={}", urlencode(&description)));
    }
    if !state.is_empty() {
        uri.push_str(&format!("&state={}", urlencode(state)));
    }
    uri
}

/// Minimal `application/x-www-form-urlencoded` percent-encoding for the
/// handful of characters that show up in redirect parameters (codes,
/// tokens, and caller-supplied `state`/`scope`).
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
