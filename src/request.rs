//! The normalized request the engine consumes. A transport adapter (out of
//! scope for this crate) is responsible for producing one of these from
//! whatever framework it's embedded in.

use std::collections::HashMap;

use crate::types::HttpMethod;

/// An opaque identifier for the resource owner authenticated on this
/// request, if any. The authorization endpoint requires one; the token and
/// introspection endpoints don't look at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

/// A transport-agnostic OAuth 2.0 request.
///
/// `query` and `post` are flat string maps rather than typed structs: the
/// set of parameters actually used varies per grant/response type, and
/// requiring every caller to populate a dozen always-empty fields would
/// fight the borrow checker for no benefit. Each endpoint pulls out exactly
/// the parameters its flow needs and is responsible for treating an absent
/// key the same as an empty value (see the parameter-validation matrix).
#[derive(Debug, Clone)]
pub struct Request {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub post: HashMap<String, String>,
    pub user: Option<AuthenticatedUser>,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query: HashMap::new(),
            post: HashMap::new(),
            user: None,
        }
    }

    /// Whether the request's URL declares an `https` scheme.
    pub fn is_secure_transport(&self) -> bool {
        self.url.starts_with("https://")
    }

    /// Look up a query parameter, treating an absent key the same as an
    /// empty string (the matrix in §4.8 makes no distinction between the
    /// two).
    pub fn query_param(&self, name: &str) -> &str {
        self.query.get(name).map(String::as_str).unwrap_or("")
    }

    /// Look up a form-body parameter, same absent-is-empty convention as
    /// [`Request::query_param`].
    pub fn post_param(&self, name: &str) -> &str {
        self.post.get(name).map(String::as_str).unwrap_or("")
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
