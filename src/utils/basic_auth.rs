//! HTTP Basic authentication, used by the token and introspection endpoints
//! to authenticate confidential clients (RFC 6749 §2.3.1).

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// A client's credentials as presented on a request, before the storage
/// adapter has had a chance to look the client up.
///
/// Distinguishing "no credentials at all" from "client_id with no secret"
/// matters: a public client authenticates with only its `client_id`, while
/// a confidential client that claims to have no secret is simply wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Basic` header present and well-formed.
    Basic { client_id: String, client_secret: String },
    /// No `Authorization` header; `client_id` taken from the request body.
    ClientIdOnly { client_id: String },
    /// Neither an `Authorization` header nor a body `client_id`.
    None,
}

/// Decode an `Authorization: Basic base64(client_id:client_secret)` header.
///
/// Returns `None` if the header is absent, not `Basic`, not valid base64, or
/// not valid UTF-8 `id:secret` once decoded.
pub fn decode_basic_auth(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (id, secret) = decoded.split_once(':')?;
    Some((id.to_string(), secret.to_string()))
}

/// Encode a `client_id`/`client_secret` pair as a Basic auth header value.
pub fn encode_basic_auth(client_id: &str, client_secret: &str) -> String {
    let raw = format!("{client_id}:{client_secret}");
    format!("Basic {}", STANDARD.encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_encode_and_decode() {
        let header = encode_basic_auth("my-client", "s3cr3t");
        let (id, secret) = decode_basic_auth(&header).unwrap();
        assert_eq!(id, "my-client");
        assert_eq!(secret, "s3cr3t");
    }

    #[test]
    fn rejects_non_basic_scheme() {
        assert!(decode_basic_auth("Bearer abc123").is_none());
    }

    #[test]
    fn rejects_malformed_base64() {
        assert!(decode_basic_auth("Basic not-base64!!").is_none());
    }

    #[test]
    fn rejects_missing_colon_separator() {
        let encoded = STANDARD.encode("no-colon-here");
        assert!(decode_basic_auth(&format!("Basic {encoded}")).is_none());
    }
}
