//! PKCE (Proof Key for Code Exchange) utilities, RFC 7636.
//!
//! PKCE binds an authorization code to a per-request secret so that an
//! intercepted code cannot be redeemed by an attacker who lacks the
//! verifier.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};

use super::compare::ct_eq;

/// Minimum length for code_verifier as per RFC 7636.
pub const CODE_VERIFIER_MIN_LENGTH: usize = 43;

/// Maximum length for code_verifier as per RFC 7636.
pub const CODE_VERIFIER_MAX_LENGTH: usize = 128;

pub const PKCE_METHOD_S256: &str = "S256";
pub const PKCE_METHOD_PLAIN: &str = "plain";

/// Verify `code_verifier` against a stored `code_challenge` using `method`.
///
/// Returns `false` for any method other than `S256`/`plain`, including
/// values that passed an earlier `code_challenge_method` whitelist check —
/// callers are expected to reject unknown methods before a code is ever
/// issued, not rely on this function to do it.
///
/// ```
/// use oauth2_engine::utils::pkce::verify_pkce;
///
/// let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
/// let challenge = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";
/// assert!(verify_pkce(verifier, challenge, "S256"));
/// ```
pub fn verify_pkce(code_verifier: &str, code_challenge: &str, method: &str) -> bool {
    match method {
        PKCE_METHOD_S256 => ct_eq(&compute_s256_challenge(code_verifier), code_challenge),
        PKCE_METHOD_PLAIN => ct_eq(code_verifier, code_challenge),
        _ => false,
    }
}

/// Compute `code_challenge = BASE64URL(SHA256(code_verifier))`.
pub fn compute_s256_challenge(code_verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code_verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Validate a `code_verifier`: 43-128 chars, unreserved URI characters only.
pub fn validate_code_verifier(verifier: &str) -> bool {
    let len = verifier.len();
    if len < CODE_VERIFIER_MIN_LENGTH || len > CODE_VERIFIER_MAX_LENGTH {
        return false;
    }

    verifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_' || c == '~')
}

/// Validate a `code_challenge`'s shape for the `S256` method: 43 base64url
/// characters (32-byte SHA-256 digest, no padding).
pub fn validate_code_challenge(challenge: &str) -> bool {
    challenge.len() == 43
        && challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
