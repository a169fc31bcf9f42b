//! Generation of opaque bearer tokens (access tokens, refresh tokens,
//! authorization codes).

use rand::Rng;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Default length (in characters, not bytes) of a generated token: 256 bits
/// of entropy encoded over a 64-symbol alphabet.
pub const DEFAULT_TOKEN_LENGTH: usize = 43;

/// Generate a cryptographically random, URL-safe opaque token of `length`
/// characters.
pub fn generate_token_with_length(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_token_with_length_honors_length() {
        assert_eq!(generate_token_with_length(DEFAULT_TOKEN_LENGTH).len(), DEFAULT_TOKEN_LENGTH);
        assert_eq!(generate_token_with_length(64).len(), 64);
    }

    #[test]
    fn generate_token_uses_url_safe_charset() {
        let token = generate_token_with_length(DEFAULT_TOKEN_LENGTH);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn generate_token_is_not_deterministic() {
        assert_ne!(
            generate_token_with_length(DEFAULT_TOKEN_LENGTH),
            generate_token_with_length(DEFAULT_TOKEN_LENGTH)
        );
    }
}
