use crate::types::ChallengeMethod;

/// A single-use credential exchanged for a token in the authorization-code
/// grant. Lifecycle is entirely owned by the storage adapter: the engine
/// constructs one via [`crate::storage::Storage::create_authorization_code`]
/// and never mutates it directly, only ever asking the adapter to delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode {
    pub code: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: Vec<String>,
    pub user_id: String,
    pub code_challenge: Option<String>,
    pub code_challenge_method: Option<ChallengeMethod>,
    /// Issuance time, epoch-seconds.
    pub auth_time: i64,
    /// Lifetime, seconds.
    pub expires_in: i64,
}

impl AuthorizationCode {
    /// `now − auth_time < expires_in`.
    pub fn is_expired(&self, now: i64) -> bool {
        now - self.auth_time >= self.expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(auth_time: i64, expires_in: i64) -> AuthorizationCode {
        AuthorizationCode {
            code: "abc".into(),
            client_id: "client-1".into(),
            redirect_uri: "https://client.example/cb".into(),
            scope: vec!["read".into()],
            user_id: "user-1".into(),
            code_challenge: None,
            code_challenge_method: None,
            auth_time,
            expires_in,
        }
    }

    #[test]
    fn not_expired_before_lifetime_elapses() {
        assert!(!code(1_000, 300).is_expired(1_299));
    }

    #[test]
    fn expired_exactly_at_lifetime_boundary() {
        assert!(code(1_000, 300).is_expired(1_300));
    }

    #[test]
    fn expired_well_past_lifetime() {
        assert!(code(1_000, 300).is_expired(10_000));
    }
}
