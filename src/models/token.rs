/// An issued access/refresh token pair. `refresh_token` is absent for
/// grants that never mint one (only the implicit grant, per §4.4); every
/// other grant issues both halves together and revokes/rotates them
/// together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: &'static str,
    pub scope: Vec<String>,
    pub client_id: String,
    pub user_id: Option<String>,
    /// Issuance time, epoch-seconds.
    pub issued_at: i64,
    /// Access-token lifetime, seconds.
    pub expires_in: i64,
    /// Refresh-token lifetime, seconds. Meaningless when `refresh_token` is
    /// `None`.
    pub refresh_token_expires_in: i64,
}

impl Token {
    /// `now − issued_at < expires_in`.
    pub fn is_access_token_active(&self, now: i64) -> bool {
        now - self.issued_at < self.expires_in
    }

    /// `now − issued_at < refresh_token_expires_in`.
    pub fn is_refresh_token_active(&self, now: i64) -> bool {
        now - self.issued_at < self.refresh_token_expires_in
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope.iter().any(|s| s == scope)
    }
}
