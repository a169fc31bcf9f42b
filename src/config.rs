//! Engine configuration.
//!
//! The engine never reads the environment itself: a host constructs a
//! [`Config`] value (from env vars, a file, whatever it likes) and passes it
//! in when building the endpoints. This keeps the engine testable without
//! process-global state and keeps "how configuration is sourced" a host
//! concern, not a library one.

/// Token and code lifetimes, plus the handful of toggles the engine itself
/// needs to know about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Access token lifetime, in seconds.
    pub token_expires_in: i64,
    /// Refresh token lifetime, in seconds.
    pub refresh_token_expires_in: i64,
    /// Authorization code lifetime, in seconds.
    pub authorization_code_expires_in: i64,
    /// When `true`, the `https`-only transport check is skipped. Intended
    /// for tests and local development only; a host must never set this in
    /// production.
    pub insecure_transport: bool,
    /// Length, in characters, of generated access/refresh tokens and
    /// authorization codes.
    pub token_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_expires_in: 900,
            refresh_token_expires_in: 604_800,
            authorization_code_expires_in: 300,
            insecure_transport: false,
            token_length: crate::utils::token::DEFAULT_TOKEN_LENGTH,
        }
    }
}

impl Config {
    /// Build a `Config` with the default lifetimes but `insecure_transport`
    /// enabled, for use in tests that don't construct `https://` URLs.
    pub fn insecure_for_testing() -> Self {
        Self {
            insecure_transport: true,
            ..Self::default()
        }
    }
}
