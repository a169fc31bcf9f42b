//! Wall-clock access, isolated in one place so every expiry check in the
//! engine (`AuthorizationCode::is_expired`, `Token::is_access_token_active`,
//! `Token::is_refresh_token_active`) reads `now` the same way.

/// The current time, epoch-seconds. The engine treats this as opaque: it
/// never schedules anything against it, only ever compares it to a stored
/// `auth_time`/`issued_at`.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
