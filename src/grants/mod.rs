//! Per-grant-type and per-response-type state machines (§4.4, §4.5). Each
//! function here runs *after* the endpoint-level pre-checks in §4.3 have
//! already passed — client authentication, client capability, and scope
//! are never re-checked here. What's left is the business logic specific
//! to one flow: looking up a code or token, checking its expiry and
//! ownership, and minting what comes next.
//!
//! Grounded throughout on `ptn1411-auth-server/src/services/oauth.rs`
//! (`create_authorization_code`, `exchange_code_for_tokens`,
//! `client_credentials_grant`, `refresh_token`) for check ordering and the
//! "look up, validate, mint, store" shape — generalized from that file's
//! concrete `sqlx`/`Uuid`/JWT types to the storage-adapter contract.

pub mod authorization_code;
pub mod client_credentials;
pub mod implicit;
pub mod password;
pub mod refresh_token;
