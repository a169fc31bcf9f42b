pub mod basic_auth;
pub mod compare;
pub mod pkce;
pub mod scope;
pub mod time;
pub mod token;
