//! Domain entities the storage adapter reads and writes. The engine treats
//! all four as plain data: it never mutates one in place, only ever asks
//! the adapter to create, fetch, or delete/revoke one.

pub mod authorization_code;
pub mod client;
pub mod token;
pub mod user;

pub use authorization_code::AuthorizationCode;
pub use client::Client;
pub use token::Token;
pub use user::User;
