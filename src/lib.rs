//! A transport- and storage-agnostic OAuth 2.0 authorization-server engine
//! (RFC 6749, plus PKCE/RFC 7636).
//!
//! The engine validates protocol requests, drives the grant-type state
//! machines, and produces protocol-compliant responses; it never touches a
//! socket or a database. A host wires it up by:
//!
//! 1. implementing [`storage::Storage`] against whatever persists its
//!    clients/users/codes/tokens (or starting from
//!    [`storage::memory::MemoryStorage`] while prototyping),
//! 2. constructing a [`config::Config`],
//! 3. building one each of [`endpoints::AuthorizationEndpoint`],
//!    [`endpoints::TokenEndpoint`], and [`endpoints::IntrospectionEndpoint`],
//!    and
//! 4. translating its framework's HTTP requests into [`request::Request`]
//!    and its [`response::Response`] values back into HTTP responses.
//!
//! ```
//! use std::sync::Arc;
//! use oauth2_engine::{AuthorizationEndpoint, Config};
//! use oauth2_engine::storage::memory::MemoryStorage;
//!
//! # async fn example() {
//! let storage = Arc::new(MemoryStorage::new());
//! let endpoint = AuthorizationEndpoint::new(storage, Config::default());
//! # let _ = endpoint;
//! # }
//! ```

pub mod config;
pub mod endpoints;
pub mod error;
pub mod grants;
pub mod models;
pub mod request;
pub mod response;
pub mod storage;
pub mod types;
pub mod utils;

pub use config::Config;
pub use endpoints::{AuthorizationEndpoint, IntrospectionEndpoint, TokenEndpoint};
pub use error::Error;
pub use request::{AuthenticatedUser, Request};
pub use response::Response;
pub use storage::Storage;
