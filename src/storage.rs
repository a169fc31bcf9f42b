//! The storage-adapter capability contract (§6.3). A host implements this
//! trait against whatever it actually persists clients/users/codes/tokens
//! in; the engine holds it as `Arc<dyn Storage>` and never talks to a
//! concrete store directly.
//!
//! Modeled on `Async-IO-pierre_mcp_server`'s `#[async_trait] trait
//! DatabaseProvider: Send + Sync` shape — the teacher codebase never needed
//! an object-safe async storage trait since it depended on a concrete
//! `sqlx::MySqlPool` throughout, so this is a pack import, not a
//! teacher-transform.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{AuthorizationCode, Client, Token, User};
use crate::types::ChallengeMethod;

pub mod memory;

/// The nine operations a host must provide. Every method is async: this is
/// the engine's only suspension point (§5).
#[async_trait]
pub trait Storage: Send + Sync {
    /// Look up a client by id. When `client_secret` is `Some`, the adapter
    /// must verify it (in constant time) and return `None` on mismatch —
    /// the engine itself never sees the stored secret.
    async fn get_client(
        &self,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> Result<Option<Client>, StorageError>;

    /// Verify a resource owner's credentials for the password grant.
    async fn get_user(&self, username: &str, password: &str) -> Result<Option<User>, StorageError>;

    /// Mint and persist a fresh authorization code.
    #[allow(clippy::too_many_arguments)]
    async fn create_authorization_code(
        &self,
        client_id: &str,
        redirect_uri: &str,
        scope: &[String],
        user_id: &str,
        code_challenge: Option<&str>,
        code_challenge_method: Option<ChallengeMethod>,
    ) -> Result<AuthorizationCode, StorageError>;

    /// Look up a code by value, scoped to the client that is redeeming it.
    async fn get_authorization_code(
        &self,
        code: &str,
        client_id: &str,
    ) -> Result<Option<AuthorizationCode>, StorageError>;

    /// Delete a code. Atomic and idempotent: concurrent redemption attempts
    /// of the same code must result in at most one caller observing the
    /// code as still present (§5 Atomicity).
    async fn delete_authorization_code(
        &self,
        code: &str,
        client_id: &str,
    ) -> Result<(), StorageError>;

    /// Mint and persist a fresh access/refresh token pair. `user_id` is
    /// absent for the client-credentials grant.
    async fn create_token(
        &self,
        client_id: &str,
        scope: &[String],
        user_id: Option<&str>,
    ) -> Result<Token, StorageError>;

    /// Look up a token by its refresh-token value, scoped to the client
    /// presenting it.
    async fn get_refresh_token(
        &self,
        refresh_token: &str,
        client_id: &str,
    ) -> Result<Option<Token>, StorageError>;

    /// Revoke a token by its refresh-token value.
    async fn revoke_token(&self, refresh_token: &str, client_id: &str) -> Result<(), StorageError>;

    /// Look up a token by its access-token value for introspection,
    /// scoped to the requesting client. Adapters must return `None` rather
    /// than a token belonging to a different client — the introspection
    /// endpoint relies on this to avoid ever seeing cross-client token data.
    async fn get_token_for_introspection(
        &self,
        token: &str,
        client_id: &str,
    ) -> Result<Option<Token>, StorageError>;
}
