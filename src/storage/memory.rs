//! A reference in-memory [`Storage`] implementation. Used by the engine's
//! own test suite and available to hosts for prototyping — not a
//! production persistence layer: nothing here survives a restart, and
//! nothing is ever evicted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::StorageError;
use crate::models::{AuthorizationCode, Client, Token, User};
use crate::types::ChallengeMethod;
use crate::utils::compare::ct_eq;
use crate::utils::time::now as wall_clock_now;
use crate::utils::token::generate_token_with_length;

use super::Storage;

struct UserRecord {
    user: User,
    password: String,
}

#[derive(Default)]
struct State {
    clients: HashMap<String, Client>,
    users: HashMap<String, UserRecord>,
    codes: HashMap<String, AuthorizationCode>,
    tokens_by_access: HashMap<String, Token>,
    tokens_by_refresh: HashMap<String, String>,
}

/// An in-memory [`Storage`] adapter, guarded by a single async mutex. Good
/// enough for tests and for a host getting a first integration working;
/// the mutex makes every operation serialize, which trivially satisfies
/// the "at most one successful redemption" atomicity requirement on
/// `delete_authorization_code` (§5) without a real transaction.
pub struct MemoryStorage {
    state: Mutex<State>,
    clock: AtomicI64,
    clock_overridden: std::sync::atomic::AtomicBool,
    token_length: usize,
    config: Config,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Build an adapter whose minted codes/tokens carry the lifetimes from
    /// `config`, matching whatever [`Config`] the engine's endpoints were
    /// built with.
    pub fn with_config(config: Config) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock: AtomicI64::new(0),
            clock_overridden: std::sync::atomic::AtomicBool::new(false),
            token_length: config.token_length,
            config,
        }
    }

    /// Pin `auth_time`/`issued_at` stamps on newly-created codes/tokens to a
    /// fixed value instead of wall-clock time, so a test can drive expiry
    /// deterministically. Not used by [`MemoryStorage::age_code`]/
    /// [`MemoryStorage::age_token`], which always set an explicit value.
    pub fn set_now(&self, now: i64) {
        self.clock.store(now, Ordering::SeqCst);
        self.clock_overridden.store(true, Ordering::SeqCst);
    }

    fn now(&self) -> i64 {
        if self.clock_overridden.load(Ordering::SeqCst) {
            self.clock.load(Ordering::SeqCst)
        } else {
            wall_clock_now()
        }
    }

    /// Seed a client for test setup.
    pub async fn put_client(&self, client: Client) {
        self.state.lock().await.clients.insert(client.client_id.clone(), client);
    }

    /// Seed a user (with its plaintext password, for the password grant)
    /// for test setup.
    pub async fn put_user(&self, user: User, password: impl Into<String>) {
        self.state.lock().await.users.insert(
            user.id.clone(),
            UserRecord { user, password: password.into() },
        );
    }

    /// Directly mutate a stored code's `auth_time`, for tests that need to
    /// simulate expiry (§8 scenario 2).
    pub async fn age_code(&self, code: &str, auth_time: i64) {
        if let Some(c) = self.state.lock().await.codes.get_mut(code) {
            c.auth_time = auth_time;
        }
    }

    /// Directly mutate a stored token's `issued_at`, for tests that need to
    /// simulate expiry (§8 scenario 3).
    pub async fn age_token(&self, access_token: &str, issued_at: i64) {
        if let Some(t) = self.state.lock().await.tokens_by_access.get_mut(access_token) {
            t.issued_at = issued_at;
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_client(
        &self,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> Result<Option<Client>, StorageError> {
        let state = self.state.lock().await;
        let Some(client) = state.clients.get(client_id) else {
            return Ok(None);
        };
        if let Some(secret) = client_secret {
            match &client.client_secret {
                Some(stored) if ct_eq(stored, secret) => {}
                _ => return Ok(None),
            }
        }
        Ok(Some(client.clone()))
    }

    async fn get_user(&self, username: &str, password: &str) -> Result<Option<User>, StorageError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .get(username)
            .filter(|record| ct_eq(&record.password, password))
            .map(|record| record.user.clone()))
    }

    async fn create_authorization_code(
        &self,
        client_id: &str,
        redirect_uri: &str,
        scope: &[String],
        user_id: &str,
        code_challenge: Option<&str>,
        code_challenge_method: Option<ChallengeMethod>,
    ) -> Result<AuthorizationCode, StorageError> {
        let code = AuthorizationCode {
            code: generate_token_with_length(self.token_length),
            client_id: client_id.to_string(),
            redirect_uri: redirect_uri.to_string(),
            scope: scope.to_vec(),
            user_id: user_id.to_string(),
            code_challenge: code_challenge.map(str::to_string),
            code_challenge_method,
            auth_time: self.now(),
            expires_in: self.config.authorization_code_expires_in,
        };
        self.state.lock().await.codes.insert(code.code.clone(), code.clone());
        Ok(code)
    }

    async fn get_authorization_code(
        &self,
        code: &str,
        client_id: &str,
    ) -> Result<Option<AuthorizationCode>, StorageError> {
        let state = self.state.lock().await;
        Ok(state
            .codes
            .get(code)
            .filter(|c| c.client_id == client_id)
            .cloned())
    }

    async fn delete_authorization_code(
        &self,
        code: &str,
        client_id: &str,
    ) -> Result<(), StorageError> {
        let mut state = self.state.lock().await;
        if state.codes.get(code).is_some_and(|c| c.client_id == client_id) {
            state.codes.remove(code);
        }
        Ok(())
    }

    async fn create_token(
        &self,
        client_id: &str,
        scope: &[String],
        user_id: Option<&str>,
    ) -> Result<Token, StorageError> {
        let token = Token {
            access_token: generate_token_with_length(self.token_length),
            refresh_token: Some(generate_token_with_length(self.token_length)),
            token_type: "Bearer",
            scope: scope.to_vec(),
            client_id: client_id.to_string(),
            user_id: user_id.map(str::to_string),
            issued_at: self.now(),
            expires_in: self.config.token_expires_in,
            refresh_token_expires_in: self.config.refresh_token_expires_in,
        };
        let mut state = self.state.lock().await;
        if let Some(refresh) = &token.refresh_token {
            state
                .tokens_by_refresh
                .insert(refresh.clone(), token.access_token.clone());
        }
        state.tokens_by_access.insert(token.access_token.clone(), token.clone());
        Ok(token)
    }

    async fn get_refresh_token(
        &self,
        refresh_token: &str,
        client_id: &str,
    ) -> Result<Option<Token>, StorageError> {
        let state = self.state.lock().await;
        Ok(state
            .tokens_by_refresh
            .get(refresh_token)
            .and_then(|access| state.tokens_by_access.get(access))
            .filter(|t| t.client_id == client_id)
            .cloned())
    }

    async fn revoke_token(&self, refresh_token: &str, client_id: &str) -> Result<(), StorageError> {
        let mut state = self.state.lock().await;
        let Some(access) = state.tokens_by_refresh.get(refresh_token).cloned() else {
            return Ok(());
        };
        if state.tokens_by_access.get(&access).is_some_and(|t| t.client_id == client_id) {
            state.tokens_by_access.remove(&access);
            state.tokens_by_refresh.remove(refresh_token);
        }
        Ok(())
    }

    async fn get_token_for_introspection(
        &self,
        token: &str,
        client_id: &str,
    ) -> Result<Option<Token>, StorageError> {
        let state = self.state.lock().await;
        Ok(state
            .tokens_by_access
            .get(token)
            .filter(|t| t.client_id == client_id)
            .cloned())
    }
}
