//! Refresh-token grant (§4.5 RefreshToken grant): rotating refresh tokens
//! — the presented refresh token is revoked and replaced atomically from
//! the caller's perspective (the storage adapter owns the actual
//! transaction boundary).

use std::sync::Arc;

use crate::error::Error;
use crate::models::{Client, Token};
use crate::storage::Storage;
use crate::utils::time::now;

pub async fn grant(
    storage: &Arc<dyn Storage>,
    client: &Client,
    refresh_token: &str,
) -> Result<Token, Error> {
    if refresh_token.is_empty() {
        return Err(Error::InvalidGrant(String::new()));
    }

    let old = storage
        .get_refresh_token(refresh_token, &client.client_id)
        .await?
        .ok_or_else(|| Error::InvalidGrant(String::new()))?;

    if !old.is_refresh_token_active(now()) {
        return Err(Error::InvalidGrant(String::new()));
    }

    storage.revoke_token(refresh_token, &client.client_id).await?;

    storage
        .create_token(&client.client_id, &old.scope, old.user_id.as_deref())
        .await
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use crate::types::{GrantType, ResponseType};
    use std::collections::HashSet;

    fn client() -> Client {
        Client {
            client_id: "client-1".into(),
            client_secret: Some("s3cr3t".into()),
            redirect_uris: HashSet::new(),
            grant_types: HashSet::from([GrantType::RefreshToken]),
            response_types: HashSet::from([ResponseType::Code]),
            scopes: HashSet::from(["read".to_string()]),
        }
    }

    #[tokio::test]
    async fn rejects_empty_refresh_token() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let err = grant(&storage, &client(), "").await.unwrap_err();
        assert_eq!(err, Error::InvalidGrant(String::new()));
    }

    #[tokio::test]
    async fn rejects_unknown_refresh_token() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let err = grant(&storage, &client(), "made-up").await.unwrap_err();
        assert_eq!(err, Error::InvalidGrant(String::new()));
    }

    #[tokio::test]
    async fn rotation_invalidates_the_old_refresh_token() {
        let storage = MemoryStorage::new();
        let initial = storage
            .create_token("client-1", &["read".to_string()], Some("user-1"))
            .await
            .unwrap();
        let old_refresh = initial.refresh_token.clone().unwrap();
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let rotated = grant(&storage, &client(), &old_refresh).await.unwrap();
        assert_ne!(rotated.refresh_token, Some(old_refresh.clone()));

        let err = grant(&storage, &client(), &old_refresh).await.unwrap_err();
        assert_eq!(err, Error::InvalidGrant(String::new()));

        // The newly-issued refresh token is good for exactly one more
        // rotation.
        let rotated_again = grant(&storage, &client(), &rotated.refresh_token.clone().unwrap())
            .await
            .unwrap();
        assert!(rotated_again.refresh_token.is_some());
    }

    #[tokio::test]
    async fn rejects_an_expired_refresh_token() {
        let storage = MemoryStorage::new();
        let initial = storage
            .create_token("client-1", &["read".to_string()], Some("user-1"))
            .await
            .unwrap();
        storage
            .age_token(&initial.access_token, now() - 10_000_000)
            .await;
        let refresh = initial.refresh_token.clone().unwrap();
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let err = grant(&storage, &client(), &refresh).await.unwrap_err();
        assert_eq!(err, Error::InvalidGrant(String::new()));
    }
}
