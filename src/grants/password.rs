//! Resource-owner password-credentials grant (§4.5 Password grant). The
//! storage adapter owns password verification; this handler only decides
//! what counts as "missing" and turns a failed lookup into the RFC-mandated
//! error.

use std::sync::Arc;

use crate::error::Error;
use crate::models::{Client, Token};
use crate::storage::Storage;

pub async fn grant(
    storage: &Arc<dyn Storage>,
    client: &Client,
    username: &str,
    password: &str,
    scope: &[String],
) -> Result<Token, Error> {
    if username.is_empty() || password.is_empty() {
        return Err(Error::InvalidGrant("Invalid credentials given.".into()));
    }

    let user = storage
        .get_user(username, password)
        .await?
        .ok_or_else(|| Error::InvalidGrant("Invalid credentials given.".into()))?;

    storage
        .create_token(&client.client_id, scope, Some(&user.id))
        .await
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::storage::memory::MemoryStorage;
    use crate::types::{GrantType, ResponseType};
    use std::collections::HashSet;

    fn client() -> Client {
        Client {
            client_id: "client-1".into(),
            client_secret: Some("s3cr3t".into()),
            redirect_uris: HashSet::new(),
            grant_types: HashSet::from([GrantType::Password]),
            response_types: HashSet::from([ResponseType::Code]),
            scopes: HashSet::from(["read".to_string()]),
        }
    }

    #[tokio::test]
    async fn rejects_empty_credentials() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let err = grant(&storage, &client(), "", "", &[]).await.unwrap_err();
        assert_eq!(err, Error::InvalidGrant("Invalid credentials given.".into()));
    }

    #[tokio::test]
    async fn rejects_wrong_password() {
        let memory = MemoryStorage::new();
        memory.put_user(User::new("user-1"), "correct-horse").await;
        let storage: Arc<dyn Storage> = Arc::new(memory);

        let err = grant(&storage, &client(), "user-1", "wrong", &[])
            .await
            .unwrap_err();
        assert_eq!(err, Error::InvalidGrant("Invalid credentials given.".into()));
    }

    #[tokio::test]
    async fn issues_a_token_on_valid_credentials() {
        let memory = MemoryStorage::new();
        memory.put_user(User::new("user-1"), "correct-horse").await;
        let storage: Arc<dyn Storage> = Arc::new(memory);

        let token = grant(&storage, &client(), "user-1", "correct-horse", &["read".to_string()])
            .await
            .unwrap();
        assert_eq!(token.user_id.as_deref(), Some("user-1"));
        assert_eq!(token.client_id, "client-1");
    }
}
