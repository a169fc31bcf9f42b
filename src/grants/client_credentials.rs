//! Client-credentials grant (§4.5 ClientCredentials grant): no resource
//! owner is involved, so no `user_id` is attached to the minted token.

use std::sync::Arc;

use crate::error::Error;
use crate::models::{Client, Token};
use crate::storage::Storage;

pub async fn grant(
    storage: &Arc<dyn Storage>,
    client: &Client,
    scope: &[String],
) -> Result<Token, Error> {
    storage
        .create_token(&client.client_id, scope, None)
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
            grant_types: HashSet::from([GrantType::ClientCredentials]),
            response_types: HashSet::from([ResponseType::Code]),
            scopes: HashSet::from(["read".to_string()]),
        }
    }

    #[tokio::test]
    async fn issues_a_token_with_no_user() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let token = grant(&storage, &client(), &["read".to_string()]).await.unwrap();
        assert_eq!(token.client_id, "client-1");
        assert!(token.user_id.is_none());
    }
}
