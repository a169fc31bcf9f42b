//! The implicit grant (§4.4 ResponseTypeToken handler): front-leg only,
//! no PKCE, no refresh token on the wire. `scope`/`redirect_uri`/client
//! capability/the authenticated user were already checked by the
//! authorization endpoint.

use std::sync::Arc;

use crate::error::Error;
use crate::models::{Client, Token};
use crate::storage::Storage;

/// Mint an access token for the implicit grant. The storage adapter still
/// mints a refresh token alongside it (the contract has no access-token-only
/// creation call) — the authorization endpoint is responsible for never
/// putting it on the wire (§4.4).
pub async fn issue_token(
    storage: &Arc<dyn Storage>,
    client: &Client,
    scope: &[String],
    user_id: &str,
) -> Result<Token, Error> {
    storage
        .create_token(&client.client_id, scope, Some(user_id))
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
            client_secret: None,
            redirect_uris: HashSet::from(["https://client.example/cb".to_string()]),
            grant_types: HashSet::from([GrantType::ClientCredentials]),
            response_types: HashSet::from([ResponseType::Token]),
            scopes: HashSet::from(["read".to_string()]),
        }
    }

    #[tokio::test]
    async fn issues_a_token_bound_to_the_client_and_user() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let token = issue_token(&storage, &client(), &["read".to_string()], "user-1")
            .await
            .unwrap();
        assert_eq!(token.client_id, "client-1");
        assert_eq!(token.user_id.as_deref(), Some("user-1"));
    }
}
