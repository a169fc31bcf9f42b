use std::collections::HashSet;

use crate::types::{GrantType, ResponseType};

/// A registered OAuth 2.0 client. Immutable from the engine's perspective —
/// created and updated out of band through whatever admin surface a host
/// builds on top of the storage adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub client_id: String,
    /// Opaque; compared to a presented secret with [`crate::utils::compare::ct_eq`],
    /// never with `==`. Absent for public clients.
    pub client_secret: Option<String>,
    pub redirect_uris: HashSet<String>,
    pub grant_types: HashSet<GrantType>,
    pub response_types: HashSet<ResponseType>,
    pub scopes: HashSet<String>,
}

impl Client {
    pub fn has_redirect_uri(&self, uri: &str) -> bool {
        self.redirect_uris.contains(uri)
    }

    pub fn allows_grant_type(&self, grant_type: GrantType) -> bool {
        self.grant_types.contains(&grant_type)
    }

    pub fn allows_response_type(&self, response_type: ResponseType) -> bool {
        self.response_types.contains(&response_type)
    }

    /// Every requested scope token must be in this client's allowed set.
    pub fn allows_scopes(&self, requested: &[String]) -> bool {
        requested.iter().all(|s| self.scopes.contains(s))
    }
}
