//! Conversion between the wire representation of `scope` (a single
//! space-separated string) and the list representation the engine checks
//! against a client's allowed scopes.

/// Split a space-separated `scope` string into its constituent tokens,
/// dropping empty tokens produced by repeated or leading/trailing spaces.
pub fn scope_to_list(scope: &str) -> Vec<String> {
    scope
        .split(' ')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join scope tokens back into the wire representation.
pub fn list_to_scope(scopes: &[String]) -> String {
    scopes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            scope_to_list("read write admin"),
            vec!["read", "write", "admin"]
        );
    }

    #[test]
    fn drops_empty_tokens() {
        assert_eq!(scope_to_list("read   write"), vec!["read", "write"]);
        assert_eq!(scope_to_list(""), Vec::<String>::new());
    }

    #[test]
    fn list_to_scope_is_the_inverse() {
        let scopes = vec!["read".to_string(), "write".to_string()];
        assert_eq!(list_to_scope(&scopes), "read write");
    }
}
