//! Helper functions to build UserContext from a catalog
//!
//! The view history is the list of content catalog rows whose `username`
//! equals the requested user. An unknown user simply has no history.

use crate::types::UserContext;
use data_loader::Catalog;
use tracing::debug;

/// Build a UserContext from the content catalog for a given user
///
/// Viewed rows keep file order and duplicates: a user who viewed the same
/// title twice seeds candidate generation twice.
pub fn build_user_context(catalog: &Catalog, username: &str) -> UserContext {
    let mut context = UserContext::new(username);
    context.viewed_items = catalog.view_indices(username).to_vec();

    debug!(
        "User '{}' has {} viewed rows",
        username,
        context.viewed_items.len()
    );
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{CatalogSchema, Item};

    fn create_test_catalog() -> Catalog {
        let mut catalog = Catalog::new(CatalogSchema::Content);
        catalog.push_item(Item::new("Post A").with_username("alice"));
        catalog.push_item(Item::new("Post B").with_username("bob"));
        catalog.push_item(Item::new("Post C").with_username("alice"));
        catalog.push_item(Item::new("Post A").with_username("alice"));
        catalog
    }

    #[test]
    fn test_build_user_context_basic() {
        let catalog = create_test_catalog();
        let context = build_user_context(&catalog, "alice");

        assert_eq!(context.username, "alice");
        assert_eq!(context.viewed_items, vec![0, 2, 3]);
        assert!(context.has_history());
        assert!(context.category.is_none());
        assert!(context.moods.is_empty());
    }

    #[test]
    fn test_unknown_user_has_empty_history() {
        let catalog = create_test_catalog();
        let context = build_user_context(&catalog, "mallory");

        assert_eq!(context.username, "mallory");
        assert!(!context.has_history());
    }

    #[test]
    fn test_username_match_is_exact() {
        let catalog = create_test_catalog();

        assert!(!build_user_context(&catalog, "Alice").has_history());
        assert!(!build_user_context(&catalog, "alice ").has_history());
    }
}
