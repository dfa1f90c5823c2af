//! In-memory user store implementation

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::domain::user::{normalize_username, CapabilitySet, UserAccount, UserStore};
use crate::domain::DomainError;

/// In-memory implementation of UserStore
///
/// Usernames are keyed lowercase, so lookups ignore case.
#[derive(Debug)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserAccount>>,
    capabilities: CapabilitySet,
}

impl InMemoryUserStore {
    /// Create a new empty store where every field is editable
    pub fn new() -> Self {
        Self::with_capabilities(CapabilitySet::all())
    }

    /// Create an empty store restricting edits to the given fields
    pub fn with_capabilities(capabilities: CapabilitySet) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            capabilities,
        }
    }

    /// Create a store with initial accounts
    pub fn with_users(users: Vec<UserAccount>, capabilities: CapabilitySet) -> Self {
        let users = users
            .into_iter()
            .map(|u| (u.username().to_string(), u))
            .collect();

        Self {
            users: RwLock::new(users),
            capabilities,
        }
    }

    /// All accounts, ordered by username
    pub fn list(&self) -> Result<Vec<UserAccount>, DomainError> {
        let users = self.users.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut result: Vec<UserAccount> = users.values().cloned().collect();
        result.sort_by(|a, b| a.username().cmp(b.username()));

        Ok(result)
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError> {
        let users = self.users.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(users.get(&normalize_username(username)).cloned())
    }

    fn upsert(
        &self,
        original_username: &str,
        account: &UserAccount,
        is_create: bool,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let username = account.username().to_string();

        if is_create {
            if users.contains_key(&username) {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    username
                )));
            }

            debug!(username = %username, "Inserting account");
            users.insert(username, account.clone());
            return Ok(());
        }

        let original = normalize_username(original_username);

        if !users.contains_key(&original) {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                original
            )));
        }

        if original != username {
            if users.contains_key(&username) {
                return Err(DomainError::conflict(format!(
                    "Failed to rename '{}' because '{}' already exists",
                    original, username
                )));
            }

            debug!(from = %original, to = %username, "Renaming account");
            users.remove(&original);
        }

        users.insert(username, account.clone());
        Ok(())
    }

    fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(username: &str) -> UserAccount {
        UserAccount::new(username, "MD5:hash")
    }

    #[test]
    fn test_create_and_find() {
        let store = InMemoryUserStore::new();
        store.upsert("", &create_test_user("alice"), true).unwrap();

        let found = store.find_by_username("ALICE").unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().username(), "alice");

        assert!(store.find_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_create() {
        let store = InMemoryUserStore::new();
        store.upsert("", &create_test_user("alice"), true).unwrap();

        let result = store.upsert("", &create_test_user("alice"), true);
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[test]
    fn test_update_missing_user() {
        let store = InMemoryUserStore::new();

        let result = store.upsert("alice", &create_test_user("alice"), false);
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn test_rename() {
        let store = InMemoryUserStore::with_users(vec![create_test_user("bob")], CapabilitySet::all());

        store
            .upsert("bob", &create_test_user("robert"), false)
            .unwrap();

        assert!(store.find_by_username("bob").unwrap().is_none());
        assert!(store.find_by_username("robert").unwrap().is_some());
    }

    #[test]
    fn test_rename_onto_existing_user() {
        let store = InMemoryUserStore::with_users(
            vec![create_test_user("bob"), create_test_user("alice")],
            CapabilitySet::all(),
        );

        let result = store.upsert("bob", &create_test_user("alice"), false);
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert!(store.find_by_username("bob").unwrap().is_some());
    }

    #[test]
    fn test_username_exists() {
        let store = InMemoryUserStore::with_users(vec![create_test_user("bob")], CapabilitySet::all());

        assert!(store.username_exists("Bob").unwrap());
        assert!(!store.username_exists("alice").unwrap());
    }

    #[test]
    fn test_list_sorted() {
        let store = InMemoryUserStore::with_users(
            vec![create_test_user("carol"), create_test_user("alice")],
            CapabilitySet::all(),
        );

        let names: Vec<String> = store
            .list()
            .unwrap()
            .iter()
            .map(|u| u.username().to_string())
            .collect();
        assert_eq!(names, vec!["alice", "carol"]);
    }

    #[test]
    fn test_capabilities() {
        let store = InMemoryUserStore::with_capabilities(CapabilitySet::none());
        assert_eq!(store.capabilities(), CapabilitySet::none());
    }
}
