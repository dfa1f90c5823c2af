//! User store trait

#[cfg(test)]
use mockall::automock;

use serde::{Deserialize, Serialize};

use super::entity::UserAccount;
use crate::domain::DomainError;

/// Account fields a store backend allows editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitySet {
    /// Username and password
    pub credentials: bool,
    pub display_name: bool,
    pub email_address: bool,
    pub team_membership: bool,
}

impl CapabilitySet {
    /// Every field is editable
    pub fn all() -> Self {
        Self {
            credentials: true,
            display_name: true,
            email_address: true,
            team_membership: true,
        }
    }

    /// Nothing the store owns is editable, e.g. an external directory
    pub fn none() -> Self {
        Self {
            credentials: false,
            display_name: false,
            email_address: false,
            team_membership: false,
        }
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::all()
    }
}

/// Store of user accounts
#[cfg_attr(test, automock)]
pub trait UserStore: Send + Sync {
    /// Look up an account by username, ignoring case
    fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Create or update an account.
    ///
    /// `original_username` is empty on create. On update it names the record
    /// being replaced, which differs from `account.username()` on rename.
    fn upsert(
        &self,
        original_username: &str,
        account: &UserAccount,
        is_create: bool,
    ) -> Result<(), DomainError>;

    /// Fields this store lets callers change
    fn capabilities(&self) -> CapabilitySet;

    /// Check if a username is taken
    fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_default_to_all() {
        assert_eq!(CapabilitySet::default(), CapabilitySet::all());
    }

    #[test]
    fn test_capabilities_partial_deserialize() {
        let caps: CapabilitySet =
            serde_json::from_str(r#"{"credentials": false, "team_membership": false}"#).unwrap();

        assert!(!caps.credentials);
        assert!(caps.display_name);
        assert!(caps.email_address);
        assert!(!caps.team_membership);
    }
}
