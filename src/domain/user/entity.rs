//! User account entity and related types

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::validation::normalize_username;
use crate::domain::permission::{AccessPermission, RepositoryPermissionGrant};
use crate::domain::team::normalize_team_name;

/// Role flags of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountRoles {
    /// Administers the whole server
    #[serde(default)]
    pub can_admin: bool,
    /// May fork repositories it can clone
    #[serde(default)]
    pub can_fork: bool,
    /// May create personal repositories
    #[serde(default)]
    pub can_create: bool,
}

/// A user account of the repository manager
///
/// Serialized for display only; storage maps accounts through its own record
/// type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UserAccount {
    /// Lowercase, unique among accounts
    username: String,
    /// Plaintext or digest tagged with a scheme prefix - never exposed in serialization
    #[serde(skip_serializing)]
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_address: Option<String>,
    roles: AccountRoles,
    exclude_from_federation: bool,
    /// Registrant (lowercase) to permission
    permissions: BTreeMap<String, AccessPermission>,
    /// Team names
    teams: BTreeSet<String>,
}

impl UserAccount {
    /// Create an account with only a username and password set
    pub fn new(username: impl AsRef<str>, password: impl Into<String>) -> Self {
        Self {
            username: normalize_username(username.as_ref()),
            password: password.into(),
            ..Self::default()
        }
    }

    // Getters

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Display name, or the username when none is set
    pub fn display_name_or_username(&self) -> &str {
        self.display_name().unwrap_or(&self.username)
    }

    pub fn email_address(&self) -> Option<&str> {
        self.email_address.as_deref()
    }

    pub fn roles(&self) -> AccountRoles {
        self.roles
    }

    pub fn exclude_from_federation(&self) -> bool {
        self.exclude_from_federation
    }

    /// Explicit permission on a registrant
    pub fn repository_permission(&self, registrant: &str) -> Option<AccessPermission> {
        self.permissions.get(&registrant.to_lowercase()).copied()
    }

    /// Explicit grants, ordered by registrant
    pub fn permission_grants(&self) -> Vec<RepositoryPermissionGrant> {
        self.permissions
            .iter()
            .map(|(registrant, permission)| RepositoryPermissionGrant::new(registrant, *permission))
            .collect()
    }

    pub fn teams(&self) -> &BTreeSet<String> {
        &self.teams
    }

    pub fn is_team_member(&self, team_name: &str) -> bool {
        let key = normalize_team_name(team_name);
        self.teams.iter().any(|t| normalize_team_name(t) == key)
    }

    // Mutators

    /// Update the username; it is stored lowercase
    pub fn set_username(&mut self, username: &str) {
        self.username = normalize_username(username);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Blank values clear the display name
    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name.filter(|d| !d.trim().is_empty());
    }

    /// Blank values clear the email address
    pub fn set_email_address(&mut self, email_address: Option<String>) {
        self.email_address = email_address.filter(|e| !e.trim().is_empty());
    }

    pub fn set_roles(&mut self, roles: AccountRoles) {
        self.roles = roles;
    }

    pub fn set_exclude_from_federation(&mut self, exclude: bool) {
        self.exclude_from_federation = exclude;
    }

    /// Set the permission on a registrant. `AccessPermission::None` revokes.
    pub fn set_repository_permission(&mut self, registrant: &str, permission: AccessPermission) {
        let registrant = registrant.trim().to_lowercase();

        if permission == AccessPermission::None {
            self.permissions.remove(&registrant);
        } else {
            self.permissions.insert(registrant, permission);
        }
    }

    pub fn set_teams(&mut self, teams: BTreeSet<String>) {
        self.teams = teams;
    }
}
