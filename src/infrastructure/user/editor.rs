//! Account editor: validates a create/edit form and hands it to the user store

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::permission::{PermissionResolver, RepositoryPermissionGrant};
use crate::domain::team::TeamStore;
use crate::domain::user::{
    has_combined_digest, is_blank, is_digest_tagged, normalize_username, AccountEditError,
    CapabilitySet, CredentialPolicy, UserAccount, UserAccountDraft, UserStore,
};

use super::password::apply_digest_scheme;

/// Result of a successful submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(UserAccount),
    Updated(UserAccount),
}

impl SubmitOutcome {
    pub fn account(&self) -> &UserAccount {
        match self {
            Self::Created(account) | Self::Updated(account) => account,
        }
    }

    pub fn into_account(self) -> UserAccount {
        match self {
            Self::Created(account) | Self::Updated(account) => account,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Everything a presentation layer needs to render the create/edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountForm {
    /// The stored account, `None` when creating
    pub original: Option<UserAccount>,
    pub draft: UserAccountDraft,
    /// Pre-filled with the stored password so an untouched form resubmits as is
    pub confirm_password: String,
    pub capabilities: CapabilitySet,
    /// All team names, sorted
    pub available_teams: Vec<String>,
    /// Teams the account belongs to, sorted
    pub selected_teams: Vec<String>,
    pub grantable_repositories: Vec<String>,
    pub current_grants: Vec<RepositoryPermissionGrant>,
}

impl AccountForm {
    pub fn is_create(&self) -> bool {
        self.original.is_none()
    }

    pub fn selected_team_set(&self) -> BTreeSet<String> {
        self.selected_teams.iter().cloned().collect()
    }
}

/// Validates and applies account edits against a user store
pub struct UserAccountEditor<U: UserStore, T: TeamStore, P: PermissionResolver> {
    users: Arc<U>,
    teams: Arc<T>,
    permissions: Arc<P>,
    policy: CredentialPolicy,
}

impl<U: UserStore, T: TeamStore, P: PermissionResolver> UserAccountEditor<U, T, P> {
    /// Create a new account editor
    pub fn new(users: Arc<U>, teams: Arc<T>, permissions: Arc<P>, policy: CredentialPolicy) -> Self {
        Self {
            users,
            teams,
            permissions,
            policy,
        }
    }

    /// Form for a new account. Stores that cannot manage credentials cannot
    /// add users.
    pub fn prepare_create(&self) -> Result<AccountForm, AccountEditError> {
        let capabilities = self.users.capabilities();

        if !capabilities.credentials {
            warn!("User store does not permit adding users");
            return Err(AccountEditError::CredentialChangesUnsupported);
        }

        self.build_form(None, capabilities)
    }

    /// Form for an existing account
    pub fn prepare_edit(&self, username: &str) -> Result<AccountForm, AccountEditError> {
        let account = self
            .users
            .find_by_username(username)?
            .ok_or_else(|| AccountEditError::UserNotFound(normalize_username(username)))?;

        self.build_form(Some(account), self.users.capabilities())
    }

    fn build_form(
        &self,
        original: Option<UserAccount>,
        capabilities: CapabilitySet,
    ) -> Result<AccountForm, AccountEditError> {
        let account = original.clone().unwrap_or_default();

        let mut available_teams = self.teams.all_team_names()?;
        available_teams.sort();

        Ok(AccountForm {
            draft: UserAccountDraft::from(&account),
            confirm_password: account.password().to_string(),
            capabilities,
            available_teams,
            selected_teams: account.teams().iter().cloned().collect(),
            grantable_repositories: self.permissions.list_grantable_repositories(&account)?,
            current_grants: self.permissions.current_grants(&account)?,
            original,
        })
    }

    /// Validate an edit and write it through the user store.
    ///
    /// Checks run in order and the first failure is returned. Nothing is
    /// persisted unless every check passes.
    pub fn submit(
        &self,
        original: Option<&UserAccount>,
        edited: UserAccountDraft,
        confirm_password: &str,
        selected_team_names: &BTreeSet<String>,
        permission_edits: &[RepositoryPermissionGrant],
    ) -> Result<SubmitOutcome, AccountEditError> {
        let is_create = original.is_none();
        let capabilities = self.users.capabilities();

        let mut account = original.cloned().unwrap_or_default();
        edited.apply_to(&mut account, &capabilities);

        if is_blank(account.username()) {
            return Err(AccountEditError::EmptyUsername);
        }
        let username = account.username().to_string();

        if is_create && self.users.username_exists(&username)? {
            debug!(username = %username, "Username already taken");
            return Err(AccountEditError::UsernameUnavailable(username));
        }

        let original_username = original.map(|o| o.username()).unwrap_or_default();
        let rename =
            !is_blank(original_username) && normalize_username(original_username) != username;

        if capabilities.credentials {
            if account.password() != confirm_password {
                return Err(AccountEditError::PasswordMismatch);
            }

            if !is_digest_tagged(account.password()) {
                let min_length = self.policy.effective_min_length();

                if account.password().trim().chars().count() < min_length {
                    return Err(AccountEditError::PasswordTooShort(min_length));
                }

                let stored =
                    apply_digest_scheme(self.policy.digest_scheme, &username, account.password());
                account.set_password(stored);
            } else if rename && has_combined_digest(account.password()) {
                return Err(AccountEditError::CombinedDigestRename);
            }
        }

        for grant in permission_edits {
            account.set_repository_permission(&grant.registrant, grant.permission);
        }

        if capabilities.team_membership {
            let mut teams = BTreeSet::new();

            for name in selected_team_names {
                match self.teams.find_by_name(name)? {
                    Some(team) => {
                        teams.insert(team.name().to_string());
                    }
                    None => debug!(team = %name, "Skipping unknown team"),
                }
            }

            account.set_teams(teams);
        }

        self.users
            .upsert(original_username, &account, is_create)
            .map_err(|e| {
                warn!(username = %username, error = %e, "User store rejected account");
                AccountEditError::StoreConstraintViolation(e.message().to_string())
            })?;

        if is_create {
            info!(username = %username, "Created user account");
            Ok(SubmitOutcome::Created(account))
        } else {
            info!(
                username = %username,
                renamed_from = ?rename.then_some(original_username),
                "Updated user account"
            );
            Ok(SubmitOutcome::Updated(account))
        }
    }
}
