//! Permission resolver trait

#[cfg(test)]
use mockall::automock;

use super::entity::RepositoryPermissionGrant;
use crate::domain::user::UserAccount;
use crate::domain::DomainError;

/// Resolves which repositories an account may be granted access to
#[cfg_attr(test, automock)]
pub trait PermissionResolver: Send + Sync {
    /// Repositories and wildcard registrants offered for a new grant
    fn list_grantable_repositories(
        &self,
        account: &UserAccount,
    ) -> Result<Vec<String>, DomainError>;

    /// Grants currently in effect for the account
    fn current_grants(
        &self,
        account: &UserAccount,
    ) -> Result<Vec<RepositoryPermissionGrant>, DomainError>;
}
