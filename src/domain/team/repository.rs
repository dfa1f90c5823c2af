//! Team store trait

#[cfg(test)]
use mockall::automock;

use super::entity::Team;
use crate::domain::DomainError;

/// Read access to team records
#[cfg_attr(test, automock)]
pub trait TeamStore: Send + Sync {
    /// Look up a team by name, ignoring case
    fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError>;

    /// All team names, sorted
    fn all_team_names(&self) -> Result<Vec<String>, DomainError>;
}
