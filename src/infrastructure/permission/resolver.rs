//! Permission resolution over a repository catalog

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::permission::{AccessPermission, PermissionResolver, RepositoryPermissionGrant};
use crate::domain::user::UserAccount;
use crate::domain::DomainError;

/// Registrant matching every repository
pub const ALL_REPOSITORIES: &str = ".*";

/// Personal repositories live under `~username/`
pub const USER_REPOSITORY_PREFIX: char = '~';

/// Who is restricted from anonymous access to a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRestriction {
    /// Anonymous users may do anything
    #[default]
    None,
    /// Authentication required to push
    Push,
    /// Authentication required to clone or push
    Clone,
    /// Authentication required to view, clone or push
    View,
}

impl AccessRestriction {
    pub fn is_restricted(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A repository known to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    pub name: String,
    #[serde(default)]
    pub access_restriction: AccessRestriction,
}

impl RepositoryEntry {
    pub fn new(name: impl Into<String>, access_restriction: AccessRestriction) -> Self {
        Self {
            name: name.into(),
            access_restriction,
        }
    }

    /// Folder the repository sits in, if any
    pub fn project_path(&self) -> Option<&str> {
        self.name.rsplit_once('/').map(|(project, _)| project)
    }
}

/// Resolves permissions against a fixed list of repositories
#[derive(Debug, Clone, Default)]
pub struct CatalogPermissionResolver {
    repositories: Vec<RepositoryEntry>,
}

impl CatalogPermissionResolver {
    pub fn new(mut repositories: Vec<RepositoryEntry>) -> Self {
        repositories.sort_by_key(|r| r.name.to_lowercase());
        Self { repositories }
    }

    pub fn repositories(&self) -> &[RepositoryEntry] {
        &self.repositories
    }

    fn restricted(&self) -> impl Iterator<Item = &RepositoryEntry> {
        self.repositories
            .iter()
            .filter(|r| r.access_restriction.is_restricted())
    }
}

/// Compile a wildcard registrant into a full, case-insensitive match
fn compile_registrant(registrant: &str) -> Option<Regex> {
    match Regex::new(&format!("(?i)^(?:{})$", registrant)) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(registrant = %registrant, error = %e, "Ignoring invalid wildcard registrant");
            None
        }
    }
}

impl PermissionResolver for CatalogPermissionResolver {
    fn list_grantable_repositories(
        &self,
        account: &UserAccount,
    ) -> Result<Vec<String>, DomainError> {
        let mut grantable = vec![
            ALL_REPOSITORIES.to_string(),
            format!("[^{}].*", USER_REPOSITORY_PREFIX),
        ];

        let mut last_project: Option<String> = None;

        for entry in self.restricted() {
            let project = entry.project_path().unwrap_or_default().to_lowercase();

            if last_project.as_deref() != Some(project.as_str()) {
                if !project.is_empty() {
                    grantable.push(format!("{}/.*", project));
                }
                last_project = Some(project);
            }

            grantable.push(entry.name.to_lowercase());
        }

        grantable.retain(|registrant| {
            account
                .repository_permission(registrant)
                .is_none_or(|p| !p.exceeds(AccessPermission::None))
        });

        Ok(grantable)
    }

    fn current_grants(
        &self,
        account: &UserAccount,
    ) -> Result<Vec<RepositoryPermissionGrant>, DomainError> {
        let mut grants = account.permission_grants();

        let wildcards: Vec<(Regex, AccessPermission)> = grants
            .iter()
            .filter(|g| g.is_wildcard())
            .filter_map(|g| compile_registrant(&g.registrant).map(|re| (re, g.permission)))
            .collect();

        for entry in self.restricted() {
            let name = entry.name.to_lowercase();

            if account.repository_permission(&name).is_some() {
                continue;
            }

            if let Some((_, permission)) = wildcards.iter().find(|(re, _)| re.is_match(&name)) {
                grants.push(RepositoryPermissionGrant::new(name, *permission));
            }
        }

        Ok(grants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogPermissionResolver {
        CatalogPermissionResolver::new(vec![
            RepositoryEntry::new("public.git", AccessRestriction::None),
            RepositoryEntry::new("Project/App.git", AccessRestriction::Push),
            RepositoryEntry::new("project/lib.git", AccessRestriction::Clone),
            RepositoryEntry::new("secret.git", AccessRestriction::View),
            RepositoryEntry::new("~bob/scratch.git", AccessRestriction::View),
        ])
    }

    #[test]
    fn test_grantable_repositories() {
        let account = UserAccount::new("alice", "");

        let grantable = catalog().list_grantable_repositories(&account).unwrap();
        assert_eq!(
            grantable,
            vec![
                ".*",
                "[^~].*",
                "project/.*",
                "project/app.git",
                "project/lib.git",
                "secret.git",
                "~bob/.*",
                "~bob/scratch.git",
            ]
        );
    }

    #[test]
    fn test_grantable_excludes_existing_grants() {
        let mut account = UserAccount::new("alice", "");
        account.set_repository_permission("secret.git", AccessPermission::View);
        account.set_repository_permission(".*", AccessPermission::Clone);

        let grantable = catalog().list_grantable_repositories(&account).unwrap();
        assert!(!grantable.contains(&"secret.git".to_string()));
        assert!(!grantable.contains(&".*".to_string()));
        assert!(grantable.contains(&"project/app.git".to_string()));
    }

    #[test]
    fn test_current_grants_expand_wildcards() {
        let mut account = UserAccount::new("alice", "");
        account.set_repository_permission("project/.*", AccessPermission::Push);
        account.set_repository_permission("project/lib.git", AccessPermission::Rewind);

        let grants = catalog().current_grants(&account).unwrap();

        assert!(grants.contains(&RepositoryPermissionGrant::new(
            "project/.*",
            AccessPermission::Push
        )));
        assert!(grants.contains(&RepositoryPermissionGrant::new(
            "project/lib.git",
            AccessPermission::Rewind
        )));
        assert!(grants.contains(&RepositoryPermissionGrant::new(
            "project/app.git",
            AccessPermission::Push
        )));
        assert!(!grants.iter().any(|g| g.registrant == "secret.git"));
        assert_eq!(grants.len(), 3);
    }

    #[test]
    fn test_invalid_wildcard_is_ignored() {
        let mut account = UserAccount::new("alice", "");
        account.set_repository_permission("[broken", AccessPermission::Push);

        let grants = catalog().current_grants(&account).unwrap();
        assert_eq!(grants.len(), 1);
    }

    #[test]
    fn test_project_path() {
        assert_eq!(
            RepositoryEntry::new("a/b/c.git", AccessRestriction::None).project_path(),
            Some("a/b")
        );
        assert_eq!(
            RepositoryEntry::new("c.git", AccessRestriction::None).project_path(),
            None
        );
    }
}
