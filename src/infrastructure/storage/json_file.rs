//! JSON file storage for accounts, teams and the repository catalog

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::permission::{PermissionResolver, RepositoryPermissionGrant};
use crate::domain::team::{Team, TeamStore};
use crate::domain::user::{AccountRoles, CapabilitySet, UserAccount, UserStore};
use crate::domain::DomainError;
use crate::infrastructure::permission::{CatalogPermissionResolver, RepositoryEntry};
use crate::infrastructure::team::InMemoryTeamStore;
use crate::infrastructure::user::InMemoryUserStore;

/// Persisted form of an account
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email_address: Option<String>,
    #[serde(default)]
    roles: AccountRoles,
    #[serde(default)]
    exclude_from_federation: bool,
    #[serde(default)]
    permissions: Vec<RepositoryPermissionGrant>,
    #[serde(default)]
    teams: Vec<String>,
}

impl From<&UserAccount> for UserRecord {
    fn from(account: &UserAccount) -> Self {
        Self {
            username: account.username().to_string(),
            password: account.password().to_string(),
            display_name: account.display_name().map(str::to_string),
            email_address: account.email_address().map(str::to_string),
            roles: account.roles(),
            exclude_from_federation: account.exclude_from_federation(),
            permissions: account.permission_grants(),
            teams: account.teams().iter().cloned().collect(),
        }
    }
}

impl From<UserRecord> for UserAccount {
    fn from(record: UserRecord) -> Self {
        let mut account = UserAccount::new(&record.username, record.password);
        account.set_display_name(record.display_name);
        account.set_email_address(record.email_address);
        account.set_roles(record.roles);
        account.set_exclude_from_federation(record.exclude_from_federation);

        for grant in &record.permissions {
            account.set_repository_permission(&grant.registrant, grant.permission);
        }

        account.set_teams(record.teams.into_iter().collect());
        account
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(default)]
    teams: Vec<Team>,
    #[serde(default)]
    repositories: Vec<RepositoryEntry>,
}

/// Account store persisted as a single JSON document.
///
/// The document is loaded once on open and rewritten after every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    users: InMemoryUserStore,
    teams: InMemoryTeamStore,
    resolver: CatalogPermissionResolver,
    persist: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>, capabilities: CapabilitySet) -> Result<Self, DomainError> {
        let path = path.as_ref().to_path_buf();

        let document = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<StoreDocument>(&contents).map_err(|e| {
                DomainError::storage(format!("Failed to parse '{}': {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Store file missing, starting empty");
                StoreDocument::default()
            }
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        info!(
            path = %path.display(),
            users = document.users.len(),
            teams = document.teams.len(),
            repositories = document.repositories.len(),
            "Opened account store"
        );

        let users = document.users.into_iter().map(UserAccount::from).collect();

        Ok(Self {
            path,
            users: InMemoryUserStore::with_users(users, capabilities),
            teams: InMemoryTeamStore::with_teams(document.teams),
            resolver: CatalogPermissionResolver::new(document.repositories),
            persist: Mutex::new(()),
        })
    }

    /// Add a team and persist it
    pub fn add_team(&self, team: Team) -> Result<(), DomainError> {
        let _guard = self.lock()?;

        let staged = InMemoryTeamStore::with_teams(self.teams.list()?);
        staged.insert(team.clone())?;
        self.save(&self.users.list()?, staged.list()?)?;

        self.teams.insert(team)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, DomainError> {
        self.persist
            .lock()
            .map_err(|e| DomainError::storage(format!("Failed to acquire store lock: {}", e)))
    }

    /// Write the given state to disk. Callers update memory only after this
    /// succeeds.
    fn save(&self, users: &[UserAccount], teams: Vec<Team>) -> Result<(), DomainError> {
        let document = StoreDocument {
            users: users.iter().map(UserRecord::from).collect(),
            teams,
            repositories: self.resolver.repositories().to_vec(),
        };

        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| DomainError::internal(format!("Failed to serialize store: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DomainError::storage(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, &self.path)) {
            fs::remove_file(&tmp).ok();
            return Err(DomainError::storage(format!(
                "Failed to write '{}': {}",
                self.path.display(),
                e
            )));
        }

        debug!(path = %self.path.display(), "Saved account store");
        Ok(())
    }
}

impl UserStore for JsonFileStore {
    fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError> {
        self.users.find_by_username(username)
    }

    fn upsert(
        &self,
        original_username: &str,
        account: &UserAccount,
        is_create: bool,
    ) -> Result<(), DomainError> {
        let _guard = self.lock()?;

        let staged = InMemoryUserStore::with_users(self.users.list()?, self.users.capabilities());
        staged.upsert(original_username, account, is_create)?;
        self.save(&staged.list()?, self.teams.list()?)?;

        self.users.upsert(original_username, account, is_create)
    }

    fn capabilities(&self) -> CapabilitySet {
        self.users.capabilities()
    }
}

impl TeamStore for JsonFileStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        self.teams.find_by_name(name)
    }

    fn all_team_names(&self) -> Result<Vec<String>, DomainError> {
        self.teams.all_team_names()
    }
}

impl PermissionResolver for JsonFileStore {
    fn list_grantable_repositories(
        &self,
        account: &UserAccount,
    ) -> Result<Vec<String>, DomainError> {
        self.resolver.list_grantable_repositories(account)
    }

    fn current_grants(
        &self,
        account: &UserAccount,
    ) -> Result<Vec<RepositoryPermissionGrant>, DomainError> {
        self.resolver.current_grants(account)
    }
}
