//! In-memory team store

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::team::{normalize_team_name, Team, TeamStore};
use crate::domain::DomainError;

/// In-memory implementation of TeamStore, keyed by lowercase name
#[derive(Debug, Default)]
pub struct InMemoryTeamStore {
    teams: RwLock<HashMap<String, Team>>,
}

impl InMemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with teams
    pub fn with_teams(teams: Vec<Team>) -> Self {
        let teams = teams
            .into_iter()
            .map(|t| (normalize_team_name(t.name()), t))
            .collect();

        Self {
            teams: RwLock::new(teams),
        }
    }

    /// Add a team
    pub fn insert(&self, team: Team) -> Result<(), DomainError> {
        let mut teams = self.teams.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let key = normalize_team_name(team.name());
        if teams.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.name()
            )));
        }

        teams.insert(key, team);
        Ok(())
    }

    /// All teams, ordered by name
    pub fn list(&self) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut result: Vec<Team> = teams.values().cloned().collect();
        result.sort_by(|a, b| a.name().cmp(b.name()));

        Ok(result)
    }
}

impl TeamStore for InMemoryTeamStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        let teams = self.teams.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(teams.get(&normalize_team_name(name)).cloned())
    }

    fn all_team_names(&self) -> Result<Vec<String>, DomainError> {
        Ok(self
            .list()?
            .iter()
            .map(|t| t.name().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str) -> Team {
        Team::new(name).unwrap()
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let store = InMemoryTeamStore::with_teams(vec![team("Developers")]);

        let found = store.find_by_name("developers").unwrap().unwrap();
        assert_eq!(found.name(), "Developers");
        assert!(store.find_by_name("ops").unwrap().is_none());
    }

    #[test]
    fn test_find_by_name_folds_non_ascii() {
        let store = InMemoryTeamStore::with_teams(vec![team("Équipe")]);

        let found = store.find_by_name("équipe").unwrap().unwrap();
        assert_eq!(found.name(), "Équipe");
    }

    #[test]
    fn test_all_team_names_sorted() {
        let store = InMemoryTeamStore::with_teams(vec![team("ops"), team("admins"), team("dev")]);

        assert_eq!(store.all_team_names().unwrap(), vec!["admins", "dev", "ops"]);
    }

    #[test]
    fn test_insert_duplicate() {
        let store = InMemoryTeamStore::new();
        store.insert(team("ops")).unwrap();

        let result = store.insert(team("OPS"));
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }
}
