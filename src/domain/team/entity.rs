//! Team entity

use serde::{Deserialize, Serialize};

use super::validation::{validate_team_name, TeamValidationError};

/// A named group of users. Accounts reference teams by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TeamRecord")]
pub struct Team {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Team {
    /// Create a new team
    pub fn new(name: impl Into<String>) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;

        Ok(Self {
            name,
            description: None,
        })
    }

    /// Set description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

}

/// Unvalidated team as read from storage
#[derive(Deserialize)]
struct TeamRecord {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<TeamRecord> for Team {
    type Error = TeamValidationError;

    fn try_from(record: TeamRecord) -> Result<Self, Self::Error> {
        let mut team = Team::new(record.name)?;
        team.description = record.description;
        Ok(team)
    }
}
