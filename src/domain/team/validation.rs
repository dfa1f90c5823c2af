//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),
}

const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Lookup key for a team name; team names compare case-insensitively
pub fn normalize_team_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_team_names() {
        assert!(validate_team_name("developers").is_ok());
        assert!(validate_team_name("Release Managers").is_ok());
    }

    #[test]
    fn test_normalize_team_name() {
        assert_eq!(normalize_team_name(" Developers "), "developers");
        assert_eq!(normalize_team_name("ÉQUIPE"), "équipe");
    }

    #[test]
    fn test_empty_team_name() {
        assert_eq!(validate_team_name(""), Err(TeamValidationError::EmptyName));
    }

    #[test]
    fn test_team_name_too_long() {
        let name = "a".repeat(101);
        assert_eq!(
            validate_team_name(&name),
            Err(TeamValidationError::NameTooLong(100))
        );
    }
}
