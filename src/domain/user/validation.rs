//! Account validation errors and username helpers

use thiserror::Error;

use crate::domain::DomainError;

/// Errors returned when an account edit is rejected
#[derive(Debug, Error)]
pub enum AccountEditError {
    #[error("Please specify a username")]
    EmptyUsername,

    #[error("Username '{0}' is unavailable")]
    UsernameUnavailable(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Cannot rename an account whose password is a username-salted digest. Reset the password first")]
    CombinedDigestRename,

    #[error("User store rejected the account: {0}")]
    StoreConstraintViolation(String),

    #[error("User store does not permit adding users")]
    CredentialChangesUnsupported,

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error(transparent)]
    Store(#[from] DomainError),
}

/// Usernames are stored lowercase
pub fn normalize_username(username: &str) -> String {
    username.to_lowercase()
}

/// Empty or whitespace-only usernames are rejected
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("Alice"), "alice");
        assert_eq!(normalize_username("bob"), "bob");
        assert_eq!(normalize_username("ÉLISE"), "élise");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in ["Alice", "BOB", "mixed.Case-42", "ÉLISE", "", " Spaced "] {
            let once = normalize_username(name);
            assert_eq!(normalize_username(&once), once);
        }
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank("a"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AccountEditError::PasswordTooShort(5).to_string(),
            "Password is too short. Minimum length is 5 characters"
        );
        assert_eq!(
            AccountEditError::UsernameUnavailable("alice".to_string()).to_string(),
            "Username 'alice' is unavailable"
        );
    }
}
