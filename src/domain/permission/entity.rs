//! Repository access permissions and grants

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::PermissionValidationError;

/// Access level a registrant holds on a repository, ordered from least to
/// most privileged
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum AccessPermission {
    #[default]
    None,
    Exclude,
    View,
    Clone,
    Push,
    Create,
    Delete,
    Rewind,
}

impl AccessPermission {
    pub const ALL: [AccessPermission; 8] = [
        Self::None,
        Self::Exclude,
        Self::View,
        Self::Clone,
        Self::Push,
        Self::Create,
        Self::Delete,
        Self::Rewind,
    ];

    /// Short code used in grant strings (`RW+:repo.git`)
    pub fn code(&self) -> &'static str {
        match self {
            Self::None => "N",
            Self::Exclude => "X",
            Self::View => "V",
            Self::Clone => "R",
            Self::Push => "RW",
            Self::Create => "RWC",
            Self::Delete => "RWD",
            Self::Rewind => "RW+",
        }
    }

    /// Check if this permission is strictly above another
    pub fn exceeds(&self, other: AccessPermission) -> bool {
        *self > other
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for AccessPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AccessPermission {
    type Err = PermissionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| PermissionValidationError::UnknownPermission(s.to_string()))
    }
}

impl TryFrom<String> for AccessPermission {
    type Error = PermissionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccessPermission> for String {
    fn from(permission: AccessPermission) -> Self {
        permission.code().to_string()
    }
}

/// A permission level granted on a repository or a wildcard registrant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryPermissionGrant {
    pub registrant: String,
    pub permission: AccessPermission,
}

impl RepositoryPermissionGrant {
    pub fn new(registrant: impl Into<String>, permission: AccessPermission) -> Self {
        Self {
            registrant: registrant.into(),
            permission,
        }
    }

    /// Wildcard registrants are regular expressions over repository names
    pub fn is_wildcard(&self) -> bool {
        is_wildcard_registrant(&self.registrant)
    }
}

pub fn is_wildcard_registrant(registrant: &str) -> bool {
    registrant.contains(".*") || registrant.contains('[') || registrant.contains('*')
}

impl fmt::Display for RepositoryPermissionGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.permission.code(), self.registrant)
    }
}

/// Parses the `CODE:registrant` form, e.g. `RW+:project/app.git`
impl FromStr for RepositoryPermissionGrant {
    type Err = PermissionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, registrant) = s
            .split_once(':')
            .ok_or_else(|| PermissionValidationError::MalformedGrant(s.to_string()))?;

        let registrant = registrant.trim();
        if registrant.is_empty() {
            return Err(PermissionValidationError::EmptyRegistrant);
        }

        Ok(Self::new(registrant, code.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_ordering() {
        assert!(AccessPermission::Rewind.exceeds(AccessPermission::Push));
        assert!(AccessPermission::View.exceeds(AccessPermission::None));
        assert!(!AccessPermission::None.exceeds(AccessPermission::None));
        assert!(AccessPermission::Exclude < AccessPermission::View);
    }

    #[test]
    fn test_permission_codes() {
        assert_eq!(AccessPermission::Rewind.to_string(), "RW+");
        assert_eq!("rwc".parse::<AccessPermission>().unwrap(), AccessPermission::Create);
        assert!("W".parse::<AccessPermission>().is_err());
    }

    #[test]
    fn test_grant_parse() {
        let grant: RepositoryPermissionGrant = "RW+:project/app.git".parse().unwrap();
        assert_eq!(grant.registrant, "project/app.git");
        assert_eq!(grant.permission, AccessPermission::Rewind);
        assert_eq!(grant.to_string(), "RW+:project/app.git");
    }

    #[test]
    fn test_grant_parse_errors() {
        assert_eq!(
            "project/app.git".parse::<RepositoryPermissionGrant>(),
            Err(PermissionValidationError::MalformedGrant(
                "project/app.git".to_string()
            ))
        );
        assert_eq!(
            "RW: ".parse::<RepositoryPermissionGrant>(),
            Err(PermissionValidationError::EmptyRegistrant)
        );
    }

    #[test]
    fn test_wildcard_detection() {
        assert!(RepositoryPermissionGrant::new(".*", AccessPermission::View).is_wildcard());
        assert!(RepositoryPermissionGrant::new("project/.*", AccessPermission::View).is_wildcard());
        assert!(!RepositoryPermissionGrant::new("app.git", AccessPermission::View).is_wildcard());
    }

    #[test]
    fn test_permission_serializes_as_code() {
        let json = serde_json::to_string(&AccessPermission::Push).unwrap();
        assert_eq!(json, "\"RW\"");
    }
}
