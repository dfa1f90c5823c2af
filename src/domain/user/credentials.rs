//! Password storage schemes and the credential policy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Prefix of a stored MD5 digest of the password
pub const MD5_PREFIX: &str = "MD5:";

/// Prefix of a stored MD5 digest of username + password
pub const COMBINED_MD5_PREFIX: &str = "CMD5:";

/// No configured minimum can go below this
pub const MIN_PASSWORD_LENGTH_FLOOR: usize = 4;

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 5;

/// How a new plaintext password is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestScheme {
    /// Store the plaintext
    None,
    /// Store `MD5:` + MD5(password)
    #[default]
    Md5,
    /// Store `CMD5:` + MD5(username + password)
    CombinedMd5,
}

impl DigestScheme {
    /// Prefix tagging passwords stored with this scheme
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Md5 => Some(MD5_PREFIX),
            Self::CombinedMd5 => Some(COMBINED_MD5_PREFIX),
        }
    }

    /// Digests computed with this scheme depend on the username
    pub fn is_salted_with_username(&self) -> bool {
        matches!(self, Self::CombinedMd5)
    }
}

impl fmt::Display for DigestScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Md5 => write!(f, "md5"),
            Self::CombinedMd5 => write!(f, "combined-md5"),
        }
    }
}

impl FromStr for DigestScheme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "plain" => Ok(Self::None),
            "md5" => Ok(Self::Md5),
            "combined-md5" => Ok(Self::CombinedMd5),
            other => Err(DomainError::configuration(format!(
                "Unknown password storage scheme '{}'",
                other
            ))),
        }
    }
}

fn has_prefix(password: &str, prefix: &str) -> bool {
    password
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Check if a password already carries a recognised digest prefix
pub fn is_digest_tagged(password: &str) -> bool {
    has_prefix(password, MD5_PREFIX) || has_prefix(password, COMBINED_MD5_PREFIX)
}

/// Check if a password is a username-salted digest
pub fn has_combined_digest(password: &str) -> bool {
    has_prefix(password, COMBINED_MD5_PREFIX)
}

/// Password rules handed to the account editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub min_password_length: usize,
    pub digest_scheme: DigestScheme,
}

impl CredentialPolicy {
    pub fn new(min_password_length: usize, digest_scheme: DigestScheme) -> Self {
        Self {
            min_password_length,
            digest_scheme,
        }
    }

    /// The configured minimum, raised to the floor
    pub fn effective_min_length(&self) -> usize {
        self.min_password_length.max(MIN_PASSWORD_LENGTH_FLOOR)
    }
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PASSWORD_LENGTH, DigestScheme::default())
    }
}
