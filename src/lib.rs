//! forge-accounts
//!
//! Account management for a self-hosted Git repository server:
//! - Validation of create/edit forms for user accounts
//! - Password digest schemes (plaintext, MD5, username-salted MD5)
//! - Pluggable user, team and permission stores
//! - A JSON file store and CLI for standalone use

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    AccessPermission, AccountEditError, CapabilitySet, CredentialPolicy, DigestScheme,
    DomainError, RepositoryPermissionGrant, UserAccount, UserAccountDraft,
};
pub use infrastructure::user::{AccountForm, SubmitOutcome, UserAccountEditor};
