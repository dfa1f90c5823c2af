//! Domain layer - Core business logic and entities

pub mod error;
pub mod permission;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use permission::{AccessPermission, PermissionResolver, RepositoryPermissionGrant};
pub use team::{Team, TeamStore};
pub use user::{
    AccountEditError, AccountRoles, CapabilitySet, CredentialPolicy, DigestScheme, UserAccount,
    UserAccountDraft, UserStore,
};
