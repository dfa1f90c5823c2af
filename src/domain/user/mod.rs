//! User domain
//!
//! Account entity, the editable draft, credential rules, validation errors
//! and the store trait accounts are persisted through.

mod credentials;
mod draft;
mod entity;
mod repository;
mod validation;

pub use credentials::{
    has_combined_digest, is_digest_tagged, CredentialPolicy, DigestScheme, COMBINED_MD5_PREFIX,
    DEFAULT_MIN_PASSWORD_LENGTH, MD5_PREFIX, MIN_PASSWORD_LENGTH_FLOOR,
};
pub use draft::UserAccountDraft;
pub use entity::{AccountRoles, UserAccount};
pub use repository::{CapabilitySet, UserStore};
pub use validation::{is_blank, normalize_username, AccountEditError};

#[cfg(test)]
pub use repository::MockUserStore;
