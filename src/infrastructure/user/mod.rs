//! User infrastructure module
//!
//! Password digests, the in-memory user store and the account editor that
//! validates create/edit forms before they reach a store.

mod editor;
mod password;
mod repository;

pub use editor::{AccountForm, SubmitOutcome, UserAccountEditor};
pub use password::{apply_digest_scheme, md5_hex};
pub use repository::InMemoryUserStore;
