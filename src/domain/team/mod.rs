//! Team domain module
//!
//! Teams group users. An account holds team memberships as weak references
//! by name; the account editor never creates or deletes teams.

mod entity;
mod repository;
mod validation;

pub use entity::Team;
pub use repository::TeamStore;
pub use validation::{normalize_team_name, validate_team_name, TeamValidationError};

#[cfg(test)]
pub use repository::MockTeamStore;
