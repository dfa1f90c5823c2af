//! Permission domain
//!
//! Access levels, repository grants and the resolver trait used to
//! enumerate what an account may be granted.

mod entity;
mod resolver;
mod validation;

pub use entity::{is_wildcard_registrant, AccessPermission, RepositoryPermissionGrant};
pub use resolver::PermissionResolver;
pub use validation::PermissionValidationError;

#[cfg(test)]
pub use resolver::MockPermissionResolver;
