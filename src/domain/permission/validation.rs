//! Permission validation errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PermissionValidationError {
    #[error("Unknown access permission code: '{0}'")]
    UnknownPermission(String),

    #[error("Malformed permission grant '{0}'. Expected CODE:registrant")]
    MalformedGrant(String),

    #[error("Permission registrant cannot be empty")]
    EmptyRegistrant,
}
