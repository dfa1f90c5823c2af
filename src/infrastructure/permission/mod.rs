//! Permission resolution implementations

mod resolver;

pub use resolver::{
    AccessRestriction, CatalogPermissionResolver, RepositoryEntry, ALL_REPOSITORIES,
    USER_REPOSITORY_PREFIX,
};
