//! Infrastructure layer - store implementations, digests and the account editor

pub mod logging;
pub mod permission;
pub mod storage;
pub mod team;
pub mod user;
