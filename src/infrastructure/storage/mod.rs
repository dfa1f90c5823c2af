//! Storage infrastructure - file-backed account store

mod json_file;

pub use json_file::JsonFileStore;
