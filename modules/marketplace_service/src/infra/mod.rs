//! Infrastructure adapters: database, password hashing, region directory, files

pub mod files;
pub mod region;
pub mod security;
pub mod storage;
