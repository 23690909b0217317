//! CLI command implementations

pub mod init;
pub mod install;
pub mod integrations;
