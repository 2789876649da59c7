//! CLI command implementations

pub mod completions;
pub mod contact;
pub mod init;
pub mod menu;
pub mod project;
