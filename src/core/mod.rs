//! Core module - configuration and the project store

pub mod config;
pub mod store;

pub use config::Config;
pub use store::{ProjectStore, ProjectSummary, StoreError};
