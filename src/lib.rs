//! Poised PMS
//!
//! A console project tracker for a construction management business:
//! projects and their architects, contractors, and customers in a local
//! SQLite database, driven by subcommands or an interactive menu.

pub mod cli;
pub mod core;
pub mod entities;
