//! Command implementations for the threadkeep CLI
//!
//! Each command is organized into its own module.

pub mod config;
pub mod plan;
pub mod sum;
pub mod version;
pub mod workers;
