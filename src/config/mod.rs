//! Configuration management for threadkeep
//!
//! Settings are layered with `figment`, lowest priority first:
//!
//! 1. Defaults embedded from `default-config.toml`
//! 2. User config at `~/.config/threadkeep/config.toml`
//! 3. Repository config `threadkeep.{toml,json,yaml,yml}` in the working directory
//! 4. Environment variables prefixed with `THREADKEEP_`, using `__` between
//!    section and key (`THREADKEEP_REDUCE__MAX_THREADS=4`)
//!
//! A file passed with `--config` replaces layers 2 and 3.

mod core;

pub use self::core::{LoggingConfig, Settings};
