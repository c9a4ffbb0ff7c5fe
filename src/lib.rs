//! # threadkeep - Threads that are always waited for
//!
//! A small concurrency library built around one rule: every spawned thread has
//! exactly one owner, and that owner joins it before going away.
//!
//! ## Features
//!
//! - **Join-on-drop ownership**: [`thread::JoiningThread`] joins on drop and
//!   on reassignment; [`thread::ScopedThread`] additionally refuses to exist
//!   without a thread
//! - **Compile-time lifetime safety**: spawned closures must own what they use,
//!   so a thread can never outlive borrowed data
//! - **Deterministic parallel reduction**: [`parallel::ParallelReduce`] splits
//!   a sequence across hardware threads and folds partial results in a fixed
//!   order
//! - **Layered configuration**: defaults, files and `THREADKEEP_` environment
//!   variables via [`config::Settings`]
//!
//! ## Quick Start
//!
//! ```rust
//! use threadkeep::parallel::parallel_accumulate;
//! use threadkeep::thread::JoiningThread;
//!
//! let mut worker = JoiningThread::spawn(|| "hello from a worker").unwrap();
//! assert_eq!(worker.join().unwrap(), "hello from a worker");
//!
//! let items: Vec<u64> = (1..=1_000).collect();
//! assert_eq!(parallel_accumulate(items, 0, |a, b| a + b).unwrap(), 500_500);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod parallel;
pub mod thread;

pub use error::{Result, ThreadError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
