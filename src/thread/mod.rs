//! Thread ownership wrappers
//!
//! Every OS thread started through this module has exactly one owner, and that
//! owner waits for the thread before it goes away.
//!
//! - [`JoiningThread`] owns zero or one thread; it can be emptied by `join`,
//!   `detach` or `take`, and joins whatever it still owns on drop or
//!   reassignment.
//! - [`ScopedThread`] must own a joinable thread from construction until it
//!   is dropped.
//! - [`MasterThread`] captures a thread identity for "am I the master?" checks.
//!
//! # Example
//!
//! ```rust
//! use threadkeep::thread::{JoiningThread, ScopedThread};
//!
//! let mut workers: Vec<JoiningThread<usize>> = (0..4)
//!     .map(|id| JoiningThread::spawn(move || id * 10).unwrap())
//!     .collect();
//! let total: usize = workers.iter_mut().map(|w| w.join().unwrap()).sum();
//! assert_eq!(total, 60);
//!
//! // An empty handle cannot become a ScopedThread.
//! assert!(ScopedThread::<()>::new(JoiningThread::empty()).is_err());
//! ```

mod identity;
mod joining;
mod scoped;

pub use identity::MasterThread;
pub use joining::JoiningThread;
pub use scoped::ScopedThread;
