//! Deterministic parallel reduction
//!
//! This module splits a linear sequence across a bounded number of OS threads
//! and combines the partial results in a fixed order.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │ ParallelReduce  │───▶│ PartitionPlan    │───▶│ Hardware        │
//! │                 │    │                  │    │ concurrency     │
//! │ • spawn N-1     │    │ • worker count   │    │ (num_cpus)      │
//! │ • run 1 inline  │    │ • block size     │    │                 │
//! │ • join, fold    │    │ • partitions     │    │                 │
//! └────────┬────────┘    └──────────────────┘    └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ worker          │
//! │ • one partition │
//! │ • one slot      │
//! └─────────────────┘
//! ```
//!
//! - **Planning**: [`PartitionPlan::new`] picks
//!   `min(hardware threads, ceil(len / min_per_thread))` workers and an equal
//!   block size, leaving the remainder to the last partition.
//! - **Execution**: every partition but the last runs on a
//!   [`crate::thread::JoiningThread`]; the last runs on the calling thread.
//! - **Combining**: after every worker is joined, partial results are folded
//!   in partition order starting from the caller's seed.
//!
//! The combine operation must be associative; it need not be commutative.
//!
//! # Example
//!
//! ```rust
//! use threadkeep::parallel::{ParallelReduce, ReduceConfig};
//!
//! let reduce = ParallelReduce::new(ReduceConfig {
//!     hardware_threads: Some(4),
//!     ..ReduceConfig::default()
//! });
//! let items: Vec<u64> = (1..=100).collect();
//! let (total, stats) = reduce.reduce_with_stats(items, 0, |a, b| a + b).unwrap();
//! assert_eq!(total, 5050);
//! assert_eq!(stats.spawned_threads, 3);
//! ```

pub mod planner;
mod reduce;
pub mod worker;

pub use planner::{DEFAULT_MIN_PER_THREAD, Partition, PartitionPlan, hardware_concurrency};
pub use reduce::{ParallelReduce, ReduceConfig, ReduceStats, parallel_accumulate};
