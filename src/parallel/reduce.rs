use super::planner::{DEFAULT_MIN_PER_THREAD, FALLBACK_HARDWARE_THREADS, Partition, PartitionPlan, hardware_concurrency};
use super::worker::{accumulate_block, accumulate_range, fold_slots};
use crate::error::{Result, ThreadError};
use crate::thread::JoiningThread;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Configuration for parallel reduction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceConfig {
    /// Minimum elements per partition before another worker is worth starting
    pub min_per_thread: usize,
    /// Maximum number of workers, the calling thread included (0 = no limit)
    pub max_threads: usize,
    /// Hardware concurrency to assume instead of querying the platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_threads: Option<usize>,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            min_per_thread: DEFAULT_MIN_PER_THREAD,
            max_threads: 0,
            hardware_threads: None,
        }
    }
}

impl ReduceConfig {
    /// Concurrency hint handed to the planner
    ///
    /// Uses the configured override or the platform query, capped by
    /// `max_threads` when it is set. An unknown (0) count stays 0 unless a
    /// cap applies, in which case the planner's fallback is capped instead.
    pub fn concurrency_hint(&self) -> usize {
        let detected = self.hardware_threads.unwrap_or_else(hardware_concurrency);
        if self.max_threads == 0 {
            return detected;
        }
        let available = if detected > 0 {
            detected
        } else {
            FALLBACK_HARDWARE_THREADS
        };
        std::cmp::min(available, self.max_threads)
    }
}

/// What a reduction actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReduceStats {
    pub worker_count: usize,
    pub block_size: usize,
    /// Background threads started; the last partition runs inline
    pub spawned_threads: usize,
}

impl ReduceStats {
    fn empty() -> Self {
        Self {
            worker_count: 0,
            block_size: 0,
            spawned_threads: 0,
        }
    }
}

/// Partitioned reduction over OS threads
///
/// The input is split by [`PartitionPlan`]; every partition except the last
/// runs on its own [`JoiningThread`], the last runs on the calling thread.
/// After all workers are joined the partial results are folded in partition
/// order, seeded by the caller's initial value, so any associative `op` gives
/// the same answer as a sequential fold regardless of thread count or
/// scheduling. `op` does not need to be commutative.
///
/// Joins are unbounded: a worker that never returns blocks the reduction
/// forever. Any spawn failure or worker panic aborts the whole reduction;
/// partial results are never returned.
pub struct ParallelReduce {
    config: ReduceConfig,
}

impl Default for ParallelReduce {
    fn default() -> Self {
        Self::new(ReduceConfig::default())
    }
}

impl ParallelReduce {
    pub fn new(config: ReduceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReduceConfig {
        &self.config
    }

    /// Plan a reduction over `length` elements with this configuration
    pub fn plan(&self, length: usize) -> PartitionPlan {
        PartitionPlan::new(length, self.config.min_per_thread, self.config.concurrency_hint())
    }

    /// Reduce `items` with `op`, seeded by `init`
    ///
    /// # Example
    /// ```rust
    /// use threadkeep::parallel::ParallelReduce;
    ///
    /// let items: Vec<u64> = (1..=100).collect();
    /// let total = ParallelReduce::default().reduce(items, 0, |a, b| a + b).unwrap();
    /// assert_eq!(total, 5050);
    /// ```
    pub fn reduce<T, F>(&self, items: impl Into<Arc<[T]>>, init: T, op: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        self.reduce_with_stats(items, init, op).map(|(result, _)| result)
    }

    /// Like [`ParallelReduce::reduce`], also reporting the plan that was used
    pub fn reduce_with_stats<T, F>(
        &self,
        items: impl Into<Arc<[T]>>,
        init: T,
        op: F,
    ) -> Result<(T, ReduceStats)>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        let items: Arc<[T]> = items.into();
        if items.is_empty() {
            return Ok((init, ReduceStats::empty()));
        }

        let plan = self.plan(items.len());
        let op = Arc::new(op);
        let worker_op = Arc::clone(&op);
        let (slots, spawned_threads) = self.run_partitions(&plan, move |range| {
            accumulate_block(&items[range], &*worker_op)
        })?;

        let stats = ReduceStats {
            worker_count: plan.worker_count,
            block_size: plan.block_size,
            spawned_threads,
        };
        Ok((fold_slots(init, slots, &*op), stats))
    }

    /// Reduce `map(i)` for every index in `range` with `op`, seeded by `init`
    ///
    /// Each worker evaluates the work function for its own indices, so `map`
    /// is called exactly once per index, from whichever thread owns it.
    pub fn map_reduce<T, M, F>(&self, range: Range<usize>, init: T, map: M, op: F) -> Result<T>
    where
        T: Send + 'static,
        M: Fn(usize) -> T + Send + Sync + 'static,
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        self.map_reduce_with_stats(range, init, map, op).map(|(result, _)| result)
    }

    /// Like [`ParallelReduce::map_reduce`], also reporting the plan that was used
    pub fn map_reduce_with_stats<T, M, F>(
        &self,
        range: Range<usize>,
        init: T,
        map: M,
        op: F,
    ) -> Result<(T, ReduceStats)>
    where
        T: Send + 'static,
        M: Fn(usize) -> T + Send + Sync + 'static,
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        if range.is_empty() {
            return Ok((init, ReduceStats::empty()));
        }

        let offset = range.start;
        let plan = self.plan(range.len());
        let op = Arc::new(op);
        let worker_op = Arc::clone(&op);
        let (slots, spawned_threads) = self.run_partitions(&plan, move |local: Range<usize>| {
            accumulate_range(offset + local.start..offset + local.end, &map, &*worker_op)
        })?;

        let stats = ReduceStats {
            worker_count: plan.worker_count,
            block_size: plan.block_size,
            spawned_threads,
        };
        Ok((fold_slots(init, slots, &*op), stats))
    }

    /// Reduce a borrowed slice without copying it into shared storage
    ///
    /// Workers run inside a `crossbeam` scope, which lets them borrow `items`
    /// and `op` directly. Failures are reported the same way as in
    /// [`ParallelReduce::reduce`].
    pub fn reduce_slice<T, F>(&self, items: &[T], init: T, op: F) -> Result<T>
    where
        T: Clone + Send + Sync,
        F: Fn(T, T) -> T + Sync,
    {
        if items.is_empty() {
            return Ok(init);
        }

        let plan = self.plan(items.len());
        tracing::debug!(
            "Reducing {} borrowed elements with {} workers (block size {})",
            plan.length,
            plan.worker_count,
            plan.block_size
        );

        let partitions: Vec<Partition> = plan.partitions().collect();
        let Some((last, background)) = partitions.split_last() else {
            return Ok(init);
        };
        let op = &op;

        let slots = crossbeam::thread::scope(|s| -> Result<Vec<Option<T>>> {
            let mut failure = None;
            let mut workers = Vec::with_capacity(background.len());
            for partition in background {
                let block = &items[partition.range()];
                match s.builder().spawn(move |_| accumulate_block(block, op)) {
                    Ok(worker) => workers.push((partition.slot, worker)),
                    Err(err) => {
                        failure = Some(ThreadError::from(err));
                        break;
                    }
                }
            }

            let inline = match failure {
                None => Some(panic::catch_unwind(AssertUnwindSafe(|| {
                    accumulate_block(&items[last.range()], op)
                }))),
                Some(_) => None,
            };

            let mut slots: Vec<Option<T>> = (0..plan.worker_count).map(|_| None).collect();
            for (slot, worker) in workers {
                match worker.join() {
                    Ok(value) => slots[slot] = value,
                    Err(payload) => {
                        failure.get_or_insert(ThreadError::from_panic(payload));
                    }
                }
            }
            match inline {
                Some(Ok(value)) => slots[last.slot] = value,
                Some(Err(payload)) => {
                    failure.get_or_insert(ThreadError::from_panic(payload));
                }
                None => {}
            }

            match failure {
                Some(err) => Err(err),
                None => Ok(slots),
            }
        })
        .map_err(ThreadError::from_panic)??;

        Ok(fold_slots(init, slots, op))
    }

    /// Run `work` over every partition of `plan`
    ///
    /// All partitions but the last get their own [`JoiningThread`]; the last
    /// runs here. Returns one slot per partition, in partition order, plus the
    /// number of threads started. A spawn failure or a panic in any partition,
    /// the inline one included, is returned as an error once every started
    /// worker has been joined.
    fn run_partitions<T, W>(&self, plan: &PartitionPlan, work: W) -> Result<(Vec<Option<T>>, usize)>
    where
        T: Send + 'static,
        W: Fn(Range<usize>) -> Option<T> + Send + Sync + 'static,
    {
        tracing::debug!(
            "Reducing {} elements with {} workers (block size {})",
            plan.length,
            plan.worker_count,
            plan.block_size
        );

        let work = Arc::new(work);
        let partitions: Vec<Partition> = plan.partitions().collect();
        let mut slots: Vec<Option<T>> = (0..plan.worker_count).map(|_| None).collect();
        let Some((last, background)) = partitions.split_last() else {
            return Ok((slots, 0));
        };

        let mut failure = None;
        let mut workers = Vec::with_capacity(background.len());
        for partition in background {
            let work = Arc::clone(&work);
            let range = partition.range();
            match JoiningThread::spawn_named(
                format!("threadkeep-worker-{}", partition.slot),
                move || (*work)(range),
            ) {
                Ok(worker) => workers.push((partition.slot, worker)),
                Err(err) => {
                    tracing::debug!("Spawning worker {} failed: {}", partition.slot, err);
                    failure = Some(err);
                    break;
                }
            }
        }
        let spawned = workers.len();

        // The inline partition only runs once every background worker started.
        let inline = match failure {
            None => Some(panic::catch_unwind(AssertUnwindSafe(|| (*work)(last.range())))),
            Some(_) => None,
        };

        // Every worker is joined before the first failure, in slot order, is reported.
        for (slot, mut worker) in workers {
            match worker.join() {
                Ok(value) => slots[slot] = value,
                Err(err) => {
                    tracing::debug!("Worker {} failed: {}", slot, err);
                    failure.get_or_insert(err);
                }
            }
        }
        match inline {
            Some(Ok(value)) => slots[last.slot] = value,
            Some(Err(payload)) => {
                failure.get_or_insert(ThreadError::from_panic(payload));
            }
            None => {}
        }
        if let Some(err) = failure {
            return Err(err);
        }
        tracing::trace!("Joined {} workers", spawned);

        Ok((slots, spawned))
    }
}

/// Reduce `items` with the default configuration
pub fn parallel_accumulate<T, F>(items: impl Into<Arc<[T]>>, init: T, op: F) -> Result<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T, T) -> T + Send + Sync + 'static,
{
    ParallelReduce::default().reduce(items, init, op)
}
