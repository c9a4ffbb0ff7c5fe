use serde::Serialize;
use std::ops::Range;

/// Default minimum number of elements each partition should receive
pub const DEFAULT_MIN_PER_THREAD: usize = 25;

/// Thread count assumed for a concurrency hint of 0
pub const FALLBACK_HARDWARE_THREADS: usize = 2;

/// Number of threads the platform can truly run concurrently
///
/// Always at least 1: `num_cpus` reports a single CPU when it cannot tell.
/// The 0 case in [`PartitionPlan::new`] only covers caller-supplied hints,
/// which it replaces with [`FALLBACK_HARDWARE_THREADS`].
pub fn hardware_concurrency() -> usize {
    num_cpus::get()
}

/// One contiguous slice of the input handed to a single worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// Index of the result slot this partition fills
    pub slot: usize,
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// How many workers to use and how to slice the input between them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartitionPlan {
    pub length: usize,
    pub worker_count: usize,
    pub block_size: usize,
}

impl PartitionPlan {
    /// Size a reduction over `length` elements
    ///
    /// # Algorithm
    /// ```text
    /// 1. max_partitions   = ceil(length / min_per_thread)
    /// 2. hardware_threads = hint, or 2 when the hint is 0
    /// 3. worker_count     = max(1, min(hardware_threads, max_partitions))
    /// 4. block_size       = floor(length / worker_count)
    /// ```
    ///
    /// The worker count is capped before the block size is derived, so every
    /// partition but the last holds exactly `block_size` elements and the last
    /// one picks up the remainder. Since `worker_count <= max_partitions`,
    /// every non-final partition has at least `min_per_thread` elements.
    ///
    /// Callers are expected to return early on empty input; a zero `length`
    /// yields a single empty partition. A `min_per_thread` of 0 is treated
    /// as 1.
    ///
    /// # Examples
    /// ```rust
    /// use threadkeep::parallel::PartitionPlan;
    ///
    /// let plan = PartitionPlan::new(100, 25, 4);
    /// assert_eq!((plan.worker_count, plan.block_size), (4, 25));
    ///
    /// // Too little work to split: everything runs inline.
    /// let plan = PartitionPlan::new(10, 25, 16);
    /// assert_eq!((plan.worker_count, plan.block_size), (1, 10));
    /// ```
    pub fn new(length: usize, min_per_thread: usize, hardware_concurrency_hint: usize) -> Self {
        let min_per_thread = min_per_thread.max(1);
        let max_partitions = length.div_ceil(min_per_thread);
        let hardware_threads = if hardware_concurrency_hint > 0 {
            hardware_concurrency_hint
        } else {
            FALLBACK_HARDWARE_THREADS
        };
        let worker_count = std::cmp::max(1, std::cmp::min(hardware_threads, max_partitions));

        Self {
            length,
            worker_count,
            block_size: length / worker_count,
        }
    }

    /// Number of background threads a reduction with this plan starts
    ///
    /// The last partition always runs on the calling thread.
    pub fn spawned_threads(&self) -> usize {
        self.worker_count - 1
    }

    /// Partitions in slot order; the last one ends at `length`
    pub fn partitions(&self) -> impl Iterator<Item = Partition> + '_ {
        (0..self.worker_count).map(move |slot| {
            let start = slot * self.block_size;
            let end = if slot + 1 == self.worker_count {
                self.length
            } else {
                start + self.block_size
            };
            Partition { slot, start, end }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_input_runs_on_one_worker() {
        let plan = PartitionPlan::new(10, DEFAULT_MIN_PER_THREAD, 8);
        assert_eq!(plan.worker_count, 1);
        assert_eq!(plan.block_size, 10);
        assert_eq!(plan.spawned_threads(), 0);
    }

    #[test]
    fn test_hundred_elements_on_four_threads() {
        let plan = PartitionPlan::new(100, 25, 4);
        assert_eq!(plan.worker_count, 4);
        assert_eq!(plan.block_size, 25);
        assert_eq!(plan.spawned_threads(), 3);

        let ranges: Vec<_> = plan.partitions().map(|p| p.range()).collect();
        assert_eq!(ranges, vec![0..25, 25..50, 50..75, 75..100]);
    }

    #[test]
    fn test_unknown_hardware_falls_back_to_two() {
        let plan = PartitionPlan::new(1000, 25, 0);
        assert_eq!(plan.worker_count, FALLBACK_HARDWARE_THREADS);
        assert_eq!(plan.block_size, 500);
    }

    #[test]
    fn test_worker_count_capped_by_work() {
        // ceil(60 / 25) = 3 partitions even with 64 hardware threads
        let plan = PartitionPlan::new(60, 25, 64);
        assert_eq!(plan.worker_count, 3);
        assert_eq!(plan.block_size, 20);
    }

    #[test]
    fn test_last_partition_takes_remainder() {
        let plan = PartitionPlan::new(103, 10, 4);
        assert_eq!(plan.block_size, 25);
        let partitions: Vec<_> = plan.partitions().collect();
        assert_eq!(partitions.len(), 4);
        assert_eq!(partitions[3], Partition { slot: 3, start: 75, end: 103 });
        assert_eq!(partitions.iter().map(Partition::len).sum::<usize>(), 103);
    }

    #[test]
    fn test_partitions_never_empty() {
        for length in 1..300 {
            for hint in 0..=16 {
                for min in [0, 1, 3, 25] {
                    let plan = PartitionPlan::new(length, min, hint);
                    assert!(plan.worker_count >= 1);
                    assert!(plan.worker_count <= length);
                    assert!(plan.partitions().all(|p| !p.is_empty()));
                    assert_eq!(plan.partitions().last().map(|p| p.end), Some(length));
                }
            }
        }
    }

    #[test]
    fn test_zero_min_per_thread_is_treated_as_one() {
        let plan = PartitionPlan::new(3, 0, 8);
        assert_eq!(plan.worker_count, 3);
        assert_eq!(plan.block_size, 1);
    }

    #[test]
    fn test_hardware_concurrency_reports_something() {
        assert!(hardware_concurrency() >= 1);
    }
}
