//! Parallel range sum
//!
//! Sums an inclusive integer range with `ParallelReduce`, reporting the
//! partition plan that was used.

use crate::cli::{Output, OutputFormat};
use crate::config::Settings;
use crate::parallel::{ParallelReduce, ReduceStats};
use anyhow::{Context, Result};
use serde::Serialize;

pub struct SumArgs {
    pub from: u64,
    pub to: u64,
    pub threads: Option<usize>,
    pub min_per_thread: Option<usize>,
}

#[derive(Serialize)]
struct SumReport {
    from: u64,
    to: u64,
    result: u128,
    stats: ReduceStats,
}

/// Number of values in `from..=to`, `None` if it does not fit in `usize`
fn range_length(from: u64, to: u64) -> Option<usize> {
    if from > to {
        return Some(0);
    }
    usize::try_from(to - from).ok()?.checked_add(1)
}

/// Execute the sum command
pub fn execute(args: SumArgs, settings: &Settings, format: OutputFormat, output: &Output) -> Result<()> {
    let mut config = settings.reduce.clone();
    if let Some(threads) = args.threads {
        config.hardware_threads = Some(threads);
    }
    if let Some(min_per_thread) = args.min_per_thread {
        config.min_per_thread = min_per_thread;
    }

    let length = range_length(args.from, args.to)
        .with_context(|| format!("Range {}..={} is too large to sum", args.from, args.to))?;
    output.verbose(&format!("Summing {} values", length));

    // Values are generated per index inside the workers, never materialized.
    let from = u128::from(args.from);
    let reduce = ParallelReduce::new(config);
    let (result, stats) = reduce
        .map_reduce_with_stats(0..length, 0u128, move |i| from + i as u128, |a, b| a + b)
        .context("Parallel sum failed")?;

    let report = SumReport {
        from: args.from,
        to: args.to,
        result,
        stats,
    };

    match format {
        OutputFormat::Json => output.raw(&serde_json::to_string_pretty(&report)?),
        OutputFormat::Text if output.is_quiet() => output.raw(&report.result.to_string()),
        OutputFormat::Text => {
            output.header("➕ Parallel Sum");
            output.key_value("Range:", &format!("{}..={}", report.from, report.to), false);
            output.key_value("Workers:", &stats.worker_count.to_string(), false);
            output.key_value("Block size:", &stats.block_size.to_string(), false);
            output.key_value("Background threads:", &stats.spawned_threads.to_string(), false);
            output.key_value("Result:", &report.result.to_string(), true);
        }
    }

    Ok(())
}
