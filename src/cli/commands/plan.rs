//! Partition plan preview
//!
//! Shows how many workers a reduction would use and which range each one
//! covers, without running anything.

use crate::cli::{Output, OutputFormat};
use crate::config::Settings;
use crate::parallel::{Partition, PartitionPlan};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct PlanReport {
    hint: usize,
    min_per_thread: usize,
    plan: PartitionPlan,
    spawned_threads: usize,
    partitions: Vec<Partition>,
}

/// Execute the plan command
pub fn execute(
    length: usize,
    hint: Option<usize>,
    min_per_thread: Option<usize>,
    settings: &Settings,
    format: OutputFormat,
    output: &Output,
) -> Result<()> {
    let hint = hint.unwrap_or_else(|| settings.reduce.concurrency_hint());
    let min_per_thread = min_per_thread.unwrap_or(settings.reduce.min_per_thread);
    let plan = PartitionPlan::new(length, min_per_thread, hint);

    let report = PlanReport {
        hint,
        min_per_thread,
        plan,
        spawned_threads: plan.spawned_threads(),
        partitions: plan.partitions().collect(),
    };

    if format == OutputFormat::Json {
        output.raw(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output.header("🧮 Partition Plan");
    output.key_value("Length:", &length.to_string(), false);
    output.key_value("Hardware hint:", &hint.to_string(), false);
    output.key_value("Min per thread:", &min_per_thread.to_string(), false);
    output.key_value("Workers:", &plan.worker_count.to_string(), true);
    output.key_value("Block size:", &plan.block_size.to_string(), true);
    output.key_value("Background threads:", &report.spawned_threads.to_string(), false);

    output.category("Partitions");
    for partition in &report.partitions {
        let placement = if partition.slot + 1 == plan.worker_count {
            "inline"
        } else {
            "spawned"
        };
        output.list_item(&format!(
            "#{} [{}, {}) {} elements ({})",
            partition.slot,
            partition.start,
            partition.end,
            partition.len(),
            placement
        ));
    }

    Ok(())
}
