//! Batch of joining threads
//!
//! Spawns `count` owned threads, each doing a small unit of work tagged with
//! its id, then joins them all. Reports whether any work ran on the master
//! thread (it never should).

use crate::cli::{Output, OutputFormat};
use crate::thread::{JoiningThread, MasterThread};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct WorkReport {
    id: usize,
    thread: String,
    on_master: bool,
    checksum: u64,
}

fn do_work(id: usize, master: MasterThread) -> WorkReport {
    WorkReport {
        id,
        thread: format!("{:?}", std::thread::current().id()),
        on_master: master.is_current(),
        checksum: (0..=id as u64 * 1000).sum(),
    }
}

/// Execute the workers command
pub fn execute(count: usize, format: OutputFormat, output: &Output) -> Result<()> {
    let master = MasterThread::capture();

    let mut workers = Vec::with_capacity(count);
    for id in 0..count {
        let worker = JoiningThread::spawn(move || do_work(id, master))
            .with_context(|| format!("Failed to spawn worker {}", id))?;
        workers.push(worker);
    }
    output.verbose(&format!("Spawned {} workers", workers.len()));

    let mut reports = Vec::with_capacity(count);
    for (id, worker) in workers.iter_mut().enumerate() {
        let report = worker
            .join()
            .with_context(|| format!("Worker {} failed", id))?;
        reports.push(report);
    }

    if format == OutputFormat::Json {
        output.raw(&serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    output.header("🧵 Joining Threads");
    if output.is_verbose() {
        for report in &reports {
            output.list_item(&format!(
                "worker {} on {} (checksum {})",
                report.id, report.thread, report.checksum
            ));
        }
    }

    let on_master = reports.iter().filter(|report| report.on_master).count();
    if on_master > 0 {
        output.error(&format!("{} workers ran on the master thread", on_master));
    }
    output.success(&format!("Joined {} workers", reports.len()));

    Ok(())
}
