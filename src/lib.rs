//! Deterministic multi-level queue (MLQ) CPU scheduling simulation.
//!
//! Processes live in a fixed hierarchy of priority-ranked queues, each bound
//! to one dispatch policy (FCFS, round-robin, or non-preemptive SJF). A
//! logical clock advances one dispatched slice at a time; the run produces
//! per-process waiting, response, turnaround, and completion metrics.

pub mod core;
pub mod io;
pub mod policy;

pub use crate::core::{
    ConfigError, MetricsSummary, MlqScheduler, ProcMetrics, ProcessRecord, Ticks,
};
pub use crate::io::{LoadError, load_path, parse_records, write_report};
pub use crate::policy::{Policy, PolicyKind};
