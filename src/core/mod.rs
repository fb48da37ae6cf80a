pub mod driver;
pub mod metrics;
pub mod observer;
pub mod state;

pub use driver::{ConfigError, MlqScheduler};
pub use metrics::{MetricsSummary, ProcMetrics};
pub use state::{ProcId, ProcessRecord, QueueId, ReadyQueue, SchedCtx, Ticks};
