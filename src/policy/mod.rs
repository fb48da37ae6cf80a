pub mod fcfs;
pub mod rr;
pub mod sjf;

pub use fcfs::Fcfs;
pub use rr::RoundRobin;
pub use sjf::Sjf;

use crate::core::state::{ProcId, QueueId, ReadyQueue, SchedCtx, Ticks};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Outcome of one dispatch from a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The process ran to completion; its completion time is set.
    Completed(ProcId),
    /// The quantum expired with work left; the orchestrator returns the
    /// process to the tail of its queue at the start of the next cycle,
    /// after that cycle's arrivals have been admitted.
    Sliced(ProcId),
}

impl Dispatch {
    pub fn pid(&self) -> ProcId {
        match *self {
            Self::Completed(pid) | Self::Sliced(pid) => pid,
        }
    }
}

/// Per-queue dispatch policy: pops one ready process and charges it a slice,
/// advancing the logical clock in `ctx` by the slice length.
pub trait Policy {
    fn dispatch(&mut self, ctx: &mut SchedCtx, queue: QueueId) -> Option<Dispatch>;
}

// FCFS runs the head to completion; SJF does the same after its queue
// storage has already ordered candidates by burst time.
pub(crate) fn run_to_completion(ctx: &mut SchedCtx, queue: QueueId) -> Option<Dispatch> {
    let pid = ctx.queue_pop(queue)?;
    ctx.mark_started(pid);
    ctx.accrue_waiting(pid);
    let remaining = ctx.proc(pid).remaining_time;
    ctx.charge_slice(pid, remaining);
    ctx.mark_completed(pid);
    Some(Dispatch::Completed(pid))
}

/// Tagged queue configuration: the policy plus the parameters it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Fcfs,
    RoundRobin { quantum: Ticks },
    Sjf,
}

impl PolicyKind {
    /// Structural container backing a queue under this policy.
    pub(crate) fn storage(&self) -> ReadyQueue {
        match self {
            Self::Sjf => ReadyQueue::new_ordered(),
            Self::Fcfs | Self::RoundRobin { .. } => ReadyQueue::new_fifo(),
        }
    }

    /// Policy driver for a queue. Callers validate the quantum first.
    pub(crate) fn build(&self) -> Box<dyn Policy> {
        match *self {
            Self::Fcfs => Box::new(Fcfs),
            Self::RoundRobin { quantum } => Box::new(RoundRobin::new(quantum)),
            Self::Sjf => Box::new(Sjf),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "fcfs"),
            Self::RoundRobin { quantum } => write!(f, "rr:{quantum}"),
            Self::Sjf => write!(f, "sjf"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePolicyError {
    #[error("unknown policy {0:?}, expected fcfs, sjf, or rr:<quantum>")]
    Unknown(String),
    #[error("round-robin spec {0:?} has no usable quantum")]
    BadQuantum(String),
}

impl FromStr for PolicyKind {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        match spec.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            lower => {
                if let Some(rest) = lower.strip_prefix("rr:") {
                    let quantum = rest
                        .trim()
                        .parse::<Ticks>()
                        .map_err(|_| ParsePolicyError::BadQuantum(spec.to_string()))?;
                    Ok(Self::RoundRobin { quantum })
                } else {
                    Err(ParsePolicyError::Unknown(spec.to_string()))
                }
            }
        }
    }
}
