use super::metrics::ProcMetrics;
use super::observer::Observer;
use super::state::{ProcId, ProcessRecord, QueueId, SchedCtx, Ticks};
use crate::policy::{Dispatch, Policy, PolicyKind};
use log::{debug, trace};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("queue hierarchy is empty")]
    NoQueues,
    #[error("round-robin queue at rank {rank} has a zero quantum")]
    InvalidQuantum { rank: usize },
    #[error("process {label:?} targets queue {rank}, but only {queues} queues are configured")]
    RankOutOfRange {
        label: String,
        rank: usize,
        queues: usize,
    },
}

struct Level {
    queue: QueueId,
    policy: Box<dyn Policy>,
}

/// Multi-level queue orchestrator: admits arrivals, dispatches exactly one
/// process slice per cycle under strict queue priority, and skips idle gaps
/// straight to the next arrival.
pub struct MlqScheduler {
    pub ctx: SchedCtx,
    levels: Vec<Level>,
    /// Not-yet-arrived processes, in input order.
    pending: Vec<ProcId>,
    /// Completed processes, in completion order.
    results: Vec<ProcId>,
    /// Process sliced out by round-robin last cycle; returns to the tail of
    /// its queue after the next admission pass, so work arriving during the
    /// slice is queued ahead of it.
    requeue: Option<(QueueId, ProcId)>,
    observer: Observer,
}

// Policy trait objects carry no useful state to print
impl fmt::Debug for MlqScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MlqScheduler")
            .field("now", &self.ctx.now)
            .field("levels", &self.levels.len())
            .field("pending", &self.pending)
            .field("results", &self.results)
            .field("requeue", &self.requeue)
            .finish()
    }
}

impl MlqScheduler {
    /// Build a scheduler from a queue hierarchy (index 0 = highest priority)
    /// and the full process set. All configuration errors are reported here,
    /// before the run starts.
    pub fn new(
        levels: &[PolicyKind],
        records: Vec<ProcessRecord>,
    ) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::NoQueues);
        }
        for (i, kind) in levels.iter().enumerate() {
            if matches!(kind, PolicyKind::RoundRobin { quantum: 0 }) {
                return Err(ConfigError::InvalidQuantum { rank: i + 1 });
            }
        }
        for record in &records {
            if record.queue_rank == 0 || record.queue_rank > levels.len() {
                return Err(ConfigError::RankOutOfRange {
                    label: record.label.clone(),
                    rank: record.queue_rank,
                    queues: levels.len(),
                });
            }
        }

        let mut ctx = SchedCtx::new();
        let levels = levels
            .iter()
            .map(|kind| Level {
                queue: ctx.add_queue(kind.storage()),
                policy: kind.build(),
            })
            .collect();
        let pending = records.into_iter().map(|r| ctx.add_record(r)).collect();

        Ok(Self {
            ctx,
            levels,
            pending,
            results: Vec::new(),
            requeue: None,
            observer: Observer::new(),
        })
    }

    /// Drive the simulation to completion of every process.
    pub fn run(&mut self) {
        while !self.is_done() {
            self.cycle();
        }
        debug!(
            "run complete: {} processes finished at t={}",
            self.results.len(),
            self.ctx.now
        );
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
            && self.requeue.is_none()
            && self
                .levels
                .iter()
                .all(|level| self.ctx.queues[level.queue].is_empty())
    }

    /// One scheduling cycle: admission, then a single strict-priority
    /// dispatch, or an idle skip when nothing is ready yet.
    pub fn cycle(&mut self) {
        self.admit_arrivals();
        if let Some((queue, pid)) = self.requeue.take() {
            trace!("t={} requeue {}", self.ctx.now, self.ctx.proc(pid).label);
            self.ctx.queue_push(queue, pid);
        }

        match self.dispatch_one() {
            Some(Dispatch::Completed(pid)) => {
                debug!(
                    "t={} completed {}",
                    self.ctx.now,
                    self.ctx.proc(pid).label
                );
                self.results.push(pid);
            }
            Some(Dispatch::Sliced(_)) => {}
            None => self.skip_to_next_arrival(),
        }

        self.observer.observe(&self.ctx);
    }

    // Move every pending process that has arrived into its target queue,
    // preserving input order. Eligible processes are split off into a fresh
    // list first, then enqueued, so the pending pool is never mutated while
    // being scanned.
    fn admit_arrivals(&mut self) {
        let now = self.ctx.now;
        let pending = std::mem::take(&mut self.pending);
        let (due, pending): (Vec<ProcId>, Vec<ProcId>) = pending
            .into_iter()
            .partition(|&pid| self.ctx.proc(pid).arrival_time <= now);
        self.pending = pending;

        for pid in due {
            let record = self.ctx.proc(pid);
            trace!(
                "t={now} admit {} into queue {}",
                record.label, record.queue_rank
            );
            let queue = self
                .ctx
                .queue_for_rank(record.queue_rank)
                .expect("queue ranks are validated at construction");
            self.ctx.queue_push(queue, pid);
        }
    }

    // Scan queues from highest priority down and dispatch from the first one
    // with ready work. At most one slice runs per cycle.
    fn dispatch_one(&mut self) -> Option<Dispatch> {
        for level in &mut self.levels {
            if !self.ctx.queues[level.queue].has_ready() {
                continue;
            }
            let dispatch = level
                .policy
                .dispatch(&mut self.ctx, level.queue)
                .expect("non-empty queue must dispatch");
            trace!(
                "t={} dispatched {} ({:?})",
                self.ctx.now,
                self.ctx.proc(dispatch.pid()).label,
                dispatch
            );
            if let Dispatch::Sliced(pid) = dispatch {
                self.requeue = Some((level.queue, pid));
            }
            return Some(dispatch);
        }
        None
    }

    // Nothing ready anywhere: jump the clock to the earliest pending
    // arrival instead of busy-waiting tick by tick.
    fn skip_to_next_arrival(&mut self) {
        let next = self
            .pending
            .iter()
            .map(|&pid| self.ctx.proc(pid).arrival_time)
            .min();
        if let Some(next) = next {
            debug!("t={} idle, skipping to t={next}", self.ctx.now);
            self.ctx.advance_to(next);
        }
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    /// Completed records in completion order.
    pub fn completed(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.results.iter().map(|&pid| self.ctx.proc(pid))
    }

    /// Per-process metrics in completion order.
    pub fn metrics(&self) -> Vec<ProcMetrics> {
        self.completed().map(ProcMetrics::from_record).collect()
    }
}
