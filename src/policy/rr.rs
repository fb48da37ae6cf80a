use super::{Dispatch, Policy};
use crate::core::state::{QueueId, SchedCtx, Ticks};

/// Round-robin: each dispatch charges at most one quantum; unfinished work
/// is handed back to the orchestrator for requeue.
pub struct RoundRobin {
    quantum: Ticks,
}

impl RoundRobin {
    pub fn new(quantum: Ticks) -> Self {
        debug_assert!(quantum > 0, "round-robin quantum must be positive");
        Self { quantum }
    }
}

impl Policy for RoundRobin {
    fn dispatch(&mut self, ctx: &mut SchedCtx, queue: QueueId) -> Option<Dispatch> {
        let pid = ctx.queue_pop(queue)?;
        ctx.mark_started(pid);
        ctx.record_response(pid);

        let remaining = ctx.proc(pid).remaining_time;
        if remaining > self.quantum {
            ctx.charge_slice(pid, self.quantum);
            Some(Dispatch::Sliced(pid))
        } else {
            ctx.charge_slice(pid, remaining);
            ctx.mark_completed(pid);
            Some(Dispatch::Completed(pid))
        }
    }
}
