use super::state::{SchedCtx, Ticks};

/// Debug-build structural sweep run after every scheduling cycle.
#[derive(Debug)]
pub struct Observer {
    cycle: u64,
    last_now: Ticks,
}

impl Observer {
    pub fn new() -> Self {
        Self {
            cycle: 0,
            last_now: 0,
        }
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.cycle += 1;

        debug_assert!(
            ctx.now >= self.last_now,
            "clock moved backwards at cycle {}",
            self.cycle
        );
        self.last_now = ctx.now;

        for (&pid, &queue_id) in &ctx.proc_to_queue {
            let record = ctx.proc(pid);
            debug_assert!(
                !record.is_completed(),
                "completed process {pid} still present in queue {queue_id:?}"
            );
            debug_assert!(
                record.remaining_time > 0,
                "drained process {pid} still present in queue {queue_id:?}"
            );
            if let Some(queue) = ctx.queues.get(queue_id) {
                debug_assert!(
                    queue.contains(pid),
                    "proc_to_queue claims process {pid} in queue {queue_id:?}, but queue does not contain it"
                );
            } else {
                debug_assert!(false, "proc_to_queue references unknown queue {queue_id:?}");
            }
        }

        for (pid, record) in ctx.procs.iter().enumerate() {
            debug_assert!(
                record.remaining_time <= record.burst_time,
                "process {pid} remaining time exceeds its burst"
            );
            if let Some(start) = record.start_time {
                debug_assert!(
                    start >= record.arrival_time,
                    "process {pid} started before it arrived"
                );
            }
            if let Some(completion) = record.completion_time {
                let start = record.start_time.unwrap_or(completion);
                debug_assert!(
                    completion >= start,
                    "process {pid} completed before it started"
                );
                debug_assert_eq!(
                    record.remaining_time, 0,
                    "process {pid} completed with remaining time"
                );
            }
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}
