use super::{Dispatch, Policy, run_to_completion};
use crate::core::state::{QueueId, SchedCtx};

/// Non-preemptive shortest-job-first. Candidate ordering lives in the
/// queue's burst-keyed storage, so late arrivals are repositioned before
/// the next pick; the dispatch itself runs like FCFS.
pub struct Sjf;

impl Policy for Sjf {
    fn dispatch(&mut self, ctx: &mut SchedCtx, queue: QueueId) -> Option<Dispatch> {
        run_to_completion(ctx, queue)
    }
}
