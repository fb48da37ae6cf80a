use super::{Dispatch, Policy, run_to_completion};
use crate::core::state::{QueueId, SchedCtx};

/// First-come-first-served: the head of the queue runs its full burst in a
/// single dispatch.
pub struct Fcfs;

impl Policy for Fcfs {
    fn dispatch(&mut self, ctx: &mut SchedCtx, queue: QueueId) -> Option<Dispatch> {
        run_to_completion(ctx, queue)
    }
}
