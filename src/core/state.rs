use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;

// Index into process record arena
pub type ProcId = usize;
pub type Ticks = u64;
new_key_type! {
    pub struct QueueId;
}

// KeyedPriorityQueue is a max-heap, so BurstKey's Ord is flipped to pop the
// shortest burst first; admission sequence breaks ties in arrival order.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct BurstKey {
    pub burst: Ticks,
    pub seq: u64,
}

impl PartialOrd for BurstKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BurstKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .burst
            .cmp(&self.burst)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub label: String,
    pub burst_time: Ticks,
    pub arrival_time: Ticks,
    /// 1-based rank selecting the queue this process enters on arrival.
    pub queue_rank: usize,
    /// Carried through to the report; never consulted by scheduling logic.
    pub priority: i64,
    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub response_time: Option<Ticks>,
    /// Internal bookkeeping only; the reported waiting time is derived from
    /// turnaround instead.
    pub waiting_accum: Ticks,
}

impl ProcessRecord {
    pub fn new(
        label: impl Into<String>,
        burst_time: Ticks,
        arrival_time: Ticks,
        queue_rank: usize,
        priority: i64,
    ) -> Self {
        debug_assert!(burst_time > 0, "burst time must be positive");
        debug_assert!(queue_rank > 0, "queue rank is 1-based");
        Self {
            label: label.into(),
            burst_time,
            arrival_time,
            queue_rank,
            priority,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
            response_time: None,
            waiting_accum: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }
}

#[derive(Debug)]
pub enum ReadyQueue {
    Fifo {
        procs: VecDeque<ProcId>,
    },
    Ordered {
        procs: KeyedPriorityQueue<ProcId, BurstKey>,
    },
}

impl ReadyQueue {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            procs: VecDeque::new(),
        }
    }

    pub fn new_ordered() -> Self {
        Self::Ordered {
            procs: KeyedPriorityQueue::new(),
        }
    }

    pub fn has_ready(&self) -> bool {
        !self.is_empty()
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { procs } => procs.len(),
            Self::Ordered { procs } => procs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, pid: ProcId) -> bool {
        match self {
            Self::Fifo { procs } => procs.contains(&pid),
            Self::Ordered { procs } => procs.iter().any(|p| *p.0 == pid),
        }
    }
}

#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub procs: Vec<ProcessRecord>,
    pub queues: SlotMap<QueueId, ReadyQueue>,
    /// Queue ids in rank order; index 0 is the highest priority.
    pub queue_order: Vec<QueueId>,
    pub proc_to_queue: FxHashMap<ProcId, QueueId>,

    // Increment upon every enqueue; orders burst-key ties
    admission_seq: u64,
}

impl SchedCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            procs: Vec::new(),
            queues: SlotMap::with_key(),
            queue_order: Vec::new(),
            proc_to_queue: FxHashMap::default(),
            admission_seq: 0,
        }
    }

    pub fn add_record(&mut self, record: ProcessRecord) -> ProcId {
        let id = self.procs.len();
        self.procs.push(record);
        id
    }

    pub fn add_queue(&mut self, queue: ReadyQueue) -> QueueId {
        let id = self.queues.insert(queue);
        self.queue_order.push(id);
        id
    }

    /// Queue for a 1-based process rank, if configured.
    pub fn queue_for_rank(&self, rank: usize) -> Option<QueueId> {
        rank.checked_sub(1)
            .and_then(|i| self.queue_order.get(i))
            .copied()
    }

    pub fn advance_to(&mut self, time: Ticks) {
        debug_assert!(time >= self.now, "logical clock must not move backwards");
        self.now = time;
    }

    pub fn queue_push(&mut self, queue_id: QueueId, pid: ProcId) {
        assert!(
            !self.proc_to_queue.contains_key(&pid),
            "process {pid} already present in some queue"
        );

        let record = &self.procs[pid];
        debug_assert!(
            !record.is_completed() && record.remaining_time > 0,
            "completed process {pid} must not be enqueued"
        );

        let key = BurstKey {
            burst: record.burst_time,
            seq: self.admission_seq,
        };
        self.admission_seq += 1;

        let queue = self.queues.get_mut(queue_id).expect("unknown queue");
        match queue {
            ReadyQueue::Fifo { procs } => procs.push_back(pid),
            ReadyQueue::Ordered { procs } => {
                procs.push(pid, key);
            }
        };

        self.proc_to_queue.insert(pid, queue_id);
    }

    pub fn queue_pop(&mut self, queue_id: QueueId) -> Option<ProcId> {
        let queue = self.queues.get_mut(queue_id)?;
        let pid = match queue {
            ReadyQueue::Fifo { procs } => procs.pop_front(),
            ReadyQueue::Ordered { procs } => procs.pop().map(|p| p.0),
        }?;

        let removed = self.proc_to_queue.remove(&pid);
        debug_assert!(removed.is_some(), "process {pid} missing queue membership");

        Some(pid)
    }

    pub fn proc_in_any_queue(&self, pid: ProcId) -> bool {
        self.proc_to_queue.contains_key(&pid)
    }

    pub fn proc(&self, pid: ProcId) -> &ProcessRecord {
        &self.procs[pid]
    }

    pub fn proc_mut(&mut self, pid: ProcId) -> &mut ProcessRecord {
        &mut self.procs[pid]
    }

    /// Record first execution; later dispatches leave `start_time` untouched.
    pub fn mark_started(&mut self, pid: ProcId) {
        let now = self.now;
        let record = &mut self.procs[pid];
        if record.start_time.is_none() {
            debug_assert!(
                now >= record.arrival_time,
                "process {pid} started before it arrived"
            );
            record.start_time = Some(now);
        }
    }

    /// Record response delay on first dispatch only, never on a requeue.
    pub fn record_response(&mut self, pid: ProcId) {
        let now = self.now;
        let record = &mut self.procs[pid];
        if record.response_time.is_none() {
            record.response_time = Some(now - record.arrival_time);
        }
    }

    pub fn accrue_waiting(&mut self, pid: ProcId) {
        let now = self.now;
        let record = &mut self.procs[pid];
        debug_assert!(now >= record.arrival_time);
        record.waiting_accum += now - record.arrival_time;
    }

    /// Charge one execution slice: burn `slice` ticks of remaining time and
    /// advance the clock by the same amount.
    pub fn charge_slice(&mut self, pid: ProcId, slice: Ticks) {
        debug_assert!(slice > 0, "slice must be positive");
        let record = &mut self.procs[pid];
        debug_assert!(
            slice <= record.remaining_time,
            "slice exceeds remaining time of process {pid}"
        );
        record.remaining_time -= slice;
        self.now = self.now.saturating_add(slice);
    }

    pub fn mark_completed(&mut self, pid: ProcId) {
        debug_assert!(
            !self.proc_to_queue.contains_key(&pid),
            "completing process {pid} that is still enqueued"
        );

        let now = self.now;
        let record = &mut self.procs[pid];
        debug_assert_eq!(
            record.remaining_time, 0,
            "process {pid} completed with remaining time"
        );
        debug_assert!(
            record.start_time.is_some(),
            "process {pid} completed without ever starting"
        );
        debug_assert!(
            record.completion_time.is_none(),
            "completion time of process {pid} set twice"
        );

        record.completion_time = Some(now);
    }
}

impl Default for SchedCtx {
    fn default() -> Self {
        Self::new()
    }
}
