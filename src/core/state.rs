use rustc_hash::FxHashMap;

use super::ready::ReadyQueue;

// Index into the process table
pub type ProcId = usize;
pub type Ticks = u64;
// Higher value runs first
pub type Priority = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    // Not yet released by the arrival feed
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub id: ProcId,
    pub state: ProcState,
    pub priority: Priority,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_time: Ticks,
    pub completion_time: Option<Ticks>,
}

#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub procs: Vec<Process>,
    pub ready: ReadyQueue,
    // ProcId --> priority level it is queued at
    pub proc_to_level: FxHashMap<ProcId, Priority>,
    pub running: Option<ProcId>,
    pub completed: usize,
}

impl SchedCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            procs: Vec::new(),
            ready: ReadyQueue::new(),
            proc_to_level: FxHashMap::default(),
            running: None,
            completed: 0,
        }
    }

    pub fn create_proc(
        &mut self,
        priority: Priority,
        arrival_time: Ticks,
        burst_time: Ticks,
    ) -> ProcId {
        let id = self.procs.len();
        self.procs.push(Process {
            id,
            state: ProcState::Pending,
            priority,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            completion_time: None,
        });
        id
    }

    // Input validation bounds the clock by max arrival + total burst
    pub fn advance_time(&mut self, delta: Ticks) {
        self.now += delta;
    }

    pub fn proc(&self, id: ProcId) -> &Process {
        &self.procs[id]
    }

    pub fn proc_mut(&mut self, id: ProcId) -> &mut Process {
        &mut self.procs[id]
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.procs.len()
    }

    pub fn proc_is_queued(&self, id: ProcId) -> bool {
        self.proc_to_level.contains_key(&id)
    }

    /// Push `id` to the tail of its priority level.
    pub fn ready_push_back(&mut self, id: ProcId) {
        assert!(
            !self.proc_to_level.contains_key(&id),
            "Process {id} already present in some ready queue"
        );
        debug_assert_ne!(self.running, Some(id), "Running process {id} cannot be queued");

        let proc = self.proc_mut(id);
        debug_assert!(
            matches!(proc.state, ProcState::Pending | ProcState::Running),
            "Process {id} must be Pending or Running when queued, was {:?}",
            proc.state
        );
        proc.state = ProcState::Ready;
        let level = proc.priority;

        self.ready.push_back(level, id);
        self.proc_to_level.insert(id, level);
    }

    /// Remove the oldest process at the highest priority level present.
    pub fn ready_pop_highest(&mut self) -> Option<ProcId> {
        let (level, id) = self.ready.pop_highest()?;
        let removed = self.proc_to_level.remove(&id);
        debug_assert_eq!(removed, Some(level), "Process {id} missing ready membership");
        Some(id)
    }

    pub fn set_running(&mut self, id: ProcId) {
        debug_assert!(
            !self.proc_to_level.contains_key(&id),
            "Running process {id} must not be queued"
        );
        debug_assert!(self.running.is_none(), "CPU already running a process");

        self.running = Some(id);
        self.proc_mut(id).state = ProcState::Running;
    }

    pub fn clear_running(&mut self) -> Option<ProcId> {
        self.running.take()
    }

    /// Charge `ran` ticks of CPU time to `id`. Returns the remaining time.
    pub fn charge(&mut self, id: ProcId, ran: Ticks) -> Ticks {
        let proc = self.proc_mut(id);
        debug_assert!(
            ran <= proc.remaining_time,
            "Process {id} charged {ran} ticks with only {} remaining",
            proc.remaining_time
        );
        proc.remaining_time -= ran;
        proc.remaining_time
    }

    pub fn mark_completed(&mut self, id: ProcId, completion_time: Ticks) {
        debug_assert!(
            !self.proc_to_level.contains_key(&id),
            "Completing process {id} that is still queued"
        );

        let proc = self.proc_mut(id);
        debug_assert_eq!(
            proc.state,
            ProcState::Running,
            "Process {id} must have been running before marked complete"
        );
        debug_assert!(proc.completion_time.is_none(), "Process {id} completed twice");

        proc.state = ProcState::Completed;
        proc.remaining_time = 0;
        proc.completion_time = Some(completion_time);
        self.completed += 1;
    }
}

impl Default for SchedCtx {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_process_is_ready_and_indexed() {
        let mut ctx = SchedCtx::new();
        let a = ctx.create_proc(3, 0, 4);
        ctx.ready_push_back(a);

        assert_eq!(ctx.proc(a).state, ProcState::Ready);
        assert!(ctx.proc_is_queued(a));
        assert_eq!(ctx.ready_pop_highest(), Some(a));
        assert!(!ctx.proc_is_queued(a));
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn double_enqueue_is_rejected() {
        let mut ctx = SchedCtx::new();
        let a = ctx.create_proc(1, 0, 1);
        ctx.ready_push_back(a);
        ctx.ready_push_back(a);
    }

    #[test]
    fn completion_is_recorded_once() {
        let mut ctx = SchedCtx::new();
        let a = ctx.create_proc(1, 0, 2);
        ctx.ready_push_back(a);
        let picked = ctx.ready_pop_highest().unwrap();
        ctx.set_running(picked);
        assert_eq!(ctx.charge(picked, 2), 0);
        ctx.clear_running();
        ctx.mark_completed(picked, 2);

        assert!(ctx.all_completed());
        assert_eq!(ctx.proc(a).completion_time, Some(2));
        assert_eq!(ctx.proc(a).state, ProcState::Completed);
    }
}
