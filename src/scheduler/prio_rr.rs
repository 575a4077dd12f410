use std::cmp;
use std::num::NonZeroU64;

use super::{ProcId, SchedCtx, Scheduler, Ticks};

/// Strict preemptive priority between levels, round-robin within a level.
#[derive(Debug, Clone, Copy)]
pub struct PrioRrScheduler {
    quantum: NonZeroU64,
}

impl PrioRrScheduler {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum.get()
    }
}

impl Scheduler for PrioRrScheduler {
    fn enqueue(&mut self, ctx: &mut SchedCtx, proc: ProcId) {
        // Always the tail, even when the last slice was cut short
        ctx.ready_push_back(proc);
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<ProcId> {
        ctx.ready_pop_highest()
    }

    fn slice(&self, ctx: &SchedCtx, proc: ProcId) -> Ticks {
        cmp::min(ctx.proc(proc).remaining_time, self.quantum())
    }

    fn preempts(&self, ctx: &SchedCtx, running: ProcId, arriving: ProcId) -> bool {
        ctx.proc(arriving).priority > ctx.proc(running).priority
    }
}
