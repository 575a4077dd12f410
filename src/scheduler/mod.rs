pub mod prio_rr;

use crate::core::{
    Ticks,
    state::{ProcId, SchedCtx},
};
pub use prio_rr::PrioRrScheduler;

pub trait Scheduler {
    /// Make `proc` eligible to run. Called on arrival and on requeue after a slice.
    fn enqueue(&mut self, ctx: &mut SchedCtx, proc: ProcId);

    /// Pick the next process to run, removing it from the ready structure.
    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<ProcId>;

    /// Longest slice `proc` may run before the scheduler wants the CPU back.
    fn slice(&self, ctx: &SchedCtx, proc: ProcId) -> Ticks;

    /// Whether `arriving` interrupts `running` the moment it arrives.
    fn preempts(&self, ctx: &SchedCtx, running: ProcId, arriving: ProcId) -> bool;
}
