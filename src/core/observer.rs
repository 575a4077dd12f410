use super::state::{ProcState, SchedCtx};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        if let Some(id) = ctx.running {
            debug_assert_eq!(
                ctx.proc(id).state,
                ProcState::Running,
                "running slot holds process {id} which is not Running"
            );
            debug_assert!(
                !ctx.proc_is_queued(id),
                "Running process {id} must not appear in any ready queue"
            );
        }

        debug_assert_eq!(
            ctx.ready.len(),
            ctx.proc_to_level.len(),
            "ready queue and membership index disagree on size"
        );

        for (&id, &level) in &ctx.proc_to_level {
            let proc = ctx.proc(id);
            debug_assert_eq!(
                proc.state,
                ProcState::Ready,
                "Queued process {id} is {:?}, expected Ready",
                proc.state
            );
            debug_assert_eq!(proc.priority, level, "Process {id} queued at the wrong level");
            debug_assert!(
                ctx.ready.contains(level, id),
                "proc_to_level claims process {id} at level {level}, but queue does not contain it"
            );
        }

        let mut completed = 0;
        for proc in &ctx.procs {
            debug_assert!(
                proc.remaining_time <= proc.burst_time,
                "Process {} has more remaining time than its burst",
                proc.id
            );
            debug_assert_eq!(
                proc.completion_time.is_some(),
                proc.state == ProcState::Completed,
                "Process {} completion time out of sync with its state",
                proc.id
            );
            if proc.state == ProcState::Completed {
                completed += 1;
                debug_assert_eq!(proc.remaining_time, 0);
            }
        }
        debug_assert_eq!(completed, ctx.completed, "completed count drifted");
    }
}
