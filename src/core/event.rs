use serde::Serialize;

use crate::core::{Priority, ProcId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SchedEvent {
    Arrived {
        proc: ProcId,
        priority: Priority,
    },
    Dispatched {
        proc: ProcId,
        slice: Ticks,
    },
    // Slice cut short because `by` arrives at `at` with a higher priority
    Preempted {
        proc: ProcId,
        by: ProcId,
        at: Ticks,
    },
    Requeued {
        proc: ProcId,
        remaining: Ticks,
    },
    Completed {
        proc: ProcId,
        at: Ticks,
    },
    // Nothing ready over [from, to)
    Idle {
        from: Ticks,
        to: Ticks,
    },
}
