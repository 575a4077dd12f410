use serde::Serialize;

use super::state::{Priority, ProcId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Occupant {
    Idle,
    Proc(ProcId),
}

/// One contiguous span of the execution trace, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub occupant: Occupant,
    pub priority: Option<Priority>,
    pub start: Ticks,
    pub end: Ticks,
}

impl Span {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.occupant == Occupant::Idle
    }
}

/// Builds the Gantt trace, merging back-to-back spans of the same occupant.
#[derive(Debug, Default)]
pub struct TraceBuilder {
    closed: Vec<Span>,
    open: Option<Span>,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        occupant: Occupant,
        priority: Option<Priority>,
        start: Ticks,
        end: Ticks,
    ) {
        debug_assert!(start < end, "empty span {start}..{end} for {occupant:?}");

        if let Some(open) = self.open.as_mut() {
            debug_assert_eq!(open.end, start, "trace gap or overlap at {start}");
            if open.occupant == occupant {
                open.end = end;
                return;
            }
        } else {
            debug_assert!(
                self.closed.last().is_none_or(|s| s.end == start),
                "trace gap or overlap at {start}"
            );
        }

        if let Some(prev) = self.open.replace(Span {
            occupant,
            priority,
            start,
            end,
        }) {
            self.closed.push(prev);
        }
    }

    pub fn end(&self) -> Ticks {
        self.open
            .as_ref()
            .or(self.closed.last())
            .map_or(0, |s| s.end)
    }

    pub fn finish(mut self) -> Vec<Span> {
        if let Some(open) = self.open.take() {
            self.closed.push(open);
        }
        self.closed
    }
}
