use super::state::{ProcId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub at: Ticks,
    pub proc: ProcId,
}

/// Arrival schedule ordered by time, released to the engine as time advances.
///
/// Simultaneous arrivals keep their input order, which fixes the FIFO
/// tie-break inside a priority level.
#[derive(Debug)]
pub struct ArrivalFeed {
    order: Vec<Arrival>,
    cursor: usize,
}

impl ArrivalFeed {
    pub fn new(mut order: Vec<Arrival>) -> Self {
        order.sort_by(|a, b| a.at.cmp(&b.at).then_with(|| a.proc.cmp(&b.proc)));
        Self { order, cursor: 0 }
    }

    /// Every unreleased arrival due at or before `now`, each exactly once.
    pub fn release(&mut self, now: Ticks) -> &[Arrival] {
        let start = self.cursor;
        let due = self.order[start..]
            .iter()
            .take_while(|a| a.at <= now) // contiguous, since the schedule is sorted
            .count();
        self.cursor += due;
        &self.order[start..self.cursor]
    }

    /// Arrivals not yet released, in arrival order.
    pub fn pending(&self) -> &[Arrival] {
        &self.order[self.cursor..]
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.pending().first().map(|a| a.at)
    }

    #[cfg(test)]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.order.len()
    }
}
