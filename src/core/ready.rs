use std::collections::{BTreeMap, VecDeque};

use super::state::{Priority, ProcId};

/// Ready structure: one FIFO per priority level, highest level served first.
///
/// Empty levels are never kept, so `is_empty()` is just "no levels present".
#[derive(Debug, Default)]
pub struct ReadyQueue {
    levels: BTreeMap<Priority, VecDeque<ProcId>>,
    len: usize,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, level: Priority, proc: ProcId) {
        self.levels.entry(level).or_default().push_back(proc);
        self.len += 1;
    }

    pub fn pop_highest(&mut self) -> Option<(Priority, ProcId)> {
        let mut entry = self.levels.last_entry()?;
        let level = *entry.key();
        let proc = entry
            .get_mut()
            .pop_front()
            .expect("Empty priority level left in ready queue");
        if entry.get().is_empty() {
            entry.remove();
        }
        self.len -= 1;
        Some((level, proc))
    }

    #[cfg(test)]
    pub fn highest_level(&self) -> Option<Priority> {
        self.levels.keys().next_back().copied()
    }

    pub fn contains(&self, level: Priority, proc: ProcId) -> bool {
        self.levels.get(&level).is_some_and(|q| q.contains(&proc))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels present, highest first, with their queues in dispatch order.
    pub fn levels(&self) -> impl Iterator<Item = (Priority, &VecDeque<ProcId>)> {
        self.levels.iter().rev().map(|(level, q)| (*level, q))
    }
}
