use std::fmt;
use std::num::NonZeroU64;

use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::info;

use super::process::ProcessSpec;
use crate::{
    core::{Occupant, Priority, ProcId, SchedCore, SchedCtx, SchedEvent, Span, Ticks},
    error::SimError,
    scheduler::PrioRrScheduler,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentLabel {
    Idle,
    Process(String),
}

impl fmt::Display for SegmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Process(id) => f.write_str(id),
        }
    }
}

impl Serialize for SegmentLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub label: SegmentLabel,
    pub priority: Option<Priority>,
    pub start: Ticks,
    pub end: Ticks,
}

impl Segment {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.label == SegmentLabel::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub id: String,
    pub completion_time: Ticks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    pub segments: Vec<Segment>,
    // Input order
    pub completions: Vec<Completion>,
}

impl SimulationResult {
    pub fn completion_time(&self, id: &str) -> Option<Ticks> {
        self.completions
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.completion_time)
    }

    pub fn final_time(&self) -> Ticks {
        self.segments.last().map_or(0, |s| s.end)
    }

    pub fn busy_time(&self) -> Ticks {
        self.segments
            .iter()
            .filter(|s| !s.is_idle())
            .map(Segment::duration)
            .sum()
    }
}

pub struct Sim {
    pub core: SchedCore<PrioRrScheduler>,
    // Indexed by ProcId
    pub procs: Vec<ProcessSpec>,
}

impl Sim {
    pub fn new(procs: Vec<ProcessSpec>, quantum: Ticks) -> Result<Self, SimError> {
        let quantum = NonZeroU64::new(quantum).ok_or(SimError::InvalidQuantum(quantum))?;
        validate(&procs)?;

        let mut ctx = SchedCtx::new();
        for spec in &procs {
            let id = ctx.create_proc(spec.priority, spec.arrival_time, spec.burst_time);
            debug_assert_eq!(&procs[id], spec, "ProcId must match input index");
        }

        Ok(Self {
            core: SchedCore::new(ctx, PrioRrScheduler::new(quantum)),
            procs,
        })
    }

    pub fn step(&mut self) -> Vec<SchedEvent> {
        self.core.step()
    }

    pub fn all_processes_completed(&self) -> bool {
        self.core.is_done()
    }

    pub fn label(&self, proc: ProcId) -> &str {
        &self.procs[proc].id
    }

    /// Finish any remaining steps and assemble the trace and completion times.
    pub fn into_result(self) -> SimulationResult {
        let Self { core, procs } = self;
        let (ctx, spans) = core.run_to_completion();

        let segments: Vec<Segment> = spans.iter().map(|span| segment(&procs, span)).collect();
        let completions = ctx
            .procs
            .iter()
            .map(|p| Completion {
                id: procs[p.id].id.clone(),
                completion_time: p
                    .completion_time
                    .expect("Finished simulation left a process without completion time"),
            })
            .collect();

        info!(
            processes = procs.len(),
            segments = segments.len(),
            end = ctx.now,
            "simulation finished"
        );

        SimulationResult {
            segments,
            completions,
        }
    }
}

/// Run the closed process set to completion under preemptive priority with
/// round-robin inside each priority level.
pub fn simulate(procs: &[ProcessSpec], quantum: Ticks) -> Result<SimulationResult, SimError> {
    Ok(Sim::new(procs.to_vec(), quantum)?.into_result())
}

fn validate(procs: &[ProcessSpec]) -> Result<(), SimError> {
    let mut seen = FxHashSet::default();
    let mut last_arrival: Ticks = 0;
    let mut total_burst: Ticks = 0;
    for (index, spec) in procs.iter().enumerate() {
        if spec.id.is_empty() {
            return Err(SimError::EmptyId { index });
        }
        if spec.burst_time == 0 {
            return Err(SimError::ZeroBurst {
                id: spec.id.clone(),
            });
        }
        if !seen.insert(spec.id.as_str()) {
            return Err(SimError::DuplicateId {
                id: spec.id.clone(),
            });
        }
        last_arrival = last_arrival.max(spec.arrival_time);
        total_burst = total_burst
            .checked_add(spec.burst_time)
            .ok_or(SimError::TimeOverflow)?;
    }

    // The clock never passes the latest arrival plus all CPU work
    last_arrival
        .checked_add(total_burst)
        .ok_or(SimError::TimeOverflow)?;
    Ok(())
}

fn segment(procs: &[ProcessSpec], span: &Span) -> Segment {
    let label = match span.occupant {
        Occupant::Idle => SegmentLabel::Idle,
        Occupant::Proc(proc) => SegmentLabel::Process(procs[proc].id.clone()),
    };
    Segment {
        label,
        priority: span.priority,
        start: span.start,
        end: span.end,
    }
}
