use tracing::{debug, trace};

use super::{
    arrivals::{Arrival, ArrivalFeed},
    event::SchedEvent,
    observer::Observer,
    state::{ProcId, SchedCtx, Ticks},
    trace::{Occupant, Span, TraceBuilder},
};
use crate::scheduler::Scheduler;

pub struct SchedCore<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
    feed: ArrivalFeed,
    trace: TraceBuilder,
    observer: Observer,
    // Arrivals released at construction, reported by the first step
    backlog: Vec<SchedEvent>,
}

impl<S: Scheduler> SchedCore<S> {
    /// Build an engine over a closed process set. Arrivals due at time 0 are
    /// released immediately.
    pub fn new(ctx: SchedCtx, scheduler: S) -> Self {
        let feed = ArrivalFeed::new(
            ctx.procs
                .iter()
                .map(|p| Arrival {
                    at: p.arrival_time,
                    proc: p.id,
                })
                .collect(),
        );

        let mut core = Self {
            ctx,
            scheduler,
            feed,
            trace: TraceBuilder::new(),
            observer: Observer::new(),
            backlog: Vec::new(),
        };
        let mut events = Vec::new();
        core.release_arrivals(&mut events);
        core.backlog = events;
        core
    }

    pub fn is_done(&self) -> bool {
        self.ctx.all_completed()
    }

    /// Advance to the next decision point: either one idle span or one slice.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        let mut events = std::mem::take(&mut self.backlog);
        if self.is_done() {
            return events;
        }

        match self.scheduler.dispatch(&mut self.ctx) {
            Some(proc) => self.run_slice(proc, &mut events),
            None => self.idle(&mut events),
        }

        self.observer.observe(&self.ctx);
        events
    }

    /// Step until every process has completed, then hand back the trace.
    pub fn run_to_completion(mut self) -> (SchedCtx, Vec<Span>) {
        while !self.is_done() {
            self.step();
        }
        debug!(
            steps = self.observer.steps(),
            end = self.ctx.now,
            "simulation complete"
        );
        self.finish()
    }

    pub fn finish(self) -> (SchedCtx, Vec<Span>) {
        debug_assert_eq!(self.trace.end(), self.ctx.now, "trace does not reach current time");
        (self.ctx, self.trace.finish())
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    fn idle(&mut self, events: &mut Vec<SchedEvent>) {
        let from = self.ctx.now;
        // No future arrival should be impossible here; fall back to one tick
        let to = self.feed.next_arrival().unwrap_or(from + 1);
        debug_assert!(to > from, "next arrival {to} not after now {from}");
        debug!(from, to, "cpu idle");

        self.trace.record(Occupant::Idle, None, from, to);
        events.push(SchedEvent::Idle { from, to });
        self.ctx.advance_time(to - from);
        self.release_arrivals(events);
    }

    fn run_slice(&mut self, proc: ProcId, events: &mut Vec<SchedEvent>) {
        self.ctx.set_running(proc);
        let now = self.ctx.now;
        let mut run = self.scheduler.slice(&self.ctx, proc);
        debug_assert!(run > 0, "process {proc} dispatched with nothing to run");

        // First higher-priority arrival inside the slice cuts it short
        let horizon = now + run;
        let preemptor = self
            .feed
            .pending()
            .iter()
            .take_while(|a| a.at < horizon)
            .find(|a| a.at > now && self.scheduler.preempts(&self.ctx, proc, a.proc))
            .copied();

        if let Some(arrival) = preemptor {
            run = arrival.at - now;
        }
        events.push(SchedEvent::Dispatched { proc, slice: run });
        if let Some(arrival) = preemptor {
            debug!(proc, by = arrival.proc, at = arrival.at, "slice preempted");
            events.push(SchedEvent::Preempted {
                proc,
                by: arrival.proc,
                at: arrival.at,
            });
        }
        trace!(proc, now, run, "dispatch");

        let priority = self.ctx.proc(proc).priority;
        self.trace
            .record(Occupant::Proc(proc), Some(priority), now, now + run);

        let remaining = self.ctx.charge(proc, run);
        self.ctx.advance_time(run);
        self.release_arrivals(events);
        self.ctx.clear_running();

        if remaining == 0 {
            let at = self.ctx.now;
            self.ctx.mark_completed(proc, at);
            debug!(proc, at, "process completed");
            events.push(SchedEvent::Completed { proc, at });
        } else {
            self.scheduler.enqueue(&mut self.ctx, proc);
            events.push(SchedEvent::Requeued { proc, remaining });
        }
    }

    fn release_arrivals(&mut self, events: &mut Vec<SchedEvent>) {
        for arrival in self.feed.release(self.ctx.now) {
            self.scheduler.enqueue(&mut self.ctx, arrival.proc);
            events.push(SchedEvent::Arrived {
                proc: arrival.proc,
                priority: self.ctx.proc(arrival.proc).priority,
            });
        }
    }
}
