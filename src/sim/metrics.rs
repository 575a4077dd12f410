use average::{Estimate, Mean};
use serde::Serialize;

use super::{driver::SimulationResult, process::ProcessSpec};
use crate::core::{Priority, Ticks};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub id: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub processes: Vec<ProcessMetrics>,
    pub average_turnaround: f64,
    pub average_waiting: f64,
    // Busy time over final time, 0.0 for an empty run
    pub cpu_utilization: f64,
    pub longest_idle: Ticks,
    pub final_time: Ticks,
}

impl Metrics {
    /// Derive per-process and aggregate figures. `procs` must be the input
    /// the result was produced from.
    pub fn compute(procs: &[ProcessSpec], result: &SimulationResult) -> Self {
        debug_assert_eq!(procs.len(), result.completions.len());

        let processes: Vec<ProcessMetrics> = procs
            .iter()
            .zip(&result.completions)
            .map(|(spec, done)| {
                debug_assert_eq!(spec.id, done.id, "completions out of input order");
                let turnaround_time = done.completion_time - spec.arrival_time;
                ProcessMetrics {
                    id: spec.id.clone(),
                    arrival_time: spec.arrival_time,
                    burst_time: spec.burst_time,
                    priority: spec.priority,
                    completion_time: done.completion_time,
                    turnaround_time,
                    waiting_time: turnaround_time - spec.burst_time,
                }
            })
            .collect();

        let final_time = result.final_time();
        let total_burst: Ticks = procs.iter().map(|p| p.burst_time).sum();
        let cpu_utilization = if final_time == 0 {
            0.0
        } else {
            total_burst as f64 / final_time as f64
        };

        let longest_idle = result
            .segments
            .iter()
            .filter(|s| s.is_idle())
            .map(|s| s.duration())
            .max()
            .unwrap_or(0);

        Self {
            average_turnaround: avg(processes.iter().map(|p| p.turnaround_time as f64)),
            average_waiting: avg(processes.iter().map(|p| p.waiting_time as f64)),
            processes,
            cpu_utilization,
            longest_idle,
            final_time,
        }
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulate;

    #[test]
    fn turnaround_and_waiting_follow_completion() {
        let procs = vec![ProcessSpec::new("A", 1, 0, 5), ProcessSpec::new("B", 5, 2, 2)];
        let result = simulate(&procs, 3).unwrap();
        let metrics = Metrics::compute(&procs, &result);

        let a = &metrics.processes[0];
        assert_eq!((a.completion_time, a.turnaround_time, a.waiting_time), (7, 7, 2));
        let b = &metrics.processes[1];
        assert_eq!((b.completion_time, b.turnaround_time, b.waiting_time), (4, 2, 0));

        assert_eq!(metrics.average_turnaround, 4.5);
        assert_eq!(metrics.average_waiting, 1.0);
        assert_eq!(metrics.cpu_utilization, 1.0);
        assert_eq!(metrics.longest_idle, 0);
    }

    #[test]
    fn idle_time_lowers_utilization() {
        let procs = vec![ProcessSpec::new("A", 1, 5, 3)];
        let metrics = Metrics::compute(&procs, &simulate(&procs, 2).unwrap());

        assert_eq!(metrics.final_time, 8);
        assert_eq!(metrics.longest_idle, 5);
        assert_eq!(metrics.cpu_utilization, 3.0 / 8.0);
    }

    #[test]
    fn empty_run_has_zero_utilization() {
        let metrics = Metrics::compute(&[], &SimulationResult::default());
        assert!(metrics.processes.is_empty());
        assert_eq!(metrics.cpu_utilization, 0.0);
        assert_eq!(metrics.final_time, 0);
    }
}
