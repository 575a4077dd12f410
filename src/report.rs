use std::fmt::Write;

use crate::sim::{Metrics, SimulationResult};

/// Render the execution trace as one line per segment plus a compact bar.
pub fn gantt_chart(result: &SimulationResult) -> String {
    let mut out = String::from("Gantt Chart:\n");
    if result.segments.is_empty() {
        out.push_str("  (no processes)\n");
        return out;
    }

    for seg in &result.segments {
        let _ = match seg.priority {
            Some(priority) => writeln!(
                out,
                "  [{:>4}, {:>4})  {} (priority {})",
                seg.start, seg.end, seg.label, priority
            ),
            None => writeln!(out, "  [{:>4}, {:>4})  {}", seg.start, seg.end, seg.label),
        };
    }

    out.push_str("  |");
    for seg in &result.segments {
        let _ = write!(out, " {} |", seg.label);
    }
    out.push_str("\n  ");
    for seg in &result.segments {
        // Start time sits under the `|` opening this segment's cell
        let width = seg.label.to_string().len() + 3;
        let _ = write!(out, "{:<width$}", seg.start);
    }
    let _ = writeln!(out, "{}", result.final_time());
    out
}

pub fn metrics_table(metrics: &Metrics) -> String {
    let mut out = String::from("PID\tArrival\tBurst\tPriority\tCompletion\tTurnaround\tWaiting\n");
    for p in &metrics.processes {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t\t{}\t\t{}\t\t{}",
            p.id,
            p.arrival_time,
            p.burst_time,
            p.priority,
            p.completion_time,
            p.turnaround_time,
            p.waiting_time
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Average turnaround time: {:.2} ticks", metrics.average_turnaround);
    let _ = writeln!(out, "Average waiting time: {:.2} ticks", metrics.average_waiting);
    let _ = writeln!(out, "CPU utilization: {:.2}%", metrics.cpu_utilization * 100.0);
    let _ = writeln!(out, "Longest idle period: {} ticks", metrics.longest_idle);
    out
}
