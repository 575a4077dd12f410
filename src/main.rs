use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use prio_rr_model::{
    Metrics, ProcessSpec, SchedEvent, Sim, Workload,
    core::Ticks,
    report::{gantt_chart, metrics_table},
};
use rand::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Preemptive priority + round-robin CPU scheduling simulator
#[derive(Parser, Debug)]
#[command(name = "prio-rr-model", version)]
struct Cli {
    /// Workload file: `.toml`, or text lines of `arrival burst priority`
    file: Option<PathBuf>,

    /// Time quantum in ticks (overrides the workload file)
    #[arg(short, long)]
    quantum: Option<Ticks>,

    /// Generate a random workload over this many ticks instead of reading a file
    #[arg(long, conflicts_with = "file")]
    random: Option<Ticks>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Priorities for --random are drawn from 0..=MAX_PRIORITY
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(i64).range(0..))]
    max_priority: i64,

    /// Print every scheduler event as it happens
    #[arg(long)]
    events: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    result: &'a prio_rr_model::SimulationResult,
    metrics: &'a Metrics,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let workload = load_workload(&cli)?;

    let mut sim = Sim::new(workload.processes.clone(), workload.quantum)
        .context("invalid workload")?;
    if cli.events {
        while !sim.all_processes_completed() {
            let now = sim.core.now();
            for event in sim.step() {
                println!("t={} {}", now, describe(&sim, &event));
            }
        }
        println!();
    }

    let result = sim.into_result();
    let metrics = Metrics::compute(&workload.processes, &result);

    match cli.format {
        Format::Text => {
            print!("{}", gantt_chart(&result));
            println!();
            print!("{}", metrics_table(&metrics));
        }
        Format::Json => {
            let report = JsonReport {
                result: &result,
                metrics: &metrics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn load_workload(cli: &Cli) -> anyhow::Result<Workload> {
    if let Some(ticks) = cli.random {
        let quantum = cli.quantum.unwrap_or(2);
        let processes = bernoulli_processes(ticks, 0.3, 0.3, 2, 6, cli.max_priority, cli.seed);
        return Ok(Workload::new(processes, quantum));
    }

    let Some(path) = cli.file.as_deref() else {
        bail!("no workload given: pass a FILE or --random TICKS");
    };
    Workload::load(path, cli.quantum).with_context(|| format!("loading {}", path.display()))
}

fn bernoulli_processes(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    max_priority: i64,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };
            let priority = rng.random_range(0..=max_priority);

            processes.push(ProcessSpec::new(
                format!("P{}", processes.len() + 1),
                priority,
                t,
                burst,
            ));
        }
    }

    processes
}

fn describe(sim: &Sim, event: &SchedEvent) -> String {
    match *event {
        SchedEvent::Arrived { proc, priority } => {
            format!("{} arrived (priority {priority})", sim.label(proc))
        }
        SchedEvent::Dispatched { proc, slice } => {
            format!("{} dispatched for {slice}", sim.label(proc))
        }
        SchedEvent::Preempted { proc, by, at } => {
            format!("{} preempted by {} at {at}", sim.label(proc), sim.label(by))
        }
        SchedEvent::Requeued { proc, remaining } => {
            format!("{} requeued with {remaining} left", sim.label(proc))
        }
        SchedEvent::Completed { proc, at } => format!("{} completed at {at}", sim.label(proc)),
        SchedEvent::Idle { from, to } => format!("idle [{from}, {to})"),
    }
}
