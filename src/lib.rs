pub mod config;
pub mod core;
pub mod error;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use config::Workload;
pub use crate::core::SchedEvent;
pub use error::{ConfigError, SimError};
pub use scheduler::Scheduler;
pub use sim::{Metrics, ProcessSpec, Segment, SegmentLabel, Sim, SimulationResult, simulate};
