pub mod driver;
pub mod metrics;
pub mod process;

pub use driver::{Completion, Segment, SegmentLabel, Sim, SimulationResult, simulate};
pub use metrics::{Metrics, ProcessMetrics};
pub use process::ProcessSpec;
