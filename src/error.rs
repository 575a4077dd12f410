use thiserror::Error;

use crate::core::Ticks;

/// Input rejected before any simulation step runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("time quantum must be positive, got {0}")]
    InvalidQuantum(Ticks),
    #[error("process {id:?} has a zero burst time")]
    ZeroBurst { id: String },
    #[error("process id {id:?} appears more than once")]
    DuplicateId { id: String },
    #[error("process #{index} has an empty id")]
    EmptyId { index: usize },
    #[error("latest arrival plus total burst time does not fit in {} ticks", Ticks::MAX)]
    TimeOverflow,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("no time quantum given in the workload or on the command line")]
    MissingQuantum,
    #[error(transparent)]
    Sim(#[from] SimError),
}
