use serde::{Deserialize, Serialize};

use crate::core::{Priority, Ticks};

/// One process record as supplied by a workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub id: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(rename = "burst")]
    pub burst_time: Ticks,
    #[serde(rename = "arrival", default)]
    pub arrival_time: Ticks,
}

impl ProcessSpec {
    pub fn new(
        id: impl Into<String>,
        priority: Priority,
        arrival_time: Ticks,
        burst_time: Ticks,
    ) -> Self {
        Self {
            id: id.into(),
            priority,
            burst_time,
            arrival_time,
        }
    }
}
