//! # Workload loading
//!
//! Two on-disk formats are understood.
//!
//! TOML, with an optional quantum:
//!
//! ```toml
//! quantum = 3
//!
//! [[process]]
//! id = "A"
//! arrival = 0
//! burst = 5
//! priority = 1
//! ```
//!
//! Plain text, one `arrival burst priority` triple per line. Blank lines and
//! lines starting with `#` are skipped, and processes are named `P1`, `P2`, ...
//! in file order. The quantum has to come from the caller.
//!
//! A quantum passed to [`Workload::load`] overrides the one in the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Ticks;
use crate::error::ConfigError;
use crate::sim::{ProcessSpec, SimulationResult, simulate};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkloadFile {
    #[serde(default)]
    pub quantum: Option<Ticks>,
    #[serde(default, rename = "process")]
    pub processes: Vec<ProcessSpec>,
}

/// A validated-ready process set plus the quantum to run it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub quantum: Ticks,
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn new(processes: Vec<ProcessSpec>, quantum: Ticks) -> Self {
        Self { quantum, processes }
    }

    /// Load from `path`; `.toml` files are parsed as TOML, anything else as text.
    pub fn load(path: &Path, quantum: Option<Ticks>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let workload = if is_toml {
            Self::from_toml(&contents, quantum)?
        } else {
            Self::from_text(&contents, quantum)?
        };
        debug!(
            path = %path.display(),
            processes = workload.processes.len(),
            quantum = workload.quantum,
            "workload loaded"
        );
        Ok(workload)
    }

    pub fn from_toml(contents: &str, quantum: Option<Ticks>) -> Result<Self, ConfigError> {
        let file: WorkloadFile = toml::from_str(contents)?;
        let quantum = quantum.or(file.quantum).ok_or(ConfigError::MissingQuantum)?;
        Ok(Self::new(file.processes, quantum))
    }

    pub fn from_text(contents: &str, quantum: Option<Ticks>) -> Result<Self, ConfigError> {
        let mut processes = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let record = parse_record(line).map_err(|reason| ConfigError::Parse {
                line: index + 1,
                reason,
            })?;
            let (arrival, burst, priority) = record;
            processes.push(ProcessSpec::new(
                format!("P{}", processes.len() + 1),
                priority,
                arrival,
                burst,
            ));
        }

        let quantum = quantum.ok_or(ConfigError::MissingQuantum)?;
        Ok(Self::new(processes, quantum))
    }

    pub fn simulate(&self) -> Result<SimulationResult, ConfigError> {
        Ok(simulate(&self.processes, self.quantum)?)
    }
}

fn parse_record(line: &str) -> Result<(Ticks, Ticks, i64), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [arrival, burst, priority] = fields[..] else {
        return Err(format!(
            "expected `arrival burst priority`, found {} field(s)",
            fields.len()
        ));
    };

    let arrival = arrival
        .parse()
        .map_err(|e| format!("bad arrival time {arrival:?}: {e}"))?;
    let burst = burst
        .parse()
        .map_err(|e| format!("bad burst time {burst:?}: {e}"))?;
    let priority = priority
        .parse()
        .map_err(|e| format!("bad priority {priority:?}: {e}"))?;
    Ok((arrival, burst, priority))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    const TOML: &str = r#"
quantum = 3

[[process]]
id = "A"
arrival = 0
burst = 5
priority = 1

[[process]]
id = "B"
arrival = 2
burst = 2
priority = 5
"#;

    #[test]
    fn toml_workload_parses() {
        let workload = Workload::from_toml(TOML, None).unwrap();
        assert_eq!(workload.quantum, 3);
        assert_eq!(
            workload.processes,
            vec![ProcessSpec::new("A", 1, 0, 5), ProcessSpec::new("B", 5, 2, 2)]
        );
    }

    #[test]
    fn command_line_quantum_wins() {
        let workload = Workload::from_toml(TOML, Some(8)).unwrap();
        assert_eq!(workload.quantum, 8);
    }

    #[test]
    fn missing_quantum_is_an_error() {
        let err = Workload::from_toml("[[process]]\nid = \"A\"\nburst = 1\n", None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingQuantum));

        let err = Workload::from_text("0 1 1\n", None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingQuantum));
    }

    #[test]
    fn optional_toml_fields_default_to_zero() {
        let workload =
            Workload::from_toml("[[process]]\nid = \"A\"\nburst = 4\n", Some(2)).unwrap();
        assert_eq!(workload.processes, vec![ProcessSpec::new("A", 0, 0, 4)]);
    }

    #[test]
    fn negative_times_fail_to_parse() {
        let err = Workload::from_toml("quantum = -1\n", None).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn text_workload_names_processes_in_order() {
        let text = "# arrival burst priority\n0 5 1\n\n2 2 5\n";
        let workload = Workload::from_text(text, Some(3)).unwrap();
        assert_eq!(
            workload.processes,
            vec![ProcessSpec::new("P1", 1, 0, 5), ProcessSpec::new("P2", 5, 2, 2)]
        );
        assert_eq!(workload.simulate().unwrap().completion_time("P2"), Some(4));
    }

    #[test]
    fn text_errors_carry_line_numbers() {
        let err = Workload::from_text("0 1 1\n0 x 1\n", Some(1)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 2, .. }));

        let err = Workload::from_text("0 1\n", Some(1)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 1, .. }));
    }

    #[test]
    fn simulation_errors_surface_through_config() {
        let err = Workload::from_text("0 1 1\n", Some(0)).unwrap().simulate().unwrap_err();
        assert!(matches!(err, ConfigError::Sim(SimError::InvalidQuantum(0))));
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("work.toml");
        fs::write(&toml_path, TOML).unwrap();
        assert_eq!(Workload::load(&toml_path, None).unwrap().processes.len(), 2);

        let text_path = dir.path().join("work.txt");
        fs::write(&text_path, "1 1 1\n").unwrap();
        assert_eq!(Workload::load(&text_path, Some(1)).unwrap().processes[0].id, "P1");

        let missing = dir.path().join("nope.toml");
        assert!(matches!(Workload::load(&missing, None), Err(ConfigError::Io(_))));
    }
}
