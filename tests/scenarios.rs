use prio_rr_model::{ProcessSpec, SegmentLabel, SimError, Workload, simulate};

fn timeline(result: &prio_rr_model::SimulationResult) -> Vec<(String, u64, u64)> {
    result
        .segments
        .iter()
        .map(|s| (s.label.to_string(), s.start, s.end))
        .collect()
}

fn seg(label: &str, start: u64, end: u64) -> (String, u64, u64) {
    (label.to_string(), start, end)
}

#[test]
fn higher_priority_arrival_preempts() {
    let procs = vec![ProcessSpec::new("A", 1, 0, 5), ProcessSpec::new("B", 5, 2, 2)];
    let result = simulate(&procs, 3).unwrap();

    assert_eq!(
        timeline(&result),
        vec![seg("A", 0, 2), seg("B", 2, 4), seg("A", 4, 7)]
    );
    assert_eq!(result.completion_time("B"), Some(4));
    assert_eq!(result.completion_time("A"), Some(7));
    assert_eq!(result.segments[1].priority, Some(5));
}

#[test]
fn equal_priorities_alternate_by_quantum() {
    let procs = vec![ProcessSpec::new("A", 0, 0, 4), ProcessSpec::new("B", 0, 0, 4)];
    let result = simulate(&procs, 2).unwrap();

    assert_eq!(
        timeline(&result),
        vec![seg("A", 0, 2), seg("B", 2, 4), seg("A", 4, 6), seg("B", 6, 8)]
    );
    assert_eq!(result.completion_time("A"), Some(6));
    assert_eq!(result.completion_time("B"), Some(8));
}

#[test]
fn idle_gap_before_first_arrival() {
    let procs = vec![ProcessSpec::new("A", 0, 5, 3)];
    let result = simulate(&procs, 2).unwrap();

    assert_eq!(timeline(&result), vec![seg("Idle", 0, 5), seg("A", 5, 8)]);
    assert_eq!(result.segments[0].label, SegmentLabel::Idle);
    assert_eq!(result.completion_time("A"), Some(8));
}

#[test]
fn idle_gap_between_processes() {
    let procs = vec![ProcessSpec::new("A", 3, 0, 2), ProcessSpec::new("B", 1, 6, 1)];
    let result = simulate(&procs, 4).unwrap();

    assert_eq!(
        timeline(&result),
        vec![seg("A", 0, 2), seg("Idle", 2, 6), seg("B", 6, 7)]
    );
}

#[test]
fn first_qualifying_arrival_wins() {
    // C arrives first but cannot preempt A; B can
    let procs = vec![
        ProcessSpec::new("A", 2, 0, 6),
        ProcessSpec::new("B", 9, 3, 1),
        ProcessSpec::new("C", 1, 1, 1),
        ProcessSpec::new("D", 9, 4, 1),
    ];
    let result = simulate(&procs, 6).unwrap();

    assert_eq!(
        timeline(&result),
        vec![
            seg("A", 0, 3),
            seg("B", 3, 4),
            seg("D", 4, 5),
            seg("A", 5, 8),
            seg("C", 8, 9),
        ]
    );
}

#[test]
fn simultaneous_arrivals_keep_input_order() {
    let procs = vec![
        ProcessSpec::new("late", 1, 2, 1),
        ProcessSpec::new("x", 1, 0, 1),
        ProcessSpec::new("y", 1, 0, 1),
    ];
    let result = simulate(&procs, 1).unwrap();

    assert_eq!(
        timeline(&result),
        vec![seg("x", 0, 1), seg("y", 1, 2), seg("late", 2, 3)]
    );
    // Completions stay in input order regardless of finish order
    let ids: Vec<_> = result.completions.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["late", "x", "y"]);
}

#[test]
fn negative_priorities_are_ordered() {
    let procs = vec![ProcessSpec::new("low", -5, 0, 2), ProcessSpec::new("high", -1, 0, 2)];
    let result = simulate(&procs, 1).unwrap();
    assert_eq!(timeline(&result), vec![seg("high", 0, 2), seg("low", 2, 4)]);
}

#[test]
fn zero_quantum_produces_no_trace() {
    let procs = vec![ProcessSpec::new("A", 1, 0, 1)];
    assert_eq!(simulate(&procs, 0), Err(SimError::InvalidQuantum(0)));
}

#[test]
fn toml_workload_end_to_end() {
    let workload = Workload::from_toml(
        r#"
quantum = 2

[[process]]
id = "A"
burst = 4

[[process]]
id = "B"
burst = 4
"#,
        None,
    )
    .unwrap();

    let result = workload.simulate().unwrap();
    assert_eq!(result.completion_time("A"), Some(6));
    assert_eq!(result.completion_time("B"), Some(8));
}
