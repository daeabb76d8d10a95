use std::collections::BTreeSet;

use critpath::resources::{NaiveScan, SweepLine, UsageInterval};
use critpath::{
    analyze_project, compute_schedule, CpmConfig, Dependency, PeakUsage, ProjectInput,
    ScenarioConfig, ScheduleError, Task,
};
use proptest::prelude::*;

// Acyclic by construction: task i may only depend on tasks 0..i.
// Durations are multiples of 0.5 so every pass is exact in f64.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = (Vec<Task>, Vec<Dependency>)> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let durations = proptest::collection::vec(0u32..40, num_tasks);
        let raw_deps = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_tasks.min(4)),
            num_tasks,
        );

        (durations, raw_deps).prop_map(|(durations, raw_deps)| {
            let tasks: Vec<Task> = durations
                .iter()
                .enumerate()
                .map(|(i, &d)| Task::new(format!("t{i}"), format!("Task {i}"), d as f64 / 2.0))
                .collect();

            let mut deps = Vec::new();
            for (i, potential) in raw_deps.into_iter().enumerate() {
                if i == 0 {
                    continue;
                }
                let valid: BTreeSet<usize> = potential.into_iter().map(|p| p % i).collect();
                for p in valid {
                    deps.push(Dependency::new(format!("t{p}"), format!("t{i}")));
                }
            }
            (tasks, deps)
        })
    })
}

proptest! {
    #[test]
    fn prop_topological_order_respects_edges((tasks, deps) in dag_strategy(25)) {
        let schedule = compute_schedule(&tasks, &deps, &CpmConfig::default()).unwrap();
        let graph = schedule.graph();

        let mut position = vec![usize::MAX; graph.len()];
        for (pos, &idx) in schedule.topological_order().iter().enumerate() {
            position[idx as usize] = pos;
        }
        prop_assert!(position.iter().all(|&p| p != usize::MAX));

        for idx in graph.indices() {
            for &succ in graph.successors(idx) {
                prop_assert!(position[idx as usize] < position[succ as usize]);
            }
        }
    }

    #[test]
    fn prop_timing_identities((tasks, deps) in dag_strategy(25)) {
        let schedule = compute_schedule(&tasks, &deps, &CpmConfig::default()).unwrap();
        let graph = schedule.graph();

        prop_assert_eq!(schedule.timings().len(), graph.len());
        for (idx, t) in graph.indices().zip(schedule.timings()) {
            let d = graph.duration(idx);
            prop_assert_eq!(t.early_finish, t.early_start + d);
            prop_assert_eq!(t.late_start, t.late_finish - d);
            prop_assert!(t.early_start >= 0.0);
            prop_assert!(t.late_finish <= schedule.project_duration());
            prop_assert!(t.total_float >= 0.0);
            prop_assert!(t.free_float >= 0.0);
            prop_assert!(t.free_float <= t.total_float);
        }
    }

    #[test]
    fn prop_edges_hold_and_duration_is_max_sink_finish((tasks, deps) in dag_strategy(25)) {
        let schedule = compute_schedule(&tasks, &deps, &CpmConfig::default()).unwrap();
        let graph = schedule.graph();

        for dep in &deps {
            let p = graph.index_of(&dep.predecessor).unwrap();
            let s = graph.index_of(&dep.successor).unwrap();
            prop_assert!(schedule.timing(s).early_start >= schedule.timing(p).early_finish);
            prop_assert!(schedule.timing(p).late_finish <= schedule.timing(s).late_start);
        }

        let max_sink_finish = graph
            .sinks()
            .map(|idx| schedule.timing(idx).early_finish)
            .fold(0.0, f64::max);
        prop_assert_eq!(schedule.project_duration(), max_sink_finish);
    }

    #[test]
    fn prop_critical_path_is_a_tight_chain((tasks, deps) in dag_strategy(25)) {
        let schedule = compute_schedule(&tasks, &deps, &CpmConfig::default()).unwrap();
        let graph = schedule.graph();
        let epsilon = schedule.epsilon();
        let path = schedule.critical_path();

        prop_assert!(!path.is_empty());
        for &idx in path {
            prop_assert!(schedule.timing(idx).total_float.abs() < epsilon);
            prop_assert!(schedule.timing(idx).is_critical);
        }
        for pair in path.windows(2) {
            prop_assert!(graph.successors(pair[0]).contains(&pair[1]));
            prop_assert_eq!(
                schedule.timing(pair[1]).early_start,
                schedule.timing(pair[0]).early_finish
            );
        }

        let first = path[0];
        let last = path[path.len() - 1];
        prop_assert_eq!(schedule.timing(first).early_start, 0.0);
        prop_assert_eq!(schedule.timing(last).early_finish, schedule.project_duration());
    }

    #[test]
    fn prop_back_edge_creates_cycle((tasks, mut deps) in dag_strategy(12)) {
        let last = tasks.len() - 1;
        deps.push(Dependency::new(format!("t{last}"), format!("t{last}")));
        let err = compute_schedule(&tasks, &deps, &CpmConfig::default()).unwrap_err();
        prop_assert!(matches!(err, ScheduleError::Cycle(_)));
        let expected = format!("t{last}");
        prop_assert!(err.task_ids().contains(&expected.as_str()));
    }

    #[test]
    fn prop_json_is_deterministic((tasks, deps) in dag_strategy(15)) {
        let input = ProjectInput::new(tasks, deps).with_deadline("t0", 3.0);
        let render = || {
            let outcome =
                analyze_project(&input, &CpmConfig::default(), &ScenarioConfig::default()).unwrap();
            serde_json::to_string(&outcome).unwrap()
        };
        prop_assert_eq!(render(), render());
    }

    #[test]
    fn prop_peak_strategies_agree(
        raw in proptest::collection::vec((0u32..50, 0u32..20, 0u64..10), 0..40)
    ) {
        let intervals: Vec<UsageInterval> = raw
            .into_iter()
            .map(|(start, len, amount)| {
                UsageInterval::new(start as f64, (start + len) as f64, amount)
            })
            .collect();
        prop_assert_eq!(NaiveScan.peak(&intervals), SweepLine.peak(&intervals));
    }
}
