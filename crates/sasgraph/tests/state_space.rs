mod common;

use std::collections::BTreeSet;

use common::{distances, init_tracing, GRIPPER, SWITCH};
use sasgraph::prelude::*;

#[test]
fn test_switch_reachability() -> anyhow::Result<()> {
    init_tracing();
    let problem = parse(SWITCH)?;
    let graph = build_reachable(&problem);

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    let edge = graph
        .transition(&State::from([0]), &State::from([1]))
        .expect("turn_on edge");
    assert_eq!(edge.weight, 1);
    assert_eq!(edge.label, "turn_on");
    Ok(())
}

#[test]
fn test_gripper_reachable_states() -> anyhow::Result<()> {
    init_tracing();
    let problem = parse(GRIPPER)?;
    let graph = build_reachable(&problem);

    assert_eq!(graph.node_count(), 6);
    assert!(graph.contains(&problem.initial_state));
    assert!(!graph.contains(&State::from([0, 1, 0])));
    assert!(!graph.contains(&State::from([0, 0, 2])));
    Ok(())
}

#[test]
fn test_gripper_goal_costs_three() -> anyhow::Result<()> {
    let problem = parse(GRIPPER)?;
    let graph = build_reachable(&problem);

    let goals: Vec<&State> = graph.goal_states(&problem).collect();
    assert!(!goals.is_empty(), "graph contains no goal states");

    let dist = distances(&graph, &problem.initial_state);
    let best = goals.iter().filter_map(|goal| dist.get(*goal)).min();
    assert_eq!(best, Some(&3));
    Ok(())
}

#[test]
fn test_gripper_cartesian_graph() -> anyhow::Result<()> {
    init_tracing();
    let problem = parse(GRIPPER)?;
    let cartesian = build_cartesian(&problem, 100)?;
    let reachable = build_reachable(&problem);

    assert_eq!(cartesian.node_count(), 12);
    assert!(reachable.nodes().all(|state| cartesian.contains(state)));

    let main = main_component(&cartesian, &problem.initial_state)?;
    assert_eq!(main.node_count(), 6);
    assert!(!main.contains(&State::from([0, 1, 0])));

    let dist = distances(&main, &problem.initial_state);
    for state in main.nodes().filter(|state| state[2] == 1) {
        assert!(dist[state] >= 3);
    }
    let best = main
        .nodes()
        .filter(|state| state[2] == 1)
        .filter_map(|state| dist.get(state))
        .min();
    assert_eq!(best, Some(&3));
    Ok(())
}

#[test]
fn test_component_matches_reachability() -> anyhow::Result<()> {
    for text in [SWITCH, GRIPPER] {
        let problem = parse(text)?;
        let reachable = build_reachable(&problem);
        let cartesian = build_cartesian(&problem, 1_000)?;
        let main = main_component(&cartesian, &problem.initial_state)?;

        assert_eq!(main.node_set(), reachable.node_set());
        assert_eq!(main.content_hash(), reachable.content_hash());
    }
    Ok(())
}

#[test]
fn test_cartesian_weak_components_cover_all_states() -> anyhow::Result<()> {
    let problem = parse(GRIPPER)?;
    let cartesian = build_cartesian(&problem, 12)?;
    let components = cartesian.weak_components();

    let total: usize = components.iter().map(BTreeSet::len).sum();
    assert_eq!(total, 12);
    assert!(components.len() > 1);
    Ok(())
}

#[test]
fn test_capacity_guard() -> anyhow::Result<()> {
    let problem = parse(GRIPPER)?;
    let err = build_cartesian(&problem, 11).unwrap_err();
    assert_eq!(
        err,
        SasError::CapacityExceeded {
            attempted: 12,
            limit: 11
        }
    );
    assert!(err.is_recoverable());
    Ok(())
}

#[test]
fn test_repeat_builds_are_identical() -> anyhow::Result<()> {
    let problem = parse(GRIPPER)?;
    let first = build_reachable(&problem);
    let second = build_reachable(&problem);
    assert_eq!(first, second);
    assert_eq!(first.content_hash(), second.content_hash());
    Ok(())
}

#[test]
fn test_cheapest_parallel_operator_wins() -> anyhow::Result<()> {
    let costly = "begin_operator\nslow_on\n0\n1\n0 0 0 1\n5\nend_operator\n";
    let cheap = "begin_operator\nfast_on\n0\n1\n0 0 0 1\n3\nend_operator\n";
    for (first, second) in [(costly, cheap), (cheap, costly)] {
        let text = format!("{}{}{}", SWITCH, first, second);
        let problem = parse(&text)?;
        let graph = build_reachable(&problem);

        let edge = graph
            .transition(&State::from([0]), &State::from([1]))
            .expect("edge (0) -> (1)");
        // turn_on (cost 1) from the fixture is cheaper than both.
        assert_eq!(edge.weight, 1);
        assert_eq!(edge.label, "turn_on");

        let without_turn_on = text.replacen("turn_on\n0\n1\n0 0 0 1\n1", "turn_on\n1\n0 1\n0\n1", 1);
        let problem = parse(&without_turn_on)?;
        let graph = build_reachable(&problem);
        let edge = graph
            .transition(&State::from([0]), &State::from([1]))
            .expect("edge (0) -> (1)");
        assert_eq!(edge.weight, 3);
        assert_eq!(edge.label, "fast_on");
    }
    Ok(())
}

#[test]
fn test_exploration_pipeline() -> anyhow::Result<()> {
    init_tracing();
    let config = BuilderConfig::default().with_max_states(64);
    let exploration = explore(GRIPPER, &config)?;

    assert_eq!(exploration.reachable.node_count(), 6);
    assert!(exploration.cross_check()?);
    assert_eq!(exploration.cartesian()?.node_count(), 12);

    let goals = exploration.goal_states();
    assert_eq!(goals.len(), 2);
    assert!(goals.iter().all(|state| state[2] == 1));

    let snapshot = exploration.snapshot();
    assert_eq!(snapshot.initial_state, Some(State::from([0, 0, 0])));
    assert_eq!(snapshot.nodes.len(), 6);
    let back = GraphSnapshot::from_json(&snapshot.to_json()?)?;
    assert_eq!(back.to_graph(), exploration.reachable);
    Ok(())
}

#[test]
fn test_exploration_respects_cap() -> anyhow::Result<()> {
    let config = BuilderConfig::from_json(r#"{"max_states": 4}"#)?;
    let exploration = explore(GRIPPER, &config)?;
    assert_eq!(exploration.reachable.node_count(), 6);
    assert!(matches!(
        exploration.cross_check(),
        Err(SasError::CapacityExceeded { attempted: 12, limit: 4 })
    ));
    Ok(())
}

#[test]
fn test_strategies_share_a_trait() -> anyhow::Result<()> {
    let problem = parse(GRIPPER)?;
    let strategies: Vec<Box<dyn GraphStrategy>> = vec![
        Box::new(ReachabilityBuilder::new()),
        Box::new(CartesianBuilder::new()),
    ];
    let sizes: Vec<(&str, usize)> = strategies
        .iter()
        .map(|s| s.build(&problem).map(|g| (s.name(), g.node_count())))
        .collect::<Result<_>>()?;
    assert_eq!(sizes, vec![("reachable", 6), ("cartesian", 12)]);
    Ok(())
}
