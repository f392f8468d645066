mod common;

use common::{init_tracing, GRIPPER, SWITCH};
use sasgraph::prelude::*;

#[test]
fn test_switch_problem() -> anyhow::Result<()> {
    init_tracing();
    let problem = parse(SWITCH)?;

    assert_eq!(problem.version, 3);
    assert!(problem.metric);
    assert_eq!(problem.variables.len(), 1);
    assert_eq!(problem.variables[0].name, "var0");
    assert_eq!(problem.variables[0].domain_size, 2);
    assert_eq!(problem.variables[0].label(0), Some("Atom light-is-off"));
    assert_eq!(problem.initial_state, State::from([0]));
    assert_eq!(problem.goal, vec![Fact::new(0, 1)]);

    let op = &problem.operators[0];
    assert_eq!(problem.operators.len(), 1);
    assert_eq!(op.name, "turn_on");
    assert_eq!(op.cost, 1);
    assert!(op.prevail.contains(&Fact::new(0, 0)));
    assert_eq!(op.effects, vec![Effect::new(0, 1)]);
    Ok(())
}

#[test]
fn test_gripper_variables_and_goal() -> anyhow::Result<()> {
    init_tracing();
    let problem = parse(GRIPPER)?;

    let names: Vec<&str> = problem.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["var0_robot", "var1_left_hand", "var2_ball1"]);
    assert_eq!(problem.domain_sizes(), vec![2, 2, 3]);
    assert_eq!(problem.initial_state, State::from([0, 0, 0]));
    assert_eq!(problem.goal, vec![Fact::new(2, 1)]);
    assert_eq!(problem.mutex_groups.len(), 1);
    assert_eq!(problem.operators.len(), 6);
    Ok(())
}

#[test]
fn test_gripper_pick_folds_effect_preconditions() -> anyhow::Result<()> {
    let problem = parse(GRIPPER)?;
    let pick = problem
        .operators
        .iter()
        .find(|op| op.name.contains("pick"))
        .expect("pick operator");

    // Explicit prevail: robot in room a.
    assert!(pick.prevail.contains(&Fact::new(0, 0)));
    // Folded from the effect lines: hand free, ball in room a.
    assert!(pick.prevail.contains(&Fact::new(1, 0)));
    assert!(pick.prevail.contains(&Fact::new(2, 0)));

    assert!(pick.effects.contains(&Effect::new(1, 1)));
    assert!(pick.effects.contains(&Effect::new(2, 2)));
    Ok(())
}

#[test]
fn test_gripper_drop_and_move() -> anyhow::Result<()> {
    let problem = parse(GRIPPER)?;

    let drop = problem
        .operators
        .iter()
        .find(|op| op.name.contains("drop"))
        .expect("drop operator");
    assert!(drop.prevail.contains(&Fact::new(0, 1)));
    assert!(drop.prevail.contains(&Fact::new(1, 1)));
    assert!(drop.prevail.contains(&Fact::new(2, 2)));
    assert!(drop.effects.contains(&Effect::new(1, 0)));
    assert!(drop.effects.contains(&Effect::new(2, 1)));

    let mv = problem
        .operators
        .iter()
        .find(|op| op.name.contains("move"))
        .expect("move operator");
    assert!(mv.prevail.contains(&Fact::new(0, 0)));
    assert!(mv.effects.contains(&Effect::new(0, 1)));
    Ok(())
}

#[test]
fn test_parsing_twice_is_equal() -> anyhow::Result<()> {
    assert_eq!(parse(GRIPPER)?, parse(GRIPPER)?);
    Ok(())
}

#[test]
fn test_truncated_fixture_is_rejected() {
    let cut = GRIPPER.find("end_goal").unwrap();
    let err = parse(&GRIPPER[..cut]).unwrap_err();
    assert_eq!(err, SasError::UnexpectedEof { section: "goal" });
}

#[test]
fn test_shifted_state_is_rejected() {
    let text = GRIPPER.replacen("0\n0\n0\nend_state", "0\n0\n0\n2\nend_state", 1);
    let err = parse(&text).unwrap_err();
    assert!(err.is_format_error());
    assert!(err.to_string().contains("expected 'end_state' but found '2'"));
}
