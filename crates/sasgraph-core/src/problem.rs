//! The planning problem and its builder.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SasError};
use crate::model::{Fact, MutexGroup, Operator, Variable};
use crate::state::{State, Value};

/// Default translator output version.
pub const DEFAULT_VERSION: u32 = 3;

/// A parsed finite-domain planning problem. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Format version of the input.
    pub version: u32,

    /// Whether operator costs are meaningful (false means unit-cost input).
    /// Recorded only; costs are always taken as written.
    pub metric: bool,

    /// Variables in id order.
    pub variables: Vec<Variable>,

    /// Mutex groups, if the input declares any.
    #[serde(default)]
    pub mutex_groups: Vec<MutexGroup>,

    /// Initial assignment.
    pub initial_state: State,

    /// Facts that must hold in a goal state.
    pub goal: Vec<Fact>,

    /// Operators in declaration order.
    pub operators: Vec<Operator>,
}

impl Problem {
    /// Create a new problem builder.
    pub fn builder() -> ProblemBuilder {
        ProblemBuilder::new()
    }

    /// Look up a variable by id.
    pub fn variable(&self, id: usize) -> Option<&Variable> {
        self.variables.get(id)
    }

    /// Domain sizes in variable-id order.
    pub fn domain_sizes(&self) -> Vec<usize> {
        self.variables.iter().map(|v| v.domain_size).collect()
    }

    /// Check whether a state satisfies every goal fact.
    pub fn goal_satisfied(&self, state: &State) -> bool {
        state.satisfies(&self.goal)
    }

    /// Check that every reference in the problem points at an existing
    /// variable and an in-domain value.
    ///
    /// Errors carry line 0: by the time this runs the input position of the
    /// offending fact is no longer known.
    pub fn validate(&self) -> Result<()> {
        if self.initial_state.len() != self.variables.len() {
            return Err(SasError::format(
                0,
                format!(
                    "initial state has {} values but the problem declares {} variables",
                    self.initial_state.len(),
                    self.variables.len()
                ),
            ));
        }
        for (var, &value) in self.initial_state.values().iter().enumerate() {
            self.check_fact(&Fact::new(var, value), "initial state")?;
        }
        for fact in &self.goal {
            self.check_fact(fact, "goal")?;
        }
        for group in &self.mutex_groups {
            for fact in &group.facts {
                self.check_fact(fact, "mutex group")?;
            }
        }
        for op in &self.operators {
            for fact in op.facts() {
                self.check_fact(&fact, &op.name)?;
            }
        }
        Ok(())
    }

    /// Log every operator whose preconditions contradict each other.
    pub fn warn_inconsistent_operators(&self) -> usize {
        let mut count = 0;
        for op in &self.operators {
            let conflicts = op.conflicting_requirements();
            if !conflicts.is_empty() {
                warn!(
                    "Operator '{}' requires variables {:?} to hold two values at once and can never apply",
                    op.name, conflicts
                );
                count += 1;
            }
        }
        count
    }

    fn check_fact(&self, fact: &Fact, context: &str) -> Result<()> {
        let variable = self.variables.get(fact.var).ok_or_else(|| {
            SasError::format(
                0,
                format!("{} refers to unknown variable {}", context, fact.var),
            )
        })?;
        if !variable.admits(fact.value) {
            return Err(SasError::format(
                0,
                format!(
                    "{} assigns value {} to variable {} with domain size {}",
                    context, fact.value, fact.var, variable.domain_size
                ),
            ));
        }
        Ok(())
    }
}

/// Builder for constructing problems in code.
#[derive(Debug, Default)]
pub struct ProblemBuilder {
    version: Option<u32>,
    metric: Option<bool>,
    variables: Vec<Variable>,
    mutex_groups: Vec<MutexGroup>,
    initial_state: Option<Vec<Value>>,
    goal: Vec<Fact>,
    operators: Vec<Operator>,
}

impl ProblemBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the format version.
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the metric flag.
    pub fn metric(mut self, metric: bool) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Add a variable; its domain size is the number of labels.
    pub fn variable<I, S>(mut self, name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let value_labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let id = self.variables.len();
        self.variables.push(Variable {
            name: name.into(),
            id,
            domain_size: value_labels.len(),
            value_labels,
        });
        self
    }

    /// Add a variable with generated value labels.
    pub fn variable_with_domain(self, name: impl Into<String>, domain_size: usize) -> Self {
        let labels = (0..domain_size).map(|value| format!("value {}", value));
        self.variable(name, labels)
    }

    /// Set the initial state.
    pub fn initial_state(mut self, values: impl Into<Vec<Value>>) -> Self {
        self.initial_state = Some(values.into());
        self
    }

    /// Add a goal fact.
    pub fn goal(mut self, var: usize, value: Value) -> Self {
        self.goal.push(Fact::new(var, value));
        self
    }

    /// Add a mutex group.
    pub fn mutex_group(mut self, facts: Vec<Fact>) -> Self {
        self.mutex_groups.push(MutexGroup { facts });
        self
    }

    /// Add an operator.
    pub fn operator(mut self, operator: Operator) -> Self {
        self.operators.push(operator);
        self
    }

    /// Build and validate the problem.
    ///
    /// Without an explicit initial state every variable starts at value 0.
    pub fn build(self) -> Result<Problem> {
        if let Some(var) = self.variables.iter().find(|v| v.domain_size == 0) {
            return Err(SasError::format(
                0,
                format!("variable '{}' has an empty domain", var.name),
            ));
        }
        let initial_state = self
            .initial_state
            .unwrap_or_else(|| vec![0; self.variables.len()]);

        let problem = Problem {
            version: self.version.unwrap_or(DEFAULT_VERSION),
            metric: self.metric.unwrap_or(true),
            variables: self.variables,
            mutex_groups: self.mutex_groups,
            initial_state: State::from(initial_state),
            goal: self.goal,
            operators: self.operators,
        };
        problem.validate()?;
        Ok(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Effect;

    fn switch() -> ProblemBuilder {
        Problem::builder()
            .variable("var0", ["Atom light-is-off", "Atom light-is-on"])
            .initial_state(vec![0])
            .goal(0, 1)
            .operator(Operator::new("turn_on", 1).prevail(0, 0).effect(Effect::new(0, 1)))
    }

    #[test]
    fn test_problem_builder() {
        let problem = switch().build().unwrap();
        assert_eq!(problem.version, 3);
        assert!(problem.metric);
        assert_eq!(problem.variables[0].domain_size, 2);
        assert_eq!(problem.initial_state, State::from([0]));
        assert_eq!(problem.domain_sizes(), vec![2]);
    }

    #[test]
    fn test_goal_satisfied() {
        let problem = switch().build().unwrap();
        assert!(problem.goal_satisfied(&State::from([1])));
        assert!(!problem.goal_satisfied(&State::from([0])));
    }

    #[test]
    fn test_default_initial_state() {
        let problem = Problem::builder()
            .variable_with_domain("a", 2)
            .variable_with_domain("b", 3)
            .build()
            .unwrap();
        assert_eq!(problem.initial_state, State::from([0, 0]));
    }

    #[test]
    fn test_rejects_dangling_reference() {
        let result = switch()
            .operator(Operator::new("ghost", 1).effect(Effect::new(4, 0)))
            .build();
        assert!(matches!(result, Err(SasError::Format { .. })));
    }

    #[test]
    fn test_rejects_out_of_domain_value() {
        assert!(switch().goal(0, 2).build().is_err());
        assert!(switch().initial_state(vec![5]).build().is_err());
        assert!(switch().initial_state(vec![0, 0]).build().is_err());
    }

    #[test]
    fn test_rejects_empty_domain() {
        let result = Problem::builder()
            .variable("empty", Vec::<String>::new())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_inconsistent_operators_are_counted() {
        let problem = switch()
            .operator(Operator::new("never", 1).prevail(0, 0).prevail(0, 1))
            .build()
            .unwrap();
        assert_eq!(problem.warn_inconsistent_operators(), 1);
    }
}
