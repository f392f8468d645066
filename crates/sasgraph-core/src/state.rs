//! World states.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::model::Fact;

/// Value assigned to a variable. Always below the variable's domain size.
pub type Value = u32;

/// One complete assignment of values to every variable of a problem.
///
/// States are plain values: two states are the same graph node iff their
/// value sequences are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(Box<[Value]>);

impl State {
    /// Create a state from its values in variable-id order.
    pub fn new(values: impl Into<Box<[Value]>>) -> Self {
        State(values.into())
    }

    /// Number of variables in the state.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the state has no variables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of a variable, or None when the id is out of range.
    pub fn get(&self, var: usize) -> Option<Value> {
        self.0.get(var).copied()
    }

    /// The values in variable-id order.
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Check whether a fact holds in this state.
    pub fn holds(&self, fact: &Fact) -> bool {
        self.get(fact.var) == Some(fact.value)
    }

    /// Check whether every fact holds in this state.
    pub fn satisfies<'a>(&self, facts: impl IntoIterator<Item = &'a Fact>) -> bool {
        facts.into_iter().all(|fact| self.holds(fact))
    }

    /// Copy of this state with one variable reassigned.
    pub fn with(&self, var: usize, value: Value) -> State {
        let mut values = self.0.to_vec();
        if let Some(slot) = values.get_mut(var) {
            *slot = value;
        }
        State::from(values)
    }
}

impl From<Vec<Value>> for State {
    fn from(values: Vec<Value>) -> Self {
        State(values.into_boxed_slice())
    }
}

impl<const N: usize> From<[Value; N]> for State {
    fn from(values: [Value; N]) -> Self {
        State(Box::new(values))
    }
}

impl Index<usize> for State {
    type Output = Value;

    fn index(&self, var: usize) -> &Value {
        &self.0[var]
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}
