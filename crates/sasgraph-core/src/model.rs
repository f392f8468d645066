//! Variables, facts and operators of a finite-domain planning problem.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::{State, Value};

/// Operator cost.
pub type Cost = u32;

/// A multi-valued state variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Name as written in the input (e.g. "var0").
    pub name: String,

    /// Position among the problem's variables.
    pub id: usize,

    /// Number of values; states hold a value in `[0, domain_size)`.
    pub domain_size: usize,

    /// One human-readable label per value (e.g. "Atom at(ball1, rooma)").
    pub value_labels: Vec<String>,
}

impl Variable {
    /// Label of a value, if it is inside the domain.
    pub fn label(&self, value: Value) -> Option<&str> {
        self.value_labels.get(value as usize).map(String::as_str)
    }

    /// Check if a value lies inside the domain.
    pub fn admits(&self, value: Value) -> bool {
        (value as usize) < self.domain_size
    }
}

/// A `(variable, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fact {
    pub var: usize,
    pub value: Value,
}

impl Fact {
    pub fn new(var: usize, value: Value) -> Self {
        Self { var, value }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}={}", self.var, self.value)
    }
}

/// A (possibly conditional) assignment performed by an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Variable that changes.
    pub var: usize,

    /// Value it takes when the effect fires.
    pub new_value: Value,

    /// Facts that must hold in the pre-application state for the effect to fire.
    pub guard: Vec<Fact>,
}

impl Effect {
    /// Create an unconditional effect.
    pub fn new(var: usize, new_value: Value) -> Self {
        Self {
            var,
            new_value,
            guard: Vec::new(),
        }
    }

    /// Add a guard condition.
    pub fn guard(mut self, var: usize, value: Value) -> Self {
        self.guard.push(Fact::new(var, value));
        self
    }

    /// Check if the effect fires in the given (pre-application) state.
    pub fn fires_in(&self, state: &State) -> bool {
        state.satisfies(&self.guard)
    }
}

/// A named, costed transition rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Name of the operator (e.g. "pick ball1 rooma left").
    pub name: String,

    /// Cost of one application.
    pub cost: Cost,

    /// Facts that must hold for the operator to apply. Includes the
    /// preconditions folded into effect lines.
    pub prevail: Vec<Fact>,

    /// Effects, all evaluated against the same pre-application state.
    pub effects: Vec<Effect>,
}

impl Operator {
    /// Create an operator with no conditions and no effects.
    pub fn new(name: impl Into<String>, cost: Cost) -> Self {
        Self {
            name: name.into(),
            cost,
            prevail: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Add a prevail condition.
    pub fn prevail(mut self, var: usize, value: Value) -> Self {
        self.prevail.push(Fact::new(var, value));
        self
    }

    /// Add an effect.
    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Check if every prevail condition holds in `state`.
    pub fn is_applicable(&self, state: &State) -> bool {
        state.satisfies(&self.prevail)
    }

    /// Compute the successor of `state`.
    ///
    /// Guards are evaluated against `state`, never against the partially
    /// updated successor, so effect order does not matter unless two firing
    /// effects target the same variable (then the last one wins).
    /// Applicability is not checked here.
    pub fn apply(&self, state: &State) -> State {
        let mut values = state.values().to_vec();
        for effect in &self.effects {
            if !effect.fires_in(state) {
                continue;
            }
            if let Some(slot) = values.get_mut(effect.var) {
                *slot = effect.new_value;
            }
        }
        State::from(values)
    }

    /// Successor of `state`, or None if the operator does not apply.
    pub fn successor(&self, state: &State) -> Option<State> {
        if self.is_applicable(state) {
            Some(self.apply(state))
        } else {
            None
        }
    }

    /// Variables that the prevail conditions require to equal two different
    /// values at once. Such an operator can never apply.
    pub fn conflicting_requirements(&self) -> Vec<usize> {
        let mut required: BTreeMap<usize, Value> = BTreeMap::new();
        let mut conflicts = Vec::new();
        for fact in &self.prevail {
            match required.get(&fact.var) {
                Some(&value) if value != fact.value => {
                    if !conflicts.contains(&fact.var) {
                        conflicts.push(fact.var);
                    }
                }
                Some(_) => {}
                None => {
                    required.insert(fact.var, fact.value);
                }
            }
        }
        conflicts
    }

    /// Every fact mentioned by the operator.
    pub fn facts(&self) -> impl Iterator<Item = Fact> + '_ {
        self.prevail.iter().copied().chain(self.effects.iter().flat_map(|effect| {
            effect
                .guard
                .iter()
                .copied()
                .chain(std::iter::once(Fact::new(effect.var, effect.new_value)))
        }))
    }
}

/// A set of facts of which at most one is true in any reachable state.
/// Recorded for completeness; graph construction does not use it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutexGroup {
    pub facts: Vec<Fact>,
}
