//! Graph construction strategies and their configuration.

use sasgraph_core::{Problem, Result, SasError, State};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::graph::StateGraph;

/// Cartesian products above this size are allowed but logged.
const LARGE_CAP_WARNING: usize = 50_000_000;

/// Configuration for graph builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Maximum number of states the Cartesian builder may enumerate.
    pub max_states: usize,

    /// Emit a progress event every this many expanded states (0 disables).
    pub progress_interval: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_states: 1_000_000,
            progress_interval: 10_000,
        }
    }
}

impl BuilderConfig {
    /// Decode a configuration from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SasError::Config(e.to_string()))?;
        if config.max_states > LARGE_CAP_WARNING {
            warn!(
                "max_states = {} allows very large Cartesian enumerations",
                config.max_states
            );
        }
        Ok(config)
    }

    /// Set the Cartesian state cap.
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    /// Set the progress interval.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub(crate) fn reports_progress(&self, expanded: usize) -> bool {
        self.progress_interval > 0 && expanded % self.progress_interval == 0
    }
}

/// A way of turning a problem into a state graph.
///
/// Every call starts from an empty traversal context, so one strategy can
/// be reused across problems.
pub trait GraphStrategy {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Build the graph for a problem.
    fn build(&self, problem: &Problem) -> Result<StateGraph>;

    /// Get the builder configuration.
    fn config(&self) -> &BuilderConfig;

    /// Update the builder configuration.
    fn set_config(&mut self, config: BuilderConfig);
}

/// Apply every applicable operator to `state`, recording one merged edge
/// per successor, and hand each successor to `visit`.
pub(crate) fn expand<F>(problem: &Problem, graph: &mut StateGraph, state: &State, mut visit: F)
where
    F: FnMut(State),
{
    for op in &problem.operators {
        let Some(next) = op.successor(state) else {
            continue;
        };
        graph.add_transition(state, &next, op.cost, &op.name);
        visit(next);
    }
}
