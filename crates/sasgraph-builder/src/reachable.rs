//! Breadth-first reachability graph.

use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use sasgraph_core::{Problem, Result, State};
use tracing::{debug, info};

use crate::graph::StateGraph;
use crate::strategy::{expand, BuilderConfig, GraphStrategy};

/// Builds the graph of states reachable from the initial state.
#[derive(Debug, Clone, Default)]
pub struct ReachabilityBuilder {
    config: BuilderConfig,
}

impl ReachabilityBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom configuration.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Explore from the initial state, trying operators in declaration order.
    pub fn explore(&self, problem: &Problem) -> StateGraph {
        let start_time = Instant::now();
        let initial = problem.initial_state.clone();

        let mut graph = StateGraph::new();
        graph.add_node(initial.clone());

        let mut visited: HashSet<State> = HashSet::from([initial.clone()]);
        let mut frontier: VecDeque<State> = VecDeque::from([initial]);
        let mut expanded = 0usize;

        while let Some(current) = frontier.pop_front() {
            expanded += 1;
            expand(problem, &mut graph, &current, |next| {
                if !visited.contains(&next) {
                    visited.insert(next.clone());
                    frontier.push_back(next);
                }
            });

            if self.config.reports_progress(expanded) {
                debug!(
                    "Reachability: expanded {} states, {} queued",
                    expanded,
                    frontier.len()
                );
            }
        }

        info!(
            "Reachability graph has {} states and {} transitions ({}ms)",
            graph.node_count(),
            graph.edge_count(),
            start_time.elapsed().as_millis()
        );
        graph
    }
}

impl GraphStrategy for ReachabilityBuilder {
    fn name(&self) -> &'static str {
        "reachable"
    }

    fn build(&self, problem: &Problem) -> Result<StateGraph> {
        Ok(self.explore(problem))
    }

    fn config(&self) -> &BuilderConfig {
        &self.config
    }

    fn set_config(&mut self, config: BuilderConfig) {
        self.config = config;
    }
}

/// Build the reachability graph of a problem.
pub fn build_reachable(problem: &Problem) -> StateGraph {
    ReachabilityBuilder::new().explore(problem)
}
