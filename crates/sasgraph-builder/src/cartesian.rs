//! Theoretical graph over every combination of variable values.

use std::time::Instant;

use sasgraph_core::{Problem, Result, SasError, State, Value};
use tracing::{debug, info, warn};

use crate::graph::StateGraph;
use crate::strategy::{expand, BuilderConfig, GraphStrategy};

/// Builds the graph over the full Cartesian product of variable domains,
/// including states no operator sequence can produce.
#[derive(Debug, Clone, Default)]
pub struct CartesianBuilder {
    config: BuilderConfig,
}

impl CartesianBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom configuration.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Enumerate every state and connect it through every applicable operator.
    ///
    /// Fails before allocating anything when the product of domain sizes
    /// exceeds `max_states`.
    pub fn enumerate(&self, problem: &Problem) -> Result<StateGraph> {
        let start_time = Instant::now();
        let domains = problem.domain_sizes();
        let size = state_space_size(&domains);
        let limit = self.config.max_states;
        if size > limit as u128 {
            warn!(
                "Refusing Cartesian enumeration of {} states (limit {})",
                size, limit
            );
            return Err(SasError::CapacityExceeded {
                attempted: size,
                limit,
            });
        }

        let mut graph = StateGraph::new();
        for state in Combinations::new(&domains) {
            graph.add_node(state);
        }
        debug!("Enumerated {} Cartesian states", graph.node_count());

        let states: Vec<State> = graph.nodes().cloned().collect();
        for (expanded, state) in states.iter().enumerate() {
            // Successors of in-domain states stay in-domain, so every target
            // is already a node.
            expand(problem, &mut graph, state, |_| {});
            if self.config.reports_progress(expanded + 1) {
                debug!("Cartesian: expanded {} of {} states", expanded + 1, states.len());
            }
        }

        info!(
            "Cartesian graph has {} states and {} transitions ({}ms)",
            graph.node_count(),
            graph.edge_count(),
            start_time.elapsed().as_millis()
        );
        Ok(graph)
    }
}

impl GraphStrategy for CartesianBuilder {
    fn name(&self) -> &'static str {
        "cartesian"
    }

    fn build(&self, problem: &Problem) -> Result<StateGraph> {
        self.enumerate(problem)
    }

    fn config(&self) -> &BuilderConfig {
        &self.config
    }

    fn set_config(&mut self, config: BuilderConfig) {
        self.config = config;
    }
}

/// Build the Cartesian graph of a problem, allowing at most `max_states` nodes.
pub fn build_cartesian(problem: &Problem, max_states: usize) -> Result<StateGraph> {
    CartesianBuilder::with_config(BuilderConfig::default().with_max_states(max_states))
        .enumerate(problem)
}

/// Product of all domain sizes, saturating at `u128::MAX`.
pub fn state_space_size(domains: &[usize]) -> u128 {
    domains
        .iter()
        .fold(1u128, |acc, &size| acc.saturating_mul(size as u128))
}

/// Odometer over value combinations, last variable changing fastest.
struct Combinations<'a> {
    domains: &'a [usize],
    next: Option<Vec<Value>>,
}

impl<'a> Combinations<'a> {
    fn new(domains: &'a [usize]) -> Self {
        let next = if domains.iter().any(|&size| size == 0) {
            None
        } else {
            Some(vec![0; domains.len()])
        };
        Self { domains, next }
    }
}

impl Iterator for Combinations<'_> {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        let current = self.next.take()?;
        let mut following = current.clone();
        for var in (0..following.len()).rev() {
            following[var] += 1;
            if (following[var] as usize) < self.domains[var] {
                self.next = Some(following);
                break;
            }
            following[var] = 0;
        }
        Some(State::from(current))
    }
}
