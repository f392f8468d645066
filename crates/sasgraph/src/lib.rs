//! # sasgraph
//!
//! Parse finite-domain (SAS+) planning problems and build their state-space
//! graphs.
//!
//! ```
//! use sasgraph::prelude::*;
//!
//! let text = "begin_variable\nvar0\n-1\n2\noff\non\nend_variable\n\
//!             begin_state\n0\nend_state\n\
//!             begin_operator\nturn_on\n0\n1\n0 0 0 1\n1\nend_operator\n";
//!
//! let exploration = explore(text, &BuilderConfig::default()).unwrap();
//! assert_eq!(exploration.reachable.node_count(), 2);
//! assert!(exploration.cross_check().unwrap());
//! ```

use sasgraph_builder::{
    main_component, BuilderConfig, CartesianBuilder, GraphSnapshot, ReachabilityBuilder,
    StateGraph,
};
use sasgraph_core::{Problem, Result, State};
use tracing::{info, warn};

pub use sasgraph_builder;
pub use sasgraph_core;
pub use sasgraph_parser;

/// A parsed problem together with its reachability graph.
#[derive(Debug, Clone)]
pub struct Exploration {
    pub problem: Problem,
    pub reachable: StateGraph,
    config: BuilderConfig,
}

impl Exploration {
    /// Explore an already parsed problem.
    pub fn new(problem: Problem, config: BuilderConfig) -> Self {
        let reachable = ReachabilityBuilder::with_config(config.clone()).explore(&problem);
        Self {
            problem,
            reachable,
            config,
        }
    }

    /// Build the Cartesian graph under the configured state cap.
    pub fn cartesian(&self) -> Result<StateGraph> {
        CartesianBuilder::with_config(self.config.clone()).enumerate(&self.problem)
    }

    /// Check that the Cartesian component of the initial state has exactly
    /// the reachability graph's states.
    pub fn cross_check(&self) -> Result<bool> {
        let cartesian = self.cartesian()?;
        let component = main_component(&cartesian, &self.problem.initial_state)?;
        let agrees = component.node_set() == self.reachable.node_set();
        if agrees {
            info!(
                "Cartesian component agrees with reachability ({} states)",
                component.node_count()
            );
        } else {
            warn!(
                "Cartesian component has {} states, reachability found {}",
                component.node_count(),
                self.reachable.node_count()
            );
        }
        Ok(agrees)
    }

    /// Node-link snapshot of the reachability graph, initial state included.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::from_graph(&self.reachable, Some(&self.problem.initial_state))
    }

    /// States of the reachability graph that satisfy the goal.
    pub fn goal_states(&self) -> Vec<&State> {
        self.reachable.goal_states(&self.problem).collect()
    }
}

/// Parse `text` and build its reachability graph.
pub fn explore(text: &str, config: &BuilderConfig) -> Result<Exploration> {
    let problem = sasgraph_parser::parse(text)?;
    Ok(Exploration::new(problem, config.clone()))
}

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::{explore, Exploration};
    pub use sasgraph_builder::{
        build_cartesian, build_reachable, main_component, BuilderConfig, CartesianBuilder,
        GraphSnapshot, GraphStrategy, ReachabilityBuilder, StateGraph, Transition,
    };
    pub use sasgraph_core::prelude::*;
    pub use sasgraph_parser::{parse, SasParser};
}
