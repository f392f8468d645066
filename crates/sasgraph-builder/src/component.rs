//! Weakly connected component extraction.

use sasgraph_core::{Result, SasError, State};
use tracing::debug;

use crate::graph::StateGraph;

/// The induced subgraph of the weakly connected component containing
/// `initial_state`.
///
/// Applied to a Cartesian graph this recovers the states the problem can
/// actually reach from its initial state, provided no edge leads *into* the
/// component from an unreachable state.
pub fn main_component(graph: &StateGraph, initial_state: &State) -> Result<StateGraph> {
    let component = graph
        .weak_component_of(initial_state)
        .ok_or_else(|| SasError::StateNotFound {
            state: initial_state.clone(),
        })?;
    debug!(
        "Component of {} holds {} of {} states",
        initial_state,
        component.len(),
        graph.node_count()
    );
    Ok(graph.induced_subgraph(&component))
}
