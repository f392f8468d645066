//! Graph export for visualizers and downstream tools.
//!
//! Two formats are supported:
//! - a node-link [`GraphSnapshot`] that serializes to JSON,
//! - DOT (Graphviz) text via [`to_dot`], with the initial state highlighted.
//!
//! # Examples
//!
//! ```
//! use sasgraph_builder::export::{to_dot, GraphSnapshot};
//! use sasgraph_builder::StateGraph;
//! use sasgraph_core::State;
//!
//! let mut graph = StateGraph::new();
//! graph.add_transition(&State::from([0]), &State::from([1]), 1, "turn_on");
//!
//! let json = GraphSnapshot::from_graph(&graph, Some(&State::from([0]))).to_json().unwrap();
//! assert!(json.contains("turn_on"));
//!
//! let dot = to_dot(&graph, &State::from([0])).unwrap();
//! assert!(dot.starts_with("digraph"));
//! ```

use std::fmt::Write as _;

use sasgraph_core::{Cost, Result, State};
use serde::{Deserialize, Serialize};

use crate::graph::StateGraph;

/// One edge of a [`GraphSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: State,
    pub target: State,
    pub weight: Cost,
    pub label: String,
}

/// Owned node-link view of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Initial state, if the producer knows it.
    pub initial_state: Option<State>,
    pub nodes: Vec<State>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphSnapshot {
    /// Capture a graph. Nodes and edges are listed in ascending state order.
    pub fn from_graph(graph: &StateGraph, initial_state: Option<&State>) -> Self {
        Self {
            initial_state: initial_state.cloned(),
            nodes: graph.nodes().cloned().collect(),
            edges: graph
                .edges()
                .map(|(source, target, t)| EdgeRecord {
                    source: source.clone(),
                    target: target.clone(),
                    weight: t.weight,
                    label: t.label.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild the graph described by the snapshot.
    pub fn to_graph(&self) -> StateGraph {
        let mut graph = StateGraph::new();
        for node in &self.nodes {
            graph.add_node(node.clone());
        }
        for edge in &self.edges {
            graph.add_transition(&edge.source, &edge.target, edge.weight, &edge.label);
        }
        graph
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Appearance of DOT output.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for ordinary states (default: "ellipse")
    pub node_shape: &'static str,
    /// Shape for the initial state (default: "doublecircle")
    pub initial_shape: &'static str,
    /// Fill colour for the initial state (default: "lightblue")
    pub initial_fill: &'static str,
    /// Append the weight to edge labels (default: true)
    pub show_weights: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "ellipse",
            initial_shape: "doublecircle",
            initial_fill: "lightblue",
            show_weights: true,
        }
    }
}

/// Convert a graph to DOT with the default configuration.
pub fn to_dot(graph: &StateGraph, initial_state: &State) -> std::result::Result<String, std::fmt::Error> {
    to_dot_with_config(graph, initial_state, &DotConfig::default())
}

/// Convert a graph to DOT.
///
/// Nodes are named `s0`, `s1`, ... in ascending state order and labelled
/// with their value tuple.
pub fn to_dot_with_config(
    graph: &StateGraph,
    initial_state: &State,
    config: &DotConfig,
) -> std::result::Result<String, std::fmt::Error> {
    let ids: std::collections::BTreeMap<&State, usize> =
        graph.nodes().enumerate().map(|(i, s)| (s, i)).collect();

    let mut dot = String::new();
    writeln!(dot, "digraph {{")?;
    writeln!(dot, "node [shape={}];", config.node_shape)?;

    for (state, id) in &ids {
        if *state == initial_state {
            writeln!(
                dot,
                "s{} [label=\"{}\", shape={}, style=filled, fillcolor={}];",
                id, state, config.initial_shape, config.initial_fill
            )?;
        } else {
            writeln!(dot, "s{} [label=\"{}\"];", id, state)?;
        }
    }

    for (from, to, transition) in graph.edges() {
        let label = escape(&transition.label);
        if config.show_weights {
            writeln!(
                dot,
                "s{} -> s{} [label=\"{} ({})\"];",
                ids[from], ids[to], label, transition.weight
            )?;
        } else {
            writeln!(dot, "s{} -> s{} [label=\"{}\"];", ids[from], ids[to], label)?;
        }
    }

    writeln!(dot, "}}")?;
    Ok(dot)
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
