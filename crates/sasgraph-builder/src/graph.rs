//! Directed state graph with merged parallel transitions.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use sasgraph_core::{Cost, Problem, State};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Data carried by an edge: the cheapest known operator realizing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub weight: Cost,
    pub label: String,
}

/// Outcome of adding a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeUpdate {
    /// No edge existed between the pair.
    Inserted,
    /// The new operator was strictly cheaper and replaced the stored one.
    Cheapened,
    /// The stored edge was at least as cheap and was kept.
    Kept,
}

/// A directed graph whose nodes are states.
///
/// At most one edge exists per ordered pair of states. Every node has an
/// entry in the adjacency map, even without outgoing edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateGraph {
    adjacency: BTreeMap<State, BTreeMap<State, Transition>>,
    edge_count: usize,
}

impl StateGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns false if it was already present.
    pub fn add_node(&mut self, state: State) -> bool {
        if self.adjacency.contains_key(&state) {
            return false;
        }
        self.adjacency.insert(state, BTreeMap::new());
        true
    }

    /// Add the edge `from -> to`, adding missing endpoints.
    ///
    /// When the edge exists the lower cost wins; on a tie the stored label is
    /// kept, so the first operator to reach the minimum names the edge.
    pub fn add_transition(
        &mut self,
        from: &State,
        to: &State,
        weight: Cost,
        label: &str,
    ) -> EdgeUpdate {
        if !self.adjacency.contains_key(to) {
            self.adjacency.insert(to.clone(), BTreeMap::new());
        }
        let targets = self.adjacency.entry(from.clone()).or_default();
        match targets.get_mut(to) {
            Some(existing) if weight < existing.weight => {
                existing.weight = weight;
                existing.label = label.to_string();
                EdgeUpdate::Cheapened
            }
            Some(_) => EdgeUpdate::Kept,
            None => {
                targets.insert(
                    to.clone(),
                    Transition {
                        weight,
                        label: label.to_string(),
                    },
                );
                self.edge_count += 1;
                EdgeUpdate::Inserted
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, state: &State) -> bool {
        self.adjacency.contains_key(state)
    }

    /// Nodes in ascending state order.
    pub fn nodes(&self) -> impl Iterator<Item = &State> + '_ {
        self.adjacency.keys()
    }

    /// Node set as an ordered set.
    pub fn node_set(&self) -> BTreeSet<State> {
        self.adjacency.keys().cloned().collect()
    }

    /// Edges ordered by source, then target.
    pub fn edges(&self) -> impl Iterator<Item = (&State, &State, &Transition)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |(to, t)| (from, to, t)))
    }

    /// The edge `from -> to`, if present.
    pub fn transition(&self, from: &State, to: &State) -> Option<&Transition> {
        self.adjacency.get(from)?.get(to)
    }

    /// Outgoing edges of a node. Empty for unknown states.
    pub fn successors<'a>(
        &'a self,
        state: &State,
    ) -> impl Iterator<Item = (&'a State, &'a Transition)> + 'a {
        self.adjacency
            .get(state)
            .into_iter()
            .flat_map(|targets| targets.iter())
    }

    /// Nodes satisfying the problem's goal.
    pub fn goal_states<'a>(&'a self, problem: &'a Problem) -> impl Iterator<Item = &'a State> + 'a {
        self.nodes().filter(move |state| problem.goal_satisfied(state))
    }

    /// Partition the nodes into weakly connected components, treating every
    /// edge as undirected. Components come in order of their smallest state.
    pub fn weak_components(&self) -> Vec<BTreeSet<State>> {
        let neighbours = self.undirected_adjacency();
        let mut assigned: BTreeSet<&State> = BTreeSet::new();
        let mut components = Vec::new();

        for start in self.adjacency.keys() {
            if assigned.contains(start) {
                continue;
            }
            let component = Self::flood(&neighbours, start);
            assigned.extend(component.iter());
            components.push(component.into_iter().cloned().collect());
        }
        components
    }

    /// The weakly connected component containing `start`, or None if
    /// `start` is not a node.
    pub fn weak_component_of(&self, start: &State) -> Option<BTreeSet<State>> {
        let (start, _) = self.adjacency.get_key_value(start)?;
        let neighbours = self.undirected_adjacency();
        Some(
            Self::flood(&neighbours, start)
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    /// Subgraph with the given nodes and every edge whose endpoints both
    /// lie among them. Unknown states are ignored.
    pub fn induced_subgraph(&self, keep: &BTreeSet<State>) -> StateGraph {
        let mut subgraph = StateGraph::new();
        for (from, targets) in &self.adjacency {
            if !keep.contains(from) {
                continue;
            }
            subgraph.add_node(from.clone());
            for (to, transition) in targets {
                if keep.contains(to) {
                    subgraph.add_transition(from, to, transition.weight, &transition.label);
                }
            }
        }
        subgraph
    }

    /// Check whether two graphs have the same nodes and the same edge pairs,
    /// ignoring weights and labels.
    pub fn same_shape(&self, other: &StateGraph) -> bool {
        self.node_count() == other.node_count()
            && self.edge_count() == other.edge_count()
            && self
                .edges()
                .all(|(from, to, _)| other.transition(from, to).is_some())
            && self.nodes().all(|state| other.contains(state))
    }

    /// SHA-256 over the canonical listing of nodes and edges (hex encoded).
    /// Equal graphs hash equally regardless of construction order.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for (from, targets) in &self.adjacency {
            hasher.update(format!("n{}\n", from).as_bytes());
            for (to, transition) in targets {
                hasher.update(
                    format!(
                        "e{}>{}:{}:{}\n",
                        from, to, transition.weight, transition.label
                    )
                    .as_bytes(),
                );
            }
        }
        hex_encode(hasher.finalize())
    }

    fn undirected_adjacency(&self) -> BTreeMap<&State, Vec<&State>> {
        let mut neighbours: BTreeMap<&State, Vec<&State>> = self
            .adjacency
            .keys()
            .map(|state| (state, Vec::new()))
            .collect();
        for (from, to, _) in self.edges() {
            if let Some(list) = neighbours.get_mut(from) {
                list.push(to);
            }
            if let Some(list) = neighbours.get_mut(to) {
                list.push(from);
            }
        }
        neighbours
    }

    fn flood<'a>(
        neighbours: &BTreeMap<&'a State, Vec<&'a State>>,
        start: &'a State,
    ) -> BTreeSet<&'a State> {
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(state) = queue.pop_front() {
            for &next in neighbours.get(state).into_iter().flatten() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }
}

fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
}
