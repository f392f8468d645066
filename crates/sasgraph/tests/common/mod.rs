//! Shared fixtures and helpers for integration tests.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use sasgraph::prelude::*;

pub const SWITCH: &str = include_str!("../../../../data/switch_simple.sas");
pub const GRIPPER: &str = include_str!("../../../../data/gripper_simple.sas");

/// Install a test subscriber once; honours RUST_LOG.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Cheapest total weight from `start` to every state it can reach.
pub fn distances(graph: &StateGraph, start: &State) -> HashMap<State, u64> {
    let mut dist: HashMap<State, u64> = HashMap::from([(start.clone(), 0)]);
    let mut heap = BinaryHeap::from([Reverse((0u64, start.clone()))]);

    while let Some(Reverse((cost, state))) = heap.pop() {
        if dist.get(&state).is_some_and(|&best| cost > best) {
            continue;
        }
        for (next, transition) in graph.successors(&state) {
            let candidate = cost + u64::from(transition.weight);
            if dist.get(next).map_or(true, |&best| candidate < best) {
                dist.insert(next.clone(), candidate);
                heap.push(Reverse((candidate, next.clone())));
            }
        }
    }
    dist
}
