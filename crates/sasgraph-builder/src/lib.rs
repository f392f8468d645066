//! # sasgraph builder
//!
//! State-space graph construction for a parsed [`Problem`](sasgraph_core::Problem):
//! - [`ReachabilityBuilder`] - breadth-first exploration from the initial state
//! - [`CartesianBuilder`] - every combination of variable values
//! - [`main_component`] - weakly connected component of a given state
//!
//! Both builders merge parallel transitions, keeping the cheapest operator.

pub mod cartesian;
pub mod component;
pub mod export;
pub mod graph;
pub mod reachable;
pub mod strategy;

pub use cartesian::{build_cartesian, state_space_size, CartesianBuilder};
pub use component::main_component;
pub use export::{DotConfig, GraphSnapshot};
pub use graph::{EdgeUpdate, StateGraph, Transition};
pub use reachable::{build_reachable, ReachabilityBuilder};
pub use strategy::{BuilderConfig, GraphStrategy};
