//! # sasgraph core
//!
//! Data model shared by the sasgraph crates:
//! - [`Problem`] - variables, initial state, goal and operators
//! - [`State`] - one value per variable, used as graph node identity
//! - [`Operator`] - applicability and (conditional) effect application
//! - [`SasError`] - error taxonomy

pub mod error;
pub mod model;
pub mod problem;
pub mod state;

// Re-exports for convenience
pub use error::{Result, SasError};
pub use model::{Cost, Effect, Fact, MutexGroup, Operator, Variable};
pub use problem::{Problem, ProblemBuilder};
pub use state::{State, Value};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Result, SasError};
    pub use crate::model::{Cost, Effect, Fact, MutexGroup, Operator, Variable};
    pub use crate::problem::{Problem, ProblemBuilder};
    pub use crate::state::{State, Value};
}
