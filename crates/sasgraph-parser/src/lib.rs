//! # sasgraph parser
//!
//! Turns the line-oriented SAS+ text produced by planning translators into
//! a [`Problem`](sasgraph_core::Problem).

pub mod cursor;
pub mod parser;

pub use parser::{parse, SasParser, ANY_VALUE};
