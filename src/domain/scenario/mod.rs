//! Scenario module - classification-driven scenario assignment.
//!
//! # Components
//!
//! - `ScenarioSpec` - tagged specification: plain name, ordered fallback, or aggregate
//! - `ScenarioResolver` - assigns every activity exactly one `ScenarioLabel`
//! - `ScenarioAssignment` - the resulting labels plus the scenarios actually in use

mod assignment;
mod errors;
mod resolver;
mod spec;

pub use assignment::{ScenarioAssignment, ScenarioLabel};
pub use errors::ScenarioError;
pub use resolver::{resolve, ScenarioResolver};
pub use spec::ScenarioSpec;
