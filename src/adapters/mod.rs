//! Adapters - Implementations of port interfaces.
//!
//! - `database` - snapshot file format and in-memory activity database
//! - `solver` - dense reference LCA solver
//! - `progress` - progress observers
//! - `run_file` - YAML run description

pub mod database;
pub mod progress;
pub mod run_file;
pub mod solver;

pub use database::{DatabaseSnapshot, InMemoryActivityDatabase};
pub use progress::{NoopProgressObserver, TracingProgressObserver};
pub use run_file::RunFile;
pub use solver::InMemoryLcaSolver;
