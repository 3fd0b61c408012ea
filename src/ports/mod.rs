//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! recalculation core and the outside world. Adapters implement these ports.
//!
//! - `LcaSolver` - matrix-based LCA backend: active matrices, factorization,
//!   inventory, characterization
//! - `ActivityDatabase` - activity listing and exchange traversal
//! - `ProgressObserver` - passive side channel for long-running calculations

mod activity_database;
mod lca_solver;
mod progress_observer;

pub use activity_database::{
    ActivityDatabase, ActivityRecord, DatabaseError, ExchangeKind, ExchangeRecord,
};
pub use lca_solver::{LcaSolver, SolverError};
pub use progress_observer::ProgressObserver;
