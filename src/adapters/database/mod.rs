//! Database adapters.
//!
//! - `DatabaseSnapshot` - serde-loadable export of activities, exchanges,
//!   elementary flows, impact methods and the classification table
//! - `InMemoryActivityDatabase` - `ActivityDatabase` over a snapshot

mod in_memory;
mod snapshot;

pub use in_memory::InMemoryActivityDatabase;
pub use snapshot::{BiosphereFlow, DatabaseSnapshot, ImpactMethod, SnapshotError};
