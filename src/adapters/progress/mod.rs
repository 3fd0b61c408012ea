//! Progress observer adapters.
//!
//! - `TracingProgressObserver` - emits progress lines as tracing events
//! - `NoopProgressObserver` - discards everything

mod format;
mod noop;
mod tracing_observer;

pub use format::{format_count, format_duration, Spinner, SPINNER_FRAMES};
pub use noop::NoopProgressObserver;
pub use tracing_observer::TracingProgressObserver;
