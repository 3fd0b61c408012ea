//! Exchange module - exchange pairs severed per scenario.

mod pairs;

pub use pairs::{ExchangePair, ScenarioPairs, SkipSet};
