//! Calculation module - inputs and outputs of the multi-LCA engine.
//!
//! # Components
//!
//! - `Demand` / `CalculationSetup` - functional units and impact methods to compute
//! - `VariantLabel` - names a biosphere or technosphere matrix variant
//! - `ScoreTable` - `(activity, variant) -> method -> score` accumulator
//! - `ProgressSnapshot` - throughput and ETA arithmetic for progress reporting

mod progress;
mod scores;
mod setup;
mod variant;

pub use progress::{CalculationPlan, CalculationSummary, ProgressSnapshot, ETA_WARMUP};
pub use scores::{MethodScore, ScoreKey, ScoreTable};
pub use setup::{CalculationSetup, Demand};
pub use variant::{VariantKind, VariantLabel};
