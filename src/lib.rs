//! HEM LCA - multi-scenario Life Cycle Assessment recalculation
//!
//! This crate implements the hypothetical extraction method: activities are
//! grouped into scenarios by their classification, the exchanges of each
//! scenario are severed in copies of the technosphere and biosphere
//! matrices, and the functional unit is recalculated under every variant.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
