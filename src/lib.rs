//! mindmerge: Survey Combination Library
//!
//! Reconciles heterogeneous student mental-health survey exports into one
//! canonical dataset: alias-based column mapping, scale normalization,
//! categorical standardization, composite scores, and validation.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
