//! Report module - summarizing combination results

pub mod preview;
pub mod run_report;
pub mod summary;

pub use preview::*;
pub use run_report::*;
pub use summary::*;
