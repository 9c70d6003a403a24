//! CLI library components for the reconciliation tool.

pub mod logging;
pub mod pipeline;
pub mod snapshot;
