//! Workflow module
//!
//! This module contains components for orchestrating the workflow steps.

mod context;
mod engine;
mod reporter;

pub use context::{FailedCopy, RunStats, RunSummary, WorkflowContext};
pub use engine::{FlattenOptions, flatten_directory};
pub use reporter::{ConsoleReporter, FlattenEvent, LogReporter, NoopReporter, Reporter};
