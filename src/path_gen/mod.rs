//! Path generation module
//!
//! This module turns scanned files into collision-free destination paths.

mod flat_name;
mod namer;
mod plan;

pub use flat_name::FlatName;
pub use namer::{NameRegistry, Namer};
pub use plan::{PlannedCopy, plan_destinations};
