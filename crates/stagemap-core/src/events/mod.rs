//! Progress events for analysis runs.
//! Trait with no-op defaults, synchronous dispatch, zero overhead when unused.

pub mod handler;
pub mod types;

pub use handler::{AnalysisEventHandler, NoopHandler};
pub use types::*;
