//! stagemap-core: shared foundation for the stagemap call-graph engine.
//!
//! Errors with stable error codes, TOML configuration, progress events,
//! tracing setup, collection aliases, and defaults. Nothing in here knows
//! about syntax trees or graphs; `stagemap-analysis` builds on top of it.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

pub use config::StagemapConfig;
pub use errors::{CallGraphError, ConfigError, ParseError, PipelineError, ScanError};
