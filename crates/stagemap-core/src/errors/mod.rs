//! Error types for every stagemap subsystem.
//!
//! One `thiserror` enum per subsystem. Each implements [`ErrorCode`] so
//! outer surfaces (HTTP, CLI, reports) can emit a stable machine-readable code.

pub mod call_graph_error;
pub mod config_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;
pub mod scan_error;

pub use call_graph_error::CallGraphError;
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::PipelineError;
pub use scan_error::ScanError;
