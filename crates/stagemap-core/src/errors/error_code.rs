//! ErrorCode trait for outer-surface conversion.

/// Every error enum implements this to provide a structured error code
/// string for consumers outside the engine.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const ROOT_UNREADABLE: &str = "ROOT_UNREADABLE";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const CALL_GRAPH_ERROR: &str = "CALL_GRAPH_ERROR";
pub const ENTITY_NOT_FOUND: &str = "ENTITY_NOT_FOUND";
pub const SNAPSHOT_ERROR: &str = "SNAPSHOT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
