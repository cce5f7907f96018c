//! Event payloads.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanStartedEvent {
    pub root: PathBuf,
    /// Unknown until discovery has run.
    pub file_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileParsedEvent {
    pub path: String,
    pub entity_count: usize,
    pub parse_time_us: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseFailureEvent {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanCompleteEvent {
    pub files_discovered: usize,
    pub files_parsed: usize,
    pub files_failed: usize,
    pub entity_count: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphBuiltEvent {
    pub entity_count: usize,
    pub edge_count: usize,
    pub unresolved_calls: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutCompleteEvent {
    pub group_count: usize,
    pub stage_count: usize,
    pub crossing_count: Option<usize>,
}
