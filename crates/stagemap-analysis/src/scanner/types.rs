//! Scanner types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::language::Language;

/// A source file selected for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub absolute_path: PathBuf,
    /// Root-relative path with forward slashes. Part of every entity id.
    pub relative_path: String,
    pub group: String,
    pub language: Language,
    pub size: u64,
}

/// Counters for one discovery walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub files_found: usize,
    /// Files under the root with an unsupported extension.
    pub files_unsupported: usize,
    /// Files and directories pruned by the ignore policy.
    pub entries_ignored: usize,
    /// Directory entries that could not be read.
    pub entries_unreadable: usize,
}
