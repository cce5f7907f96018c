//! Scanner configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GROUP_DEPTH, DEFAULT_MAX_FILE_SIZE, DEFAULT_THREADS};

/// Configuration for file discovery and entity extraction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Default: 1MB.
    pub max_file_size: Option<u64>,
    /// Worker threads for parsing (0 = rayon default). Default: 0.
    pub threads: Option<usize>,
    /// Follow symlinks while walking. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Honour `.gitignore` files. Default: true.
    pub respect_gitignore: Option<bool>,
    /// Scan test files (`*.test.*`, `__tests__/`, ...). Default: false.
    pub include_tests: Option<bool>,
    /// Treat files with syntax errors as parse failures. Default: true.
    pub strict_parse: Option<bool>,
    /// Leading directory segments forming the group key. Default: 1.
    pub group_depth: Option<usize>,
    /// Leading directory segments dropped before grouping. Default: `["src"]`.
    pub group_skip_prefixes: Option<Vec<String>>,
    /// Extra gitignore-style patterns.
    #[serde(default)]
    pub extra_ignores: Vec<String>,
}

impl ScanConfig {
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    pub fn effective_respect_gitignore(&self) -> bool {
        self.respect_gitignore.unwrap_or(true)
    }

    pub fn effective_include_tests(&self) -> bool {
        self.include_tests.unwrap_or(false)
    }

    pub fn effective_strict_parse(&self) -> bool {
        self.strict_parse.unwrap_or(true)
    }

    pub fn effective_group_depth(&self) -> usize {
        self.group_depth.unwrap_or(DEFAULT_GROUP_DEPTH)
    }

    pub fn effective_group_skip_prefixes(&self) -> Vec<String> {
        self.group_skip_prefixes
            .clone()
            .unwrap_or_else(|| vec!["src".to_string()])
    }
}
