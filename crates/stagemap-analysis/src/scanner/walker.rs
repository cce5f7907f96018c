//! Deterministic directory walker.
//!
//! Single-threaded on purpose: discovery is cheap next to parsing, and a
//! sorted sequential walk keeps file order (and therefore entity order)
//! stable across runs. Parsing is where rayon comes in.

use std::fs;
use std::path::{Path, PathBuf};

use stagemap_core::config::ScanConfig;
use stagemap_core::errors::ScanError;
use stagemap_core::types::collections::FxHashSet;

use super::grouping::group_of;
use super::ignores::IgnorePolicy;
use super::language::Language;
use super::types::{DiscoveredFile, ScanStats};

/// Discovers analysable source files under one root.
pub struct Scanner {
    root: PathBuf,
    ignores: IgnorePolicy,
    follow_symlinks: bool,
    group_depth: usize,
    group_skip_prefixes: Vec<String>,
}

impl Scanner {
    /// Fails with [`ScanError::RootUnreadable`] when `root` is not a readable
    /// directory. This is the only fatal condition of an analysis run.
    pub fn new(root: &Path, config: &ScanConfig) -> Result<Self, ScanError> {
        let unreadable = |source| ScanError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        };
        let metadata = fs::metadata(root).map_err(unreadable)?;
        if !metadata.is_dir() {
            return Err(unreadable(std::io::Error::other("not a directory")));
        }
        fs::read_dir(root).map_err(unreadable)?;

        Ok(Self {
            root: root.to_path_buf(),
            ignores: IgnorePolicy::new(root, config)?,
            follow_symlinks: config.effective_follow_symlinks(),
            group_depth: config.effective_group_depth(),
            group_skip_prefixes: config.effective_group_skip_prefixes(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and return every supported, non-ignored file sorted by
    /// relative path.
    pub fn discover(&self) -> (Vec<DiscoveredFile>, ScanStats) {
        let mut files = Vec::new();
        let mut stats = ScanStats::default();
        let mut visited: FxHashSet<PathBuf> = FxHashSet::default();
        let mut stack = vec![self.root.clone()];

        while let Some(dir) = stack.pop() {
            if self.follow_symlinks {
                let canonical = fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
                if !visited.insert(canonical) {
                    continue;
                }
            }
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                    stats.entries_unreadable += 1;
                    continue;
                }
            };

            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(_) => {
                        stats.entries_unreadable += 1;
                        continue;
                    }
                };
                let path = entry.path();
                let Ok(relative) = path.strip_prefix(&self.root) else {
                    continue;
                };

                let file_type = match entry.file_type() {
                    Ok(ft) => ft,
                    Err(_) => {
                        stats.entries_unreadable += 1;
                        continue;
                    }
                };
                let metadata = if file_type.is_symlink() {
                    if !self.follow_symlinks {
                        continue;
                    }
                    match fs::metadata(&path) {
                        Ok(m) => m,
                        Err(_) => {
                            stats.entries_unreadable += 1;
                            continue;
                        }
                    }
                } else {
                    match entry.metadata() {
                        Ok(m) => m,
                        Err(_) => {
                            stats.entries_unreadable += 1;
                            continue;
                        }
                    }
                };

                if self.ignores.is_ignored(relative, metadata.is_dir()) {
                    stats.entries_ignored += 1;
                    continue;
                }
                if metadata.is_dir() {
                    stack.push(path);
                    continue;
                }
                if !metadata.is_file() {
                    continue;
                }
                let Some(language) = Language::from_path(&path) else {
                    stats.files_unsupported += 1;
                    continue;
                };

                let relative_path = to_forward_slashes(relative);
                let group = group_of(&relative_path, self.group_depth, &self.group_skip_prefixes);
                files.push(DiscoveredFile {
                    absolute_path: path,
                    relative_path,
                    group,
                    language,
                    size: metadata.len(),
                });
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        stats.files_found = files.len();
        tracing::debug!(
            root = %self.root.display(),
            files = stats.files_found,
            ignored = stats.entries_ignored,
            "discovery complete"
        );
        (files, stats)
    }
}

fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
