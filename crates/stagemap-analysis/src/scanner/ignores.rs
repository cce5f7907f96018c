//! Ignore policy for JS/TS codebases.
//!
//! Dependencies, build output, and VCS metadata are always pruned. Type
//! declaration files carry no bodies, so they are pruned too. Test files are
//! pruned unless `include_tests` is set. On top of that the root
//! `.gitignore` (when honoured), `.stagemapignore`, and configured extras.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use stagemap_core::config::ScanConfig;
use stagemap_core::constants::IGNORE_FILE_NAME;
use stagemap_core::errors::ScanError;

/// Directories never worth descending into.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // Package managers
    "node_modules/",
    "bower_components/",
    "jspm_packages/",
    ".pnpm/",
    ".yarn/",
    // Build outputs
    "dist/",
    "build/",
    "out/",
    "coverage/",
    ".nyc_output/",
    // Framework caches
    ".cache/",
    ".next/",
    ".nuxt/",
    ".turbo/",
    ".vercel/",
    ".parcel-cache/",
    // Version control
    ".git/",
    ".svn/",
    ".hg/",
    // IDE/Editor
    ".idea/",
    ".vscode/",
];

/// Generated or declaration-only files.
pub const DEFAULT_IGNORE_FILES: &[&str] = &[
    "*.d.ts",
    "*.d.mts",
    "*.d.cts",
    "*.min.js",
    "*.bundle.js",
    "*.generated.*",
];

/// Test sources, skipped unless tests are included.
pub const TEST_PATTERNS: &[&str] = &[
    "*.test.*",
    "*.spec.*",
    "__tests__/",
    "__mocks__/",
    "test/",
    "tests/",
];

/// Compiled gitignore-style matcher for one scan root.
#[derive(Debug)]
pub struct IgnorePolicy {
    gitignore: Gitignore,
}

impl IgnorePolicy {
    pub fn new(root: &Path, config: &ScanConfig) -> Result<Self, ScanError> {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in DEFAULT_IGNORE_DIRS.iter().chain(DEFAULT_IGNORE_FILES) {
            add_pattern(&mut builder, pattern)?;
        }
        if !config.effective_include_tests() {
            for pattern in TEST_PATTERNS {
                add_pattern(&mut builder, pattern)?;
            }
        }

        if config.effective_respect_gitignore() {
            add_file(&mut builder, &root.join(".gitignore"));
        }
        add_file(&mut builder, &root.join(IGNORE_FILE_NAME));

        // Extras go last so a `!pattern` can re-include a default.
        for pattern in &config.extra_ignores {
            add_pattern(&mut builder, pattern)?;
        }

        let gitignore = builder.build().map_err(|e| ScanError::InvalidIgnorePattern {
            pattern: "<combined>".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { gitignore })
    }

    /// Whether a root-relative path (or any of its parents) is ignored.
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.gitignore
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}

fn add_pattern(builder: &mut GitignoreBuilder, pattern: &str) -> Result<(), ScanError> {
    builder
        .add_line(None, pattern)
        .map_err(|e| ScanError::InvalidIgnorePattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
    Ok(())
}

/// Ignore files are best effort: a malformed line there should not abort a run.
fn add_file(builder: &mut GitignoreBuilder, path: &Path) {
    if !path.is_file() {
        return;
    }
    if let Some(err) = builder.add(path) {
        tracing::warn!(path = %path.display(), error = %err, "ignore file partially applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn policy(config: &ScanConfig) -> IgnorePolicy {
        IgnorePolicy::new(&PathBuf::from("/project"), config).unwrap()
    }

    #[test]
    fn prunes_dependency_and_build_dirs() {
        let p = policy(&ScanConfig::default());
        assert!(p.is_ignored(Path::new("node_modules"), true));
        assert!(p.is_ignored(Path::new("packages/web/node_modules"), true));
        assert!(p.is_ignored(Path::new("dist/index.js"), false));
        assert!(p.is_ignored(Path::new(".git"), true));
    }

    #[test]
    fn prunes_declarations_and_minified_files() {
        let p = policy(&ScanConfig::default());
        assert!(p.is_ignored(Path::new("src/types.d.ts"), false));
        assert!(p.is_ignored(Path::new("vendor.min.js"), false));
        assert!(!p.is_ignored(Path::new("src/types.ts"), false));
    }

    #[test]
    fn test_files_follow_include_tests() {
        let p = policy(&ScanConfig::default());
        assert!(p.is_ignored(Path::new("src/a.test.ts"), false));
        assert!(p.is_ignored(Path::new("src/a.spec.js"), false));
        assert!(p.is_ignored(Path::new("src/__tests__/a.ts"), false));

        let config = ScanConfig {
            include_tests: Some(true),
            ..Default::default()
        };
        let p = policy(&config);
        assert!(!p.is_ignored(Path::new("src/a.test.ts"), false));
        assert!(!p.is_ignored(Path::new("src/__tests__/a.ts"), false));
    }

    #[test]
    fn extra_patterns_apply() {
        let config = ScanConfig {
            extra_ignores: vec!["legacy/".to_string()],
            ..Default::default()
        };
        let p = policy(&config);
        assert!(p.is_ignored(Path::new("legacy/old.js"), false));
        assert!(!p.is_ignored(Path::new("src/new.js"), false));
    }

    #[test]
    fn root_itself_is_never_ignored() {
        let p = policy(&ScanConfig::default());
        assert!(!p.is_ignored(Path::new(""), true));
    }
}
