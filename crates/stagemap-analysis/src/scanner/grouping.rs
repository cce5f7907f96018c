//! Group keys: the coarse unit (directory) entities are clustered by.

use stagemap_core::constants::ROOT_GROUP;

/// Group key for a root-relative, forward-slash path.
///
/// Leading directory segments listed in `skip_prefixes` are dropped once,
/// then the first `depth` directory segments are joined with `/`. The file
/// name itself never contributes, so root-level files (and files directly
/// inside a skipped prefix) land in [`ROOT_GROUP`].
pub fn group_of(relative_path: &str, depth: usize, skip_prefixes: &[String]) -> String {
    let mut dirs: Vec<&str> = relative_path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    dirs.pop();

    let mut start = 0;
    while start < dirs.len() && skip_prefixes.iter().any(|p| p == dirs[start]) {
        start += 1;
    }
    let dirs = &dirs[start..];
    if dirs.is_empty() || depth == 0 {
        return ROOT_GROUP.to_string();
    }
    dirs[..depth.min(dirs.len())].join("/")
}
