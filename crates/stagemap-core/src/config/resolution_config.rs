//! Call resolution configuration.

use serde::{Deserialize, Serialize};

/// How a callee name is mapped onto the entities that share it.
///
/// Resolution is always by name. The policies only decide which of the
/// same-named candidates receive an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Link every entity with the callee's name, anywhere in the codebase.
    #[default]
    AllMatches,
    /// Link same-file candidates when there are any, otherwise all of them.
    PreferSameFile,
    /// Link same-file candidates only.
    SameFileOnly,
}

impl ResolutionPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AllMatches => "all_matches",
            Self::PreferSameFile => "prefer_same_file",
            Self::SameFileOnly => "same_file_only",
        }
    }
}

impl std::fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResolutionConfig {
    pub policy: ResolutionPolicy,
}
