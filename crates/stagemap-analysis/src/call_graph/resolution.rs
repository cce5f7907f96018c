//! Name-based call resolution.
//!
//! A callee name links to every entity with that name, wherever it is
//! declared. Receivers and imports are not consulted, so distinct functions
//! that share a name are conflated; the policy only narrows which of the
//! candidates receive an edge.

use serde::{Deserialize, Serialize};
use stagemap_core::config::ResolutionPolicy;
use stagemap_core::types::collections::SmallVec2;

use super::table::EntityTable;

/// Outcome of resolving one callee name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResolution {
    Unresolved,
    Unique(usize),
    /// More than one candidate; every one of them gets an edge.
    Ambiguous(SmallVec2<usize>),
}

impl CallResolution {
    pub fn targets(&self) -> &[usize] {
        match self {
            Self::Unresolved => &[],
            Self::Unique(idx) => std::slice::from_ref(idx),
            Self::Ambiguous(targets) => targets.as_slice(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::Unique(_) => "unique",
            Self::Ambiguous(_) => "ambiguous",
        }
    }

    fn from_candidates(candidates: SmallVec2<usize>) -> Self {
        match candidates.len() {
            0 => Self::Unresolved,
            1 => Self::Unique(candidates[0]),
            _ => Self::Ambiguous(candidates),
        }
    }
}

/// Resolve `callee` for a call made from `caller_file`.
pub fn resolve(
    table: &EntityTable,
    callee: &str,
    caller_file: &str,
    policy: ResolutionPolicy,
) -> CallResolution {
    let candidates = table.named(callee);
    if candidates.is_empty() {
        return CallResolution::Unresolved;
    }
    let same_file = || -> SmallVec2<usize> {
        candidates
            .iter()
            .copied()
            .filter(|&idx| table.get(idx).is_some_and(|e| e.file_path == caller_file))
            .collect()
    };
    let chosen = match policy {
        ResolutionPolicy::AllMatches => SmallVec2::from_slice(candidates),
        ResolutionPolicy::SameFileOnly => same_file(),
        ResolutionPolicy::PreferSameFile => {
            let local = same_file();
            if local.is_empty() {
                SmallVec2::from_slice(candidates)
            } else {
                local
            }
        }
    };
    CallResolution::from_candidates(chosen)
}

/// Counters for one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionDiagnostics {
    pub total_call_sites: usize,
    pub resolved: usize,
    pub unresolved: usize,
    /// Resolved call sites with more than one target.
    pub ambiguous: usize,
    /// Call sites outside any entity (module top level).
    pub uncontained: usize,
    /// Calls with a computed or otherwise unnameable callee.
    pub dynamic: usize,
    pub edges_inserted: usize,
    /// Resolved targets already linked from the same caller.
    pub duplicate_edges: usize,
}

impl ResolutionDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, resolution: &CallResolution) {
        self.total_call_sites += 1;
        match resolution {
            CallResolution::Unresolved => self.unresolved += 1,
            CallResolution::Unique(_) => self.resolved += 1,
            CallResolution::Ambiguous(_) => {
                self.resolved += 1;
                self.ambiguous += 1;
            }
        }
    }

    pub fn record_uncontained(&mut self) {
        self.total_call_sites += 1;
        self.uncontained += 1;
    }

    pub fn merge(&mut self, other: &Self) {
        self.total_call_sites += other.total_call_sites;
        self.resolved += other.resolved;
        self.unresolved += other.unresolved;
        self.ambiguous += other.ambiguous;
        self.uncontained += other.uncontained;
        self.dynamic += other.dynamic;
        self.edges_inserted += other.edges_inserted;
        self.duplicate_edges += other.duplicate_edges;
    }

    /// Share of contained call sites that resolved to at least one entity.
    pub fn resolution_rate(&self) -> f64 {
        let contained = self.resolved + self.unresolved;
        if contained == 0 {
            return 0.0;
        }
        self.resolved as f64 / contained as f64
    }
}
