//! Impact analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_HIGH_RISK_ABOVE, DEFAULT_IMPACT_CACHE_CAPACITY, DEFAULT_MEDIUM_RISK_ABOVE,
};

/// Size thresholds for the risk buckets: `size > high_above` is high,
/// `medium_above < size <= high_above` is medium, anything else is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub high_above: usize,
    pub medium_above: usize,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_above: DEFAULT_HIGH_RISK_ABOVE,
            medium_above: DEFAULT_MEDIUM_RISK_ABOVE,
        }
    }
}

/// Which transitive set feeds the risk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskBasis {
    /// `|ancestors|`: how much of the codebase depends on the entity.
    #[default]
    Upstream,
    /// `|ancestors| + |descendants|`.
    Combined,
}

/// What makes an entity an entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryPointRule {
    /// Any entity without callers of its own.
    #[default]
    NoCallers,
    /// Entities without callers whose name or file path contains one of the
    /// patterns (case-insensitive), e.g. `main`, `handler`, `controller`.
    NamedRoots { patterns: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    pub thresholds: RiskThresholds,
    pub basis: RiskBasis,
    /// Raise the risk one level when an entry point is among the ancestors.
    pub escalate_on_entry_point: bool,
    pub entry_point: EntryPointRule,
    /// Depth limit for transitive traversal. `None` = unbounded.
    pub max_depth: Option<u32>,
    /// Number of cached ancestor/descendant sets.
    pub cache_capacity: u64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
            basis: RiskBasis::default(),
            escalate_on_entry_point: true,
            entry_point: EntryPointRule::default(),
            max_depth: None,
            cache_capacity: DEFAULT_IMPACT_CACHE_CAPACITY,
        }
    }
}
