//! Impact analysis types.

use serde::{Deserialize, Serialize};

/// Which way to follow call edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalDirection {
    /// Towards callers: everything that (transitively) depends on the entity.
    Upstream,
    /// Towards callees: everything the entity (transitively) depends on.
    Downstream,
}

/// Blast-radius bucket for changing one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// One level up, saturating at `High`.
    pub fn escalate(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium | Self::High => Self::High,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Complexity bucket derived from out-degree alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    /// 0 callees
    Zero,
    /// 1–3
    Low,
    /// 4–9
    Medium,
    /// 10–19
    High,
    /// 20+
    VeryHigh,
}

impl Complexity {
    pub fn from_out_degree(out_degree: usize) -> Self {
        match out_degree {
            0 => Self::Zero,
            1..=3 => Self::Low,
            4..=9 => Self::Medium,
            10..=19 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Entity count per complexity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityHistogram {
    pub zero: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub very_high: usize,
}

impl ComplexityHistogram {
    pub fn record(&mut self, out_degree: usize) {
        match Complexity::from_out_degree(out_degree) {
            Complexity::Zero => self.zero += 1,
            Complexity::Low => self.low += 1,
            Complexity::Medium => self.medium += 1,
            Complexity::High => self.high += 1,
            Complexity::VeryHigh => self.very_high += 1,
        }
    }

    pub fn count(&self, bucket: Complexity) -> usize {
        match bucket {
            Complexity::Zero => self.zero,
            Complexity::Low => self.low,
            Complexity::Medium => self.medium,
            Complexity::High => self.high,
            Complexity::VeryHigh => self.very_high,
        }
    }

    pub fn total(&self) -> usize {
        self.zero + self.low + self.medium + self.high + self.very_high
    }
}

/// How a risk level was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Level from size alone, before entry-point escalation.
    pub base_level: RiskLevel,
    /// The transitive-set size the thresholds were applied to.
    pub size: usize,
    pub escalated: bool,
}

/// Everything known about the consequences of changing one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub entity_id: String,
    pub direct_callers: Vec<String>,
    pub direct_callees: Vec<String>,
    /// Transitive callers, sorted by id, excluding the entity itself.
    pub ancestors: Vec<String>,
    /// Transitive callees, sorted by id, excluding the entity itself.
    pub descendants: Vec<String>,
    /// Ancestors that are entry points.
    pub entry_point_ancestors: Vec<String>,
    pub risk: RiskAssessment,
    pub complexity: Complexity,
}
