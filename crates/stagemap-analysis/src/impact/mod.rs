//! Impact analysis: transitive ancestors/descendants, risk, and complexity.

pub mod analyzer;
pub mod risk;
pub mod traversal;
pub mod types;

pub use analyzer::ImpactAnalyzer;
pub use risk::{assess_risk, classify_size};
pub use types::{
    Complexity, ComplexityHistogram, ImpactReport, RiskAssessment, RiskLevel, TraversalDirection,
};
