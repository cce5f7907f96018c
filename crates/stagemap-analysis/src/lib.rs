//! stagemap-analysis: call graph construction and layered layout.
//!
//! Pipeline:
//! - **Scanner**: walks the root with an ignore policy, detects grammar, assigns groups
//! - **Parsers**: tree-sitter parse per file, entity extraction, call-site extraction
//! - **Call Graph**: frozen entity table, name-based call resolution, bidirectional graph
//! - **Impact**: transitive ancestors/descendants, risk and complexity buckets
//! - **Layout**: groups, stages, column packing, coordinates, crossing reduction
//!
//! [`pipeline::analyze`] runs scanner → parsers → call graph end to end.

pub mod call_graph;
pub mod impact;
pub mod layout;
pub mod parsers;
pub mod pipeline;
pub mod scanner;
pub mod snapshot;

pub use call_graph::{CallGraphBuilder, Edge, Entity, EntityKind, Graph};
pub use impact::{ImpactAnalyzer, ImpactReport, RiskLevel};
pub use layout::{Layout, LayoutEngine, Position};
pub use pipeline::{analyze, Analysis};
pub use snapshot::GraphSnapshot;
