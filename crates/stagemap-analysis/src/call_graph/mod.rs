//! Call graph: entity table, name-based resolution, and the graph itself.
//!
//! Construction is two-pass. Pass one collects every entity into an
//! [`EntityArena`] and freezes it into an immutable [`EntityTable`]. Pass two
//! resolves call sites against that table in parallel and merges the edges
//! in file order, so the result never depends on scheduling.

pub mod builder;
pub mod graph;
pub mod resolution;
pub mod summary;
pub mod table;
pub mod types;

pub use builder::CallGraphBuilder;
pub use graph::Graph;
pub use resolution::{CallResolution, ResolutionDiagnostics};
pub use summary::GraphSummary;
pub use table::{EntityArena, EntityTable};
pub use types::{CallEdge, Edge, Entity, EntityKind};
