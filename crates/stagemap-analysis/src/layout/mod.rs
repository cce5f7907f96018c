//! Deterministic layered layout.
//!
//! Groups become side-by-side lanes ordered by dependency weight, entities
//! get a topological stage, each group is packed into bounded columns, and a
//! bounded local pass trims edge crossings. Same graph + same config gives
//! the same positions, bit for bit.

pub mod crossings;
pub mod engine;
pub mod grouping;
pub mod packing;
pub mod staging;
pub mod types;

pub use engine::LayoutEngine;
pub use types::{GroupLayout, Layout, LayoutMetrics, Position};
