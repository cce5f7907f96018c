//! Collection aliases shared across stagemap crates.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet};
