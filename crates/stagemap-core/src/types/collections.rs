//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec for name-resolution candidates (almost always 1, sometimes 2).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
