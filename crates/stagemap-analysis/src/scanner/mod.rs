//! File discovery: ignore policy, grammar detection, and group assignment.

pub mod grouping;
pub mod ignores;
pub mod language;
pub mod types;
pub mod walker;

pub use grouping::group_of;
pub use ignores::IgnorePolicy;
pub use language::Language;
pub use types::{DiscoveredFile, ScanStats};
pub use walker::Scanner;
