//! Configuration for every stagemap subsystem.
//!
//! All sections are `#[serde(default)]`, so a config file only needs the
//! keys it wants to change.

pub mod impact_config;
pub mod layout_config;
pub mod resolution_config;
pub mod scan_config;
pub mod stagemap_config;

pub use impact_config::{EntryPointRule, ImpactConfig, RiskBasis, RiskThresholds};
pub use layout_config::LayoutConfig;
pub use resolution_config::{ResolutionConfig, ResolutionPolicy};
pub use scan_config::ScanConfig;
pub use stagemap_config::StagemapConfig;
