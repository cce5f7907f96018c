//! Shared constants for the stagemap engine.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version tag written into every graph snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Config file names looked up at the analysis root, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["stagemap.toml", ".stagemap.toml"];

/// Extra ignore file honoured by the scanner (gitignore syntax).
pub const IGNORE_FILE_NAME: &str = ".stagemapignore";

/// Maximum file size in bytes for scanning (default: 1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Default number of threads (0 = auto-detect).
pub const DEFAULT_THREADS: usize = 0;

/// Default number of leading directory segments that form a group key.
pub const DEFAULT_GROUP_DEPTH: usize = 1;

/// Group key used for files that sit directly at the root.
pub const ROOT_GROUP: &str = ".";

/// Default risk thresholds: `size > 10` is high, `5 < size <= 10` is medium.
pub const DEFAULT_HIGH_RISK_ABOVE: usize = 10;
pub const DEFAULT_MEDIUM_RISK_ABOVE: usize = 5;

/// Default bounded cache size for impact queries.
pub const DEFAULT_IMPACT_CACHE_CAPACITY: u64 = 1_024;

// ---- Layout ----

pub const DEFAULT_MAX_NODES_PER_COLUMN: usize = 15;
pub const DEFAULT_MAX_COLUMNS_PER_GROUP: usize = 8;
pub const DEFAULT_BASE_COLUMN_WIDTH: f64 = 180.0;
pub const DEFAULT_COLUMN_WIDTH_PER_NODE: f64 = 2.0;
pub const DEFAULT_MAX_COLUMN_WIDTH: f64 = 320.0;
pub const DEFAULT_GROUP_GAP: f64 = 120.0;
pub const DEFAULT_BAND_HEIGHT: f64 = 900.0;
pub const DEFAULT_BAND_GAP: f64 = 80.0;
pub const DEFAULT_TOP_MARGIN: f64 = 60.0;
pub const DEFAULT_LEFT_MARGIN: f64 = 40.0;
pub const DEFAULT_MIN_NODE_SPACING: f64 = 28.0;

/// Hard cap on crossing-reduction passes.
pub const DEFAULT_CROSSING_MAX_PASSES: usize = 4;

/// Above this many edges the pairwise crossing count is skipped.
pub const DEFAULT_CROSSING_EDGE_LIMIT: usize = 4_000;
