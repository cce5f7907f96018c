//! Layout engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Spacing and packing parameters for the layered layout (world units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Hard cap on entities per column.
    pub max_nodes_per_column: usize,
    /// Columns placed side by side per group; further columns wrap into a
    /// new band below.
    pub max_columns_per_group: usize,
    pub base_column_width: f64,
    /// Extra column width per entity in the group.
    pub column_width_per_node: f64,
    pub max_column_width: f64,
    pub group_gap: f64,
    /// Vertical space available to one band of columns.
    pub band_height: f64,
    pub band_gap: f64,
    pub top_margin: f64,
    pub left_margin: f64,
    /// Floor on vertical distance between neighbours in a column.
    pub min_node_spacing: f64,
    /// Hard cap on crossing-reduction passes.
    pub crossing_max_passes: usize,
    /// Skip crossing counting and reduction above this many edges.
    pub crossing_edge_limit: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_nodes_per_column: DEFAULT_MAX_NODES_PER_COLUMN,
            max_columns_per_group: DEFAULT_MAX_COLUMNS_PER_GROUP,
            base_column_width: DEFAULT_BASE_COLUMN_WIDTH,
            column_width_per_node: DEFAULT_COLUMN_WIDTH_PER_NODE,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            group_gap: DEFAULT_GROUP_GAP,
            band_height: DEFAULT_BAND_HEIGHT,
            band_gap: DEFAULT_BAND_GAP,
            top_margin: DEFAULT_TOP_MARGIN,
            left_margin: DEFAULT_LEFT_MARGIN,
            min_node_spacing: DEFAULT_MIN_NODE_SPACING,
            crossing_max_passes: DEFAULT_CROSSING_MAX_PASSES,
            crossing_edge_limit: DEFAULT_CROSSING_EDGE_LIMIT,
        }
    }
}
