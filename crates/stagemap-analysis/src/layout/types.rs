//! Layout output types.

use serde::{Deserialize, Serialize};
use stagemap_core::types::collections::BTreeMap;

/// Where one entity goes. `column_index` is local to the group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub group_index: usize,
    pub stage_index: usize,
    /// Unbounded: a group with more than `max_columns_per_group` columns
    /// wraps them into vertical bands. `column_index / max_columns_per_group`
    /// is the band, `column_index % max_columns_per_group` the slot within it.
    pub column_index: usize,
}

/// Geometry of one group lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLayout {
    pub name: String,
    pub index: usize,
    /// Left edge of the lane.
    pub x: f64,
    pub width: f64,
    pub column_width: f64,
    pub column_count: usize,
    /// Vertical bands the columns wrapped into.
    pub band_count: usize,
    pub node_count: usize,
    pub total_out_degree: usize,
    pub mean_out_degree: f64,
}

/// Diagnostics about a layout run. Nothing in the layout reads these back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub group_count: usize,
    pub stage_count: usize,
    pub column_count: usize,
    pub nodes_per_group: BTreeMap<String, usize>,
    /// Index = stage.
    pub nodes_per_stage: Vec<usize>,
    pub mean_edge_length: f64,
    /// `None` when the graph has more edges than `crossing_edge_limit`.
    pub crossing_count: Option<usize>,
    pub crossings_before_reduction: Option<usize>,
    pub reversals_applied: usize,
    pub reduction_passes: usize,
    /// Edges closing a cycle during staging.
    pub cycle_edges: usize,
    pub width: f64,
    pub height: f64,
}

/// Positions for every entity of a graph plus lane geometry and metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub positions: BTreeMap<String, Position>,
    /// In left-to-right order.
    pub groups: Vec<GroupLayout>,
    pub metrics: LayoutMetrics,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<&Position> {
        self.positions.get(id)
    }

    pub fn group(&self, name: &str) -> Option<&GroupLayout> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Ids placed in one column of one group, top to bottom.
    pub fn column(&self, group_index: usize, column_index: usize) -> Vec<&str> {
        let mut members: Vec<(&str, &Position)> = self
            .positions
            .iter()
            .filter(|(_, p)| p.group_index == group_index && p.column_index == column_index)
            .map(|(id, p)| (id.as_str(), p))
            .collect();
        members.sort_by(|a, b| a.1.y.total_cmp(&b.1.y).then_with(|| a.0.cmp(b.0)));
        members.into_iter().map(|(id, _)| id).collect()
    }
}
