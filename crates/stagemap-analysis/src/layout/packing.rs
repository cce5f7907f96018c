//! Column packing within a group.

use petgraph::graph::NodeIndex;
use stagemap_core::config::LayoutConfig;

use crate::call_graph::Graph;

/// Split `members` into columns of at most `max_per_column` entities.
///
/// Entities are ranked by descending out-degree, then descending in-degree,
/// then name (id breaks the remaining ties), and chunked in that order, so
/// the busiest entities land in the first column.
pub fn pack_columns(graph: &Graph, members: &[NodeIndex], max_per_column: usize) -> Vec<Vec<NodeIndex>> {
    let mut ranked = members.to_vec();
    ranked.sort_by(|&a, &b| {
        let (ea, eb) = (graph.node(a), graph.node(b));
        eb.out_degree
            .cmp(&ea.out_degree)
            .then(eb.in_degree.cmp(&ea.in_degree))
            .then_with(|| ea.name.cmp(&eb.name))
            .then_with(|| ea.id.cmp(&eb.id))
    });
    ranked
        .chunks(max_per_column.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Column width for a group of `node_count` entities: grows linearly from
/// the base width, capped at the configured maximum.
pub fn column_width(node_count: usize, config: &LayoutConfig) -> f64 {
    (config.base_column_width + config.column_width_per_node * node_count as f64)
        .min(config.max_column_width)
}
