//! Group partitioning and left-to-right group order.

use petgraph::graph::NodeIndex;
use stagemap_core::types::collections::BTreeMap;

use crate::call_graph::Graph;

/// One group with its members (sorted by id) and dependency weight.
#[derive(Debug, Clone)]
pub struct GroupStats {
    pub name: String,
    pub members: Vec<NodeIndex>,
    pub total_out_degree: usize,
    pub mean_out_degree: f64,
}

/// Partition entities by group, ordered by ascending mean out-degree, then
/// ascending total out-degree, then name. Least dependent groups come first.
pub fn order_groups(graph: &Graph) -> Vec<GroupStats> {
    let mut by_group: BTreeMap<&str, Vec<NodeIndex>> = BTreeMap::new();
    for idx in graph.node_indices() {
        by_group.entry(graph.node(idx).group.as_str()).or_default().push(idx);
    }

    let mut groups: Vec<GroupStats> = by_group
        .into_iter()
        .map(|(name, mut members)| {
            members.sort_by(|&a, &b| graph.node(a).id.cmp(&graph.node(b).id));
            let total_out_degree: usize = members.iter().map(|&m| graph.node(m).out_degree).sum();
            GroupStats {
                name: name.to_string(),
                mean_out_degree: total_out_degree as f64 / members.len() as f64,
                total_out_degree,
                members,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        a.mean_out_degree
            .total_cmp(&b.mean_out_degree)
            .then(a.total_out_degree.cmp(&b.total_out_degree))
            .then_with(|| a.name.cmp(&b.name))
    });
    groups
}
