//! Whole-graph statistics.

use serde::{Deserialize, Serialize};
use stagemap_core::types::collections::FxHashSet;

use super::graph::Graph;
use crate::impact::types::ComplexityHistogram;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub entity_count: usize,
    pub edge_count: usize,
    pub file_count: usize,
    pub group_count: usize,
    /// Entities nobody calls.
    pub root_count: usize,
    /// Entities that call nothing.
    pub leaf_count: usize,
    /// Entities that call themselves.
    pub self_call_count: usize,
    pub max_out_degree: usize,
    pub max_in_degree: usize,
    pub complexity: ComplexityHistogram,
}

impl GraphSummary {
    pub fn compute(graph: &Graph) -> Self {
        let mut files = FxHashSet::default();
        let mut groups = FxHashSet::default();
        let mut summary = Self {
            entity_count: graph.entity_count(),
            edge_count: graph.edge_count(),
            ..Default::default()
        };
        for entity in graph.entities() {
            files.insert(entity.file_path.as_str());
            groups.insert(entity.group.as_str());
            if entity.in_degree == 0 {
                summary.root_count += 1;
            }
            if entity.out_degree == 0 {
                summary.leaf_count += 1;
            }
            summary.max_out_degree = summary.max_out_degree.max(entity.out_degree);
            summary.max_in_degree = summary.max_in_degree.max(entity.in_degree);
            summary.complexity.record(entity.out_degree);
        }
        summary.self_call_count = graph.edge_indices().filter(|(s, t)| s == t).count();
        summary.file_count = files.len();
        summary.group_count = groups.len();
        summary
    }
}
