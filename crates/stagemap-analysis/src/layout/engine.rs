//! Layout engine: grouping → staging → packing → coordinates → crossing pass.

use std::time::Instant;

use stagemap_core::config::LayoutConfig;
use stagemap_core::types::collections::BTreeMap;

use super::crossings::{count_crossings, reduce_crossings, Slot, StagedEdge};
use super::grouping::order_groups;
use super::packing::{column_width, pack_columns};
use super::staging::assign_stages;
use super::types::{GroupLayout, Layout, LayoutMetrics, Position};
use crate::call_graph::Graph;

/// Per-node placement before crossing reduction, indexed by node index.
#[derive(Debug, Clone, Copy, Default)]
struct Placement {
    x: f64,
    y: f64,
    group_index: usize,
    column_index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Height of one band: the configured band height, stretched when a full
    /// column at minimum spacing would not fit.
    fn band_extent(&self) -> f64 {
        let c = &self.config;
        c.band_height
            .max((c.max_nodes_per_column + 1) as f64 * c.min_node_spacing)
    }

    /// One position per entity of `graph`.
    pub fn layout(&self, graph: &Graph) -> Layout {
        let start = Instant::now();
        let c = &self.config;
        if graph.is_empty() {
            return Layout::default();
        }

        let groups = order_groups(graph);
        let staging = assign_stages(graph);
        let max_cols = c.max_columns_per_group.max(1);
        let band_extent = self.band_extent();

        let mut placements = vec![Placement::default(); graph.entity_count()];
        let mut slots: BTreeMap<(usize, usize), Slot> = BTreeMap::new();
        let mut group_layouts = Vec::with_capacity(groups.len());
        let mut column_count = 0;
        let mut max_bands = 0;
        let mut cursor_x = c.left_margin;

        for (gi, group) in groups.iter().enumerate() {
            let columns = pack_columns(graph, &group.members, c.max_nodes_per_column);
            let col_width = column_width(group.members.len(), c);
            let visible = columns.len().min(max_cols);
            let bands = columns.len().div_ceil(max_cols);
            let width = visible as f64 * col_width;

            for (ci, column) in columns.iter().enumerate() {
                // Rows: stage first so each (group, stage) slot is one
                // contiguous run per column; pack order within a stage.
                let mut rows: Vec<(usize, usize)> = column
                    .iter()
                    .enumerate()
                    .map(|(rank, &n)| (staging.stage(n), rank))
                    .collect();
                rows.sort();

                let x = cursor_x + (ci % max_cols) as f64 * col_width + col_width / 2.0;
                let band_top = c.top_margin + (ci / max_cols) as f64 * (band_extent + c.band_gap);
                let spacing = (c.band_height / (rows.len() + 1) as f64).max(c.min_node_spacing);

                let mut run: Vec<usize> = Vec::new();
                let mut run_stage = None;
                for (row, &(stage, rank)) in rows.iter().enumerate() {
                    let node = column[rank];
                    placements[node.index()] = Placement {
                        x,
                        y: band_top + spacing * (row + 1) as f64,
                        group_index: gi,
                        column_index: ci,
                    };
                    if run_stage != Some(stage) {
                        if let Some(prev) = run_stage {
                            slots.entry((gi, prev)).or_default().push(std::mem::take(&mut run));
                        }
                        run_stage = Some(stage);
                    }
                    run.push(node.index());
                }
                if let Some(prev) = run_stage {
                    slots.entry((gi, prev)).or_default().push(run);
                }
            }

            group_layouts.push(GroupLayout {
                name: group.name.clone(),
                index: gi,
                x: cursor_x,
                width,
                column_width: col_width,
                column_count: columns.len(),
                band_count: bands,
                node_count: group.members.len(),
                total_out_degree: group.total_out_degree,
                mean_out_degree: group.mean_out_degree,
            });
            column_count += columns.len();
            max_bands = max_bands.max(bands);
            cursor_x += width + c.group_gap;
        }

        // Crossing pass over vertical positions only.
        let mut ys: Vec<f64> = placements.iter().map(|p| p.y).collect();
        let edges: Vec<StagedEdge> = graph
            .edge_indices()
            .map(|(s, t)| StagedEdge::new(s.index(), t.index(), &staging.stages))
            .collect();
        let mut metrics = LayoutMetrics::default();
        if edges.len() <= c.crossing_edge_limit {
            let slots: Vec<Slot> = slots.into_values().collect();
            let reduction = reduce_crossings(&edges, &mut ys, &slots, c.crossing_max_passes);
            debug_assert_eq!(reduction.after, count_crossings(&edges, &ys));
            metrics.crossings_before_reduction = Some(reduction.before);
            metrics.crossing_count = Some(reduction.after);
            metrics.reversals_applied = reduction.reversals;
            metrics.reduction_passes = reduction.passes;
        } else {
            tracing::debug!(edges = edges.len(), limit = c.crossing_edge_limit, "crossing pass skipped");
        }

        let mut positions = BTreeMap::new();
        let mut nodes_per_stage = vec![0usize; staging.stage_count()];
        for idx in graph.node_indices() {
            let p = placements[idx.index()];
            let stage = staging.stage(idx);
            nodes_per_stage[stage] += 1;
            positions.insert(
                graph.node(idx).id.clone(),
                Position {
                    x: p.x,
                    y: ys[idx.index()],
                    group_index: p.group_index,
                    stage_index: stage,
                    column_index: p.column_index,
                },
            );
        }

        let total_length: f64 = graph
            .edge_indices()
            .map(|(s, t)| {
                let (a, b) = (s.index(), t.index());
                (placements[a].x - placements[b].x).hypot(ys[a] - ys[b])
            })
            .sum();

        metrics.group_count = group_layouts.len();
        metrics.stage_count = staging.stage_count();
        metrics.column_count = column_count;
        metrics.nodes_per_group = group_layouts.iter().map(|g| (g.name.clone(), g.node_count)).collect();
        metrics.nodes_per_stage = nodes_per_stage;
        metrics.mean_edge_length = if edges.is_empty() {
            0.0
        } else {
            total_length / edges.len() as f64
        };
        metrics.cycle_edges = staging.cycle_edges;
        metrics.width = cursor_x - c.group_gap + c.left_margin;
        metrics.height = 2.0 * c.top_margin
            + max_bands as f64 * band_extent
            + max_bands.saturating_sub(1) as f64 * c.band_gap;

        tracing::info!(
            entities = positions.len(),
            groups = metrics.group_count,
            stages = metrics.stage_count,
            columns = metrics.column_count,
            crossings = ?metrics.crossing_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "layout complete"
        );

        Layout {
            positions,
            groups: group_layouts,
            metrics,
        }
    }
}
