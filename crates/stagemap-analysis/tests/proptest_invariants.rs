//! Property-based tests for graph, traversal, and layout invariants.
//!
//! Graphs are generated directly (entities + random edge pairs) so the
//! properties cover shapes real source rarely produces: dense cycles,
//! self-calls, isolated entities, lopsided groups.

use proptest::prelude::*;

use stagemap_analysis::call_graph::{Entity, EntityArena, EntityKind, Graph};
use stagemap_analysis::impact::ImpactAnalyzer;
use stagemap_analysis::layout::LayoutEngine;
use stagemap_core::config::{ImpactConfig, LayoutConfig};

// ---- helpers ----

fn build(node_count: usize, groups: usize, edges: &[(usize, usize)]) -> Graph {
    let mut arena = EntityArena::new();
    for i in 0..node_count {
        let group = format!("g{}", i % groups.max(1));
        arena.insert(Entity::new(
            format!("f{i}"),
            format!("{group}/mod.ts"),
            group,
            EntityKind::Declaration,
            i as u32 + 1,
            i as u32 + 1,
            Vec::new(),
        ));
    }
    let mut graph = Graph::from_table(arena.freeze());
    let ids: Vec<String> = graph.entities().map(|e| e.id.clone()).collect();
    for &(s, t) in edges {
        if s < node_count && t < node_count {
            graph.insert_edge(&ids[s], &ids[t], 1).unwrap();
        }
    }
    graph
}

fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1usize..40, 1usize..5).prop_flat_map(|(n, groups)| {
        prop::collection::vec((0..n, 0..n), 0..n * 3)
            .prop_map(move |edges| build(n, groups, &edges))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Degrees always equal the size of the adjacency views.
    #[test]
    fn prop_degrees_match_adjacency(graph in graph_strategy()) {
        for e in graph.entities() {
            prop_assert_eq!(e.out_degree, graph.callees(&e.id).unwrap().len());
            prop_assert_eq!(e.in_degree, graph.callers(&e.id).unwrap().len());
        }
    }

    /// t ∈ callees(s) ⇔ s ∈ callers(t) ⇔ edge (s, t) exists.
    #[test]
    fn prop_adjacency_is_symmetric(graph in graph_strategy()) {
        for edge in graph.edges() {
            let callees = graph.callees(&edge.source).unwrap();
            let callers = graph.callers(&edge.target).unwrap();
            prop_assert!(callees.iter().any(|e| e.id == edge.target));
            prop_assert!(callers.iter().any(|e| e.id == edge.source));
        }
        let total_out: usize = graph.entities().map(|e| e.out_degree).sum();
        prop_assert_eq!(total_out, graph.edge_count());
    }

    /// e ∈ ancestors(x) ⇔ x ∈ descendants(e).
    #[test]
    fn prop_ancestor_descendant_duality(graph in graph_strategy()) {
        let analyzer = ImpactAnalyzer::new(&graph, ImpactConfig::default());
        let ids: Vec<String> = graph.entities().map(|e| e.id.clone()).collect();
        for x in &ids {
            let ancestors = analyzer.ancestors(x).unwrap();
            prop_assert!(ancestors.iter().all(|a| &a.id != x));
            for a in &ancestors {
                let descendants = analyzer.descendants(&a.id).unwrap();
                prop_assert!(descendants.iter().any(|d| &d.id == x));
            }

            let descendants = analyzer.descendants(x).unwrap();
            prop_assert!(descendants.iter().all(|d| &d.id != x));
            for d in &descendants {
                let ancestors = analyzer.ancestors(&d.id).unwrap();
                prop_assert!(ancestors.iter().any(|a| &a.id == x));
            }
        }
    }

    /// Inserting every existing edge again changes nothing.
    #[test]
    fn prop_edge_insertion_is_idempotent(graph in graph_strategy()) {
        let mut copy = graph.clone();
        for edge in graph.edges() {
            prop_assert!(!copy.insert_edge(&edge.source, &edge.target, 99).unwrap());
        }
        prop_assert_eq!(copy.edges(), graph.edges());
    }

    /// Same graph and config, same layout.
    #[test]
    fn prop_layout_is_deterministic(graph in graph_strategy()) {
        let engine = LayoutEngine::new(LayoutConfig::default());
        prop_assert_eq!(engine.layout(&graph), engine.layout(&graph));
    }

    /// Every entity is placed, no column overflows, and only entities that
    /// call nothing sit at stage 0.
    #[test]
    fn prop_layout_bounds(graph in graph_strategy(), per_column in 1usize..8, max_columns in 1usize..4) {
        let config = LayoutConfig {
            max_nodes_per_column: per_column,
            max_columns_per_group: max_columns,
            ..Default::default()
        };
        let layout = LayoutEngine::new(config).layout(&graph);
        prop_assert_eq!(layout.positions.len(), graph.entity_count());

        for group in &layout.groups {
            for col in 0..group.column_count {
                prop_assert!(layout.column(group.index, col).len() <= per_column);
            }
        }

        let per_stage: usize = layout.metrics.nodes_per_stage.iter().sum();
        prop_assert_eq!(per_stage, graph.entity_count());

        for e in graph.entities() {
            let stage = layout.positions[&e.id].stage_index;
            if e.out_degree == 0 {
                prop_assert_eq!(stage, 0);
            } else {
                prop_assert!(stage >= 1);
            }
        }
    }

    /// The crossing pass never makes things worse.
    #[test]
    fn prop_crossing_reduction_is_monotone(graph in graph_strategy()) {
        let layout = LayoutEngine::new(LayoutConfig::default()).layout(&graph);
        let m = &layout.metrics;
        if let (Some(before), Some(after)) = (m.crossings_before_reduction, m.crossing_count) {
            prop_assert!(after <= before);
        }
        prop_assert!(m.reduction_passes <= LayoutConfig::default().crossing_max_passes);
    }

    /// Snapshots rebuild the same graph.
    #[test]
    fn prop_snapshot_rebuilds_graph(graph in graph_strategy()) {
        let rebuilt = Graph::from_snapshot(&graph.snapshot()).unwrap();
        prop_assert_eq!(rebuilt.edges(), graph.edges());
        let a: Vec<_> = graph.entities().cloned().collect();
        let b: Vec<_> = rebuilt.entities().cloned().collect();
        prop_assert_eq!(a, b);
    }
}
