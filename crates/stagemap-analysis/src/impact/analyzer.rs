//! Impact queries over a built graph, with a bounded cache of transitive sets.

use std::sync::Arc;

use moka::sync::Cache;
use petgraph::graph::NodeIndex;
use stagemap_core::config::ImpactConfig;
use stagemap_core::errors::CallGraphError;

use super::risk::assess_risk;
use super::traversal::reachable;
use super::types::{Complexity, ComplexityHistogram, ImpactReport, RiskAssessment, TraversalDirection};
use crate::call_graph::graph::is_entry_point;
use crate::call_graph::{Entity, Graph};

type CacheKey = (usize, TraversalDirection);

/// Read-only impact queries. Transitive sets are cached per
/// (entity, direction); the graph is borrowed immutably, so entries never
/// go stale.
pub struct ImpactAnalyzer<'g> {
    graph: &'g Graph,
    config: ImpactConfig,
    cache: Cache<CacheKey, Arc<Vec<NodeIndex>>>,
}

impl<'g> ImpactAnalyzer<'g> {
    pub fn new(graph: &'g Graph, config: ImpactConfig) -> Self {
        let cache = Cache::builder().max_capacity(config.cache_capacity.max(1)).build();
        Self {
            graph,
            config,
            cache,
        }
    }

    pub fn config(&self) -> &ImpactConfig {
        &self.config
    }

    /// Every entity that transitively calls `id`, sorted by id.
    pub fn ancestors(&self, id: &str) -> Result<Vec<&'g Entity>, CallGraphError> {
        self.transitive(id, TraversalDirection::Upstream)
    }

    /// Every entity `id` transitively calls, sorted by id.
    pub fn descendants(&self, id: &str) -> Result<Vec<&'g Entity>, CallGraphError> {
        self.transitive(id, TraversalDirection::Downstream)
    }

    pub fn risk(&self, id: &str) -> Result<RiskAssessment, CallGraphError> {
        let idx = self.index(id)?;
        Ok(self.assess(idx))
    }

    pub fn complexity(&self, id: &str) -> Result<Complexity, CallGraphError> {
        Ok(Complexity::from_out_degree(self.graph.get(id)?.out_degree))
    }

    /// Complexity bucket counts over the whole graph.
    pub fn complexity_summary(&self) -> ComplexityHistogram {
        let mut histogram = ComplexityHistogram::default();
        for entity in self.graph.entities() {
            histogram.record(entity.out_degree);
        }
        histogram
    }

    /// Full report for one entity.
    pub fn impact(&self, id: &str) -> Result<ImpactReport, CallGraphError> {
        let idx = self.index(id)?;
        let entity = self.graph.node(idx);
        let ids = |entities: Vec<&Entity>| entities.into_iter().map(|e| e.id.clone()).collect::<Vec<_>>();

        let ancestors = self.sorted(&self.cached(idx, TraversalDirection::Upstream));
        let entry_point_ancestors = ancestors
            .iter()
            .filter(|e| is_entry_point(e, &self.config.entry_point))
            .map(|e| e.id.clone())
            .collect();

        Ok(ImpactReport {
            entity_id: entity.id.clone(),
            direct_callers: ids(self.graph.callers(id)?),
            direct_callees: ids(self.graph.callees(id)?),
            ancestors: ids(ancestors),
            descendants: ids(self.sorted(&self.cached(idx, TraversalDirection::Downstream))),
            entry_point_ancestors,
            risk: self.assess(idx),
            complexity: Complexity::from_out_degree(entity.out_degree),
        })
    }

    fn transitive(&self, id: &str, direction: TraversalDirection) -> Result<Vec<&'g Entity>, CallGraphError> {
        let idx = self.index(id)?;
        Ok(self.sorted(&self.cached(idx, direction)))
    }

    fn assess(&self, idx: NodeIndex) -> RiskAssessment {
        let ancestors = self.cached(idx, TraversalDirection::Upstream);
        let descendants = self.cached(idx, TraversalDirection::Downstream);
        let entry_point_ancestor = ancestors
            .iter()
            .any(|&a| is_entry_point(self.graph.node(a), &self.config.entry_point));
        assess_risk(ancestors.len(), descendants.len(), entry_point_ancestor, &self.config)
    }

    fn cached(&self, idx: NodeIndex, direction: TraversalDirection) -> Arc<Vec<NodeIndex>> {
        let graph = self.graph;
        let max_depth = self.config.max_depth;
        self.cache.get_with((idx.index(), direction), || {
            Arc::new(reachable(graph, idx, direction, max_depth))
        })
    }

    fn sorted(&self, nodes: &[NodeIndex]) -> Vec<&'g Entity> {
        let graph = self.graph;
        let mut entities: Vec<&'g Entity> = nodes.iter().map(|&n| graph.node(n)).collect();
        entities.sort_by(|a, b| a.id.cmp(&b.id));
        entities
    }

    fn index(&self, id: &str) -> Result<NodeIndex, CallGraphError> {
        self.graph.index_of(id).ok_or_else(|| CallGraphError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_graph::CallGraphBuilder;
    use crate::impact::types::RiskLevel;
    use crate::parsers::SourceParser;

    fn graph(src: &str) -> Graph {
        let mut parser = SourceParser::new(true);
        let file = parser.parse_str("a.js", ".", src).unwrap();
        CallGraphBuilder::default().build_from_files(&[file]).0
    }

    fn ids(entities: &[&Entity]) -> Vec<String> {
        entities.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn ancestors_and_descendants_are_sorted_and_exclusive() {
        let g = graph("function A() { B(); }\nfunction B() { C(); }\nfunction C() {}\n");
        let analyzer = ImpactAnalyzer::new(&g, ImpactConfig::default());
        assert_eq!(ids(&analyzer.ancestors("a.js:C:3").unwrap()), vec!["a.js:A:1", "a.js:B:2"]);
        assert_eq!(ids(&analyzer.descendants("a.js:A:1").unwrap()), vec!["a.js:B:2", "a.js:C:3"]);
        assert!(analyzer.ancestors("a.js:A:1").unwrap().is_empty());
    }

    #[test]
    fn unknown_entity_is_an_error() {
        let g = graph("function A() {}\n");
        let analyzer = ImpactAnalyzer::new(&g, ImpactConfig::default());
        assert!(matches!(analyzer.ancestors("nope"), Err(CallGraphError::EntityNotFound { .. })));
        assert!(analyzer.impact("nope").is_err());
    }

    #[test]
    fn report_for_a_chain_member() {
        let g = graph("function A() { B(); }\nfunction B() { C(); }\nfunction C() {}\n");
        let analyzer = ImpactAnalyzer::new(&g, ImpactConfig::default());
        let report = analyzer.impact("a.js:B:2").unwrap();
        assert_eq!(report.direct_callers, vec!["a.js:A:1"]);
        assert_eq!(report.direct_callees, vec!["a.js:C:3"]);
        assert_eq!(report.entry_point_ancestors, vec!["a.js:A:1"]);
        assert_eq!(report.complexity, Complexity::Low);
        // One ancestor is low on its own; A is an entry point, so one level up.
        assert_eq!(report.risk.base_level, RiskLevel::Low);
        assert_eq!(report.risk.level, RiskLevel::Medium);
    }

    #[test]
    fn wide_fan_in_is_high_risk() {
        let mut src = String::from("function target() {}\n");
        for i in 0..12 {
            src.push_str(&format!("function caller{i}() {{ target(); }}\n"));
        }
        let g = graph(&src);
        let analyzer = ImpactAnalyzer::new(&g, ImpactConfig::default());
        let risk = analyzer.risk("a.js:target:1").unwrap();
        assert_eq!(risk.size, 12);
        assert_eq!(risk.level, RiskLevel::High);
    }

    #[test]
    fn repeated_queries_hit_the_same_answer() {
        let g = graph("function A() { B(); }\nfunction B() { A(); }\n");
        let analyzer = ImpactAnalyzer::new(&g, ImpactConfig::default());
        let first = ids(&analyzer.ancestors("a.js:A:1").unwrap());
        let second = ids(&analyzer.ancestors("a.js:A:1").unwrap());
        assert_eq!(first, second);
        assert_eq!(first, vec!["a.js:B:2"]);
        assert_eq!(analyzer.complexity_summary().low, 2);
    }
}
