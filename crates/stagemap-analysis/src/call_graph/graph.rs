//! The call graph: entities as nodes, distinct caller → callee pairs as edges.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use stagemap_core::config::EntryPointRule;
use stagemap_core::errors::CallGraphError;
use stagemap_core::types::collections::{FxHashMap, SmallVec2};

use super::summary::GraphSummary;
use super::table::EntityTable;
use super::types::{CallEdge, Edge, Entity};

/// Directed call graph with O(1) id lookup and both adjacency directions.
///
/// Holds no parallel edges: at most one edge per ordered (caller, callee)
/// pair. `Entity::out_degree` / `in_degree` always equal the number of
/// distinct callees / callers, a self-call counting once in each.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    graph: DiGraph<Entity, CallEdge>,
    by_id: FxHashMap<String, NodeIndex>,
    by_name: FxHashMap<String, SmallVec2<NodeIndex>>,
}

impl Graph {
    /// A graph with every entity of `table` and no edges. Node `i` is
    /// table entity `i`.
    pub fn from_table(table: EntityTable) -> Self {
        let entities = table.into_entities();
        let mut graph = DiGraph::with_capacity(entities.len(), entities.len() * 2);
        let mut by_id = FxHashMap::default();
        let mut by_name: FxHashMap<String, SmallVec2<NodeIndex>> = FxHashMap::default();
        for mut entity in entities {
            entity.out_degree = 0;
            entity.in_degree = 0;
            let id = entity.id.clone();
            let name = entity.name.clone();
            let idx = graph.add_node(entity);
            by_id.insert(id, idx);
            by_name.entry(name).or_default().push(idx);
        }
        Self {
            graph,
            by_id,
            by_name,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.by_id.get(id).map(|&idx| &self.graph[idx])
    }

    /// Like [`Graph::entity`], failing with `EntityNotFound`.
    pub fn get(&self, id: &str) -> Result<&Entity, CallGraphError> {
        self.entity(id).ok_or_else(|| CallGraphError::not_found(id))
    }

    /// Entities in insertion order (file order, then document order).
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.graph.node_weights()
    }

    pub fn entities_named(&self, name: &str) -> Vec<&Entity> {
        self.by_name
            .get(name)
            .map(|nodes| nodes.iter().map(|&idx| &self.graph[idx]).collect())
            .unwrap_or_default()
    }

    pub fn entities_in_group(&self, group: &str) -> Vec<&Entity> {
        self.entities().filter(|e| e.group == group).collect()
    }

    /// Distinct group keys, sorted.
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self.entities().map(|e| e.group.clone()).collect();
        groups.sort();
        groups.dedup();
        groups
    }

    /// Direct callees of `id`, sorted by id.
    pub fn callees(&self, id: &str) -> Result<Vec<&Entity>, CallGraphError> {
        self.adjacent(id, Direction::Outgoing)
    }

    /// Direct callers of `id`, sorted by id.
    pub fn callers(&self, id: &str) -> Result<Vec<&Entity>, CallGraphError> {
        self.adjacent(id, Direction::Incoming)
    }

    fn adjacent(&self, id: &str, direction: Direction) -> Result<Vec<&Entity>, CallGraphError> {
        let idx = self.index_of(id).ok_or_else(|| CallGraphError::not_found(id))?;
        let mut out: Vec<&Entity> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| &self.graph[n])
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }

    /// Whether `source` calls `target` directly.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        match (self.index_of(source), self.index_of(target)) {
            (Some(s), Some(t)) => self.graph.find_edge(s, t).is_some(),
            _ => false,
        }
    }

    /// All edges sorted by (source, target).
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .graph
            .edge_references()
            .map(|e| Edge {
                source: self.graph[e.source()].id.clone(),
                target: self.graph[e.target()].id.clone(),
                call_site_line: e.weight().call_site_line,
            })
            .collect();
        edges.sort();
        edges
    }

    /// Link `source` → `target`. Returns `Ok(false)` when the edge already
    /// exists; the existing call-site line is kept.
    pub fn insert_edge(&mut self, source: &str, target: &str, call_site_line: u32) -> Result<bool, CallGraphError> {
        let s = self.index_of(source).ok_or_else(|| CallGraphError::not_found(source))?;
        let t = self.index_of(target).ok_or_else(|| CallGraphError::not_found(target))?;
        Ok(self.link(s, t, call_site_line))
    }

    /// Entities that qualify as entry points under `rule`, in insertion order.
    pub fn entry_points(&self, rule: &EntryPointRule) -> Vec<&Entity> {
        self.entities().filter(|e| is_entry_point(e, rule)).collect()
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary::compute(self)
    }

    // ---- crate-internal access for traversal and layout ----

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &Entity {
        &self.graph[idx]
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub(crate) fn neighbors(&self, idx: NodeIndex, direction: Direction) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, direction)
    }

    pub(crate) fn edge_indices(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph.edge_references().map(|e| (e.source(), e.target()))
    }

    /// Insert by node index, keeping degrees in step. Returns `false` for an
    /// existing edge.
    pub(crate) fn link(&mut self, source: NodeIndex, target: NodeIndex, call_site_line: u32) -> bool {
        if self.graph.find_edge(source, target).is_some() {
            return false;
        }
        self.graph.add_edge(source, target, CallEdge { call_site_line });
        self.graph[source].out_degree += 1;
        self.graph[target].in_degree += 1;
        true
    }
}

/// Entry-point test for one entity under `rule`.
pub fn is_entry_point(entity: &Entity, rule: &EntryPointRule) -> bool {
    if entity.in_degree != 0 {
        return false;
    }
    match rule {
        EntryPointRule::NoCallers => true,
        EntryPointRule::NamedRoots { patterns } => {
            let name = entity.name.to_lowercase();
            let path = entity.file_path.to_lowercase();
            patterns.iter().any(|p| {
                let p = p.to_lowercase();
                name.contains(&p) || path.contains(&p)
            })
        }
    }
}
