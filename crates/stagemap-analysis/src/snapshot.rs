//! Serializable graph snapshots.
//!
//! A snapshot carries every entity field and edge, so
//! `Graph::from_snapshot(&graph.snapshot())` rebuilds an identical graph.

use serde::{Deserialize, Serialize};
use stagemap_core::constants::SNAPSHOT_VERSION;
use stagemap_core::errors::CallGraphError;

use crate::call_graph::{EntityArena, Graph, GraphSummary, ResolutionDiagnostics};
use crate::call_graph::types::{Edge, Entity};
use crate::scanner::Language;

/// One analysed source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub group: String,
    pub language: Language,
    /// xxh3, 16 hex digits.
    pub content_hash: String,
    pub entity_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default)]
    pub files: Vec<FileRecord>,
    /// In graph insertion order.
    pub entities: Vec<Entity>,
    /// Sorted by (source, target).
    pub edges: Vec<Edge>,
    pub summary: GraphSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<ResolutionDiagnostics>,
}

impl GraphSnapshot {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            root: None,
            files: Vec::new(),
            entities: graph.entities().cloned().collect(),
            edges: graph.edges(),
            summary: graph.summary(),
            diagnostics: None,
        }
    }

    pub fn to_json(&self) -> Result<String, CallGraphError> {
        serde_json::to_string_pretty(self).map_err(|e| CallGraphError::InvalidSnapshot {
            message: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CallGraphError> {
        let snapshot: Self = serde_json::from_str(json).map_err(|e| CallGraphError::InvalidSnapshot {
            message: e.to_string(),
        })?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CallGraphError::SnapshotVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}

impl Graph {
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::from_graph(self)
    }

    /// Rebuild a graph. Fails on an unsupported version, duplicate entity
    /// ids, edges with unknown endpoints, or recorded degrees that disagree
    /// with the edges.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Result<Self, CallGraphError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CallGraphError::SnapshotVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut arena = EntityArena::new();
        for entity in &snapshot.entities {
            if !arena.insert(entity.clone()) {
                return Err(invalid(format!("duplicate entity id {}", entity.id)));
            }
        }
        let mut graph = Graph::from_table(arena.freeze());

        for edge in &snapshot.edges {
            let inserted = graph
                .insert_edge(&edge.source, &edge.target, edge.call_site_line)
                .map_err(|_| invalid(format!("edge {} -> {} has an unknown endpoint", edge.source, edge.target)))?;
            if !inserted {
                return Err(invalid(format!("duplicate edge {} -> {}", edge.source, edge.target)));
            }
        }

        for recorded in &snapshot.entities {
            let rebuilt = graph.get(&recorded.id)?;
            if (rebuilt.out_degree, rebuilt.in_degree) != (recorded.out_degree, recorded.in_degree) {
                return Err(invalid(format!("degrees of {} do not match its edges", recorded.id)));
            }
        }
        Ok(graph)
    }
}

fn invalid(message: String) -> CallGraphError {
    CallGraphError::InvalidSnapshot { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_graph::CallGraphBuilder;
    use crate::parsers::SourceParser;

    fn graph() -> Graph {
        let mut parser = SourceParser::new(true);
        let file = parser
            .parse_str("a.ts", ".", "function a(x) { b(x); }\nconst b = (y: number) => a(y);\n")
            .unwrap();
        CallGraphBuilder::default().build_from_files(&[file]).0
    }

    #[test]
    fn json_round_trip_preserves_the_graph() {
        let g = graph();
        let json = g.snapshot().to_json().unwrap();
        let restored = Graph::from_snapshot(&GraphSnapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(restored.edges(), g.edges());
        let entities = |g: &Graph| g.entities().cloned().collect::<Vec<_>>();
        assert_eq!(entities(&restored), entities(&g));
    }

    #[test]
    fn rejects_other_versions() {
        let mut snapshot = graph().snapshot();
        snapshot.version = 99;
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(matches!(
            GraphSnapshot::from_json(&json),
            Err(CallGraphError::SnapshotVersion { found: 99, .. })
        ));
        assert!(Graph::from_snapshot(&snapshot).is_err());
    }

    #[test]
    fn rejects_dangling_edges() {
        let mut snapshot = graph().snapshot();
        snapshot.edges[0].target = "a.ts:missing:1".to_string();
        let err = Graph::from_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, CallGraphError::InvalidSnapshot { .. }));
    }

    #[test]
    fn rejects_inconsistent_degrees() {
        let mut snapshot = graph().snapshot();
        snapshot.entities[0].out_degree += 1;
        assert!(Graph::from_snapshot(&snapshot).is_err());
    }

    #[test]
    fn malformed_json_is_an_invalid_snapshot() {
        assert!(matches!(
            GraphSnapshot::from_json("{ not json"),
            Err(CallGraphError::InvalidSnapshot { .. })
        ));
    }
}
