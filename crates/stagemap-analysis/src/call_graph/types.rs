//! Call graph types: entities and edges.

use serde::{Deserialize, Serialize};

/// Syntactic form an entity was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// `function f() {}`, `function* g() {}`
    Declaration,
    /// Class or object-literal method.
    Method,
    /// Arrow function bound to a name.
    Arrow,
    /// Function expression bound to a name.
    Expression,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Declaration => "declaration",
            Self::Method => "method",
            Self::Arrow => "arrow",
            Self::Expression => "expression",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named function-like unit of code: one node of the call graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// `"{file_path}:{name}:{start_line}"`, unique within a graph.
    pub id: String,
    pub name: String,
    pub file_path: String,
    pub group: String,
    pub kind: EntityKind,
    pub start_line: u32,
    pub end_line: u32,
    pub parameters: Vec<String>,
    /// Distinct entities this one calls. Maintained by the graph.
    pub out_degree: usize,
    /// Distinct entities calling this one. Maintained by the graph.
    pub in_degree: usize,
}

impl Entity {
    pub fn new(
        name: String,
        file_path: String,
        group: String,
        kind: EntityKind,
        start_line: u32,
        end_line: u32,
        parameters: Vec<String>,
    ) -> Self {
        Self {
            id: Self::make_id(&file_path, &name, start_line),
            name,
            file_path,
            group,
            kind,
            start_line,
            end_line,
            parameters,
            out_degree: 0,
            in_degree: 0,
        }
    }

    pub fn make_id(file_path: &str, name: &str, start_line: u32) -> String {
        format!("{file_path}:{name}:{start_line}")
    }
}

/// Edge weight: the first line at which the caller calls the callee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    pub call_site_line: u32,
}

/// A directed caller → callee pair, as exposed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub call_site_line: u32,
}
