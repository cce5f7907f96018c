//! Parser output types.

use tree_sitter::{Node, Tree};

use crate::scanner::Language;

/// One successfully parsed source file. Owns its text and syntax tree.
pub struct ParsedFile {
    /// Root-relative path with forward slashes.
    pub relative_path: String,
    pub group: String,
    pub language: Language,
    pub source: String,
    pub tree: Tree,
    /// xxh3 of the raw bytes.
    pub content_hash: u64,
    pub parse_time_us: u64,
}

impl ParsedFile {
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    pub fn content_hash_hex(&self) -> String {
        format!("{:016x}", self.content_hash)
    }
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("relative_path", &self.relative_path)
            .field("group", &self.group)
            .field("language", &self.language)
            .field("content_hash", &self.content_hash_hex())
            .finish_non_exhaustive()
    }
}

/// 1-based line of a node's first byte.
pub(crate) fn start_line(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

/// 1-based line of a node's last byte.
pub(crate) fn end_line(node: Node<'_>) -> u32 {
    node.end_position().row as u32 + 1
}
