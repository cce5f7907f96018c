//! Per-thread tree-sitter parser for TypeScript, TSX, and JavaScript.

use std::path::{Path, PathBuf};
use std::time::Instant;

use stagemap_core::errors::ParseError;
use tree_sitter::{Node, Parser};
use xxhash_rust::xxh3::xxh3_64;

use super::types::ParsedFile;
use crate::scanner::{DiscoveredFile, Language};

/// Wraps one `tree_sitter::Parser`. Not `Sync`; create one per worker
/// (`rayon`'s `map_init` does exactly that).
pub struct SourceParser {
    parser: Parser,
    current: Option<Language>,
    strict: bool,
}

impl SourceParser {
    /// With `strict`, files whose tree contains error or missing nodes are
    /// rejected with [`ParseError::SyntaxErrors`].
    pub fn new(strict: bool) -> Self {
        Self {
            parser: Parser::new(),
            current: None,
            strict,
        }
    }

    /// Read and parse a discovered file.
    pub fn parse_file(&mut self, file: &DiscoveredFile, max_size: u64) -> Result<ParsedFile, ParseError> {
        if file.size > max_size {
            return Err(ParseError::FileTooLarge {
                path: PathBuf::from(&file.relative_path),
                size: file.size,
                max: max_size,
            });
        }
        let bytes = std::fs::read(&file.absolute_path).map_err(|source| ParseError::Io {
            path: file.absolute_path.clone(),
            source,
        })?;
        // Lossy decoding keeps byte offsets stable for valid UTF-8 and only
        // degrades identifiers in the rare invalid file.
        let source = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        self.parse_source(&file.relative_path, &file.group, file.language, source)
    }

    /// Parse in-memory source, detecting the grammar from `relative_path`.
    pub fn parse_str(&mut self, relative_path: &str, group: &str, source: &str) -> Result<ParsedFile, ParseError> {
        let language = Language::from_path(Path::new(relative_path)).ok_or_else(|| {
            ParseError::UnsupportedExtension {
                extension: Path::new(relative_path)
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            }
        })?;
        self.parse_source(relative_path, group, language, source.to_string())
    }

    fn parse_source(
        &mut self,
        relative_path: &str,
        group: &str,
        language: Language,
        source: String,
    ) -> Result<ParsedFile, ParseError> {
        let start = Instant::now();
        self.ensure_language(language)?;

        let tree = self
            .parser
            .parse(source.as_bytes(), None)
            .ok_or_else(|| ParseError::TreeSitterError {
                path: PathBuf::from(relative_path),
                message: "parser returned no tree".to_string(),
            })?;

        if self.strict && tree.root_node().has_error() {
            let count = count_syntax_errors(tree.root_node());
            return Err(ParseError::SyntaxErrors {
                path: PathBuf::from(relative_path),
                count: count.max(1),
            });
        }

        Ok(ParsedFile {
            relative_path: relative_path.to_string(),
            group: group.to_string(),
            language,
            content_hash: xxh3_64(source.as_bytes()),
            source,
            tree,
            parse_time_us: start.elapsed().as_micros() as u64,
        })
    }

    fn ensure_language(&mut self, language: Language) -> Result<(), ParseError> {
        if self.current == Some(language) {
            return Ok(());
        }
        self.parser
            .set_language(&language.grammar())
            .map_err(|e| ParseError::GrammarLoad {
                language: language.name().to_string(),
                message: e.to_string(),
            })?;
        self.current = Some(language);
        Ok(())
    }
}

/// Number of ERROR and MISSING nodes. Only subtrees flagged with
/// `has_error` are descended into.
fn count_syntax_errors(root: Node<'_>) -> usize {
    let mut count = 0;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            count += 1;
            continue;
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }
    count
}
