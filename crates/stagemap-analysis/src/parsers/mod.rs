//! Tree-sitter parsing and syntactic extraction.
//!
//! [`SourceParser`] turns a file into a [`ParsedFile`]. The extraction
//! functions are pure functions over a parsed file, so the two call graph
//! passes can run them independently on any thread.

pub mod calls;
pub mod functions;
pub mod source_parser;
pub mod types;

pub use calls::{extract_call_sites, CallSite, FileCalls};
pub use functions::extract_entities;
pub use source_parser::SourceParser;
pub use types::ParsedFile;
