//! End-to-end analysis: scan → parse + entity pass → freeze → call pass.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use stagemap_core::config::{ImpactConfig, LayoutConfig, StagemapConfig};
use stagemap_core::errors::{ErrorCode, ParseError, PipelineError};
use stagemap_core::events::{
    AnalysisEventHandler, FileParsedEvent, GraphBuiltEvent, LayoutCompleteEvent,
    ParseFailureEvent, ScanCompleteEvent, ScanStartedEvent,
};

use crate::call_graph::{CallGraphBuilder, Entity, EntityArena, Graph, ResolutionDiagnostics};
use crate::impact::ImpactAnalyzer;
use crate::layout::{Layout, LayoutEngine};
use crate::parsers::{extract_entities, ParsedFile, SourceParser};
use crate::scanner::{DiscoveredFile, ScanStats, Scanner};
use crate::snapshot::{FileRecord, GraphSnapshot};

/// A file that was discovered but could not be analysed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub path: String,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub scan: ScanStats,
    pub files_parsed: usize,
    pub files_failed: usize,
    pub entity_count: usize,
    /// Entities dropped because their id was already taken.
    pub duplicate_entities: usize,
    pub edge_count: usize,
    pub scan_ms: u64,
    pub parse_ms: u64,
    pub graph_ms: u64,
}

/// Result of one analysis run. The graph is read-only from here on.
#[derive(Debug)]
pub struct Analysis {
    pub root: PathBuf,
    pub graph: Graph,
    /// Successfully parsed files, sorted by path.
    pub files: Vec<FileRecord>,
    pub failures: Vec<ParseFailure>,
    pub diagnostics: ResolutionDiagnostics,
    pub stats: AnalysisStats,
}

impl Analysis {
    pub fn layout(&self, config: &LayoutConfig, events: Option<&dyn AnalysisEventHandler>) -> Layout {
        let layout = LayoutEngine::new(config.clone()).layout(&self.graph);
        if let Some(handler) = events {
            handler.on_layout_complete(&LayoutCompleteEvent {
                group_count: layout.metrics.group_count,
                stage_count: layout.metrics.stage_count,
                crossing_count: layout.metrics.crossing_count,
            });
        }
        layout
    }

    pub fn impact(&self, config: &ImpactConfig) -> ImpactAnalyzer<'_> {
        ImpactAnalyzer::new(&self.graph, config.clone())
    }

    /// Snapshot including file records and resolution diagnostics.
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut snapshot = self.graph.snapshot();
        snapshot.root = Some(self.root.display().to_string());
        snapshot.files = self.files.clone();
        snapshot.diagnostics = Some(self.diagnostics.clone());
        snapshot
    }
}

/// Analyse every source file under `root`.
///
/// Only an unreadable root or an invalid config aborts the run. Files that
/// fail to read or parse are logged, reported to `events`, recorded in
/// [`Analysis::failures`], and skipped.
pub fn analyze(
    root: &Path,
    config: &StagemapConfig,
    events: Option<&dyn AnalysisEventHandler>,
) -> Result<Analysis, PipelineError> {
    let _span = tracing::info_span!("analyze", root = %root.display()).entered();
    config.validate()?;
    let mut stats = AnalysisStats::default();

    let scan_start = Instant::now();
    let scanner = Scanner::new(root, &config.scan)?;
    if let Some(handler) = events {
        handler.on_scan_started(&ScanStartedEvent {
            root: root.to_path_buf(),
            file_count: None,
        });
    }
    let (discovered, scan_stats) = scanner.discover();
    stats.scan = scan_stats;
    stats.scan_ms = scan_start.elapsed().as_millis() as u64;

    // Pass one: parse and extract entities per file, in parallel.
    let parse_start = Instant::now();
    let results = run_in_pool(config.scan.effective_threads(), || {
        parse_all(
            &discovered,
            config.scan.effective_strict_parse(),
            config.scan.effective_max_file_size(),
            events,
        )
    });

    let mut arena = EntityArena::new();
    let mut parsed = Vec::with_capacity(results.len());
    let mut files = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (file, result) in discovered.iter().zip(results) {
        match result {
            Ok((parsed_file, entities)) => {
                files.push(FileRecord {
                    path: parsed_file.relative_path.clone(),
                    group: parsed_file.group.clone(),
                    language: parsed_file.language,
                    content_hash: parsed_file.content_hash_hex(),
                    entity_count: entities.len(),
                });
                arena.extend(entities);
                parsed.push(parsed_file);
            }
            Err(error) => {
                tracing::warn!(path = %file.relative_path, error = %error, "skipping file");
                failures.push(ParseFailure {
                    path: file.relative_path.clone(),
                    code: error.error_code().to_string(),
                    message: error.to_string(),
                });
            }
        }
    }
    stats.files_parsed = parsed.len();
    stats.files_failed = failures.len();
    stats.duplicate_entities = arena.duplicates();
    stats.parse_ms = parse_start.elapsed().as_millis() as u64;
    if let Some(handler) = events {
        handler.on_scan_complete(&ScanCompleteEvent {
            files_discovered: discovered.len(),
            files_parsed: stats.files_parsed,
            files_failed: stats.files_failed,
            entity_count: arena.len(),
            duration_ms: stats.parse_ms,
        });
    }
    tracing::info!(
        parsed = stats.files_parsed,
        failed = stats.files_failed,
        entities = arena.len(),
        duration_ms = stats.parse_ms,
        "entity pass complete"
    );

    // Barrier: the table is frozen before any call is resolved.
    let table = arena.freeze();

    // Pass two: resolve calls against the frozen table.
    let graph_start = Instant::now();
    let builder = CallGraphBuilder::new(config.resolution.policy);
    let (graph, diagnostics) = run_in_pool(config.scan.effective_threads(), || builder.build(table, &parsed));
    stats.graph_ms = graph_start.elapsed().as_millis() as u64;
    stats.entity_count = graph.entity_count();
    stats.edge_count = graph.edge_count();
    if let Some(handler) = events {
        handler.on_graph_built(&GraphBuiltEvent {
            entity_count: stats.entity_count,
            edge_count: stats.edge_count,
            unresolved_calls: diagnostics.unresolved,
            duration_ms: stats.graph_ms,
        });
    }

    Ok(Analysis {
        root: root.to_path_buf(),
        graph,
        files,
        failures,
        diagnostics,
        stats,
    })
}

type ParseOutcome = Result<(ParsedFile, Vec<Entity>), ParseError>;

/// One outcome per discovered file, in discovery order.
fn parse_all(
    files: &[DiscoveredFile],
    strict: bool,
    max_file_size: u64,
    events: Option<&dyn AnalysisEventHandler>,
) -> Vec<ParseOutcome> {
    files
        .par_iter()
        .map_init(
            || SourceParser::new(strict),
            |parser, file| {
                let result = parser.parse_file(file, max_file_size).map(|parsed| {
                    let entities = extract_entities(&parsed);
                    (parsed, entities)
                });
                if let Ok((parsed, entities)) = &result {
                    tracing::debug!(path = %parsed.relative_path, entities = entities.len(), "parsed");
                }
                let Some(handler) = events else {
                    return result;
                };
                match &result {
                    Ok((parsed, entities)) => handler.on_file_parsed(&FileParsedEvent {
                        path: parsed.relative_path.clone(),
                        entity_count: entities.len(),
                        parse_time_us: parsed.parse_time_us,
                    }),
                    Err(error) => handler.on_parse_failure(&ParseFailureEvent {
                        path: file.relative_path.clone(),
                        message: error.to_string(),
                    }),
                }
                result
            },
        )
        .collect()
}

/// Run `op` on a dedicated pool of `threads` workers, or on rayon's global
/// pool when `threads` is 0 or the pool cannot be built.
fn run_in_pool<R: Send>(threads: usize, op: impl FnOnce() -> R + Send) -> R {
    if threads == 0 {
        return op();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(op),
        Err(e) => {
            tracing::warn!(threads, error = %e, "falling back to the global thread pool");
            op()
        }
    }
}
