//! Two-pass call graph construction.

use std::time::Instant;

use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use stagemap_core::config::ResolutionPolicy;
use stagemap_core::types::collections::SmallVec2;

use super::graph::Graph;
use super::resolution::{resolve, CallResolution, ResolutionDiagnostics};
use super::table::{EntityArena, EntityTable};
use crate::parsers::{extract_call_sites, extract_entities, ParsedFile};

/// A resolved call waiting to be merged: caller index, target indices, line.
struct PendingCall {
    caller: usize,
    targets: SmallVec2<usize>,
    line: u32,
}

/// Builds a [`Graph`] from parsed files.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallGraphBuilder {
    policy: ResolutionPolicy,
}

impl CallGraphBuilder {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Pass one: extract entities from every file and freeze them.
    pub fn collect_entities(files: &[ParsedFile]) -> EntityTable {
        let per_file: Vec<_> = files.par_iter().map(extract_entities).collect();
        let mut arena = EntityArena::new();
        for entities in per_file {
            arena.extend(entities);
        }
        arena.freeze()
    }

    /// Both passes.
    pub fn build_from_files(&self, files: &[ParsedFile]) -> (Graph, ResolutionDiagnostics) {
        let table = Self::collect_entities(files);
        self.build(table, files)
    }

    /// Pass two: resolve call sites against `table` in parallel, then insert
    /// edges sequentially in file order.
    pub fn build(&self, table: EntityTable, files: &[ParsedFile]) -> (Graph, ResolutionDiagnostics) {
        let start = Instant::now();
        let policy = self.policy;

        let per_file: Vec<(Vec<PendingCall>, ResolutionDiagnostics)> = files
            .par_iter()
            .map(|file| resolve_file(&table, file, policy))
            .collect();

        let mut graph = Graph::from_table(table);
        let mut diagnostics = ResolutionDiagnostics::new();
        for (pending, file_diagnostics) in per_file {
            diagnostics.merge(&file_diagnostics);
            for call in pending {
                let caller = NodeIndex::new(call.caller);
                for &target in &call.targets {
                    if graph.link(caller, NodeIndex::new(target), call.line) {
                        diagnostics.edges_inserted += 1;
                    } else {
                        diagnostics.duplicate_edges += 1;
                    }
                }
            }
        }

        tracing::info!(
            entities = graph.entity_count(),
            edges = graph.edge_count(),
            call_sites = diagnostics.total_call_sites,
            unresolved = diagnostics.unresolved,
            ambiguous = diagnostics.ambiguous,
            policy = %policy,
            duration_ms = start.elapsed().as_millis() as u64,
            "call graph built"
        );
        (graph, diagnostics)
    }
}

fn resolve_file(
    table: &EntityTable,
    file: &ParsedFile,
    policy: ResolutionPolicy,
) -> (Vec<PendingCall>, ResolutionDiagnostics) {
    let calls = extract_call_sites(file);
    let mut diagnostics = ResolutionDiagnostics::new();
    diagnostics.dynamic = calls.dynamic_calls;
    let mut pending = Vec::with_capacity(calls.sites.len());

    for site in calls.sites {
        let Some(caller) = site.caller_id.as_deref().and_then(|id| table.index_of(id)) else {
            diagnostics.record_uncontained();
            continue;
        };
        let resolution = resolve(table, &site.callee_name, &file.relative_path, policy);
        diagnostics.record(&resolution);
        if let CallResolution::Unresolved = resolution {
            tracing::trace!(file = %file.relative_path, callee = %site.callee_name, "unresolved call");
            continue;
        }
        pending.push(PendingCall {
            caller,
            targets: SmallVec2::from_slice(resolution.targets()),
            line: site.line,
        });
    }
    (pending, diagnostics)
}
