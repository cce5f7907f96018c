//! End-to-end tests: real files on disk through `analyze`.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use stagemap_analysis::call_graph::Graph;
use stagemap_analysis::impact::RiskLevel;
use stagemap_analysis::{analyze, GraphSnapshot};
use stagemap_core::config::{LayoutConfig, ResolutionPolicy, StagemapConfig};
use stagemap_core::errors::{ErrorCode, PipelineError, ScanError};
use stagemap_core::events::{
    AnalysisEventHandler, FileParsedEvent, GraphBuiltEvent, ParseFailureEvent, ScanCompleteEvent,
    ScanStartedEvent,
};
use tempfile::TempDir;

// ---- helpers ----

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn ids<'a>(entities: impl IntoIterator<Item = &'a stagemap_analysis::Entity>) -> Vec<String> {
    entities.into_iter().map(|e| e.id.clone()).collect()
}

#[derive(Default)]
struct Recorder {
    parsed: Mutex<Vec<String>>,
    failed: Mutex<Vec<String>>,
    built: Mutex<Option<(usize, usize)>>,
    complete: Mutex<Option<ScanCompleteEvent>>,
    order: Mutex<Vec<&'static str>>,
}

impl AnalysisEventHandler for Recorder {
    fn on_scan_started(&self, event: &ScanStartedEvent) {
        assert_eq!(event.file_count, None);
        self.order.lock().unwrap().push("started");
    }
    fn on_file_parsed(&self, event: &FileParsedEvent) {
        self.parsed.lock().unwrap().push(event.path.clone());
        self.order.lock().unwrap().push("parsed");
    }
    fn on_parse_failure(&self, event: &ParseFailureEvent) {
        self.failed.lock().unwrap().push(event.path.clone());
        self.order.lock().unwrap().push("failed");
    }
    fn on_scan_complete(&self, event: &ScanCompleteEvent) {
        *self.complete.lock().unwrap() = Some(event.clone());
        self.order.lock().unwrap().push("complete");
    }
    fn on_graph_built(&self, event: &GraphBuiltEvent) {
        *self.built.lock().unwrap() = Some((event.entity_count, event.edge_count));
        self.order.lock().unwrap().push("built");
    }
}

// ---- graph construction ----

#[test]
fn chain_in_one_group() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "src/utils/chain.ts",
        "export function A() { return B(); }\nexport function B() { return C(); }\nexport function C() { return 1; }\n",
    );
    let analysis = analyze(dir.path(), &StagemapConfig::default(), None).unwrap();
    let g = &analysis.graph;

    let a = "src/utils/chain.ts:A:1";
    let b = "src/utils/chain.ts:B:2";
    let c = "src/utils/chain.ts:C:3";
    assert_eq!(g.get(a).unwrap().group, "utils");

    let impact = analysis.impact(&Default::default());
    assert_eq!(ids(impact.ancestors(c).unwrap()), vec![a, b]);
    assert_eq!(ids(impact.descendants(a).unwrap()), vec![b, c]);
    assert_eq!(g.get(a).unwrap().out_degree, 1);
    assert_eq!(g.get(c).unwrap().out_degree, 0);
}

#[test]
fn mutual_recursion_terminates_everywhere() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib/ping.js", "function A(n) { return n && B(n - 1); }\nfunction B(n) { return n && A(n - 1); }\n");
    let analysis = analyze(dir.path(), &StagemapConfig::default(), None).unwrap();

    let impact = analysis.impact(&Default::default());
    assert_eq!(ids(impact.ancestors("lib/ping.js:A:1").unwrap()), vec!["lib/ping.js:B:2"]);
    assert_eq!(ids(impact.descendants("lib/ping.js:A:1").unwrap()), vec!["lib/ping.js:B:2"]);

    let layout = analysis.layout(&LayoutConfig::default(), None);
    assert_eq!(layout.positions.len(), 2);
    assert_eq!(layout.metrics.cycle_edges, 1);
}

#[test]
fn shared_names_across_files_link_to_both() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a/helpers.ts", "export function helper() {}\n");
    write(dir.path(), "b/helpers.ts", "export function helper() {}\n");
    write(dir.path(), "c/main.ts", "export function run() {\n  helper();\n}\n");
    let analysis = analyze(dir.path(), &StagemapConfig::default(), None).unwrap();

    let callees = ids(analysis.graph.callees("c/main.ts:run:1").unwrap());
    assert_eq!(callees, vec!["a/helpers.ts:helper:1", "b/helpers.ts:helper:1"]);
    assert_eq!(analysis.diagnostics.ambiguous, 1);

    let mut config = StagemapConfig::default();
    config.resolution.policy = ResolutionPolicy::SameFileOnly;
    let strict = analyze(dir.path(), &config, None).unwrap();
    assert_eq!(strict.graph.edge_count(), 0);
}

#[test]
fn lighter_groups_are_laid_out_first() {
    let dir = TempDir::new().unwrap();
    // controllers: two entities, one callee each -> mean 1.0
    write(
        dir.path(),
        "controllers/user.ts",
        "export function getUser() { find(); }\nexport function listUsers() { findAll(); }\n",
    );
    // repositories: one entity calling four helpers -> mean 4.0
    write(
        dir.path(),
        "repositories/user.ts",
        "export function query() { find(); findAll(); save(); remove(); }\n",
    );
    write(
        dir.path(),
        "db/ops.ts",
        "export function find() {}\nexport function findAll() {}\nexport function save() {}\nexport function remove() {}\n",
    );
    let analysis = analyze(dir.path(), &StagemapConfig::default(), None).unwrap();
    let layout = analysis.layout(&LayoutConfig::default(), None);

    let controllers = layout.group("controllers").unwrap();
    let repositories = layout.group("repositories").unwrap();
    assert_eq!(controllers.mean_out_degree, 1.0);
    assert_eq!(repositories.mean_out_degree, 4.0);
    assert!(controllers.x < repositories.x);
    assert!(controllers.index < repositories.index);
    // db calls nothing, so it is the leftmost lane.
    assert_eq!(layout.groups[0].name, "db");
}

#[test]
fn forty_entities_pack_into_three_columns() {
    let dir = TempDir::new().unwrap();
    let src: String = (0..40).map(|i| format!("export function f{i}() {{}}\n")).collect();
    write(dir.path(), "big/many.ts", &src);
    let analysis = analyze(dir.path(), &StagemapConfig::default(), None).unwrap();
    let layout = analysis.layout(&LayoutConfig::default(), None);

    let group = layout.group("big").unwrap();
    assert_eq!(group.column_count, 3);
    assert_eq!(layout.column(group.index, 0).len(), 15);
    assert_eq!(layout.column(group.index, 1).len(), 15);
    assert_eq!(layout.column(group.index, 2).len(), 10);
}

// ---- failure policy ----

#[test]
fn broken_files_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ok.ts", "export function fine() { other(); }\nfunction other() {}\n");
    write(dir.path(), "broken.ts", "export function ( {\n");
    let recorder = Recorder::default();
    let analysis = analyze(dir.path(), &StagemapConfig::default(), Some(&recorder)).unwrap();

    assert_eq!(analysis.stats.files_parsed, 1);
    assert_eq!(analysis.failures.len(), 1);
    assert_eq!(analysis.failures[0].path, "broken.ts");
    assert_eq!(analysis.failures[0].code, "PARSE_ERROR");
    assert_eq!(analysis.graph.entity_count(), 2);
    assert_eq!(*recorder.failed.lock().unwrap(), vec!["broken.ts"]);
    assert_eq!(*recorder.parsed.lock().unwrap(), vec!["ok.ts"]);
    assert_eq!(*recorder.built.lock().unwrap(), Some((2, 1)));
}

#[test]
fn events_bracket_the_scan_in_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ok.ts", "export function fine() {}\n");
    write(dir.path(), "broken.ts", "export function ( {\n");
    let recorder = Recorder::default();
    analyze(dir.path(), &StagemapConfig::default(), Some(&recorder)).unwrap();

    let order = recorder.order.lock().unwrap().clone();
    assert_eq!(order.len(), 5);
    assert_eq!(order[0], "started");
    let mut per_file = order[1..3].to_vec();
    per_file.sort_unstable();
    assert_eq!(per_file, vec!["failed", "parsed"]);
    assert_eq!(&order[3..], &["complete", "built"]);

    let complete = recorder.complete.lock().unwrap().clone().unwrap();
    assert_eq!(complete.files_discovered, 2);
    assert_eq!(complete.files_parsed, 1);
    assert_eq!(complete.files_failed, 1);
}

#[test]
fn lenient_parsing_keeps_partial_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "partial.js", "function good() { helper(); }\nfunction helper() {}\nfunction ( {\n");
    let mut config = StagemapConfig::default();
    config.scan.strict_parse = Some(false);
    let analysis = analyze(dir.path(), &config, None).unwrap();
    assert!(analysis.failures.is_empty());
    assert!(analysis.graph.contains("partial.js:good:1"));
}

#[test]
fn oversized_files_are_reported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "huge.js", &"// padding\n".repeat(100));
    let mut config = StagemapConfig::default();
    config.scan.max_file_size = Some(64);
    let analysis = analyze(dir.path(), &config, None).unwrap();
    assert_eq!(analysis.failures.len(), 1);
    assert!(analysis.failures[0].message.contains("too large"));
}

#[test]
fn unreadable_root_is_the_only_fatal_error() {
    let dir = TempDir::new().unwrap();
    let err = analyze(&dir.path().join("missing"), &StagemapConfig::default(), None).unwrap_err();
    assert!(matches!(err, PipelineError::Scan(ScanError::RootUnreadable { .. })));
    assert_eq!(err.error_code(), "ROOT_UNREADABLE");
}

#[test]
fn invalid_config_is_rejected_before_scanning() {
    let dir = TempDir::new().unwrap();
    let mut config = StagemapConfig::default();
    config.layout.max_nodes_per_column = 0;
    let err = analyze(dir.path(), &config, None).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}

// ---- ignore policy ----

#[test]
fn tests_declarations_and_dependencies_are_ignored() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/app.ts", "export function app() {}\n");
    write(dir.path(), "src/app.test.ts", "function testApp() {}\n");
    write(dir.path(), "src/types.d.ts", "declare function typed(): void;\n");
    write(dir.path(), "node_modules/lib/index.js", "function dep() {}\n");
    write(dir.path(), "dist/app.js", "function built() {}\n");

    let analysis = analyze(dir.path(), &StagemapConfig::default(), None).unwrap();
    let paths: Vec<_> = analysis.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["src/app.ts"]);

    let mut config = StagemapConfig::default();
    config.scan.include_tests = Some(true);
    let with_tests = analyze(dir.path(), &config, None).unwrap();
    assert_eq!(with_tests.files.len(), 2);
}

// ---- determinism and snapshots ----

#[test]
fn repeated_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    for i in 0..12 {
        write(
            dir.path(),
            &format!("m{}/f{i}.ts", i % 3),
            &format!("export function f{i}() {{ f{}(); f{}(); }}\n", (i + 1) % 12, (i + 5) % 12),
        );
    }
    let mut config = StagemapConfig::default();
    config.scan.threads = Some(3);
    let first = analyze(dir.path(), &config, None).unwrap();
    let second = analyze(dir.path(), &StagemapConfig::default(), None).unwrap();
    assert_eq!(first.graph.edges(), second.graph.edges());

    let la = first.layout(&LayoutConfig::default(), None);
    let lb = second.layout(&LayoutConfig::default(), None);
    assert_eq!(la, lb);
}

#[test]
fn snapshot_carries_files_and_round_trips() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "api/users.ts", "export const getUser = async (id: string) => load(id);\nfunction load(id) {}\n");
    let analysis = analyze(dir.path(), &StagemapConfig::default(), None).unwrap();

    let snapshot = analysis.snapshot();
    assert_eq!(snapshot.files.len(), 1);
    assert_eq!(snapshot.files[0].entity_count, 2);
    assert_eq!(snapshot.files[0].content_hash.len(), 16);
    assert!(snapshot.diagnostics.is_some());

    let json = snapshot.to_json().unwrap();
    let restored = GraphSnapshot::from_json(&json).unwrap();
    assert_eq!(restored, snapshot);
    let graph = Graph::from_snapshot(&restored).unwrap();
    assert_eq!(graph.edges(), analysis.graph.edges());
    assert_eq!(graph.get("api/users.ts:getUser:1").unwrap().parameters, vec!["id"]);
}

#[test]
fn entry_point_callers_raise_risk() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.js", "function main() { step(); }\nfunction step() { leaf(); }\nfunction leaf() {}\n");
    let analysis = analyze(dir.path(), &StagemapConfig::default(), None).unwrap();
    let impact = analysis.impact(&Default::default());
    let report = impact.impact("app.js:leaf:3").unwrap();
    assert_eq!(report.entry_point_ancestors, vec!["app.js:main:1"]);
    assert_eq!(report.risk.level, RiskLevel::Medium);
}
