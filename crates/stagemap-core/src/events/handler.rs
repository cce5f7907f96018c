//! AnalysisEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Receives progress notifications from an analysis run.
///
/// Handlers only override the events they care about. `on_file_parsed` and
/// `on_parse_failure` may be called from parser worker threads, hence
/// `Send + Sync`.
pub trait AnalysisEventHandler: Send + Sync {
    fn on_scan_started(&self, _event: &ScanStartedEvent) {}
    fn on_file_parsed(&self, _event: &FileParsedEvent) {}
    fn on_parse_failure(&self, _event: &ParseFailureEvent) {}
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {}
    fn on_graph_built(&self, _event: &GraphBuiltEvent) {}
    fn on_layout_complete(&self, _event: &LayoutCompleteEvent) {}
}

/// Handler that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl AnalysisEventHandler for NoopHandler {}
