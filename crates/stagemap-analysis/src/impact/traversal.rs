//! Breadth-first transitive closure over call edges.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use petgraph::Direction;
use stagemap_core::types::collections::FxHashSet;

use super::types::TraversalDirection;
use crate::call_graph::Graph;

/// Every node reachable from `start` in `direction`, in BFS order.
///
/// Cycle-safe via a visited set. `start` itself is never part of the
/// result, even when a cycle leads back to it. `max_depth` bounds the
/// number of hops; `None` is unbounded.
pub fn reachable(
    graph: &Graph,
    start: NodeIndex,
    direction: TraversalDirection,
    max_depth: Option<u32>,
) -> Vec<NodeIndex> {
    let dir = match direction {
        TraversalDirection::Upstream => Direction::Incoming,
        TraversalDirection::Downstream => Direction::Outgoing,
    };
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut queue = VecDeque::from([(start, 0u32)]);
    let mut result = Vec::new();

    while let Some((node, depth)) = queue.pop_front() {
        if max_depth.is_some_and(|max| depth >= max) {
            continue;
        }
        for next in graph.neighbors(node, dir) {
            if visited.insert(next) {
                result.push(next);
                queue.push_back((next, depth + 1));
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_graph::{CallGraphBuilder, Graph};
    use crate::parsers::SourceParser;

    fn graph(src: &str) -> Graph {
        let mut parser = SourceParser::new(true);
        let file = parser.parse_str("a.js", ".", src).unwrap();
        CallGraphBuilder::default().build_from_files(&[file]).0
    }

    fn names(g: &Graph, nodes: &[NodeIndex]) -> Vec<String> {
        let mut out: Vec<String> = nodes.iter().map(|&n| g.node(n).name.clone()).collect();
        out.sort();
        out
    }

    #[test]
    fn chain_in_both_directions() {
        let g = graph("function A() { B(); }\nfunction B() { C(); }\nfunction C() {}\n");
        let a = g.index_of("a.js:A:1").unwrap();
        let c = g.index_of("a.js:C:3").unwrap();
        assert_eq!(names(&g, &reachable(&g, a, TraversalDirection::Downstream, None)), vec!["B", "C"]);
        assert_eq!(names(&g, &reachable(&g, c, TraversalDirection::Upstream, None)), vec!["A", "B"]);
        assert!(reachable(&g, a, TraversalDirection::Upstream, None).is_empty());
    }

    #[test]
    fn cycles_terminate_and_exclude_the_start() {
        let g = graph("function A() { B(); }\nfunction B() { A(); }\n");
        let a = g.index_of("a.js:A:1").unwrap();
        assert_eq!(names(&g, &reachable(&g, a, TraversalDirection::Upstream, None)), vec!["B"]);
        assert_eq!(names(&g, &reachable(&g, a, TraversalDirection::Downstream, None)), vec!["B"]);
    }

    #[test]
    fn depth_limit() {
        let g = graph("function A() { B(); }\nfunction B() { C(); }\nfunction C() {}\n");
        let a = g.index_of("a.js:A:1").unwrap();
        assert_eq!(names(&g, &reachable(&g, a, TraversalDirection::Downstream, Some(1))), vec!["B"]);
        assert!(reachable(&g, a, TraversalDirection::Downstream, Some(0)).is_empty());
    }
}
