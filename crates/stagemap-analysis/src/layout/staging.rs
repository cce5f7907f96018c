//! Topological stage assignment.
//!
//! `stage(e) = 1 + max(stage(d))` over the distinct callees `d` of `e`, and
//! 0 for entities calling nothing. Computed with an iterative DFS (roots and
//! callees visited in id order). A callee still on the DFS stack closes a
//! cycle: it contributes nothing, and the caller takes its running maximum
//! plus one.

use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::call_graph::Graph;

/// Stage per node index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Staging {
    /// Indexed by `NodeIndex::index()`.
    pub stages: Vec<usize>,
    /// Edges found closing a cycle.
    pub cycle_edges: usize,
}

impl Staging {
    pub fn stage(&self, idx: NodeIndex) -> usize {
        self.stages.get(idx.index()).copied().unwrap_or(0)
    }

    /// Highest stage + 1, or 0 for an empty graph.
    pub fn stage_count(&self) -> usize {
        self.stages.iter().max().map_or(0, |m| m + 1)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

struct Frame {
    node: NodeIndex,
    deps: Vec<NodeIndex>,
    next: usize,
    max_dep: usize,
}

pub fn assign_stages(graph: &Graph) -> Staging {
    let n = graph.entity_count();
    let mut stages = vec![0usize; n];
    let mut marks = vec![Mark::Unvisited; n];
    let mut cycle_edges = 0;

    let by_id = |nodes: &mut Vec<NodeIndex>| {
        nodes.sort_by(|&a, &b| graph.node(a).id.cmp(&graph.node(b).id));
    };
    let frame = |node: NodeIndex| {
        let mut deps: Vec<NodeIndex> = graph.neighbors(node, Direction::Outgoing).collect();
        by_id(&mut deps);
        Frame {
            node,
            deps,
            next: 0,
            max_dep: 0,
        }
    };

    let mut roots: Vec<NodeIndex> = graph.node_indices().collect();
    by_id(&mut roots);

    for root in roots {
        if marks[root.index()] != Mark::Unvisited {
            continue;
        }
        marks[root.index()] = Mark::InProgress;
        let mut stack = vec![frame(root)];

        while let Some(top) = stack.last_mut() {
            if top.next < top.deps.len() {
                let dep = top.deps[top.next];
                top.next += 1;
                match marks[dep.index()] {
                    Mark::Done => top.max_dep = top.max_dep.max(stages[dep.index()]),
                    Mark::InProgress => cycle_edges += 1,
                    Mark::Unvisited => {
                        marks[dep.index()] = Mark::InProgress;
                        stack.push(frame(dep));
                    }
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let stage = if done.deps.is_empty() { 0 } else { done.max_dep + 1 };
            stages[done.node.index()] = stage;
            marks[done.node.index()] = Mark::Done;
            if let Some(parent) = stack.last_mut() {
                parent.max_dep = parent.max_dep.max(stage);
            }
        }
    }

    if cycle_edges > 0 {
        tracing::debug!(cycle_edges, "cycles broken during staging");
    }
    Staging { stages, cycle_edges }
}
