//! Simplified crossing count and the bounded reversal pass that trims it.
//!
//! Two edges cross when their stage intervals overlap strictly and their
//! endpoints are vertically inverted: the edge that starts higher at the
//! low-stage end finishes lower at the high-stage end. It is a proxy for
//! drawn crossings, cheap enough to evaluate repeatedly.

/// An edge reduced to its two endpoints, low-stage end first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedEdge {
    pub low: usize,
    pub high: usize,
    pub low_stage: usize,
    pub high_stage: usize,
}

impl StagedEdge {
    /// Orient `(source, target)` by stage. Equal-stage edges (self-calls
    /// included) have an empty interval and can never cross.
    pub fn new(source: usize, target: usize, stages: &[usize]) -> Self {
        let (ss, ts) = (stages[source], stages[target]);
        if ss <= ts {
            Self { low: source, high: target, low_stage: ss, high_stage: ts }
        } else {
            Self { low: target, high: source, low_stage: ts, high_stage: ss }
        }
    }
}

fn crosses(a: &StagedEdge, b: &StagedEdge, ys: &[f64]) -> bool {
    if a.low_stage.max(b.low_stage) >= a.high_stage.min(b.high_stage) {
        return false;
    }
    (ys[a.low] - ys[b.low]) * (ys[a.high] - ys[b.high]) < 0.0
}

/// Pairwise crossing count. Quadratic in the edge count.
pub fn count_crossings(edges: &[StagedEdge], ys: &[f64]) -> usize {
    let mut count = 0;
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            if crosses(&edges[i], &edges[j], ys) {
                count += 1;
            }
        }
    }
    count
}

/// Crossings involving at least one `touched` edge (sorted, deduplicated).
fn local_crossings(edges: &[StagedEdge], touched: &[usize], is_touched: &[bool], ys: &[f64]) -> usize {
    let mut count = 0;
    for &i in touched {
        for (j, other) in edges.iter().enumerate() {
            // Pairs of touched edges are counted once, from the lower index.
            if j == i || (is_touched[j] && j < i) {
                continue;
            }
            if crosses(&edges[i], other, ys) {
                count += 1;
            }
        }
    }
    count
}

/// Outcome of [`reduce_crossings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reduction {
    pub before: usize,
    pub after: usize,
    pub reversals: usize,
    pub passes: usize,
}

/// A reversible slot: the runs of one (group, stage) pair, one run per
/// column, each listed top to bottom.
pub type Slot = Vec<Vec<usize>>;

/// Try reversing each slot's vertical order and keep a reversal only when
/// it strictly lowers the crossing count. Stops after a pass with no
/// improvement or after `max_passes`. Local search: the result is not a
/// global optimum.
pub fn reduce_crossings(edges: &[StagedEdge], ys: &mut [f64], slots: &[Slot], max_passes: usize) -> Reduction {
    let before = count_crossings(edges, ys);
    let mut current = before;
    let mut reversals = 0;
    let mut passes = 0;

    // Edge indices incident to each node.
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); ys.len()];
    for (i, e) in edges.iter().enumerate() {
        incident[e.low].push(i);
        if e.high != e.low {
            incident[e.high].push(i);
        }
    }
    let mut is_touched = vec![false; edges.len()];

    while passes < max_passes && current > 0 {
        passes += 1;
        let mut improved = false;

        for slot in slots {
            if slot.iter().all(|run| run.len() < 2) {
                continue;
            }
            let mut touched: Vec<usize> = slot
                .iter()
                .flatten()
                .flat_map(|&n| incident[n].iter().copied())
                .collect();
            touched.sort_unstable();
            touched.dedup();
            if touched.is_empty() {
                continue;
            }
            for &t in &touched {
                is_touched[t] = true;
            }

            let old_local = local_crossings(edges, &touched, &is_touched, ys);
            reverse_slot(slot, ys);
            let new_local = local_crossings(edges, &touched, &is_touched, ys);

            if new_local < old_local {
                current = current - old_local + new_local;
                reversals += 1;
                improved = true;
            } else {
                reverse_slot(slot, ys);
            }
            for &t in &touched {
                is_touched[t] = false;
            }
        }
        if !improved {
            break;
        }
    }

    Reduction {
        before,
        after: current,
        reversals,
        passes,
    }
}

/// Mirror each run's vertical positions. Applying it twice is the identity.
fn reverse_slot(slot: &Slot, ys: &mut [f64]) {
    for run in slot {
        let values: Vec<f64> = run.iter().map(|&n| ys[n]).collect();
        for (&node, &y) in run.iter().zip(values.iter().rev()) {
            ys[node] = y;
        }
    }
}
