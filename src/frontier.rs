//! C6: materializes the DFS tree down to a fixed depth as an explicit,
//! bound-independent list of [`Task`]s, sorted ascending by `cutSoFar` so
//! the ThreadPool (and the Coordinator, across processes) dispatch the most
//! promising work first.
//!
//! Grounded on `original_source/.../mpi_main_2.cpp::generatePartialSolutions`,
//! which performs the same fixed-depth expansion before handing tasks to
//! MPI workers. Expansion here is bound-independent on purpose (§4.5): it
//! must produce the same frontier regardless of what the monitor currently
//! holds, so that a frontier computed once up front can be split across
//! worker processes that haven't yet seen each other's progress.

use bitset_fixed::BitSet;

use crate::graph::Graph;
use crate::task::Task;

/// Expands the root task to `depth` (or to completion, if the graph has
/// fewer than `depth` vertices), returning every task reachable that is
/// still feasible against `a`. Infeasible branches (not enough remaining
/// capacity on either side) are pruned during expansion, not after.
pub fn generate(graph: &Graph, a: usize, depth: usize) -> Vec<Task> {
    let n = graph.n();
    let depth = depth.min(n);
    let mut out = Vec::new();
    let mut labels = BitSet::new(n);
    expand(graph, a, n, depth, 0, 0, 0, &mut labels, &mut out);
    out.sort_by_key(|t| t.cut_so_far);
    out
}

#[allow(clippy::too_many_arguments)]
fn expand(
    graph: &Graph,
    a: usize,
    n: usize,
    depth: usize,
    node: usize,
    size_x: usize,
    cut_so_far: i64,
    labels: &mut BitSet,
    out: &mut Vec<Task>,
) {
    if node == depth {
        out.push(Task { node, size_x, cut_so_far, labels: crate::labels::to_bools(labels, n) });
        return;
    }

    let rem_x = a - size_x;
    let rem_y = (n - a) - (node - size_x);

    let (cost_x, cost_y) = crate::bound::cost_pair(graph, labels, node, node);

    if rem_x > 0 {
        labels.set(node, true);
        expand(graph, a, n, depth, node + 1, size_x + 1, cut_so_far + cost_x, labels, out);
    }
    if rem_y > 0 {
        labels.set(node, false);
        expand(graph, a, n, depth, node + 1, size_x, cut_so_far + cost_y, labels, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_graph() -> Graph {
        Graph::new(4, vec![
            0, 1, 2, 3,
            1, 0, 4, 5,
            2, 4, 0, 6,
            3, 5, 6, 0,
        ])
    }

    #[test]
    fn frontier_is_sorted_ascending_by_cut_so_far() {
        let g = small_graph();
        let tasks = generate(&g, 2, 3);
        assert!(!tasks.is_empty());
        for w in tasks.windows(2) {
            assert!(w[0].cut_so_far <= w[1].cut_so_far);
        }
    }

    #[test]
    fn every_task_respects_remaining_capacity() {
        let g = small_graph();
        let a = 2;
        let n = g.n();
        let tasks = generate(&g, a, 3);
        for t in &tasks {
            let size_x = t.labels[..t.node].iter().filter(|&&x| x).count();
            assert_eq!(size_x, t.size_x);
            assert!(t.size_x <= a);
            assert!(t.node - t.size_x <= n - a);
        }
    }

    #[test]
    fn depth_beyond_n_expands_to_completion() {
        let g = small_graph();
        let tasks = generate(&g, 2, 100);
        for t in &tasks {
            assert_eq!(t.node, g.n());
        }
    }

    #[test]
    fn frontier_covers_the_same_space_as_a_direct_count() {
        // a=2 out of n=4: C(4,2) = 6 complete labelings total, so depth=4
        // (full expansion) must yield exactly 6 tasks.
        let g = small_graph();
        let tasks = generate(&g, 2, 4);
        assert_eq!(tasks.len(), 6);
    }
}
