//! C5: the sequential depth-first branch-and-bound engine. Given a single
//! [`Task`], explores every completion of its partial assignment, pruning
//! against the shared [`BestCutMonitor`] and publishing any strict
//! improvement it finds.
//!
//! Grounded on `original_source/.../mpi_main_2.cpp::dfsParallel` /
//! `dfsSequential` for the branch/bound/backtrack shape. Unlike that code,
//! which clones the label vector on every recursive call, this engine
//! mutates a single owned `BitSet` buffer in place and overwrites it again
//! on the way back up — there is nothing to undo explicitly, since every
//! branch sets `labels[node]` before it recurses.

use bitset_fixed::BitSet;

use crate::bound::{lower_bound_delta, lower_bound_independent};
use crate::graph::Graph;
use crate::monitor::BestCutMonitor;
use crate::task::Task;

/// Which admissible bound formulation to prune with. Delta is tighter but
/// costs an allocation per node; independent is cheaper per node but prunes
/// less. Exposed so callers (and benchmarks) can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Independent,
    Delta,
}

impl BoundKind {
    /// The `--bound` CLI spelling, used by the Coordinator to forward its
    /// own bound choice to spawned worker processes.
    pub fn as_str(self) -> &'static str {
        match self {
            BoundKind::Independent => "independent",
            BoundKind::Delta => "delta",
        }
    }
}

/// Runs one task to completion. Returns the number of DFS nodes visited
/// (the recursion count, a diagnostic per §8).
pub fn run(graph: &Graph, a: usize, task: &Task, monitor: &BestCutMonitor, bound_kind: BoundKind) -> u64 {
    let n = graph.n();
    let mut labels = crate::labels::from_bools(&task.labels);
    let mut nodes = 0u64;
    recurse(
        graph,
        a,
        n,
        task.node,
        task.size_x,
        task.cut_so_far,
        &mut labels,
        monitor,
        bound_kind,
        &mut nodes,
    );
    nodes
}

#[allow(clippy::too_many_arguments)]
fn recurse(
    graph: &Graph,
    a: usize,
    n: usize,
    node: usize,
    size_x: usize,
    cut_so_far: i64,
    labels: &mut BitSet,
    monitor: &BestCutMonitor,
    bound_kind: BoundKind,
    nodes: &mut u64,
) {
    *nodes += 1;

    if node == n {
        monitor.offer(cut_so_far, || crate::monitor::witness_from_complete(labels, n));
        return;
    }

    let lb = match bound_kind {
        BoundKind::Independent => lower_bound_independent(graph, node, size_x, labels, a),
        BoundKind::Delta => lower_bound_delta(graph, node, size_x, labels, a),
    };
    if cut_so_far + lb >= monitor.best() {
        return;
    }

    let rem_x = a - size_x;
    let rem_y = (n - a) - (node - size_x);
    let can_x = rem_x > 0;
    let can_y = rem_y > 0;

    let (cost_x, cost_y) = crate::bound::cost_pair(graph, labels, node, node);

    // X is always tried before Y: the degree-descending reorder (C2) means
    // early vertices carry the heaviest edges, so admitting them into X
    // first tightens cut_so_far fastest for the vertices that follow.
    if can_x {
        labels.set(node, true);
        recurse(graph, a, n, node + 1, size_x + 1, cut_so_far + cost_x, labels, monitor, bound_kind, nodes);
    }
    if can_y {
        labels.set(node, false);
        recurse(graph, a, n, node + 1, size_x, cut_so_far + cost_y, labels, monitor, bound_kind, nodes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_best(graph: &Graph, a: usize) -> i64 {
        let n = graph.n();
        let mut best = i64::MAX;
        for mask in 0u32..(1 << n) {
            if (mask.count_ones() as usize) != a {
                continue;
            }
            let in_x: Vec<bool> = (0..n).map(|i| (mask >> i) & 1 == 1).collect();
            best = best.min(graph.cut_weight(&in_x));
        }
        best
    }

    fn solves_to_optimum(graph: &Graph, a: usize, bound_kind: BoundKind) {
        let n = graph.n();
        let monitor = BestCutMonitor::new(i64::MAX, vec![false; n]);
        let task = Task::root(n);
        run(graph, a, &task, &monitor, bound_kind);
        assert_eq!(monitor.best(), brute_force_best(graph, a));
    }

    #[test]
    fn finds_optimal_cut_on_small_instance_with_both_bounds() {
        // A 4-cycle with one heavy diagonal, a=2.
        let g = Graph::new(4, vec![
            0, 1, 9, 1,
            1, 0, 1, 9,
            9, 1, 0, 1,
            1, 9, 1, 0,
        ]);
        solves_to_optimum(&g, 2, BoundKind::Independent);
        solves_to_optimum(&g, 2, BoundKind::Delta);
    }

    #[test]
    fn matches_brute_force_on_random_small_graphs() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..20 {
            let n = rng.random_range(3..8);
            let a = rng.random_range(1..n);
            let mut m = vec![0i64; n * n];
            for i in 0..n {
                for j in (i + 1)..n {
                    let w = rng.random_range(0..10);
                    m[i * n + j] = w;
                    m[j * n + i] = w;
                }
            }
            let g = Graph::new(n, m);
            solves_to_optimum(&g, a, BoundKind::Independent);
            solves_to_optimum(&g, a, BoundKind::Delta);
        }
    }

    #[test]
    fn resuming_from_a_partial_task_matches_full_search() {
        let g = Graph::new(4, vec![
            0, 2, 4, 1,
            2, 0, 3, 5,
            4, 3, 0, 2,
            1, 5, 2, 0,
        ]);
        let monitor_full = BestCutMonitor::new(i64::MAX, vec![false; 4]);
        run(&g, 2, &Task::root(4), &monitor_full, BoundKind::Independent);

        // Manually fix vertex 0 into X, then hand off the rest as a task.
        let monitor_resumed = BestCutMonitor::new(i64::MAX, vec![false; 4]);
        let task = Task { node: 1, size_x: 1, cut_so_far: 0, labels: vec![true, false, false, false] };
        run(&g, 2, &task, &monitor_resumed, BoundKind::Independent);

        assert!(monitor_resumed.best() >= monitor_full.best());
    }
}
