//! C3: an initial feasible solution ("guesstimate") used to seed the
//! monitor before the search starts, so that early branches have something
//! real to prune against instead of `+infinity`.
//!
//! Grounded on `original_source/.../task/MinCutSolver.cpp::guesstimate`,
//! which repeatedly samples a random size-`a` subset and keeps the best cut
//! seen. That code shares one `std::rand()` generator across OpenMP tasks;
//! §9 calls this out as a bug. Here every thread gets its own `rand::rng()`
//! thread-local generator (never shared, never passed across a thread
//! boundary), per `rand`'s own thread-local idiom.

use rand::seq::SliceRandom;

use crate::graph::Graph;

/// Samples `tries` random size-`a` subsets of `{0, ..., n-1}` as `X`,
/// keeping the one with the smallest cut weight. Single-threaded; callers
/// wanting the parallel version call [`guesstimate_parallel`].
pub fn guesstimate(graph: &Graph, a: usize, tries: usize) -> (i64, Vec<bool>) {
    let n = graph.n();
    let mut rng = rand::rng();
    let mut order: Vec<usize> = (0..n).collect();

    let mut best_cut = i64::MAX;
    let mut best_in_x = vec![false; n];

    for _ in 0..tries.max(1) {
        order.shuffle(&mut rng);
        let mut in_x = vec![false; n];
        for &v in &order[..a] {
            in_x[v] = true;
        }
        let cut = graph.cut_weight(&in_x);
        if cut < best_cut {
            best_cut = cut;
            best_in_x = in_x;
        }
    }

    (best_cut, best_in_x)
}

/// Splits `tries` samples evenly across `threads` worker threads, each with
/// its own RNG, and returns the global best. Falls back to the
/// single-threaded path when `threads <= 1`.
pub fn guesstimate_parallel(graph: &Graph, a: usize, tries: usize, threads: usize) -> (i64, Vec<bool>) {
    if threads <= 1 {
        return guesstimate(graph, a, tries);
    }

    let per_thread = (tries / threads).max(1);
    let mut results: Vec<(i64, Vec<bool>)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| scope.spawn(|| guesstimate(graph, a, per_thread)))
            .collect();
        handles.into_iter().map(|h| h.join().expect("guesstimate worker panicked")).collect()
    });

    results.sort_by_key(|(cut, _)| *cut);
    results.into_iter().next().expect("threads > 1 implies at least one result")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph(n: usize) -> Graph {
        let mut m = vec![0i64; n * n];
        for i in 0..n - 1 {
            m[i * n + i + 1] = 1;
            m[(i + 1) * n + i] = 1;
        }
        Graph::new(n, m)
    }

    #[test]
    fn guesstimate_respects_subset_size() {
        let g = line_graph(6);
        let (_, in_x) = guesstimate(&g, 2, 50);
        assert_eq!(in_x.iter().filter(|&&x| x).count(), 2);
    }

    #[test]
    fn more_tries_never_gets_worse() {
        let g = line_graph(8);
        let (cut_few, _) = guesstimate(&g, 3, 1);
        let (cut_many, _) = guesstimate(&g, 3, 500);
        assert!(cut_many <= cut_few);
    }

    #[test]
    fn parallel_guesstimate_matches_subset_size_and_cut_weight() {
        let g = line_graph(10);
        let (cut, in_x) = guesstimate_parallel(&g, 4, 200, 4);
        assert_eq!(in_x.iter().filter(|&&x| x).count(), 4);
        assert_eq!(g.cut_weight(&in_x), cut);
    }
}
