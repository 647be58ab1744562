//! The weighted graph (C1) and the degree-descending reorderer (C2).

/// An immutable, dense, symmetric weighted graph with `O(1)` edge lookup.
///
/// Constructed once per run (after reordering, if enabled) and shared
/// read-only across every thread and every worker process.
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    weights: Vec<i64>,
}

impl Graph {
    /// Builds a graph from a row-major `n*n` matrix. The matrix is expected
    /// to already be validated (symmetric, zero diagonal, nonnegative) by
    /// the caller (`graph_io` does this for file input).
    pub fn new(n: usize, weights: Vec<i64>) -> Self {
        debug_assert_eq!(weights.len(), n * n, "matrix must have exactly n*n entries");
        Graph { n, weights }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns `w(i, j)`. Panics (a programming error, not a user error) if
    /// `i` or `j` is out of range.
    #[inline]
    pub fn w(&self, i: usize, j: usize) -> i64 {
        debug_assert!(i < self.n && j < self.n);
        self.weights[i * self.n + j]
    }

    /// The weighted degree `d(i) = sum_j w(i, j)`, used by the reorderer and
    /// as a general diagnostic.
    pub fn weighted_degree(&self, i: usize) -> i64 {
        (0..self.n).map(|j| self.w(i, j)).sum()
    }

    /// Total cut weight of a complete assignment, i.e. the sum of `w(i, j)`
    /// over every pair with differing labels. Used by `InitialBound` and by
    /// tests that brute-force small instances.
    pub fn cut_weight(&self, in_x: &[bool]) -> i64 {
        debug_assert_eq!(in_x.len(), self.n);
        let mut total = 0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if in_x[i] != in_x[j] {
                    total += self.w(i, j);
                }
            }
        }
        total
    }

    /// Exposes the raw row-major matrix, e.g. for broadcasting to worker
    /// processes.
    pub fn matrix(&self) -> &[i64] {
        &self.weights
    }
}

/// Computes the permutation that sorts vertices by descending weighted
/// degree (ties broken by ascending original index, for a stable result)
/// and returns the physically relabeled matrix: `new[i][j] = old[perm[i]][perm[j]]`.
///
/// This is C2. The permutation itself is not returned to callers beyond
/// tests: the optimum cut weight is permutation-invariant, so nothing
/// downstream needs to map labels back to the original vertex numbering.
pub fn reorder_by_degree(n: usize, matrix: &[i64]) -> Vec<i64> {
    debug_assert_eq!(matrix.len(), n * n);

    let degree = |i: usize| -> i64 { (0..n).map(|j| matrix[i * n + j]).sum() };

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| degree(b).cmp(&degree(a)).then(a.cmp(&b)));

    let mut reordered = vec![0i64; n * n];
    for i in 0..n {
        for j in 0..n {
            reordered[i * n + j] = matrix[order[i] * n + order[j]];
        }
    }
    reordered
}
