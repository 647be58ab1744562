//! C9: reads and validates a graph file. The format is a vertex count `n`
//! followed by `n*n` whitespace-separated integers (row-major, symmetric,
//! zero diagonal, nonnegative) — the same shape the original program reads,
//! per `original_source/.../data/Graph.cpp`'s constructor, rewritten to
//! return a typed [`GraphError`] instead of throwing on malformed input.

use std::fs;

use crate::error::GraphError;
use crate::graph::Graph;

/// Reads and validates the graph at `path`.
pub fn load(path: &str) -> Result<Graph, GraphError> {
    let contents = fs::read_to_string(path).map_err(|e| GraphError::Io { path: path.to_string(), source: e })?;
    parse(&contents, path)
}

fn parse(contents: &str, path: &str) -> Result<Graph, GraphError> {
    let mut tokens = contents.split_whitespace();

    let n_tok = tokens.next().ok_or_else(|| GraphError::MissingVertexCount { path: path.to_string() })?;
    let n: i64 = n_tok
        .parse()
        .map_err(|_| GraphError::NotAnInteger { path: path.to_string(), token: n_tok.to_string() })?;
    if n <= 0 {
        return Err(GraphError::NonPositiveN { path: path.to_string(), n });
    }
    let n = n as usize;
    let expected = n * n;

    let mut matrix = Vec::with_capacity(expected);
    for tok in tokens {
        let v: i64 = tok
            .parse()
            .map_err(|_| GraphError::NotAnInteger { path: path.to_string(), token: tok.to_string() })?;
        matrix.push(v);
    }
    if matrix.len() != expected {
        return Err(GraphError::TruncatedMatrix { path: path.to_string(), found: matrix.len(), expected });
    }

    for i in 0..n {
        for j in 0..n {
            let v = matrix[i * n + j];
            if i == j {
                if v != 0 {
                    return Err(GraphError::NonzeroDiagonal { path: path.to_string(), i, value: v });
                }
                continue;
            }
            if v < 0 {
                return Err(GraphError::NegativeWeight { path: path.to_string(), i, j, value: v });
            }
            let vji = matrix[j * n + i];
            if v != vji {
                return Err(GraphError::NotSymmetric { path: path.to_string(), i, j, wij: v, wji: vji });
            }
        }
    }

    Ok(Graph::new(n, matrix))
}

/// Rejects the two trivial subset sizes (§9, resolved Open Question): `a=0`
/// puts every vertex in `Y`, `a=n` puts every vertex in `X`, and both make
/// the cut trivially zero regardless of the graph.
pub fn validate_subset_size(a: usize, n: usize) -> Result<(), GraphError> {
    if a == 0 || a >= n {
        return Err(GraphError::TrivialSubsetSize { a, n });
    }
    Ok(())
}
