//! Typed errors for the input, protocol and (at the very top) CLI boundaries.
//!
//! The search itself (`DFSEngine`) cannot fail: every error this crate can
//! produce originates either from parsing untrusted external input (a graph
//! file, a subset size) or from the multi-process wire protocol.

use thiserror::Error;

/// Errors surfaced while reading or validating a graph file and the
/// command-line arguments that describe the problem instance.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("could not open graph file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("graph file {path} does not start with a valid vertex count")]
    MissingVertexCount { path: String },
    #[error("graph file {path} contains a non-integer token: {token:?}")]
    NotAnInteger { path: String, token: String },
    #[error("graph file {path} declares n = {n}, but n must be > 0")]
    NonPositiveN { path: String, n: i64 },
    #[error(
        "graph file {path} has only {found} matrix entries, expected {expected} (n*n)"
    )]
    TruncatedMatrix {
        path: String,
        found: usize,
        expected: usize,
    },
    #[error("graph file {path} has a negative edge weight w({i},{j}) = {value}")]
    NegativeWeight {
        path: String,
        i: usize,
        j: usize,
        value: i64,
    },
    #[error("graph file {path} is not symmetric: w({i},{j}) = {wij} but w({j},{i}) = {wji}")]
    NotSymmetric {
        path: String,
        i: usize,
        j: usize,
        wij: i64,
        wji: i64,
    },
    #[error("graph file {path} has a nonzero diagonal entry w({i},{i}) = {value}")]
    NonzeroDiagonal { path: String, i: usize, value: i64 },
    #[error("subset size must satisfy 0 < a < n, got a = {a}, n = {n}")]
    TrivialSubsetSize { a: usize, n: usize },
}

/// Errors from the multi-process master/worker protocol (§6, §7). All of
/// them are fatal: there is no retry path for a CPU-bound job.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("failed to spawn worker process {rank}: {source}")]
    Spawn {
        rank: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write message to worker {rank}: {source}")]
    Send {
        rank: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read message from worker {rank}: {source}")]
    Recv {
        rank: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("worker {rank} sent a truncated message: expected {expected} integers, got {found}")]
    Truncated {
        rank: usize,
        expected: usize,
        found: usize,
    },
    #[error("worker {rank} sent a malformed integer token: {token:?}")]
    Malformed { rank: usize, token: String },
    #[error("worker {rank} exited before replying (status: {status})")]
    WorkerExited { rank: usize, status: String },
    #[error("worker {rank} sent an unexpected duplicate reply")]
    DuplicateReply { rank: usize },
}

/// The error type returned by `main`; every fallible top-level operation
/// funnels into one of these two variants so that `main` has a single place
/// that maps errors to a diagnostic and `exit(1)`.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
