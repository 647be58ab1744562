//! The resolved run configuration shared between `main.rs`'s CLI parsing
//! and the library-level orchestration code (`coordinator`, `frontier`,
//! ...). Kept as a plain struct, independent of `structopt`, so the library
//! half of this crate has no CLI dependency of its own.

use crate::dfs::BoundKind;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub graph_path: String,
    pub a: usize,
    pub threads: usize,
    pub processes: usize,
    pub frontier_depth: usize,
    pub guesstimate_tries: usize,
    pub reorder: bool,
    pub bound_kind: BoundKind,
}
