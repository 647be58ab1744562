//! C10: the command-line entry point. Parses arguments with `structopt`
//! (the teacher's own idiom, see its retired `xputils::Args`), sets up
//! `env_logger`-backed diagnostics the way `cde-ev-cdecao`'s binary does,
//! and either runs the whole search in this process or, for a worker
//! invocation, hands off to [`balanced_mincut::coordinator::run_worker`].

use std::time::Instant;

use peak_alloc::PeakAlloc;
use structopt::StructOpt;

use balanced_mincut::config::RunConfig;
use balanced_mincut::dfs::BoundKind;
use balanced_mincut::error::RunError;
use balanced_mincut::graph::{self, Graph};
use balanced_mincut::{coordinator, graph_io, monitor};

#[global_allocator]
static PEAK_ALLOC: PeakAlloc = PeakAlloc;

/// Parallel branch-and-bound solver for the balanced minimum edge cut of a
/// weighted complete graph.
#[derive(Debug, StructOpt)]
#[structopt(name = "balanced-mincut")]
struct Opt {
    /// Path to a graph file: `n` followed by `n*n` whitespace-separated
    /// integer edge weights (row-major, symmetric, zero diagonal).
    graph_file: String,

    /// Size of the `X` side of the partition; `0 < subset_size < n`.
    subset_size: usize,

    /// Worker threads per process. `0` defaults to the number of logical CPUs.
    #[structopt(long, default_value = "0")]
    threads: usize,

    /// Number of OS worker processes. `1` (the default) runs single-process.
    #[structopt(long, default_value = "1")]
    processes: usize,

    /// Depth to which the DFS frontier is materialized before dispatch.
    #[structopt(long, default_value = "3")]
    frontier_depth: usize,

    /// Number of random samples used to seed the initial feasible cut.
    #[structopt(long, default_value = "2000")]
    guesstimate_tries: usize,

    /// Skip the degree-descending vertex reordering heuristic.
    #[structopt(long)]
    no_reorder: bool,

    /// Which admissible bound to prune with.
    #[structopt(long, default_value = "delta")]
    bound: String,

    /// Internal: marks this invocation as a worker process spawned by the
    /// coordinator, carrying its thread count. Not for interactive use.
    #[structopt(long, hidden = true)]
    worker_threads: Option<usize>,
}

fn parse_bound_kind(s: &str) -> BoundKind {
    match s {
        "independent" => BoundKind::Independent,
        _ => BoundKind::Delta,
    }
}

fn try_run(opt: Opt) -> Result<(), RunError> {
    let bound_kind = parse_bound_kind(&opt.bound);

    if let Some(worker_threads) = opt.worker_threads {
        log::debug!("starting as a worker process with {worker_threads} threads");
        return coordinator::run_worker(opt.subset_size, worker_threads, bound_kind);
    }

    let mut graph = graph_io::load(&opt.graph_file)?;
    graph_io::validate_subset_size(opt.subset_size, graph.n())?;
    log::info!("loaded graph with n={} vertices from {}", graph.n(), opt.graph_file);

    if !opt.no_reorder {
        let reordered = graph::reorder_by_degree(graph.n(), graph.matrix());
        graph = Graph::new(graph.n(), reordered);
        log::debug!("reordered vertices by descending weighted degree");
    }

    let threads = if opt.threads == 0 { num_cpus::get() } else { opt.threads };
    let config = RunConfig {
        graph_path: opt.graph_file.clone(),
        a: opt.subset_size,
        threads,
        processes: opt.processes.max(1),
        frontier_depth: opt.frontier_depth,
        guesstimate_tries: opt.guesstimate_tries,
        reorder: !opt.no_reorder,
        bound_kind,
    };
    log::info!(
        "searching with a={}, threads={}, processes={}, frontier_depth={}",
        config.a, config.threads, config.processes, config.frontier_depth
    );

    let start = Instant::now();
    let (best_cut, witness) = coordinator::run(&graph, &config)?;
    let elapsed = start.elapsed();

    log::info!("best cut = {best_cut} (found in {elapsed:?})");
    log::info!("peak memory usage: {:.2} MB", PEAK_ALLOC.peak_usage_as_mb());

    println!("{best_cut}");
    println!("{}", monitor::render_witness(&witness));

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Opt::from_args();

    if let Err(err) = try_run(opt) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
