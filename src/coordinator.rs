//! C8: the master/worker coordinator. With `processes <= 1` the whole
//! search runs in this process, using only the intra-process
//! [`crate::thread_pool`] (C7). With `processes > 1`, this process becomes
//! the master: it spawns `processes` genuine OS child processes
//! (re-invoking its own executable with a hidden worker flag) and drives a
//! dynamic dispatch loop over them.
//!
//! Grounded on `original_source/.../mpi_main_2.cpp::main`'s master/worker
//! dispatch loop (lines 313-377: one task per worker initially, then
//! send-on-reply carrying the refreshed bound, terminate with the `-1`
//! sentinel), reimplemented over `std::process::Command` and piped stdio
//! instead of MPI: no MPI binding exists anywhere in the retrieved corpus
//! (see `SPEC_FULL.md` §4.7). Since `std` alone has no portable "read from
//! whichever child replies first" primitive, each worker gets its own link
//! thread that owns its half of the pipe and funnels replies into a shared
//! `crossbeam-channel`; the dispatch loop itself just drains that channel,
//! which gives genuine race-the-first-responder semantics without a
//! fabricated async dependency.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use crossbeam_channel::{Receiver, Sender};

use crate::config::RunConfig;
use crate::dfs::BoundKind;
use crate::error::{ProtocolError, RunError};
use crate::frontier;
use crate::graph::Graph;
use crate::initial_bound;
use crate::monitor::BestCutMonitor;
use crate::task::Task;
use crate::thread_pool;
use crate::wire::{self, DecodeError};

fn to_protocol_error(rank: usize, err: DecodeError) -> ProtocolError {
    match err {
        DecodeError::Truncated { expected, found } => ProtocolError::Truncated { rank, expected, found },
        DecodeError::Malformed { token } => ProtocolError::Malformed { rank, token },
    }
}

fn write_message(writer: &mut impl Write, rank: usize, ints: &[i64]) -> Result<(), ProtocolError> {
    writeln!(writer, "{}", wire::encode_line(ints)).map_err(|e| ProtocolError::Send { rank, source: e })
}

fn read_message(reader: &mut impl BufRead, rank: usize) -> Result<Vec<i64>, ProtocolError> {
    let mut line = String::new();
    let bytes = reader.read_line(&mut line).map_err(|e| ProtocolError::Recv { rank, source: e })?;
    if bytes == 0 {
        return Err(ProtocolError::WorkerExited { rank, status: "closed stdout before replying".to_string() });
    }
    wire::decode_line(line.trim()).map_err(|e| to_protocol_error(rank, e))
}

/// Runs the whole search, choosing the single- or multi-process path based
/// on `config.processes`. Returns the best cut weight and its witness.
pub fn run(graph: &Graph, config: &RunConfig) -> Result<(i64, Vec<bool>), RunError> {
    if config.processes <= 1 {
        return Ok(run_single_process(graph, config));
    }
    run_multi_process(graph, config)
}

fn run_single_process(graph: &Graph, config: &RunConfig) -> (i64, Vec<bool>) {
    let (guess_cut, guess_witness) =
        initial_bound::guesstimate_parallel(graph, config.a, config.guesstimate_tries, config.threads);
    let monitor = BestCutMonitor::new(guess_cut, guess_witness);
    let tasks = frontier::generate(graph, config.a, config.frontier_depth);
    thread_pool::run(graph, config.a, tasks, config.threads, &monitor, config.bound_kind);
    (monitor.best(), monitor.witness())
}

/// An instruction sent from the dispatch loop to a worker's link thread.
enum Instruction {
    /// Solve `Task` with the given `globalBound`, then reply.
    Task(Task, i64),
    /// No more work for this worker: send the sentinel and exit.
    Terminate,
}

/// What a link thread reports back to the dispatch loop.
enum WorkerEvent {
    Result { rank: usize, local_best_cut: i64, recursion_calls: u64, witness: Vec<bool> },
    Failed(ProtocolError),
}

/// Owns one child's stdin/stdout for its whole lifetime: relays each
/// `Instruction` from the dispatch loop onto the pipe and reports the reply
/// back over `events`. Runs on its own OS thread so the dispatch loop can
/// block on a single shared channel instead of polling every child in turn.
fn worker_link(
    rank: usize,
    mut child: Child,
    mut stdin: ChildStdin,
    stdout: ChildStdout,
    instructions: Receiver<Instruction>,
    events: Sender<WorkerEvent>,
) {
    let mut reader = BufReader::new(stdout);
    for instruction in instructions.iter() {
        match instruction {
            Instruction::Task(task, global_bound) => {
                let ints = wire::pack_task(&task, global_bound);
                if let Err(e) = write_message(&mut stdin, rank, &ints) {
                    let _ = events.send(WorkerEvent::Failed(e));
                    return;
                }
                let reply = match read_message(&mut reader, rank) {
                    Ok(ints) => ints,
                    Err(e) => {
                        let _ = events.send(WorkerEvent::Failed(e));
                        return;
                    }
                };
                match wire::unpack_result(&reply) {
                    Ok((local_best_cut, recursion_calls, witness)) => {
                        let _ = events.send(WorkerEvent::Result { rank, local_best_cut, recursion_calls, witness });
                    }
                    Err(e) => {
                        let _ = events.send(WorkerEvent::Failed(to_protocol_error(rank, e)));
                        return;
                    }
                }
            }
            Instruction::Terminate => {
                if let Err(e) = write_message(&mut stdin, rank, &wire::pack_termination()) {
                    let _ = events.send(WorkerEvent::Failed(e));
                    return;
                }
                drop(stdin);
                match child.wait() {
                    Ok(status) if !status.success() => {
                        let _ = events.send(WorkerEvent::Failed(ProtocolError::WorkerExited {
                            rank,
                            status: status.to_string(),
                        }));
                    }
                    Err(e) => {
                        let _ = events.send(WorkerEvent::Failed(ProtocolError::Recv { rank, source: e }));
                    }
                    Ok(_) => {}
                }
                return;
            }
        }
    }
}

/// Sends `rank` its next piece of work: the next queued task carrying the
/// current `global_bound`, or the termination sentinel if the queue is
/// empty (in which case `active` is decremented).
fn dispatch_next(queue: &mut VecDeque<Task>, tx: &Sender<Instruction>, global_bound: i64, active: &mut usize) {
    match queue.pop_front() {
        Some(task) => {
            let _ = tx.send(Instruction::Task(task, global_bound));
        }
        None => {
            let _ = tx.send(Instruction::Terminate);
            *active -= 1;
        }
    }
}

fn run_multi_process(graph: &Graph, config: &RunConfig) -> Result<(i64, Vec<bool>), RunError> {
    let mut queue: VecDeque<Task> = frontier::generate(graph, config.a, config.frontier_depth).into();
    let processes = config.processes;

    let current_exe = std::env::current_exe().map_err(|e| ProtocolError::Spawn { rank: 0, source: e })?;
    let broadcast = wire::pack_broadcast(graph);

    let mut workers = Vec::with_capacity(processes);
    for rank in 0..processes {
        let mut child = Command::new(&current_exe)
            .arg(&config.graph_path)
            .arg(config.a.to_string())
            .arg("--worker-threads")
            .arg(config.threads.to_string())
            .arg("--bound")
            .arg(config.bound_kind.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| ProtocolError::Spawn { rank, source: e })?;

        let mut stdin = child.stdin.take().expect("stdin was requested as piped");
        write_message(&mut stdin, rank, &broadcast)?;
        let stdout = child.stdout.take().expect("stdout was requested as piped");
        workers.push((rank, child, stdin, stdout));
    }

    let mut global_bound = i64::MAX;
    let mut best_witness = Vec::new();
    let mut total_recursion_calls = 0u64;

    let dispatch = std::thread::scope(|scope| -> Result<(), RunError> {
        let (events_tx, events_rx) = crossbeam_channel::unbounded::<WorkerEvent>();
        let mut instruction_txs = Vec::with_capacity(processes);

        for (rank, child, stdin, stdout) in workers {
            let (instr_tx, instr_rx) = crossbeam_channel::unbounded::<Instruction>();
            instruction_txs.push(instr_tx);
            let events_tx = events_tx.clone();
            scope.spawn(move || worker_link(rank, child, stdin, stdout, instr_rx, events_tx));
        }
        drop(events_tx);

        let mut active = processes;
        for tx in &instruction_txs {
            dispatch_next(&mut queue, tx, global_bound, &mut active);
        }

        while active > 0 {
            match events_rx.recv() {
                Ok(WorkerEvent::Result { rank, local_best_cut, recursion_calls, witness }) => {
                    total_recursion_calls += recursion_calls;
                    if local_best_cut < global_bound {
                        global_bound = local_best_cut;
                        best_witness = witness;
                    }
                    dispatch_next(&mut queue, &instruction_txs[rank], global_bound, &mut active);
                }
                Ok(WorkerEvent::Failed(err)) => {
                    for tx in &instruction_txs {
                        let _ = tx.send(Instruction::Terminate);
                    }
                    return Err(err.into());
                }
                Err(_) => break,
            }
        }
        Ok(())
    });
    dispatch?;

    log::debug!("total recursive calls across all worker processes: {total_recursion_calls}");
    Ok((global_bound, best_witness))
}

/// The worker side of the protocol: reads a broadcast graph, then loops
/// receiving one task at a time. Each task seeds a fresh monitor from the
/// `globalBound` carried on the wire, is solved to completion with the
/// intra-process [`crate::thread_pool`], and is replied to immediately —
/// one reply per task, never batched. Exits on the termination sentinel.
/// Entered by a child process spawned from [`run_multi_process`].
pub fn run_worker(a: usize, worker_threads: usize, bound_kind: BoundKind) -> Result<(), RunError> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    let broadcast_ints = read_message(&mut reader, 0)?;
    let graph = wire::unpack_broadcast(&broadcast_ints).map_err(|e| to_protocol_error(0, e))?;

    loop {
        let ints = read_message(&mut reader, 0)?;
        if wire::is_termination(&ints) {
            break;
        }
        let (task, global_bound) = wire::unpack_task(&ints).map_err(|e| to_protocol_error(0, e))?;

        let monitor = BestCutMonitor::new(global_bound, vec![false; graph.n()]);
        let stats = thread_pool::run(&graph, a, vec![task], worker_threads, &monitor, bound_kind);

        let reply = wire::pack_result(monitor.best(), stats.nodes_visited, &monitor.witness());
        write_message(&mut writer, 0, &reply)?;
        writer.flush().map_err(|e| ProtocolError::Send { rank: 0, source: e })?;
    }

    Ok(())
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
    fn single_process_path_matches_direct_thread_pool_run() {
        let g = small_graph();
        let config = RunConfig {
            graph_path: "unused".to_string(),
            a: 2,
            threads: 4,
            processes: 1,
            frontier_depth: 2,
            guesstimate_tries: 20,
            reorder: false,
            bound_kind: BoundKind::Independent,
        };
        let (cut, witness) = run(&g, &config).unwrap();
        assert_eq!(g.cut_weight(&witness), cut);
    }
}
