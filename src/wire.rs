//! C12: the flat, whitespace-separated ASCII integer wire codec used over
//! the worker processes' stdio pipes. Needs no serialization crate, since
//! every message is just a line of decimal integers terminated by a
//! newline — the same shape the graph file itself is already in.
//!
//! Message shapes, grounded on `original_source/.../mpi_main_2.cpp`'s MPI
//! buffer layouts:
//! - Broadcast: `1 + n*n` ints — `[n, w(0,0), w(0,1), ..., w(n-1,n-1)]`.
//! - Task: `4 + n` ints — `[node, cutSoFar, sizeX, globalBound, label_0, ..., label_{n-1}]`.
//! - Result: `2 + n` ints — `[localBestCut, recursionCalls, label_0, ..., label_{n-1}]`.
//! - Termination: the single-int sentinel `[-1]`, or any message whose
//!   first field is `-1`.

use crate::graph::Graph;
use crate::task::Task;

/// Decode-time failures, without the rank context only the Coordinator
/// knows. `coordinator.rs` wraps these into a [`crate::error::ProtocolError`]
/// by attaching the rank of the process the bad message came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    Truncated { expected: usize, found: usize },
    Malformed { token: String },
}

/// The sentinel that tells a worker there is no more work, recognized as
/// the first field of any message (not just the bare `[-1]` line).
pub const TERMINATE: i64 = -1;

/// Renders a row of integers as the wire's line format.
pub fn encode_line(ints: &[i64]) -> String {
    ints.iter().map(i64::to_string).collect::<Vec<_>>().join(" ")
}

/// Parses a wire line back into integers.
pub fn decode_line(line: &str) -> Result<Vec<i64>, DecodeError> {
    line.split_whitespace()
        .map(|tok| tok.parse::<i64>().map_err(|_| DecodeError::Malformed { token: tok.to_string() }))
        .collect()
}

pub fn pack_broadcast(graph: &Graph) -> Vec<i64> {
    let mut v = Vec::with_capacity(1 + graph.n() * graph.n());
    v.push(graph.n() as i64);
    v.extend_from_slice(graph.matrix());
    v
}

pub fn unpack_broadcast(ints: &[i64]) -> Result<Graph, DecodeError> {
    let n = *ints.first().ok_or(DecodeError::Truncated { expected: 1, found: 0 })? as usize;
    let expected = 1 + n * n;
    if ints.len() != expected {
        return Err(DecodeError::Truncated { expected, found: ints.len() });
    }
    Ok(Graph::new(n, ints[1..].to_vec()))
}

/// Packs `task` together with the `global_bound` it should carry, as
/// `[node, cutSoFar, sizeX, globalBound, labels...]`. `n` is never written
/// explicitly; it is implied by the message length.
pub fn pack_task(task: &Task, global_bound: i64) -> Vec<i64> {
    let n = task.n();
    let mut v = Vec::with_capacity(4 + n);
    v.push(task.node as i64);
    v.push(task.cut_so_far);
    v.push(task.size_x as i64);
    v.push(global_bound);
    v.extend(task.labels.iter().map(|&b| b as i64));
    v
}

/// Unpacks a Task message, returning the task alongside the `globalBound`
/// it carried.
pub fn unpack_task(ints: &[i64]) -> Result<(Task, i64), DecodeError> {
    if ints.len() < 4 {
        return Err(DecodeError::Truncated { expected: 4, found: ints.len() });
    }
    let node = ints[0] as usize;
    let cut_so_far = ints[1];
    let size_x = ints[2] as usize;
    let global_bound = ints[3];
    let labels = ints[4..].iter().map(|&x| x != 0).collect();
    Ok((Task { node, size_x, cut_so_far, labels }, global_bound))
}

/// Packs a Result message as `[localBestCut, recursionCalls, labels...]`.
pub fn pack_result(local_best_cut: i64, recursion_calls: u64, witness: &[bool]) -> Vec<i64> {
    let mut v = Vec::with_capacity(2 + witness.len());
    v.push(local_best_cut);
    v.push(recursion_calls as i64);
    v.extend(witness.iter().map(|&b| b as i64));
    v
}

/// Unpacks a Result message, returning `(localBestCut, recursionCalls, witness)`.
pub fn unpack_result(ints: &[i64]) -> Result<(i64, u64, Vec<bool>), DecodeError> {
    if ints.len() < 2 {
        return Err(DecodeError::Truncated { expected: 2, found: ints.len() });
    }
    let local_best_cut = ints[0];
    let recursion_calls = ints[1] as u64;
    let witness = ints[2..].iter().map(|&x| x != 0).collect();
    Ok((local_best_cut, recursion_calls, witness))
}

pub fn pack_termination() -> Vec<i64> {
    vec![TERMINATE]
}

/// True for the bare `[-1]` sentinel and for any longer message whose
/// first field is `-1` (both are valid termination encodings per §6).
pub fn is_termination(ints: &[i64]) -> bool {
    ints.first() == Some(&TERMINATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_round_trips() {
        let g = Graph::new(3, vec![0, 1, 2, 1, 0, 3, 2, 3, 0]);
        let ints = pack_broadcast(&g);
        let line = encode_line(&ints);
        let decoded_ints = decode_line(&line).unwrap();
        let decoded = unpack_broadcast(&decoded_ints).unwrap();
        assert_eq!(decoded.n(), g.n());
        assert_eq!(decoded.matrix(), g.matrix());
    }

    #[test]
    fn task_round_trips() {
        let task = Task { node: 2, size_x: 1, cut_so_far: 7, labels: vec![true, false, false, false] };
        let ints = pack_task(&task, 99);
        let line = encode_line(&ints);
        let decoded_ints = decode_line(&line).unwrap();
        let (decoded, global_bound) = unpack_task(&decoded_ints).unwrap();
        assert_eq!(decoded, task);
        assert_eq!(global_bound, 99);
    }

    #[test]
    fn result_round_trips() {
        let witness = vec![true, true, false, false];
        let ints = pack_result(42, 1337, &witness);
        let (cut, recursion_calls, decoded_witness) = unpack_result(&ints).unwrap();
        assert_eq!(cut, 42);
        assert_eq!(recursion_calls, 1337);
        assert_eq!(decoded_witness, witness);
    }

    #[test]
    fn termination_sentinel_is_recognized() {
        let ints = pack_termination();
        assert!(is_termination(&ints));
        assert!(!is_termination(&[0]));
        // A full-length message whose first field is -1 is also valid
        // termination per §6, not just the bare single-int sentinel.
        assert!(is_termination(&[-1, 0]));
    }

    #[test]
    fn truncated_task_is_rejected() {
        let err = unpack_task(&[0, 0, 0]).unwrap_err();
        assert_eq!(err, DecodeError::Truncated { expected: 4, found: 3 });
    }

    #[test]
    fn malformed_token_is_rejected() {
        let err = decode_line("1 2 notanumber 3").unwrap_err();
        assert_eq!(err, DecodeError::Malformed { token: "notanumber".to_string() });
    }
}
