//! Shared best-cut state (§4.4): an atomic integer for lock-free reads, and
//! a mutex-guarded witness assignment that is only ever touched on the much
//! rarer improvement path.
//!
//! Grounded on the `Critical`/`Shared` split in the teacher's
//! `src/solver/barrier.rs` and on `cde-ev-cdecao/src/bab.rs`'s
//! `SharedState::best_score`, generalized here by pulling the hot integer
//! out from under the lock since the DFS engine reads it on every node.

use std::sync::atomic::{AtomicI64, Ordering};

use bitset_fixed::BitSet;
use parking_lot::Mutex;

/// The best cut weight found so far, plus the labeling that achieves it.
///
/// Reads of [`BestCutMonitor::best`] never block. Writes publish the pair
/// `(cut, witness)` together: the mutex is only taken when an improving cut
/// is found, which becomes rare as the search progresses.
pub struct BestCutMonitor {
    best: AtomicI64,
    witness: Mutex<Vec<bool>>,
}

impl BestCutMonitor {
    /// Starts the monitor at `initial`, the guesstimate feasible solution's
    /// cut weight (C3), paired with its witness.
    pub fn new(initial: i64, witness: Vec<bool>) -> Self {
        BestCutMonitor {
            best: AtomicI64::new(initial),
            witness: Mutex::new(witness),
        }
    }

    /// Lock-free read of the current best cut. Safe to call from the hot
    /// bound-comparison path on every DFS node.
    #[inline]
    pub fn best(&self) -> i64 {
        self.best.load(Ordering::Acquire)
    }

    /// Publishes `(cut, witness)` if `cut` improves on the current best.
    /// Uses a compare-and-swap loop so two threads racing to publish an
    /// improvement never lose the better of the two.
    ///
    /// `witness` is materialized lazily: the caller only builds it if this
    /// call ends up being the one that wins, via the passed-in closure.
    pub fn offer(&self, cut: i64, build_witness: impl FnOnce() -> Vec<bool>) -> bool {
        let mut current = self.best.load(Ordering::Acquire);
        loop {
            if cut >= current {
                return false;
            }
            match self.best.compare_exchange_weak(
                current,
                cut,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    let mut guard = self.witness.lock();
                    *guard = build_witness();
                    return true;
                }
                Err(actual) => current = actual,
            }
        }
    }

    /// Snapshot of the current best witness, for final reporting.
    pub fn witness(&self) -> Vec<bool> {
        self.witness.lock().clone()
    }
}

/// Renders a completed label assignment as an `X`/`Y` string, mirroring
/// [`crate::labels::render`] but over a plain `Vec<bool>` witness rather
/// than a `BitSet` in progress.
pub fn render_witness(witness: &[bool]) -> String {
    witness.iter().map(|&x| if x { 'X' } else { 'Y' }).collect()
}

/// Copies a fully-assigned label `BitSet` (`node == n`) out as an owned
/// witness for [`BestCutMonitor::offer`]. Thin wrapper over
/// [`crate::labels::to_bools`], kept here so callers in `dfs` don't need to
/// reach across modules for something this locally obvious.
pub fn witness_from_complete(labels: &BitSet, n: usize) -> Vec<bool> {
    crate::labels::to_bools(labels, n)
}
